//! Mutable field descriptors and their validation errors.
//!
//! # Responsibility
//! - Name one mutable field of an entity type.
//! - Check a proposed value against the field's domain before assignment.
//!
//! # Invariants
//! - `assign` is only reached after `validate` accepted the same value.

use crate::model::entity::Stocked;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Domain constraint violation for one proposed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Value must be zero or greater.
    Negative { field: &'static str, value: i64 },
    /// Text value must contain at least one non-whitespace character.
    Blank { field: &'static str },
}

impl FieldValidationError {
    /// Name of the field whose constraint was violated.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Negative { field, .. } | Self::Blank { field } => field,
        }
    }
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative { field, value } => {
                write!(f, "{field} cannot be negative (got {value})")
            }
            Self::Blank { field } => write!(f, "{field} cannot be blank"),
        }
    }
}

impl Error for FieldValidationError {}

/// Descriptor for one validated, mutable field of `T`.
///
/// Repositories call `validate` first and `assign` only on success, so an
/// implementation never sees a value its own domain rejects.
pub trait EntityField<T> {
    type Value;

    /// Stable field name used in error messages and log lines.
    fn name(&self) -> &'static str;

    fn validate(&self, value: &Self::Value) -> Result<(), FieldValidationError>;

    fn assign(&self, entity: &mut T, value: Self::Value);
}

/// Stock quantity of any `Stocked` entity. Domain: `value >= 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quantity;

/// Field name reported by the `Quantity` descriptor.
pub const QUANTITY_FIELD: &str = "quantity";

impl<T: Stocked> EntityField<T> for Quantity {
    type Value = i64;

    fn name(&self) -> &'static str {
        QUANTITY_FIELD
    }

    fn validate(&self, value: &i64) -> Result<(), FieldValidationError> {
        ensure_non_negative(QUANTITY_FIELD, *value)
    }

    fn assign(&self, entity: &mut T, value: i64) {
        entity.set_quantity(value);
    }
}

/// Shared check for counters that cannot drop below zero.
pub fn ensure_non_negative(field: &'static str, value: i64) -> Result<(), FieldValidationError> {
    if value < 0 {
        return Err(FieldValidationError::Negative { field, value });
    }
    Ok(())
}

/// Shared check for required text fields.
pub fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::Blank { field });
    }
    Ok(())
}
