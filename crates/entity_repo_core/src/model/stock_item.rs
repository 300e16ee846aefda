//! Stock item record used by inventory-style repositories.
//!
//! # Responsibility
//! - Provide a ready-made `Identified + Stocked` entity with a stable
//!   serialized shape.
//!
//! # Invariants
//! - `name` is never blank.
//! - `quantity` is never negative, including after deserialization.

use crate::model::entity::{EntityId, Identified, Stocked};
use crate::model::field::{ensure_non_negative, ensure_not_blank, FieldValidationError};
use serde::{Deserialize, Serialize};

/// Inventory record keyed by a caller-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StockItemWire")]
pub struct StockItem {
    id: EntityId,
    name: String,
    quantity: i64,
    /// Manufacturer or supplier label, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
}

impl StockItem {
    /// Creates a validated stock item.
    ///
    /// # Errors
    /// - `Blank` when `name` is empty or whitespace.
    /// - `Negative` when `quantity < 0`.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        quantity: i64,
    ) -> Result<Self, FieldValidationError> {
        let item = Self {
            id,
            name: name.into(),
            quantity,
            brand: None,
        };
        item.validate()?;
        Ok(item)
    }

    /// Attaches a brand label.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_non_negative("quantity", self.quantity)
    }
}

impl Identified for StockItem {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Stocked for StockItem {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

#[derive(Deserialize)]
struct StockItemWire {
    id: EntityId,
    name: String,
    quantity: i64,
    #[serde(default)]
    brand: Option<String>,
}

impl TryFrom<StockItemWire> for StockItem {
    type Error = FieldValidationError;

    fn try_from(wire: StockItemWire) -> Result<Self, Self::Error> {
        let item = Self {
            id: wire.id,
            name: wire.name,
            quantity: wire.quantity,
            brand: wire.brand,
        };
        item.validate()?;
        Ok(item)
    }
}
