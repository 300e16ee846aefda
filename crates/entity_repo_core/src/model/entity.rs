//! Identity capability for repository entities.

/// Caller-assigned identity key, unique within one repository instance.
pub type EntityId = i64;

/// Capability required of every value stored in a repository.
///
/// # Invariants
/// - `id()` returns the same value for the whole lifetime of the entity.
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// Entities carrying a stock quantity that may change after creation.
///
/// Used by the built-in `Quantity` field descriptor.
pub trait Stocked: Identified {
    fn quantity(&self) -> i64;
    fn set_quantity(&mut self, quantity: i64);
}
