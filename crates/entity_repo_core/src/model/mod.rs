//! Entity domain model shared by every repository instance.
//!
//! # Responsibility
//! - Define the identity capability every stored record must expose.
//! - Describe mutable fields and their domain constraints.
//!
//! # Invariants
//! - Every entity is identified by a caller-assigned `EntityId`.
//! - Identity never changes while an entity is owned by a repository.

pub mod entity;
pub mod field;
pub mod stock_item;
