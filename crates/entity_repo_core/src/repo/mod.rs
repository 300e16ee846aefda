//! Repository contracts and in-memory implementations.
//!
//! # Responsibility
//! - Define the keyed CRUD contract shared by every entity type.
//! - Own the authoritative copy of each stored entity.
//!
//! # Invariants
//! - At most one entity per id.
//! - Field updates validate before mutating; rejected updates leave state untouched.
//! - Enumeration returns owned snapshots, never the live mapping.
//! - Repositories never log or retry; callers own those decisions.

pub mod entity_repo;
pub mod shared_repo;
