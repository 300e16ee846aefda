//! Snapshot export/import port for repository contents.
//!
//! # Responsibility
//! - Turn an enumerated repository snapshot into bytes and back.
//! - Keep file I/O out of repository operations.
//!
//! # Invariants
//! - Decoding never yields an entity its own deserializer rejects.
//! - A missing snapshot file is reported, not silently treated as empty.

pub mod codec;
pub mod file;
