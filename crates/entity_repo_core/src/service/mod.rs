//! Use-case services over entity repositories.
//!
//! # Responsibility
//! - Wrap repository calls with outcome logging.
//! - Connect repositories to snapshot codecs for export and import.

pub mod entity_service;
