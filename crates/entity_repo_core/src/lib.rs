//! Generic in-memory entity repository core.
//! This crate is the single source of truth for identity and field invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod snapshot;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::entity::{EntityId, Identified, Stocked};
pub use model::field::{EntityField, FieldValidationError, Quantity, QUANTITY_FIELD};
pub use model::stock_item::StockItem;
pub use repo::entity_repo::{EntityRepository, InMemoryRepository, RepoError, RepoResult};
pub use repo::shared_repo::SharedRepository;
pub use service::entity_service::{EntityService, ServiceError, ServiceResult};
pub use snapshot::codec::{
    CodecFailure, JsonSnapshotCodec, SnapshotCodec, SnapshotError, SnapshotResult,
};
pub use snapshot::file::{read_snapshot_file, write_snapshot_file};

/// Minimal health-check API for linkage smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
