//! Entity use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points that log each outcome.
//! - Export and import repository snapshots through a codec.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Repository errors are returned unchanged after logging.
//! - Snapshot import is all-or-nothing.

use crate::model::entity::{EntityId, Identified, Stocked};
use crate::model::field::{EntityField, Quantity};
use crate::repo::entity_repo::{EntityRepository, RepoError, RepoResult};
use crate::snapshot::codec::{SnapshotCodec, SnapshotError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by service-level operations.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    Snapshot(SnapshotError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Snapshot(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SnapshotError> for ServiceError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Use-case service wrapper for one repository.
pub struct EntityService<T, R> {
    repo: R,
    label: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R> EntityService<T, R>
where
    T: Identified + Clone,
    R: EntityRepository<T>,
{
    /// Creates a service; `label` names the collection in log lines.
    pub fn new(repo: R, label: &'static str) -> Self {
        Self {
            repo,
            label,
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    pub fn add(&mut self, entity: T) -> RepoResult<()> {
        let id = entity.id();
        let result = self.repo.add(entity);
        self.log_outcome("entity_add", id, &result);
        result
    }

    pub fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        let result = self.repo.get_by_id(id);
        if let Err(err) = &result {
            debug!(
                "event=entity_get module=service status=error collection={} id={} error={}",
                self.label, id, err
            );
        }
        result
    }

    pub fn remove_by_id(&mut self, id: EntityId) -> RepoResult<T> {
        let result = self.repo.remove_by_id(id);
        self.log_outcome("entity_remove", id, &result);
        result
    }

    pub fn update_field<F>(&mut self, id: EntityId, field: &F, value: F::Value) -> RepoResult<()>
    where
        F: EntityField<T>,
    {
        let result = self.repo.update_field(id, field, value);
        match &result {
            Ok(()) => info!(
                "event=entity_update module=service status=ok collection={} id={} field={}",
                self.label,
                id,
                field.name()
            ),
            Err(err) => warn!(
                "event=entity_update module=service status=error collection={} id={} field={} error={}",
                self.label,
                id,
                field.name(),
                err
            ),
        }
        result
    }

    pub fn update_quantity(&mut self, id: EntityId, quantity: i64) -> RepoResult<()>
    where
        T: Stocked,
    {
        self.update_field(id, &Quantity, quantity)
    }

    pub fn get_all(&self) -> Vec<T> {
        self.repo.get_all()
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    /// Encodes the current contents with `codec`.
    pub fn export_snapshot<C>(&self, codec: &C) -> ServiceResult<Vec<u8>>
    where
        C: SnapshotCodec<T>,
    {
        let entities = self.repo.get_all();
        let bytes = codec.save(&entities)?;
        info!(
            "event=snapshot_export module=service status=ok collection={} count={} bytes={}",
            self.label,
            entities.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Decodes `bytes` and adds every entity, or none of them.
    ///
    /// Returns the number of entities added.
    ///
    /// # Errors
    /// - `Snapshot(Decode)` when `bytes` cannot be decoded.
    /// - `Repo(DuplicateIdentity)` when an id repeats inside the payload or is
    ///   already stored; the repository is left unchanged.
    pub fn import_snapshot<C>(&mut self, codec: &C, bytes: &[u8]) -> ServiceResult<usize>
    where
        C: SnapshotCodec<T>,
    {
        let entities = match codec.load(bytes) {
            Ok(entities) => entities,
            Err(err) => {
                warn!(
                    "event=snapshot_import module=service status=error collection={} error={}",
                    self.label, err
                );
                return Err(err.into());
            }
        };

        let count = match self.repo.add_all(entities) {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    "event=snapshot_import module=service status=error collection={} error={}",
                    self.label, err
                );
                return Err(err.into());
            }
        };

        info!(
            "event=snapshot_import module=service status=ok collection={} count={}",
            self.label, count
        );
        Ok(count)
    }

    fn log_outcome<V>(&self, event: &str, id: EntityId, result: &Result<V, RepoError>) {
        match result {
            Ok(_) => info!(
                "event={} module=service status=ok collection={} id={}",
                event, self.label, id
            ),
            Err(err) => warn!(
                "event={} module=service status=error collection={} id={} error={}",
                event, self.label, id, err
            ),
        }
    }
}
