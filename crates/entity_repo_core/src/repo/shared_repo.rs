//! Lock-guarded repository handle for callers on several threads.
//!
//! # Responsibility
//! - Serialize every read and write through one mutex.
//! - Hand out owned copies only; the guarded map never escapes the lock.
//!
//! # Invariants
//! - Each operation acquires the lock exactly once and completes before
//!   releasing it.
//! - Clones of the handle share the same underlying repository.

use crate::model::entity::{EntityId, Identified, Stocked};
use crate::model::field::{EntityField, Quantity};
use crate::repo::entity_repo::{EntityRepository, InMemoryRepository, RepoResult};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle over one `InMemoryRepository`.
#[derive(Debug)]
pub struct SharedRepository<T> {
    inner: Arc<Mutex<InMemoryRepository<T>>>,
}

impl<T> Clone for SharedRepository<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedRepository<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(InMemoryRepository::default())),
        }
    }
}

impl<T: Identified + Clone> From<InMemoryRepository<T>> for SharedRepository<T> {
    fn from(repo: InMemoryRepository<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(repo)),
        }
    }
}

impl<T: Identified + Clone> SharedRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, entity: T) -> RepoResult<()> {
        self.inner.lock().add(entity)
    }

    /// Checks and inserts the whole batch under one lock acquisition, so no
    /// other handle can interleave a conflicting add.
    pub fn add_all(&self, entities: Vec<T>) -> RepoResult<usize> {
        self.inner.lock().add_all(entities)
    }

    pub fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        self.inner.lock().get_by_id(id)
    }

    pub fn remove_by_id(&self, id: EntityId) -> RepoResult<T> {
        self.inner.lock().remove_by_id(id)
    }

    pub fn update_field<F>(&self, id: EntityId, field: &F, value: F::Value) -> RepoResult<()>
    where
        F: EntityField<T>,
    {
        self.inner.lock().update_field(id, field, value)
    }

    pub fn update_quantity(&self, id: EntityId, quantity: i64) -> RepoResult<()>
    where
        T: Stocked,
    {
        self.update_field(id, &Quantity, quantity)
    }

    /// Clones all entities while holding the lock.
    pub fn get_all(&self) -> Vec<T> {
        self.inner.lock().get_all()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.inner.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs a read-only closure against a consistent view of the repository.
    ///
    /// The closure runs under the lock; keep it short and do not call back
    /// into this handle from inside it.
    pub fn with_read<R>(&self, read: impl FnOnce(&InMemoryRepository<T>) -> R) -> R {
        let guard = self.inner.lock();
        read(&guard)
    }

    /// Unwraps the repository when this is the last handle.
    ///
    /// Returns the handle back when other clones are still alive.
    pub fn try_into_inner(self) -> Result<InMemoryRepository<T>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T: Identified + Clone> EntityRepository<T> for SharedRepository<T> {
    fn add(&mut self, entity: T) -> RepoResult<()> {
        SharedRepository::add(self, entity)
    }

    fn add_all(&mut self, entities: Vec<T>) -> RepoResult<usize> {
        SharedRepository::add_all(self, entities)
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        SharedRepository::get_by_id(self, id)
    }

    fn remove_by_id(&mut self, id: EntityId) -> RepoResult<T> {
        SharedRepository::remove_by_id(self, id)
    }

    fn update_field<F>(&mut self, id: EntityId, field: &F, value: F::Value) -> RepoResult<()>
    where
        F: EntityField<T>,
    {
        SharedRepository::update_field(self, id, field, value)
    }

    fn get_all(&self) -> Vec<T> {
        SharedRepository::get_all(self)
    }

    fn contains(&self, id: EntityId) -> bool {
        SharedRepository::contains(self, id)
    }

    fn len(&self) -> usize {
        SharedRepository::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedRepository;
    use crate::model::stock_item::StockItem;
    use crate::repo::entity_repo::{EntityRepository, InMemoryRepository, RepoError};

    fn restock<R: EntityRepository<StockItem>>(repo: &mut R) -> Result<usize, RepoError> {
        let added = repo.add_all(vec![
            StockItem::new(10, "Milk", 1).expect("valid"),
            StockItem::new(11, "Eggs", 2).expect("valid"),
        ])?;
        repo.update_quantity(10, 4)?;
        repo.remove_by_id(11)?;
        Ok(added)
    }

    #[test]
    fn clones_share_state() {
        let repo = SharedRepository::new();
        let other = repo.clone();
        repo.add(StockItem::new(1, "Laptop", 10).expect("valid"))
            .expect("first add");

        assert!(other.contains(1));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn trait_calls_reach_the_shared_state() {
        let shared = SharedRepository::new();
        let mut handle = shared.clone();

        assert_eq!(restock(&mut handle), Ok(2));
        assert_eq!(shared.with_read(|inner| inner.ids()), vec![10]);
        assert_eq!(EntityRepository::len(&handle), 1);
        assert!(!EntityRepository::is_empty(&handle));
        assert_eq!(
            EntityRepository::get_by_id(&handle, 11).unwrap_err(),
            RepoError::NotFound(11)
        );
    }

    #[test]
    fn try_into_inner_requires_last_handle() {
        let repo: SharedRepository<StockItem> = InMemoryRepository::new().into();
        let other = repo.clone();

        let repo = repo.try_into_inner().expect_err("clone still alive");
        drop(other);
        let inner = repo.try_into_inner().expect("last handle");
        assert!(inner.ids().is_empty());
    }

    #[test]
    fn with_read_sees_consistent_view() {
        let repo = SharedRepository::new();
        repo.add(StockItem::new(2, "Bread", 75).expect("valid"))
            .expect("add");

        let (ids, name) = repo.with_read(|inner| {
            (
                inner.ids(),
                inner.get(2).map(|item| item.name().to_string()),
            )
        });
        assert_eq!(ids, vec![2]);
        assert_eq!(name, Ok("Bread".to_string()));
        assert_eq!(repo.get_by_id(3).unwrap_err(), RepoError::NotFound(3));
    }
}
