//! Entity repository contract and single-owner in-memory implementation.
//!
//! # Responsibility
//! - Provide add/get/remove/update/list over entities keyed by `EntityId`.
//! - Report each violation as its own `RepoError` variant.
//!
//! # Invariants
//! - `add` never overwrites an existing entity.
//! - `update_field` checks existence, then the field domain, then assigns.
//! - `get_all` returns entities in ascending id order.

use crate::model::entity::{EntityId, Identified, Stocked};
use crate::model::field::{EntityField, FieldValidationError, Quantity};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository operation errors. None of them leave the repository unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// `add` was called with an id that is already stored.
    DuplicateIdentity(EntityId),
    /// Lookup, removal, or update referenced an absent id.
    NotFound(EntityId),
    /// Proposed field value violates the field's domain.
    InvalidValue(FieldValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateIdentity(id) => write!(f, "entity already exists: {id}"),
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::InvalidValue(err) => write!(f, "invalid value: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValue(err) => Some(err),
            Self::DuplicateIdentity(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<FieldValidationError> for RepoError {
    fn from(value: FieldValidationError) -> Self {
        Self::InvalidValue(value)
    }
}

/// Repository interface for keyed entity CRUD.
pub trait EntityRepository<T: Identified + Clone> {
    /// Inserts a new entity.
    ///
    /// # Errors
    /// - `DuplicateIdentity` when `entity.id()` is already stored; the stored
    ///   value is kept.
    fn add(&mut self, entity: T) -> RepoResult<()>;

    /// Inserts every entity of `entities`, or none of them.
    ///
    /// Returns the number of entities added.
    ///
    /// # Errors
    /// - `DuplicateIdentity` for the first id that repeats inside the batch or
    ///   is already stored; the repository is left unchanged.
    fn add_all(&mut self, entities: Vec<T>) -> RepoResult<usize>;

    /// Returns a copy of the entity stored under `id`.
    fn get_by_id(&self, id: EntityId) -> RepoResult<T>;

    /// Removes and returns the entity stored under `id`.
    fn remove_by_id(&mut self, id: EntityId) -> RepoResult<T>;

    /// Validates `value` against `field` and assigns it to the entity under `id`.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent, checked before the value.
    /// - `InvalidValue` when the field domain rejects `value`; nothing changes.
    fn update_field<F>(&mut self, id: EntityId, field: &F, value: F::Value) -> RepoResult<()>
    where
        F: EntityField<T>;

    /// Returns an owned snapshot of all entities in ascending id order.
    fn get_all(&self) -> Vec<T>;

    fn contains(&self, id: EntityId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shorthand for `update_field(id, &Quantity, quantity)`.
    fn update_quantity(&mut self, id: EntityId, quantity: i64) -> RepoResult<()>
    where
        T: Stocked,
    {
        self.update_field(id, &Quantity, quantity)
    }
}

/// Single-owner repository backed by an ordered map.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    entities: BTreeMap<EntityId, T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }
}

impl<T: Identified + Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from decoded or seeded entities.
    ///
    /// Fails on the first id that repeats an earlier one.
    pub fn from_entities(entities: impl IntoIterator<Item = T>) -> RepoResult<Self> {
        let mut repo = Self::new();
        repo.add_all(entities.into_iter().collect())?;
        Ok(repo)
    }

    /// Borrows the entity stored under `id` without cloning it.
    pub fn get(&self, id: EntityId) -> RepoResult<&T> {
        self.entities.get(&id).ok_or(RepoError::NotFound(id))
    }

    /// Stored ids in ascending order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Iterates stored entities in ascending id order by shared reference.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entities.values()
    }
}

impl<T: Identified + Clone> EntityRepository<T> for InMemoryRepository<T> {
    fn add(&mut self, entity: T) -> RepoResult<()> {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return Err(RepoError::DuplicateIdentity(id));
        }

        self.entities.insert(id, entity);
        Ok(())
    }

    fn add_all(&mut self, entities: Vec<T>) -> RepoResult<usize> {
        let mut seen = BTreeSet::new();
        let conflict = entities
            .iter()
            .map(Identified::id)
            .find(|id| !seen.insert(*id) || self.entities.contains_key(id));
        if let Some(id) = conflict {
            return Err(RepoError::DuplicateIdentity(id));
        }

        let count = entities.len();
        self.entities
            .extend(entities.into_iter().map(|entity| (entity.id(), entity)));
        Ok(count)
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        self.get(id).cloned()
    }

    fn remove_by_id(&mut self, id: EntityId) -> RepoResult<T> {
        self.entities.remove(&id).ok_or(RepoError::NotFound(id))
    }

    fn update_field<F>(&mut self, id: EntityId, field: &F, value: F::Value) -> RepoResult<()>
    where
        F: EntityField<T>,
    {
        let entity = self.entities.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        field.validate(&value)?;
        field.assign(entity, value);
        Ok(())
    }

    fn get_all(&self) -> Vec<T> {
        self.entities.values().cloned().collect()
    }

    fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityRepository, InMemoryRepository, RepoError};
    use crate::model::field::FieldValidationError;
    use crate::model::stock_item::StockItem;
    use std::error::Error;

    fn item(id: i64, quantity: i64) -> StockItem {
        StockItem::new(id, format!("item-{id}"), quantity).expect("valid stock item")
    }

    #[test]
    fn from_entities_rejects_repeated_id() {
        let err = InMemoryRepository::from_entities(vec![item(1, 1), item(2, 2), item(1, 3)])
            .unwrap_err();
        assert_eq!(err, RepoError::DuplicateIdentity(1));
    }

    #[test]
    fn add_all_is_all_or_nothing() {
        let mut repo = InMemoryRepository::from_entities(vec![item(2, 1)]).expect("seed");

        let err = repo.add_all(vec![item(5, 1), item(2, 9)]).unwrap_err();
        assert_eq!(err, RepoError::DuplicateIdentity(2));
        assert_eq!(repo.ids(), vec![2]);

        let err = repo.add_all(vec![item(6, 1), item(6, 2)]).unwrap_err();
        assert_eq!(err, RepoError::DuplicateIdentity(6));
        assert_eq!(repo.ids(), vec![2]);

        assert_eq!(repo.add_all(vec![item(7, 1), item(3, 1)]), Ok(2));
        assert_eq!(repo.ids(), vec![2, 3, 7]);
    }

    #[test]
    fn get_borrows_and_ids_are_sorted() {
        let repo = InMemoryRepository::from_entities(vec![item(9, 1), item(3, 1), item(5, 1)])
            .expect("distinct ids");
        assert_eq!(repo.ids(), vec![3, 5, 9]);
        assert_eq!(repo.get(5).expect("present").name(), "item-5");
        assert_eq!(repo.get(4).unwrap_err(), RepoError::NotFound(4));
        assert_eq!(repo.iter().count(), 3);
    }

    #[test]
    fn error_messages_and_sources_are_stable() {
        assert_eq!(
            RepoError::DuplicateIdentity(7).to_string(),
            "entity already exists: 7"
        );
        assert_eq!(RepoError::NotFound(7).to_string(), "entity not found: 7");

        let invalid = RepoError::from(FieldValidationError::Negative {
            field: "quantity",
            value: -2,
        });
        assert_eq!(
            invalid.to_string(),
            "invalid value: quantity cannot be negative (got -2)"
        );
        assert!(invalid.source().is_some());
        assert!(RepoError::NotFound(1).source().is_none());
    }

    #[test]
    fn update_quantity_checks_existence_before_value() {
        let mut repo: InMemoryRepository<StockItem> = InMemoryRepository::new();
        assert_eq!(
            repo.update_quantity(5, -1).unwrap_err(),
            RepoError::NotFound(5)
        );
        assert!(repo.is_empty());
    }
}
