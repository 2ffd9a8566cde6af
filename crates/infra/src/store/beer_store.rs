use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use thiserror::Error;

use beerstock_core::{BeerId, DomainError, DomainResult};
use beerstock_inventory::{Beer, NewBeer};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Insert refused: another record already holds this name.
    #[error("duplicate beer name: {0}")]
    DuplicateName(String),

    /// No record with the requested identifier.
    #[error("record not found")]
    Missing,

    /// The domain refused the change; nothing was committed.
    #[error("change rejected: {0}")]
    Rejected(#[source] DomainError),

    /// The backing storage failed (connectivity, corruption, poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Record store for stocked beers.
///
/// Every method is atomic at the single-record level. `update` and `insert`
/// hold exclusive access across their check and their commit, so concurrent
/// writers against the same record are serialized.
pub trait BeerStore: Send + Sync {
    /// Persist a new record, assigning its identifier and registration time.
    fn insert(&self, beer: NewBeer) -> StoreResult<Beer>;
    fn find_by_id(&self, id: BeerId) -> StoreResult<Option<Beer>>;
    fn find_by_name(&self, name: &str) -> StoreResult<Option<Beer>>;
    fn list_all(&self) -> StoreResult<Vec<Beer>>;
    /// Returns `false` when no record had this identifier.
    fn delete_by_id(&self, id: BeerId) -> StoreResult<bool>;
    /// Apply `change` to the record and commit it only if `change` succeeds.
    fn update(
        &self,
        id: BeerId,
        change: &mut dyn FnMut(&mut Beer) -> DomainResult<()>,
    ) -> StoreResult<Beer>;
}

impl<S> BeerStore for Arc<S>
where
    S: BeerStore + ?Sized,
{
    fn insert(&self, beer: NewBeer) -> StoreResult<Beer> {
        (**self).insert(beer)
    }

    fn find_by_id(&self, id: BeerId) -> StoreResult<Option<Beer>> {
        (**self).find_by_id(id)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Beer>> {
        (**self).find_by_name(name)
    }

    fn list_all(&self) -> StoreResult<Vec<Beer>> {
        (**self).list_all()
    }

    fn delete_by_id(&self, id: BeerId) -> StoreResult<bool> {
        (**self).delete_by_id(id)
    }

    fn update(
        &self,
        id: BeerId,
        change: &mut dyn FnMut(&mut Beer) -> DomainResult<()>,
    ) -> StoreResult<Beer> {
        (**self).update(id, change)
    }
}

#[derive(Debug, Default)]
struct Records {
    beers: BTreeMap<BeerId, Beer>,
    last_id: i64,
}

/// In-memory store for tests/dev.
///
/// Identifiers come from a monotonic counter and are never handed out twice,
/// even after the record holding them is deleted. Listing is in id order,
/// which is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBeerStore {
    inner: RwLock<Records>,
}

impl InMemoryBeerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Records>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("beer store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Records>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("beer store lock poisoned".to_string()))
    }
}

impl BeerStore for InMemoryBeerStore {
    fn insert(&self, beer: NewBeer) -> StoreResult<Beer> {
        let mut records = self.write()?;

        if records.beers.values().any(|b| b.name() == beer.name) {
            return Err(StoreError::DuplicateName(beer.name));
        }

        let id = BeerId::new(records.last_id + 1);
        let stored = Beer::register(id, beer, Utc::now()).map_err(StoreError::Rejected)?;
        records.last_id = id.get();
        records.beers.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: BeerId) -> StoreResult<Option<Beer>> {
        Ok(self.read()?.beers.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Beer>> {
        Ok(self
            .read()?
            .beers
            .values()
            .find(|b| b.name() == name)
            .cloned())
    }

    fn list_all(&self) -> StoreResult<Vec<Beer>> {
        Ok(self.read()?.beers.values().cloned().collect())
    }

    fn delete_by_id(&self, id: BeerId) -> StoreResult<bool> {
        Ok(self.write()?.beers.remove(&id).is_some())
    }

    fn update(
        &self,
        id: BeerId,
        change: &mut dyn FnMut(&mut Beer) -> DomainResult<()>,
    ) -> StoreResult<Beer> {
        let mut records = self.write()?;
        let current = records.beers.get(&id).ok_or(StoreError::Missing)?;

        // Work on a copy so a refused change never touches the stored record.
        let mut next = current.clone();
        change(&mut next).map_err(StoreError::Rejected)?;

        records.beers.insert(id, next.clone());
        Ok(next)
    }
}
