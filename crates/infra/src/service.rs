//! Inventory service: business rules on top of a [`BeerStore`].
//!
//! Every mutation has the same shape:
//!
//! ```text
//! read current state
//!   ↓
//! evaluate one guard (uniqueness, existence, capacity, stock)
//!   ↓
//! commit through the store
//! ```
//!
//! Quantity changes run their guard inside [`BeerStore::update`], so the check
//! and the write are a single atomic step against other writers. The service
//! itself holds no mutable state and can be shared freely behind an `Arc`.

use thiserror::Error;
use tracing::{info, warn};

use beerstock_core::{BeerId, DomainError};
use beerstock_inventory::{Beer, NewBeer};

use crate::store::{BeerStore, StoreError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Expected business outcome (already exists, not found, capacity, stock).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store itself failed; propagated unchanged, never retried.
    #[error("store failure: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(name) => ServiceError::Domain(DomainError::AlreadyExists(name)),
            StoreError::Missing => ServiceError::Domain(DomainError::NotFound),
            StoreError::Rejected(e) => ServiceError::Domain(e),
            other @ StoreError::Unavailable(_) => ServiceError::Store(other),
        }
    }
}

/// Inventory service over any [`BeerStore`].
#[derive(Debug, Clone)]
pub struct BeerService<S> {
    store: S,
}

impl<S> BeerService<S>
where
    S: BeerStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new beer.
    ///
    /// # Errors
    /// - `AlreadyExists` when the name is taken.
    /// - `CapacityExceeded` when the initial quantity is above max capacity.
    #[tracing::instrument(skip(self, beer), fields(name = %beer.name))]
    pub fn register(&self, beer: NewBeer) -> ServiceResult<Beer> {
        if self.store.find_by_name(&beer.name)?.is_some() {
            warn!("beer already registered");
            return Err(DomainError::already_exists(beer.name).into());
        }
        beer.validate()
            .inspect_err(|e| warn!(error = %e, "registration rejected"))?;

        let stored = self
            .store
            .insert(beer)
            .map_err(ServiceError::from)
            .inspect_err(|e| warn!(error = %e, "insert failed"))?;

        info!(
            beer_id = %stored.id_typed(),
            quantity = stored.quantity(),
            max_capacity = stored.max_capacity(),
            "beer registered"
        );
        Ok(stored)
    }

    /// # Errors
    /// `NotFound` when no beer has this exact name.
    #[tracing::instrument(skip(self))]
    pub fn find_by_name(&self, name: &str) -> ServiceResult<Beer> {
        self.store
            .find_by_name(name)?
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// # Errors
    /// `NotFound` when no beer has this identifier.
    #[tracing::instrument(skip(self), fields(beer_id = %id))]
    pub fn find_by_id(&self, id: BeerId) -> ServiceResult<Beer> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Every stored beer, in store order. Possibly empty.
    #[tracing::instrument(skip(self))]
    pub fn list_all(&self) -> ServiceResult<Vec<Beer>> {
        Ok(self.store.list_all()?)
    }

    /// # Errors
    /// `NotFound` when no beer has this identifier (including one already deleted).
    #[tracing::instrument(skip(self), fields(beer_id = %id))]
    pub fn delete_by_id(&self, id: BeerId) -> ServiceResult<()> {
        if self.store.find_by_id(id)?.is_none() {
            warn!("delete of unknown beer");
            return Err(DomainError::not_found().into());
        }
        // Another request may have deleted it in between.
        if !self.store.delete_by_id(id)? {
            return Err(DomainError::not_found().into());
        }
        info!("beer deleted");
        Ok(())
    }

    /// Add `amount` units to the stock of beer `id`.
    ///
    /// # Errors
    /// - `NotFound` when the beer does not exist.
    /// - `CapacityExceeded` when the result would be above max capacity; the
    ///   stored quantity is left unchanged.
    #[tracing::instrument(skip(self), fields(beer_id = %id))]
    pub fn increment(&self, id: BeerId, amount: i64) -> ServiceResult<Beer> {
        let updated = self
            .store
            .update(id, &mut |beer: &mut Beer| beer.increment(amount))
            .map_err(ServiceError::from)
            .inspect_err(|e| warn!(error = %e, "increment rejected"))?;

        info!(quantity = updated.quantity(), "stock incremented");
        Ok(updated)
    }

    /// Remove `amount` units from the stock of beer `id`.
    ///
    /// # Errors
    /// - `NotFound` when the beer does not exist.
    /// - `InsufficientStock` when the result would be below zero; the stored
    ///   quantity is left unchanged.
    #[tracing::instrument(skip(self), fields(beer_id = %id))]
    pub fn decrement(&self, id: BeerId, amount: i64) -> ServiceResult<Beer> {
        let updated = self
            .store
            .update(id, &mut |beer: &mut Beer| beer.decrement(amount))
            .map_err(ServiceError::from)
            .inspect_err(|e| warn!(error = %e, "decrement rejected"))?;

        info!(quantity = updated.quantity(), "stock decremented");
        Ok(updated)
    }
}
