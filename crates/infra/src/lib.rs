//! Infrastructure layer: record storage and the inventory service that
//! enforces business rules on top of it.

pub mod service;
pub mod store;

pub use service::{BeerService, ServiceError, ServiceResult};
pub use store::{BeerStore, InMemoryBeerStore, StoreError, StoreResult};
