//! Beer record storage abstractions.

pub mod beer_store;

pub use beer_store::{BeerStore, InMemoryBeerStore, StoreError, StoreResult};
