//! Inventory domain module.
//!
//! This crate contains business rules for stocked beers, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod beer;

pub use beer::{Beer, BeerType, NewBeer};
