use std::sync::Arc;

use beerstock_infra::{BeerService, BeerStore, InMemoryBeerStore};

/// Inventory service over a type-erased store, shared across handlers.
pub type DynBeerService = BeerService<Arc<dyn BeerStore>>;

/// Everything request handlers need, injected as an `Extension`.
pub struct AppServices {
    beers: DynBeerService,
}

impl AppServices {
    pub fn new(store: Arc<dyn BeerStore>) -> Self {
        Self {
            beers: BeerService::new(store),
        }
    }

    /// In-memory wiring (dev/test). State lives for the lifetime of the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBeerStore::new()))
    }

    pub fn beers(&self) -> &DynBeerService {
        &self.beers
    }
}
