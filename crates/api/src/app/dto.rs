use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use beerstock_core::{DomainError, DomainResult};
use beerstock_inventory::{Beer, BeerType, NewBeer};

pub const MAX_TEXT_LEN: usize = 200;
pub const MAX_CAPACITY_LIMIT: i64 = 500;
pub const MAX_QUANTITY_LIMIT: i64 = 100;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct BeerRequest {
    pub name: String,
    pub brand: String,
    pub max: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

impl BeerRequest {
    /// Structural checks done before the service sees the payload.
    pub fn validate(&self) -> DomainResult<()> {
        check_text("name", &self.name)?;
        check_text("brand", &self.brand)?;
        if !(1..=MAX_CAPACITY_LIMIT).contains(&self.max) {
            return Err(DomainError::validation(format!(
                "max must be between 1 and {MAX_CAPACITY_LIMIT}"
            )));
        }
        if !(0..=MAX_QUANTITY_LIMIT).contains(&self.quantity) {
            return Err(DomainError::validation(format!(
                "quantity must be between 0 and {MAX_QUANTITY_LIMIT}"
            )));
        }
        Ok(())
    }

    pub fn into_new_beer(self) -> DomainResult<NewBeer> {
        self.validate()?;
        Ok(NewBeer {
            name: self.name,
            brand: self.brand,
            max_capacity: self.max,
            quantity: self.quantity,
            beer_type: self.beer_type,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

impl QuantityRequest {
    pub fn amount(&self) -> DomainResult<i64> {
        if !(1..=MAX_QUANTITY_LIMIT).contains(&self.quantity) {
            return Err(DomainError::validation(format!(
                "quantity must be between 1 and {MAX_QUANTITY_LIMIT}"
            )));
        }
        Ok(self.quantity)
    }
}

fn check_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be blank")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(DomainError::validation(format!(
            "{field} cannot be longer than {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeerResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub max: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
    pub registered_at: DateTime<Utc>,
}

impl From<&Beer> for BeerResponse {
    fn from(beer: &Beer) -> Self {
        Self {
            id: beer.id_typed().get(),
            name: beer.name().to_string(),
            brand: beer.brand().to_string(),
            max: beer.max_capacity(),
            quantity: beer.quantity(),
            beer_type: beer.beer_type(),
            registered_at: beer.registered_at(),
        }
    }
}
