use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use beerstock_core::{BeerId, DomainError, DomainResult, Entity};

/// Beer style. Closed set; serialized upper-case (`"LAGER"`, `"IPA"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BeerType {
    Lager,
    Malzbier,
    Witbier,
    Weiss,
    Ale,
    Ipa,
    Stout,
}

impl BeerType {
    pub const ALL: [BeerType; 7] = [
        BeerType::Lager,
        BeerType::Malzbier,
        BeerType::Witbier,
        BeerType::Weiss,
        BeerType::Ale,
        BeerType::Ipa,
        BeerType::Stout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeerType::Lager => "LAGER",
            BeerType::Malzbier => "MALZBIER",
            BeerType::Witbier => "WITBIER",
            BeerType::Weiss => "WEISS",
            BeerType::Ale => "ALE",
            BeerType::Ipa => "IPA",
            BeerType::Stout => "STOUT",
        }
    }
}

impl core::fmt::Display for BeerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for BeerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown beer type: {s}")))
    }
}

/// Registration payload: everything the caller supplies for a new beer.
///
/// The identifier and registration timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBeer {
    pub name: String,
    pub brand: String,
    pub max_capacity: i64,
    pub quantity: i64,
    pub beer_type: BeerType,
}

impl NewBeer {
    /// Check the payload against the entity invariants.
    ///
    /// The initial quantity is checked against max capacity here, so a beer can
    /// never be created already overflowing its slot.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.brand.trim().is_empty() {
            return Err(DomainError::validation("brand cannot be empty"));
        }
        if self.max_capacity <= 0 {
            return Err(DomainError::validation("max capacity must be positive"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.quantity > self.max_capacity {
            return Err(DomainError::CapacityExceeded {
                requested: self.quantity,
                available: self.max_capacity,
            });
        }
        Ok(())
    }
}

/// Entity: a stocked beer with a bounded quantity.
///
/// `0 <= quantity <= max_capacity` holds for every value of this type; the only
/// mutators are [`Beer::increment`] and [`Beer::decrement`], which refuse any
/// change that would break it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beer {
    id: BeerId,
    name: String,
    brand: String,
    max_capacity: i64,
    quantity: i64,
    beer_type: BeerType,
    registered_at: DateTime<Utc>,
}

impl Beer {
    /// Build a stored beer from a validated registration payload.
    pub fn register(id: BeerId, new: NewBeer, registered_at: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            name: new.name,
            brand: new.brand,
            max_capacity: new.max_capacity,
            quantity: new.quantity,
            beer_type: new.beer_type,
            registered_at,
        })
    }

    pub fn id_typed(&self) -> BeerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn max_capacity(&self) -> i64 {
        self.max_capacity
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn beer_type(&self) -> BeerType {
        self.beer_type
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Room left before the slot is full.
    pub fn available_capacity(&self) -> i64 {
        self.max_capacity - self.quantity
    }

    /// Add `amount` units of stock.
    ///
    /// # Errors
    /// `CapacityExceeded` when `quantity + amount > max_capacity`; the beer is
    /// left untouched.
    pub fn increment(&mut self, amount: i64) -> DomainResult<()> {
        ensure_positive(amount)?;
        match self.quantity.checked_add(amount) {
            Some(next) if next <= self.max_capacity => {
                self.quantity = next;
                Ok(())
            }
            _ => Err(DomainError::CapacityExceeded {
                requested: amount,
                available: self.available_capacity(),
            }),
        }
    }

    /// Remove `amount` units of stock.
    ///
    /// # Errors
    /// `InsufficientStock` when `quantity - amount < 0`; the beer is left untouched.
    pub fn decrement(&mut self, amount: i64) -> DomainResult<()> {
        ensure_positive(amount)?;
        if amount > self.quantity {
            return Err(DomainError::InsufficientStock {
                requested: amount,
                available: self.quantity,
            });
        }
        self.quantity -= amount;
        Ok(())
    }
}

impl Entity for Beer {
    type Id = BeerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn ensure_positive(amount: i64) -> DomainResult<()> {
    if amount <= 0 {
        return Err(DomainError::validation("amount must be positive"));
    }
    Ok(())
}
