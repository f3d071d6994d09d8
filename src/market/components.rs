//! Goods identities and the static metadata describing where they trade.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::locations::{City, LocationId};

/// Stable zero-based catalog index of a good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GoodId(usize);

impl GoodId {
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inclusive price band a good is drawn from each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub min: u64,
    pub max: u64,
}

impl PriceBand {
    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone)]
pub struct GoodDefinition {
    pub id: GoodId,
    pub name: String,
    pub band: PriceBand,
    pub cities: Vec<City>,
    pub absent_at: Vec<LocationId>,
}

impl GoodDefinition {
    /// Whether the good is traded at the given stop.
    pub fn traded_at(&self, city: City, location: LocationId) -> bool {
        self.cities.contains(&city) && !self.absent_at.contains(&location)
    }
}
