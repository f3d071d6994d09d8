//! Market snapshot: today's prices and what can be traded at the current stop.
use bevy::prelude::Resource;

use crate::{
    core::rng::RandomSource,
    world::locations::{City, LocationId},
};

use super::{
    components::{GoodDefinition, GoodId},
    data::{GoodsCatalog, MAX_PRICE_SPAN},
};

/// Lowest price any good may be quoted at.
pub const PRICE_FLOOR: u64 = 1;

/// A good offered at the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketListing {
    pub id: GoodId,
    pub name: String,
    pub price: u64,
}

/// Owns the goods catalog and the per-day price/availability snapshot.
#[derive(Resource, Debug, Clone)]
pub struct MarketBoard {
    catalog: GoodsCatalog,
    prices: Vec<u64>,
    available: Vec<bool>,
}

impl MarketBoard {
    pub fn new(catalog: GoodsCatalog) -> Self {
        let prices = catalog.iter().map(|good| good.band.min).collect();
        let available = vec![false; catalog.len()];
        Self {
            catalog,
            prices,
            available,
        }
    }

    pub fn catalog(&self) -> &GoodsCatalog {
        &self.catalog
    }

    pub fn good(&self, id: GoodId) -> Option<&GoodDefinition> {
        self.catalog.get(id)
    }

    /// Draws a fresh price inside every good's band, one draw per good in catalog order.
    pub fn regenerate_prices<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for (price, good) in self.prices.iter_mut().zip(self.catalog.iter()) {
            // Catalog loading rejects wider bands.
            let span = (good.band.max - good.band.min).min(MAX_PRICE_SPAN) as u32;
            *price = good.band.min + u64::from(rng.roll(span));
        }
    }

    /// Recomputes which goods are traded at the given stop.
    pub fn refresh_availability(&mut self, city: City, location: LocationId) {
        for (flag, good) in self.available.iter_mut().zip(self.catalog.iter()) {
            *flag = good.traded_at(city, location);
        }
    }

    pub fn price(&self, id: GoodId) -> Option<u64> {
        self.prices.get(id.index()).copied()
    }

    pub fn is_available(&self, id: GoodId) -> bool {
        self.available.get(id.index()).copied().unwrap_or(false)
    }

    /// Goods traded here, in catalog order.
    pub fn available_goods(&self) -> Vec<MarketListing> {
        self.catalog
            .iter()
            .zip(self.prices.iter().zip(self.available.iter()))
            .filter(|(_, (_, available))| **available)
            .map(|(good, (price, _))| MarketListing {
                id: good.id,
                name: good.name.clone(),
                price: *price,
            })
            .collect()
    }

    /// Multiplies today's price in place, returning the new price.
    pub fn apply_multiplier(&mut self, id: GoodId, factor: u64) -> Option<u64> {
        let price = self.prices.get_mut(id.index())?;
        *price = price.saturating_mul(factor).max(PRICE_FLOOR);
        Some(*price)
    }

    /// Floor-divides today's price in place, never dropping below [`PRICE_FLOOR`].
    pub fn apply_divisor(&mut self, id: GoodId, factor: u64) -> Option<u64> {
        let price = self.prices.get_mut(id.index())?;
        if factor > 0 {
            *price = (*price / factor).max(PRICE_FLOOR);
        }
        Some(*price)
    }

    #[cfg(test)]
    pub fn set_price(&mut self, id: GoodId, price: u64) {
        if let Some(slot) = self.prices.get_mut(id.index()) {
            *slot = price;
        }
    }
}

impl Default for MarketBoard {
    fn default() -> Self {
        Self::new(GoodsCatalog::fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{GameRng, ScriptedDraws};

    #[test]
    fn regenerated_prices_stay_inside_bands() {
        let mut board = MarketBoard::default();
        let mut rng = GameRng::seeded(2024);
        for _ in 0..200 {
            board.regenerate_prices(&mut rng);
            for good in board.catalog().iter() {
                let price = board.price(good.id).expect("price exists");
                assert!(good.band.contains(price), "{} priced {price}", good.name);
            }
        }
    }

    #[test]
    fn regeneration_consumes_one_draw_per_good() {
        let mut board = MarketBoard::default();
        let mut draws = ScriptedDraws::new(vec![0; 10]);
        board.regenerate_prices(&mut draws);
        assert_eq!(draws.remaining(), 10 - board.catalog().len());
        assert_eq!(board.price(GoodId::new(4)), Some(5_000));
    }

    #[test]
    fn listings_follow_catalog_order_and_location() {
        let mut board = MarketBoard::default();
        board.refresh_availability(City::Beijing, LocationId::new(2));

        let listings = board.available_goods();
        let ids: Vec<usize> = listings.iter().map(|listing| listing.id.index()).collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 6, 7]);
        assert!(!board.is_available(GoodId::new(0)));
        assert!(!board.is_available(GoodId::new(42)));
    }

    #[test]
    fn multiplier_and_divisor_use_integer_math() {
        let mut board = MarketBoard::default();
        board.set_price(GoodId::new(2), 50);
        assert_eq!(board.apply_multiplier(GoodId::new(2), 3), Some(150));

        board.set_price(GoodId::new(0), 80);
        assert_eq!(board.apply_divisor(GoodId::new(0), 8), Some(10));
    }

    #[test]
    fn division_never_prices_below_floor() {
        let mut board = MarketBoard::default();
        board.set_price(GoodId::new(2), 5);
        assert_eq!(board.apply_divisor(GoodId::new(2), 8), Some(PRICE_FLOOR));
        assert_eq!(board.apply_divisor(GoodId::new(2), 0), Some(PRICE_FLOOR));
        assert_eq!(board.apply_multiplier(GoodId::new(99), 2), None);
    }
}
