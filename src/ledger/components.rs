//! The player's ledger: money, health, calendar, position and inventory.
use bevy::prelude::Resource;
use serde::Serialize;

use crate::{
    core::settings::PlayerSettings,
    market::components::GoodId,
    world::locations::{City, LocationId},
};

use super::inventory::{Inventory, InventoryError};

pub const MAX_HEALTH: u32 = 100;
pub const MAX_FAME: u32 = 100;

/// Player state. Every clamped field is only reachable through the methods below.
#[derive(Resource, Debug, Clone, Serialize)]
pub struct Player {
    name: String,
    cash: u64,
    savings: u64,
    debt: u64,
    health: u32,
    fame: u32,
    days_left: u32,
    city: City,
    location: LocationId,
    hacker_events: bool,
    inventory: Inventory,
}

impl Player {
    pub fn from_settings(settings: &PlayerSettings) -> Self {
        Self {
            name: settings.name.clone(),
            cash: settings.cash,
            savings: settings.savings,
            debt: settings.debt,
            health: settings.health.min(MAX_HEALTH),
            fame: settings.fame.min(MAX_FAME),
            days_left: settings.days,
            city: settings.city,
            location: settings.location,
            hacker_events: settings.hacker_events,
            inventory: Inventory::with_capacity(settings.inventory_capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash(&self) -> u64 {
        self.cash
    }

    pub fn savings(&self) -> u64 {
        self.savings
    }

    pub fn debt(&self) -> u64 {
        self.debt
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn fame(&self) -> u32 {
        self.fame
    }

    pub fn days_left(&self) -> u32 {
        self.days_left
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn hacker_events(&self) -> bool {
        self.hacker_events
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_hacker_events(&mut self, enabled: bool) {
        self.hacker_events = enabled;
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// cash + savings - debt
    pub fn net_worth(&self) -> i64 {
        let assets = i128::from(self.cash) + i128::from(self.savings);
        let worth = assets - i128::from(self.debt);
        worth.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    pub fn credit_cash(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
    }

    /// Debits exactly `amount`, or nothing when cash is short.
    pub fn debit_cash(&mut self, amount: u64) -> bool {
        if amount > self.cash {
            return false;
        }
        self.cash -= amount;
        true
    }

    /// Takes up to `amount`, stopping at zero. Returns what was actually taken.
    pub fn drain_cash(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.cash);
        self.cash -= taken;
        taken
    }

    pub fn credit_savings(&mut self, amount: u64) {
        self.savings = self.savings.saturating_add(amount);
    }

    /// Takes up to `amount` from savings. Returns what was actually taken.
    pub fn drain_savings(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.savings);
        self.savings -= taken;
        taken
    }

    pub fn add_debt(&mut self, amount: u64) {
        self.debt = self.debt.saturating_add(amount);
    }

    /// Pays down up to `amount` of debt. Returns what was actually cleared.
    pub fn reduce_debt(&mut self, amount: u64) -> u64 {
        let cleared = amount.min(self.debt);
        self.debt -= cleared;
        cleared
    }

    /// Raises health up to [`MAX_HEALTH`]. Returns the new health.
    pub fn heal(&mut self, points: u32) -> u32 {
        self.health = self.health.saturating_add(points).min(MAX_HEALTH);
        self.health
    }

    /// Applies a signed health change in one step, clamped to `0..=MAX_HEALTH`.
    pub fn apply_health_delta(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.health) + delta;
        self.health = next.clamp(0, i64::from(MAX_HEALTH)) as u32;
        self.health
    }

    /// Burns calendar days, stopping at zero. Returns the days remaining.
    pub fn spend_days(&mut self, days: u32) -> u32 {
        self.days_left = self.days_left.saturating_sub(days);
        self.days_left
    }

    pub fn move_to(&mut self, city: City, location: LocationId) {
        self.city = city;
        self.location = location;
    }

    pub fn is_out_of_days(&self) -> bool {
        self.days_left == 0
    }

    pub fn is_incapacitated(&self) -> bool {
        self.health == 0
    }

    pub fn stock(
        &mut self,
        id: GoodId,
        name: &str,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), InventoryError> {
        self.inventory.add(id, name, quantity, unit_price)
    }

    pub fn unstock(&mut self, id: GoodId, quantity: u32) -> Result<(), InventoryError> {
        self.inventory.remove(id, quantity)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::from_settings(&crate::core::settings::GameSettings::default().player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_matches_starting_ledger() {
        let player = Player::default();
        assert_eq!(player.cash(), 2_000);
        assert_eq!(player.debt(), 5_000);
        assert_eq!(player.savings(), 0);
        assert_eq!(player.health(), MAX_HEALTH);
        assert_eq!(player.days_left(), 40);
        assert_eq!(player.city(), City::Beijing);
        assert_eq!(player.inventory().capacity(), 100);
        assert_eq!(player.net_worth(), -3_000);
    }

    #[test]
    fn clamped_fields_never_leave_their_range() {
        let mut player = Player::default();

        assert_eq!(player.drain_cash(5_000), 2_000);
        assert_eq!(player.cash(), 0);
        assert!(!player.debit_cash(1));

        assert_eq!(player.apply_health_delta(-250), 0);
        assert!(player.is_incapacitated());
        assert_eq!(player.heal(500), MAX_HEALTH);
        assert_eq!(player.apply_health_delta(-105 + 10), 5);

        assert_eq!(player.spend_days(99), 0);
        assert!(player.is_out_of_days());

        assert_eq!(player.reduce_debt(9_000), 5_000);
        assert_eq!(player.debt(), 0);
        assert_eq!(player.drain_savings(10), 0);
    }
}
