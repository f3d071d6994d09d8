//! Capacity-bounded inventory with weighted-average cost basis.
use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::market::components::GoodId;

/// Held stack of one good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    pub name: String,
    pub quantity: u32,
    pub average_cost: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    InsufficientSpace { requested: u32, free: u32 },
    InsufficientQuantity { requested: u32, held: u32 },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSpace { requested, free } => write!(
                f,
                "not enough room: {requested} requested, {free} free"
            ),
            Self::InsufficientQuantity { requested, held } => write!(
                f,
                "not enough stock: {requested} requested, {held} held"
            ),
        }
    }
}

impl std::error::Error for InventoryError {}

/// Goods carried by the player. `add` and `remove` are the only mutators.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    capacity: u32,
    used: u32,
    entries: BTreeMap<GoodId, InventoryEntry>,
}

impl Inventory {
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            used: 0,
            entries: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn free_space(&self) -> u32 {
        self.capacity.saturating_sub(self.used)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: GoodId) -> Option<&InventoryEntry> {
        self.entries.get(&id)
    }

    pub fn quantity_of(&self, id: GoodId) -> u32 {
        self.entries.get(&id).map(|entry| entry.quantity).unwrap_or(0)
    }

    pub fn entries(&self) -> impl Iterator<Item = (GoodId, &InventoryEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Adds `quantity` units bought (or granted) at `unit_price`, blending the cost basis.
    pub fn add(
        &mut self,
        id: GoodId,
        name: &str,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), InventoryError> {
        let free = self.free_space();
        if quantity > free {
            return Err(InventoryError::InsufficientSpace {
                requested: quantity,
                free,
            });
        }
        if quantity == 0 {
            return Ok(());
        }

        match self.entries.get_mut(&id) {
            Some(entry) => {
                let old_quantity = u64::from(entry.quantity);
                let added = u64::from(quantity);
                let total_cost = entry
                    .average_cost
                    .saturating_mul(old_quantity)
                    .saturating_add(unit_price.saturating_mul(added));
                entry.average_cost = total_cost / (old_quantity + added);
                entry.quantity += quantity;
            }
            None => {
                self.entries.insert(
                    id,
                    InventoryEntry {
                        name: name.to_string(),
                        quantity,
                        average_cost: unit_price,
                    },
                );
            }
        }

        self.used += quantity;
        Ok(())
    }

    /// Removes `quantity` units, dropping the entry once it is empty.
    pub fn remove(&mut self, id: GoodId, quantity: u32) -> Result<(), InventoryError> {
        let held = self.quantity_of(id);
        if held == 0 || quantity > held {
            return Err(InventoryError::InsufficientQuantity {
                requested: quantity,
                held,
            });
        }

        if quantity == held {
            self.entries.remove(&id);
        } else if let Some(entry) = self.entries.get_mut(&id) {
            entry.quantity -= quantity;
        }

        self.used -= quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{GameRng, RandomSource};

    const SOFTWARE: GoodId = GoodId::new(0);
    const LIQUOR: GoodId = GoodId::new(3);

    #[test]
    fn weighted_average_after_two_purchases() {
        let mut inventory = Inventory::with_capacity(100);
        inventory.add(LIQUOR, "Counterfeit Liquor", 3, 1_000).unwrap();
        inventory.add(LIQUOR, "Counterfeit Liquor", 4, 1_501).unwrap();

        let entry = inventory.entry(LIQUOR).expect("entry present");
        assert_eq!(entry.quantity, 7);
        assert_eq!(entry.average_cost, (1_000 * 3 + 1_501 * 4) / 7);
        assert_eq!(inventory.used(), 7);
    }

    #[test]
    fn free_grants_dilute_cost_basis() {
        let mut inventory = Inventory::with_capacity(10);
        inventory.add(SOFTWARE, "Pirated Software", 2, 90).unwrap();
        inventory.add(SOFTWARE, "Pirated Software", 6, 0).unwrap();
        assert_eq!(inventory.entry(SOFTWARE).unwrap().average_cost, 22);
    }

    #[test]
    fn overfilling_is_rejected_without_mutation() {
        let mut inventory = Inventory::with_capacity(5);
        inventory.add(SOFTWARE, "Pirated Software", 4, 10).unwrap();

        let error = inventory.add(LIQUOR, "Counterfeit Liquor", 2, 1_000);
        assert_eq!(
            error,
            Err(InventoryError::InsufficientSpace {
                requested: 2,
                free: 1
            })
        );
        assert_eq!(inventory.used(), 4);
        assert!(inventory.entry(LIQUOR).is_none());
    }

    #[test]
    fn removing_everything_drops_the_entry() {
        let mut inventory = Inventory::with_capacity(20);
        inventory.add(LIQUOR, "Counterfeit Liquor", 5, 1_200).unwrap();

        assert_eq!(
            inventory.remove(LIQUOR, 6),
            Err(InventoryError::InsufficientQuantity {
                requested: 6,
                held: 5
            })
        );
        inventory.remove(LIQUOR, 2).unwrap();
        assert_eq!(inventory.quantity_of(LIQUOR), 3);
        inventory.remove(LIQUOR, 3).unwrap();
        assert!(inventory.entry(LIQUOR).is_none());
        assert!(inventory.is_empty());
        assert_eq!(inventory.used(), 0);
        assert!(inventory.remove(SOFTWARE, 1).is_err());
    }

    #[test]
    fn random_sequences_keep_used_equal_to_held_total() {
        let mut rng = GameRng::seeded(31);
        let mut inventory = Inventory::with_capacity(60);

        for _ in 0..2_000 {
            let id = GoodId::new(rng.below(8) as usize);
            let quantity = rng.between(1, 15);
            if rng.below(2) == 0 {
                let _ = inventory.add(id, "Good", quantity, u64::from(rng.roll(500)));
            } else {
                let _ = inventory.remove(id, quantity);
            }

            let total: u32 = inventory.entries().map(|(_, entry)| entry.quantity).sum();
            assert_eq!(total, inventory.used());
            assert!(inventory.used() <= inventory.capacity());
            assert!(inventory.entries().all(|(_, entry)| entry.quantity > 0));
        }
    }
}
