//! Buying and selling against the current market snapshot.
use std::fmt;

use serde::Serialize;

use crate::market::{components::GoodId, resources::MarketBoard};

use super::{components::Player, inventory::InventoryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    UnknownGood { id: GoodId },
    InvalidQuantity,
    GoodUnavailable { name: String },
    InsufficientFunds { cost: u64, cash: u64 },
    InsufficientSpace { requested: u32, free: u32 },
    InsufficientQuantity { requested: u32, held: u32 },
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGood { id } => write!(f, "no good with id {id}"),
            Self::InvalidQuantity => write!(f, "quantity must be at least 1"),
            Self::GoodUnavailable { name } => write!(f, "{name} is not traded here"),
            Self::InsufficientFunds { cost, cash } => {
                write!(f, "that costs {cost} but you only have {cash} in cash")
            }
            Self::InsufficientSpace { requested, free } => {
                write!(f, "no room for {requested} more, only {free} free")
            }
            Self::InsufficientQuantity { requested, held } => {
                write!(f, "you only hold {held}, cannot sell {requested}")
            }
        }
    }
}

impl std::error::Error for TradeError {}

impl From<InventoryError> for TradeError {
    fn from(value: InventoryError) -> Self {
        match value {
            InventoryError::InsufficientSpace { requested, free } => {
                Self::InsufficientSpace { requested, free }
            }
            InventoryError::InsufficientQuantity { requested, held } => {
                Self::InsufficientQuantity { requested, held }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Purchase {
    pub id: GoodId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub id: GoodId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub average_cost: u64,
    pub revenue: u64,
    pub profit: i64,
}

/// Buys `quantity` units at today's price. All-or-nothing.
pub fn buy(
    player: &mut Player,
    market: &MarketBoard,
    id: GoodId,
    quantity: u32,
) -> Result<Purchase, TradeError> {
    if quantity == 0 {
        return Err(TradeError::InvalidQuantity);
    }
    let good = market.good(id).ok_or(TradeError::UnknownGood { id })?;
    if !market.is_available(id) {
        return Err(TradeError::GoodUnavailable {
            name: good.name.clone(),
        });
    }
    let unit_price = market.price(id).ok_or(TradeError::UnknownGood { id })?;
    let total_cost = unit_price.saturating_mul(u64::from(quantity));
    if player.cash() < total_cost {
        return Err(TradeError::InsufficientFunds {
            cost: total_cost,
            cash: player.cash(),
        });
    }

    player.stock(id, &good.name, quantity, unit_price)?;
    let debited = player.debit_cash(total_cost);
    debug_assert!(debited, "cash was checked before stocking");

    Ok(Purchase {
        id,
        name: good.name.clone(),
        quantity,
        unit_price,
        total_cost,
    })
}

/// Sells `quantity` held units at today's price.
pub fn sell(
    player: &mut Player,
    market: &MarketBoard,
    id: GoodId,
    quantity: u32,
) -> Result<Sale, TradeError> {
    if quantity == 0 {
        return Err(TradeError::InvalidQuantity);
    }
    let good = market.good(id).ok_or(TradeError::UnknownGood { id })?;
    if !market.is_available(id) {
        return Err(TradeError::GoodUnavailable {
            name: good.name.clone(),
        });
    }
    let unit_price = market.price(id).ok_or(TradeError::UnknownGood { id })?;
    sell_at(player, id, &good.name, quantity, unit_price)
}

/// Sells every held good at today's price regardless of where the player stands.
pub fn liquidate(player: &mut Player, market: &MarketBoard) -> Vec<Sale> {
    let holdings: Vec<(GoodId, String, u32)> = player
        .inventory()
        .entries()
        .map(|(id, entry)| (id, entry.name.clone(), entry.quantity))
        .collect();

    holdings
        .into_iter()
        .filter_map(|(id, name, quantity)| {
            let unit_price = market.price(id).unwrap_or(0);
            sell_at(player, id, &name, quantity, unit_price).ok()
        })
        .collect()
}

fn sell_at(
    player: &mut Player,
    id: GoodId,
    name: &str,
    quantity: u32,
    unit_price: u64,
) -> Result<Sale, TradeError> {
    let average_cost = player
        .inventory()
        .entry(id)
        .map(|entry| entry.average_cost)
        .unwrap_or(0);
    player.unstock(id, quantity)?;

    let revenue = unit_price.saturating_mul(u64::from(quantity));
    player.credit_cash(revenue);
    let margin = i128::from(unit_price) - i128::from(average_cost);
    let profit = (margin * i128::from(quantity)).clamp(i128::from(i64::MIN), i128::from(i64::MAX));

    Ok(Sale {
        id,
        name: name.to_string(),
        quantity,
        unit_price,
        average_cost,
        revenue,
        profit: profit as i64,
    })
}
