//! Savings, loans and the daily interest run.
use std::fmt;

use bevy::prelude::Message;

use crate::{core::settings::BankSettings, ledger::components::Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError {
    InvalidAmount,
    InsufficientCash { requested: u64, available: u64 },
    InsufficientSavings { requested: u64, available: u64 },
    NoDebt,
    RepayExceedsLimit { requested: u64, limit: u64 },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount => write!(f, "amount must be greater than zero"),
            Self::InsufficientCash {
                requested,
                available,
            } => write!(f, "cannot deposit {requested}, only {available} in cash"),
            Self::InsufficientSavings {
                requested,
                available,
            } => write!(f, "cannot withdraw {requested}, only {available} saved"),
            Self::NoDebt => write!(f, "you owe nothing"),
            Self::RepayExceedsLimit { requested, limit } => {
                write!(f, "cannot repay {requested}, at most {limit} right now")
            }
        }
    }
}

impl std::error::Error for BankError {}

/// Interest added by one daily run.
#[derive(Message, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterestAccrued {
    pub day: u32,
    pub savings_interest: u64,
    pub debt_interest: u64,
}

/// Adds deposit interest to savings and loan interest to debt, both floored.
pub fn accrue_interest(player: &mut Player, rates: &BankSettings) -> (u64, u64) {
    let savings_interest = percent_of(player.savings(), rates.deposit_rate_percent);
    let debt_interest = percent_of(player.debt(), rates.debt_rate_percent);
    player.credit_savings(savings_interest);
    player.add_debt(debt_interest);
    (savings_interest, debt_interest)
}

pub fn deposit(player: &mut Player, amount: u64) -> Result<u64, BankError> {
    if amount == 0 {
        return Err(BankError::InvalidAmount);
    }
    if !player.debit_cash(amount) {
        return Err(BankError::InsufficientCash {
            requested: amount,
            available: player.cash(),
        });
    }
    player.credit_savings(amount);
    Ok(player.savings())
}

pub fn withdraw(player: &mut Player, amount: u64) -> Result<u64, BankError> {
    if amount == 0 {
        return Err(BankError::InvalidAmount);
    }
    if amount > player.savings() {
        return Err(BankError::InsufficientSavings {
            requested: amount,
            available: player.savings(),
        });
    }
    player.drain_savings(amount);
    player.credit_cash(amount);
    Ok(player.savings())
}

/// Pays debt from cash. Bounded by `min(cash, debt)`.
pub fn repay(player: &mut Player, amount: u64) -> Result<u64, BankError> {
    if amount == 0 {
        return Err(BankError::InvalidAmount);
    }
    if player.debt() == 0 {
        return Err(BankError::NoDebt);
    }
    let limit = player.cash().min(player.debt());
    if amount > limit {
        return Err(BankError::RepayExceedsLimit {
            requested: amount,
            limit,
        });
    }
    player.drain_cash(amount);
    player.reduce_debt(amount);
    Ok(player.debt())
}

fn percent_of(value: u64, percent: u64) -> u64 {
    (u128::from(value) * u128::from(percent) / 100).min(u128::from(u64::MAX)) as u64
}
