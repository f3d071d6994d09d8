//! Player commands queued by the front-end and the outcome of each.
use std::{collections::VecDeque, fmt};

use bevy::prelude::*;

use crate::{
    ledger::trade::{Purchase, Sale, TradeError},
    services::{bank::BankError, hospital::HospitalError, hospital::Treatment},
    world::{
        locations::{City, LocationId},
        travel::{Journey, TravelError},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Travel(LocationId),
    SwitchCity(City),
    /// `good` is a catalog id or a name prefix.
    Buy { good: String, quantity: u32 },
    Sell { good: String, quantity: u32 },
    Deposit(u64),
    Withdraw(u64),
    Repay(u64),
    Treat(u32),
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Travel(location) => write!(f, "travel {location}"),
            Self::SwitchCity(city) => write!(f, "city {}", city.label().to_ascii_lowercase()),
            Self::Buy { good, quantity } => write!(f, "buy {good} {quantity}"),
            Self::Sell { good, quantity } => write!(f, "sell {good} {quantity}"),
            Self::Deposit(amount) => write!(f, "deposit {amount}"),
            Self::Withdraw(amount) => write!(f, "withdraw {amount}"),
            Self::Repay(amount) => write!(f, "repay {amount}"),
            Self::Treat(points) => write!(f, "treat {points}"),
        }
    }
}

/// FIFO of commands waiting for the next update.
#[derive(Resource, Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<PlayerCommand>,
}

impl CommandQueue {
    pub fn push(&mut self, command: PlayerCommand) {
        self.pending.push_back(command);
    }

    pub fn pop(&mut self) -> Option<PlayerCommand> {
        self.pending.pop_front()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// What an accepted command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReceipt {
    Moved(Journey),
    Bought(Purchase),
    Sold(Sale),
    Deposited { amount: u64, savings: u64 },
    Withdrew { amount: u64, savings: u64 },
    Repaid { amount: u64, debt: u64 },
    Treated(Treatment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    GameOver,
    UnknownGood { query: String },
    Trade(TradeError),
    Travel(TravelError),
    Bank(BankError),
    Hospital(HospitalError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => write!(f, "the game is over"),
            Self::UnknownGood { query } => write!(f, "no good matches '{query}'"),
            Self::Trade(error) => write!(f, "{error}"),
            Self::Travel(error) => write!(f, "{error}"),
            Self::Bank(error) => write!(f, "{error}"),
            Self::Hospital(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<TradeError> for CommandError {
    fn from(value: TradeError) -> Self {
        Self::Trade(value)
    }
}

impl From<TravelError> for CommandError {
    fn from(value: TravelError) -> Self {
        Self::Travel(value)
    }
}

impl From<BankError> for CommandError {
    fn from(value: BankError) -> Self {
        Self::Bank(value)
    }
}

impl From<HospitalError> for CommandError {
    fn from(value: HospitalError) -> Self {
        Self::Hospital(value)
    }
}

/// Published once per processed command.
#[derive(Message, Debug, Clone)]
pub struct CommandResolved {
    pub command: PlayerCommand,
    pub outcome: Result<ActionReceipt, CommandError>,
}
