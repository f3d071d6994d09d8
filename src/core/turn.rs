//! Turn ordering shared by every plugin.
use bevy::prelude::*;

use crate::world::locations::{City, LocationId};

/// Stages of one update, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnSet {
    /// Queued player commands are executed.
    Commands,
    /// Prices are redrawn for a new day.
    Market,
    /// Random events are rolled against the new prices.
    Events,
    /// Bank interest accrues on savings and debt.
    Interest,
    /// Terminal conditions and scoring.
    Resolve,
    Journal,
    Present,
}

impl TurnSet {
    #[cfg_attr(not(test), allow(dead_code))]
    pub const ORDER: [TurnSet; 7] = [
        TurnSet::Commands,
        TurnSet::Market,
        TurnSet::Events,
        TurnSet::Interest,
        TurnSet::Resolve,
        TurnSet::Journal,
        TurnSet::Present,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayReason {
    Travel,
    CitySwitch,
}

/// A day-advancing action has been accepted; the rest of the turn reacts to it.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAdvanced {
    /// Days elapsed since the start of the game.
    pub day: u32,
    pub days_left: u32,
    pub city: City,
    pub location: LocationId,
    pub reason: DayReason,
}
