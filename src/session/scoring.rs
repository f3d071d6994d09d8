//! End-of-game detection, liquidation and the final score.
use std::fmt;

use bevy::prelude::*;

use crate::{
    core::settings::GameSettings,
    ledger::{
        components::Player,
        trade::{liquidate, Sale},
    },
    market::resources::MarketBoard,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    DaysOver,
    HealthZero,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DaysOver => f.write_str("days over"),
            Self::HealthZero => f.write_str("health zero"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalScore {
    pub reason: EndReason,
    pub cash: u64,
    pub savings: u64,
    pub debt: u64,
    /// cash + savings - debt
    pub score: i64,
    pub liquidation: Vec<Sale>,
}

#[derive(Message, Debug, Clone)]
pub struct GameEnded {
    pub day: u32,
    pub result: FinalScore,
}

/// Set once the game has ended; later commands are rejected.
#[derive(Resource, Debug, Default)]
pub struct GameOutcome {
    result: Option<FinalScore>,
}

impl GameOutcome {
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&FinalScore> {
        self.result.as_ref()
    }
}

/// Checks the calendar before health. Running out of days sells everything still held.
pub fn settle(player: &mut Player, market: &MarketBoard) -> Option<FinalScore> {
    let reason = if player.is_out_of_days() {
        EndReason::DaysOver
    } else if player.is_incapacitated() {
        EndReason::HealthZero
    } else {
        return None;
    };

    let liquidation = match reason {
        EndReason::DaysOver => liquidate(player, market),
        EndReason::HealthZero => Vec::new(),
    };

    Some(FinalScore {
        reason,
        cash: player.cash(),
        savings: player.savings(),
        debt: player.debt(),
        score: player.net_worth(),
        liquidation,
    })
}

pub fn check_game_over(
    mut outcome: ResMut<GameOutcome>,
    mut player: ResMut<Player>,
    market: Res<MarketBoard>,
    settings: Res<GameSettings>,
    mut ended: MessageWriter<GameEnded>,
) {
    if outcome.is_over() {
        return;
    }
    let Some(result) = settle(&mut player, &market) else {
        return;
    };

    let day = settings.player.days.saturating_sub(player.days_left());
    info!(
        "Game over on day {day} ({}): final score {}",
        result.reason, result.score
    );
    outcome.result = Some(result.clone());
    ended.write(GameEnded { day, result });
}
