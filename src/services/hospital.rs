//! Paid treatment that restores health points.
use std::fmt;

use crate::{
    core::settings::HospitalSettings,
    ledger::components::{Player, MAX_HEALTH},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HospitalError {
    InvalidPoints,
    AlreadyHealthy,
    TooManyPoints { requested: u32, max: u32 },
    InsufficientFunds { cost: u64, cash: u64 },
}

impl fmt::Display for HospitalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPoints => write!(f, "treatment must restore at least one point"),
            Self::AlreadyHealthy => write!(f, "the doctor says you are perfectly healthy"),
            Self::TooManyPoints { requested, max } => {
                write!(f, "cannot restore {requested} points, at most {max}")
            }
            Self::InsufficientFunds { cost, cash } => {
                write!(f, "treatment costs {cost} but you only have {cash} in cash")
            }
        }
    }
}

impl std::error::Error for HospitalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treatment {
    pub points: u32,
    pub cost: u64,
    pub health: u32,
}

pub fn treat(
    player: &mut Player,
    points: u32,
    settings: &HospitalSettings,
) -> Result<Treatment, HospitalError> {
    if points == 0 {
        return Err(HospitalError::InvalidPoints);
    }
    let max = MAX_HEALTH.saturating_sub(player.health());
    if max == 0 {
        return Err(HospitalError::AlreadyHealthy);
    }
    if points > max {
        return Err(HospitalError::TooManyPoints {
            requested: points,
            max,
        });
    }

    let cost = settings.cost_per_point.saturating_mul(u64::from(points));
    if !player.debit_cash(cost) {
        return Err(HospitalError::InsufficientFunds {
            cost,
            cash: player.cash(),
        });
    }
    let health = player.heal(points);

    Ok(Treatment {
        points,
        cost,
        health,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARIFF: HospitalSettings = HospitalSettings {
        cost_per_point: 3_500,
    };

    #[test]
    fn healthy_players_are_turned_away() {
        let mut player = Player::default();
        assert_eq!(
            treat(&mut player, 1, &TARIFF),
            Err(HospitalError::AlreadyHealthy)
        );
    }

    #[test]
    fn treatment_charges_per_point() {
        let mut player = Player::default();
        player.credit_cash(20_000);
        player.apply_health_delta(-30);

        assert_eq!(
            treat(&mut player, 31, &TARIFF),
            Err(HospitalError::TooManyPoints {
                requested: 31,
                max: 30
            })
        );
        let treatment = treat(&mut player, 6, &TARIFF).expect("affordable");
        assert_eq!(treatment.cost, 21_000);
        assert_eq!(player.health(), 76);
        assert_eq!(player.cash(), 1_000);

        assert_eq!(
            treat(&mut player, 1, &TARIFF),
            Err(HospitalError::InsufficientFunds {
                cost: 3_500,
                cash: 1_000
            })
        );
        assert_eq!(player.health(), 76);
    }
}
