//! ServicesPlugin wires the bank's daily interest run.
use bevy::prelude::*;

use crate::core::turn::TurnSet;

use super::{bank::InterestAccrued, systems::accrue_daily_interest};

pub struct ServicesPlugin;

impl Plugin for ServicesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<InterestAccrued>()
            .add_systems(Update, accrue_daily_interest.in_set(TurnSet::Interest));
    }
}
