use bevy::prelude::*;

use crate::{core::settings::GameSettings, core::turn::DayAdvanced, ledger::components::Player};

use super::bank::{accrue_interest, InterestAccrued};

/// Runs after the day's events so interest applies to the post-event balances.
pub fn accrue_daily_interest(
    mut days: MessageReader<DayAdvanced>,
    settings: Res<GameSettings>,
    mut player: ResMut<Player>,
    mut accrued: MessageWriter<InterestAccrued>,
) {
    for day in days.read() {
        let (savings_interest, debt_interest) = accrue_interest(&mut player, &settings.bank);
        debug!(
            "Day {}: savings +{savings_interest}, debt +{debt_interest}",
            day.day
        );
        accrued.write(InterestAccrued {
            day: day.day,
            savings_interest,
            debt_interest,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::turn::DayReason,
        world::locations::{City, LocationId},
    };

    #[test]
    fn interest_accrues_once_per_day() {
        let mut app = App::new();
        app.add_message::<DayAdvanced>()
            .add_message::<InterestAccrued>()
            .insert_resource(GameSettings::default())
            .insert_resource(Player::default())
            .add_systems(Update, accrue_daily_interest);

        app.update();
        assert_eq!(app.world().resource::<Player>().debt(), 5_000);

        app.world_mut().write_message(DayAdvanced {
            day: 1,
            days_left: 39,
            city: City::Beijing,
            location: LocationId::new(2),
            reason: DayReason::Travel,
        });
        app.update();
        app.update();
        assert_eq!(app.world().resource::<Player>().debt(), 5_500);
    }
}
