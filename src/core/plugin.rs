//! CorePlugin wires settings, the random stream and the turn schedule.
use bevy::prelude::*;

use crate::world::locations::LocationAtlas;

use super::{
    rng::GameRng,
    settings::GameSettings,
    turn::{DayAdvanced, TurnSet},
};

/// Registers settings, randomness and the ordered turn sets.
#[derive(Debug, Clone, Default)]
pub struct CorePlugin {
    settings: Option<GameSettings>,
}

impl CorePlugin {
    /// Uses the given settings instead of reading `config/game.toml`.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_settings(settings: GameSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = self
            .settings
            .clone()
            .unwrap_or_else(GameSettings::load_or_default);
        let rng = match settings.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        };

        app.insert_resource(settings)
            .insert_resource(rng)
            .init_resource::<LocationAtlas>()
            .add_message::<DayAdvanced>()
            .configure_sets(
                Update,
                (
                    TurnSet::Commands,
                    TurnSet::Market,
                    TurnSet::Events,
                    TurnSet::Interest,
                    TurnSet::Resolve,
                    TurnSet::Journal,
                    TurnSet::Present,
                )
                    .chain(),
            )
            .add_systems(Startup, log_startup_settings);

        #[cfg(feature = "core_debug")]
        {
            app.add_systems(Update, log_day_summary.in_set(TurnSet::Present));
        }
    }
}

fn log_startup_settings(settings: Res<GameSettings>, rng: Res<GameRng>) {
    match rng.seed() {
        Some(seed) => info!(
            "CorePlugin initialised for {} ({} days, seed {seed})",
            settings.player.name, settings.player.days
        ),
        None => info!(
            "CorePlugin initialised for {} ({} days, unseeded)",
            settings.player.name, settings.player.days
        ),
    }
}

#[cfg(feature = "core_debug")]
fn log_day_summary(
    mut days: MessageReader<DayAdvanced>,
    player: Option<Res<crate::ledger::components::Player>>,
) {
    let Some(player) = player else {
        return;
    };
    for day in days.read() {
        info!(
            target: "core_debug",
            "Day {} | {} #{} | cash {} | savings {} | debt {} | health {}",
            day.day,
            day.city,
            day.location,
            player.cash(),
            player.savings(),
            player.debt(),
            player.health(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_settings(seed: u64) -> GameSettings {
        GameSettings {
            seed: Some(seed),
            ..GameSettings::default()
        }
    }

    #[test]
    fn plugin_seeds_the_random_stream_from_settings() {
        let mut app = App::new();
        app.add_plugins(CorePlugin::with_settings(seeded_settings(77)));
        app.update();

        assert_eq!(app.world().resource::<GameRng>().seed(), Some(77));
        assert!(app.world().contains_resource::<LocationAtlas>());
        assert_eq!(app.world().resource::<GameSettings>().player.days, 40);
    }

    #[test]
    fn turn_sets_run_in_declared_order() {
        #[derive(Resource, Default)]
        struct Trace(Vec<TurnSet>);

        fn stamp(set: TurnSet) -> impl FnMut(ResMut<Trace>) {
            move |mut trace: ResMut<Trace>| trace.0.push(set)
        }

        let mut app = App::new();
        app.add_plugins(CorePlugin::with_settings(seeded_settings(1)))
            .init_resource::<Trace>();
        for set in TurnSet::ORDER.iter().rev() {
            app.add_systems(Update, stamp(*set).in_set(*set));
        }
        app.update();

        assert_eq!(app.world().resource::<Trace>().0, TurnSet::ORDER.to_vec());
    }
}
