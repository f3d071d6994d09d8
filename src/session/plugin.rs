//! SessionPlugin owns the player, the command queue and the end of the game.
use bevy::prelude::*;

use crate::{
    core::{settings::GameSettings, turn::TurnSet},
    ledger::components::Player,
};

use super::{
    commands::{CommandQueue, CommandResolved},
    journal::{flush_game_journal, record_session_start, record_turn, GameJournal},
    scoring::{check_game_over, GameEnded, GameOutcome},
    systems::process_commands,
};

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<GameSettings>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(Player::from_settings(&settings.player))
            .insert_resource(GameJournal::for_session(
                &settings.journal,
                &settings.player.name,
            ))
            .init_resource::<CommandQueue>()
            .init_resource::<GameOutcome>()
            .add_message::<CommandResolved>()
            .add_message::<GameEnded>()
            .add_systems(Startup, record_session_start)
            .add_systems(
                Update,
                (
                    process_commands.in_set(TurnSet::Commands),
                    check_game_over.in_set(TurnSet::Resolve),
                    (record_turn, flush_game_journal)
                        .chain()
                        .in_set(TurnSet::Journal),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::CorePlugin,
        events::EventsPlugin,
        market::{components::GoodId, resources::MarketBoard, MarketPlugin},
        services::ServicesPlugin,
        session::{
            commands::{CommandError, PlayerCommand},
            scoring::EndReason,
        },
        world::locations::{City, LocationId},
    };

    #[derive(Resource, Default)]
    struct Resolved(Vec<CommandResolved>);

    fn collect_resolved(mut reader: MessageReader<CommandResolved>, mut seen: ResMut<Resolved>) {
        seen.0.extend(reader.read().cloned());
    }

    fn game(seed: u64, days: u32) -> App {
        let mut settings = GameSettings::default();
        settings.seed = Some(seed);
        settings.journal.enabled = false;
        settings.player.days = days;

        let mut app = App::new();
        app.add_plugins((
            CorePlugin::with_settings(settings),
            MarketPlugin,
            EventsPlugin,
            ServicesPlugin,
            SessionPlugin,
        ))
        .init_resource::<Resolved>()
        .add_systems(Update, collect_resolved.in_set(TurnSet::Present));
        app.update();
        app
    }

    fn issue(app: &mut App, command: PlayerCommand) {
        app.world_mut().resource_mut::<CommandQueue>().push(command);
        app.update();
    }

    #[test]
    fn travel_runs_the_daily_pipeline() {
        let mut app = game(9, 40);
        issue(&mut app, PlayerCommand::Travel(LocationId::new(3)));

        let player = app.world().resource::<Player>();
        assert_eq!(player.location(), LocationId::new(3));
        assert!((37..=39).contains(&player.days_left()));
        assert!(player.debt() >= 5_500, "interest accrued on {}", player.debt());

        let market = app.world().resource::<MarketBoard>();
        assert!(!market.is_available(GoodId::new(2)));
        assert!(!market.is_available(GoodId::new(6)));
        assert!(market.is_available(GoodId::new(3)));
        assert!(!app.world().resource::<GameOutcome>().is_over());
    }

    #[test]
    fn trading_leaves_the_calendar_alone() {
        let mut app = game(11, 40);
        let price = app
            .world()
            .resource::<MarketBoard>()
            .price(GoodId::new(1))
            .expect("cigarettes priced");

        issue(
            &mut app,
            PlayerCommand::Buy {
                good: "smuggled".to_string(),
                quantity: 2,
            },
        );

        let player = app.world().resource::<Player>();
        assert_eq!(player.days_left(), 40);
        assert_eq!(player.cash(), 2_000 - 2 * price);
        assert_eq!(player.inventory().quantity_of(GoodId::new(1)), 2);
        assert_eq!(player.debt(), 5_000);
    }

    #[test]
    fn commands_behind_a_trip_wait_for_the_next_update() {
        let mut app = game(3, 40);
        {
            let mut queue = app.world_mut().resource_mut::<CommandQueue>();
            queue.push(PlayerCommand::Travel(LocationId::new(2)));
            queue.push(PlayerCommand::Deposit(100));
        }

        app.update();
        assert_eq!(app.world().resource::<CommandQueue>().len(), 1);
        assert_eq!(app.world().resource::<Player>().savings(), 0);

        app.update();
        assert!(app.world().resource::<CommandQueue>().is_empty());
        assert_eq!(app.world().resource::<Player>().savings(), 100);
    }

    #[test]
    fn last_day_ends_the_game_and_later_commands_are_rejected() {
        let mut app = game(21, 1);
        issue(&mut app, PlayerCommand::Travel(LocationId::new(2)));

        let outcome = app.world().resource::<GameOutcome>();
        let result = outcome.result().expect("game over").clone();
        assert_eq!(result.reason, EndReason::DaysOver);
        let player = app.world().resource::<Player>();
        assert!(player.inventory().is_empty());
        assert_eq!(result.score, player.net_worth());

        issue(&mut app, PlayerCommand::Deposit(1));
        let resolved = &app.world().resource::<Resolved>().0;
        let last = resolved.last().expect("deposit resolved");
        assert_eq!(last.outcome, Err(CommandError::GameOver));
        assert_eq!(app.world().resource::<Player>().savings(), 0);
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let script = [
            PlayerCommand::Travel(LocationId::new(4)),
            PlayerCommand::Buy {
                good: "0".to_string(),
                quantity: 3,
            },
            PlayerCommand::Travel(LocationId::new(9)),
            PlayerCommand::SwitchCity(City::Shanghai),
            PlayerCommand::Travel(LocationId::new(6)),
        ];

        let replay = |seed: u64| {
            let mut app = game(seed, 40);
            for command in script.iter().cloned() {
                issue(&mut app, command);
            }
            let player = app.world().resource::<Player>();
            let market = app.world().resource::<MarketBoard>();
            (
                player.cash(),
                player.debt(),
                player.health(),
                player.days_left(),
                market.available_goods(),
            )
        };

        assert_eq!(replay(1234), replay(1234));
    }
}
