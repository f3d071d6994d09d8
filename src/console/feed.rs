// src/console/feed.rs
//
// Collects the turn's messages into printable lines.

use bevy::prelude::*;

use crate::{
    core::turn::DayAdvanced,
    events::systems::NewsReported,
    market::resources::MarketBoard,
    services::bank::InterestAccrued,
    session::{commands::CommandResolved, scoring::GameEnded},
    world::locations::LocationAtlas,
};

use super::render;

/// Lines produced by the last update, drained by the front-end.
#[derive(Resource, Debug, Default)]
pub struct ConsoleFeed {
    lines: Vec<String>,
    finished: bool,
}

impl ConsoleFeed {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Set once a `GameEnded` message has been shown.
    pub fn finished(&self) -> bool {
        self.finished
    }
}

/// Runs last in the turn so every stage's messages are visible.
#[allow(clippy::too_many_arguments)]
pub fn collect_feed(
    mut resolved: MessageReader<CommandResolved>,
    mut days: MessageReader<DayAdvanced>,
    mut news: MessageReader<NewsReported>,
    mut interest: MessageReader<InterestAccrued>,
    mut ended: MessageReader<GameEnded>,
    atlas: Res<LocationAtlas>,
    market: Res<MarketBoard>,
    mut feed: ResMut<ConsoleFeed>,
) {
    for message in resolved.read() {
        if let Some(line) = render::receipt(message) {
            feed.push(line);
        }
    }

    let mut new_day = false;
    for day in days.read() {
        feed.push(render::day_header(day, &atlas));
        new_day = true;
    }
    for message in news.read() {
        feed.push(message.report.to_string());
    }
    for accrued in interest.read() {
        if let Some(line) = render::interest(accrued) {
            feed.push(line);
        }
    }

    let mut game_over = false;
    for message in ended.read() {
        feed.push(render::final_score(message.day, &message.result));
        feed.finished = true;
        game_over = true;
    }

    if new_day && !game_over {
        feed.push(render::market(&market.available_goods()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::turn::DayReason,
        events::reports::{EffectDeltas, EventCategory, NewsReport},
        session::{
            commands::{CommandError, PlayerCommand},
            scoring::{EndReason, FinalScore},
        },
        world::locations::{City, LocationId},
    };

    fn feed_app() -> App {
        let mut app = App::new();
        app.add_message::<CommandResolved>()
            .add_message::<DayAdvanced>()
            .add_message::<NewsReported>()
            .add_message::<InterestAccrued>()
            .add_message::<GameEnded>()
            .init_resource::<LocationAtlas>()
            .init_resource::<ConsoleFeed>()
            .insert_resource(MarketBoard::default())
            .add_systems(Update, collect_feed);
        app
    }

    #[test]
    fn new_day_lines_follow_pipeline_order() {
        let mut app = feed_app();
        let world = app.world_mut();
        world.write_message(NewsReported {
            day: 1,
            report: NewsReport::new(
                EventCategory::Health,
                "You were mugged.",
                EffectDeltas::default(),
            ),
        });
        world.write_message(DayAdvanced {
            day: 1,
            days_left: 39,
            city: City::Beijing,
            location: LocationId::new(2),
            reason: DayReason::Travel,
        });
        world.write_message(InterestAccrued {
            day: 1,
            savings_interest: 0,
            debt_interest: 500,
        });
        app.update();

        let lines = app.world_mut().resource_mut::<ConsoleFeed>().drain();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("=== Day 1 === arrived at Beijing Railway Station"));
        assert_eq!(lines[1], "[Health] You were mugged.");
        assert_eq!(lines[2], "[Bank] savings +0, debt +500");
        assert_eq!(lines[3], "Nothing is traded here today.");
        assert!(app.world().resource::<ConsoleFeed>().lines.is_empty());
    }

    #[test]
    fn game_over_replaces_the_market_listing() {
        let mut app = feed_app();
        let world = app.world_mut();
        world.write_message(CommandResolved {
            command: PlayerCommand::Withdraw(5),
            outcome: Err(CommandError::GameOver),
        });
        world.write_message(GameEnded {
            day: 40,
            result: FinalScore {
                reason: EndReason::HealthZero,
                cash: 0,
                savings: 0,
                debt: 5_000,
                score: -5_000,
                liquidation: Vec::new(),
            },
        });
        app.update();

        let feed = app.world().resource::<ConsoleFeed>();
        assert!(feed.finished());
        assert_eq!(feed.lines.len(), 2);
        assert!(feed.lines[0].contains("failed"));
        assert!(feed.lines[1].starts_with("=== Game over on day 40"));
    }
}
