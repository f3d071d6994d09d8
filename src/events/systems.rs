use bevy::prelude::*;

use crate::{
    core::{rng::GameRng, turn::DayAdvanced},
    ledger::components::Player,
    market::{data::GoodsCatalog, resources::MarketBoard},
    world::locations::LocationAtlas,
};

use super::{dispatcher::EventDispatcher, reports::NewsReport};

/// A completed event, published for the console and the journal.
#[derive(Message, Debug, Clone)]
pub struct NewsReported {
    pub day: u32,
    pub report: NewsReport,
}

/// Swaps in the built-in goods when the event tables reference goods the loaded
/// catalog lacks. Runs before the market opens.
pub fn validate_event_catalog(dispatcher: Res<EventDispatcher>, mut market: ResMut<MarketBoard>) {
    let events = dispatcher.catalog();
    if let Err(error) = events.validate(market.catalog()) {
        warn!("Event catalog does not match the goods catalog ({error}); using the built-in goods");
        *market = MarketBoard::new(GoodsCatalog::fallback());
    }
    debug!(
        "Event catalog ready: {} commercial, {} health, {} money events",
        events.commercial.len(),
        events.health.len(),
        events.money.len()
    );
}

/// Rolls every event category once per new day, after prices were redrawn.
pub fn dispatch_daily_events(
    mut days: MessageReader<DayAdvanced>,
    dispatcher: Res<EventDispatcher>,
    atlas: Res<LocationAtlas>,
    mut player: ResMut<Player>,
    mut market: ResMut<MarketBoard>,
    mut rng: ResMut<GameRng>,
    mut news: MessageWriter<NewsReported>,
) {
    for day in days.read() {
        let reports = dispatcher.dispatch(&mut player, &mut market, &atlas, &mut *rng);
        if reports.is_empty() {
            debug!("Day {}: no events", day.day);
        }
        for report in reports {
            info!(target: "events", "Day {}: {}", day.day, report);
            news.write(NewsReported {
                day: day.day,
                report,
            });
        }
    }
}
