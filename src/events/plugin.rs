//! EventsPlugin rolls the daily commercial, health, money and hacker events.
use bevy::prelude::*;

use crate::{core::turn::TurnSet, market::systems::open_market};

use super::{
    dispatcher::EventDispatcher,
    systems::{dispatch_daily_events, validate_event_catalog, NewsReported},
};

pub struct EventsPlugin;

impl Plugin for EventsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EventDispatcher>()
            .add_message::<NewsReported>()
            .add_systems(Startup, validate_event_catalog.before(open_market))
            .add_systems(Update, dispatch_daily_events.in_set(TurnSet::Events));
    }
}
