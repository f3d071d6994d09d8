// src/console/plugin.rs
//
// ConsolePlugin gathers each turn's messages for the text front-end.

use bevy::prelude::*;

use crate::core::turn::TurnSet;

use super::feed::{collect_feed, ConsoleFeed};

pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        info!("ConsolePlugin registered");

        app.init_resource::<ConsoleFeed>()
            .add_systems(Update, collect_feed.in_set(TurnSet::Present));
    }
}
