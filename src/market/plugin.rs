//! MarketPlugin loads the goods catalog and keeps the price board current.
use bevy::prelude::*;

use crate::core::turn::TurnSet;

use super::{
    data::GoodsCatalog,
    resources::MarketBoard,
    systems::{open_market, refresh_market_for_new_day},
};

pub struct MarketPlugin;

impl Plugin for MarketPlugin {
    fn build(&self, app: &mut App) {
        let catalog = GoodsCatalog::load_or_default();
        info!("Goods catalog loaded with {} goods", catalog.len());

        app.insert_resource(MarketBoard::new(catalog))
            .add_systems(Startup, open_market)
            .add_systems(Update, refresh_market_for_new_day.in_set(TurnSet::Market));
    }
}
