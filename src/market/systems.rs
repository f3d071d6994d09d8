use bevy::prelude::*;

use crate::{core::rng::GameRng, core::turn::DayAdvanced, ledger::components::Player};

use super::resources::MarketBoard;

/// Draws the opening day's prices for the starting location.
pub fn open_market(
    mut market: ResMut<MarketBoard>,
    mut rng: ResMut<GameRng>,
    player: Res<Player>,
) {
    market.regenerate_prices(&mut *rng);
    market.refresh_availability(player.city(), player.location());
    info!(
        "Market opened in {} at stop {} with {} goods on offer",
        player.city(),
        player.location(),
        market.available_goods().len()
    );
}

/// Redraws prices and availability once per day-advancing action.
pub fn refresh_market_for_new_day(
    mut days: MessageReader<DayAdvanced>,
    mut market: ResMut<MarketBoard>,
    mut rng: ResMut<GameRng>,
) {
    for day in days.read() {
        market.regenerate_prices(&mut *rng);
        market.refresh_availability(day.city, day.location);
        debug!(
            "Day {} prices redrawn for {} stop {}",
            day.day, day.city, day.location
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::turn::DayReason,
        world::locations::{City, LocationId},
    };

    fn market_app() -> App {
        let mut app = App::new();
        app.add_message::<DayAdvanced>()
            .insert_resource(GameRng::seeded(5))
            .insert_resource(Player::default())
            .insert_resource(MarketBoard::default())
            .add_systems(Startup, open_market)
            .add_systems(Update, refresh_market_for_new_day);
        app
    }

    #[test]
    fn opening_market_uses_the_starting_stop() {
        let mut app = market_app();
        app.update();

        let market = app.world().resource::<MarketBoard>();
        let ids: Vec<usize> = market
            .available_goods()
            .iter()
            .map(|listing| listing.id.index())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn new_day_moves_availability_to_the_destination() {
        let mut app = market_app();
        app.update();

        app.world_mut().write_message(DayAdvanced {
            day: 1,
            days_left: 39,
            city: City::Shanghai,
            location: LocationId::new(10),
            reason: DayReason::CitySwitch,
        });
        app.update();

        let market = app.world().resource::<MarketBoard>();
        assert!(!market.is_available(crate::market::components::GoodId::new(5)));
        for good in market.catalog().iter() {
            let price = market.price(good.id).expect("priced");
            assert!(good.band.contains(price));
        }
    }
}
