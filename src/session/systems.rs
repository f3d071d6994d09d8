use bevy::prelude::*;

use crate::{
    core::{
        settings::GameSettings,
        turn::{DayAdvanced, DayReason},
    },
    ledger::{components::Player, trade},
    market::resources::MarketBoard,
    services::{bank, hospital},
    world::{locations::LocationAtlas, travel},
};

use super::{
    commands::{ActionReceipt, CommandError, CommandQueue, CommandResolved, PlayerCommand},
    scoring::GameOutcome,
};

/// Executes queued commands in order, stopping after the first one that starts a new day
/// so that later commands see the new day's market.
#[allow(clippy::too_many_arguments)]
pub fn process_commands(
    mut queue: ResMut<CommandQueue>,
    outcome: Res<GameOutcome>,
    settings: Res<GameSettings>,
    atlas: Res<LocationAtlas>,
    market: Res<MarketBoard>,
    mut player: ResMut<Player>,
    mut resolved: MessageWriter<CommandResolved>,
    mut days: MessageWriter<DayAdvanced>,
) {
    while let Some(command) = queue.pop() {
        let result = if outcome.is_over() {
            Err(CommandError::GameOver)
        } else {
            execute(&command, &mut player, &market, &atlas, &settings)
        };

        let journey = match &result {
            Ok(ActionReceipt::Moved(journey)) => Some(*journey),
            _ => None,
        };
        match &result {
            Ok(_) => debug!("Command '{command}' accepted"),
            Err(error) => debug!("Command '{command}' rejected: {error}"),
        }
        resolved.write(CommandResolved {
            command,
            outcome: result,
        });

        if let Some(journey) = journey {
            days.write(DayAdvanced {
                day: settings.player.days.saturating_sub(journey.days_left),
                days_left: journey.days_left,
                city: journey.to_city,
                location: journey.to,
                reason: if journey.changed_city() {
                    DayReason::CitySwitch
                } else {
                    DayReason::Travel
                },
            });
            break;
        }
    }
}

fn execute(
    command: &PlayerCommand,
    player: &mut Player,
    market: &MarketBoard,
    atlas: &LocationAtlas,
    settings: &GameSettings,
) -> Result<ActionReceipt, CommandError> {
    let resolve_good = |query: &str| {
        market
            .catalog()
            .lookup(query)
            .ok_or_else(|| CommandError::UnknownGood {
                query: query.to_string(),
            })
    };

    let receipt = match command {
        PlayerCommand::Travel(location) => {
            ActionReceipt::Moved(travel::travel(player, atlas, *location)?)
        }
        PlayerCommand::SwitchCity(city) => {
            ActionReceipt::Moved(travel::switch_city(player, atlas, *city)?)
        }
        PlayerCommand::Buy { good, quantity } => {
            let id = resolve_good(good)?;
            ActionReceipt::Bought(trade::buy(player, market, id, *quantity)?)
        }
        PlayerCommand::Sell { good, quantity } => {
            let id = resolve_good(good)?;
            ActionReceipt::Sold(trade::sell(player, market, id, *quantity)?)
        }
        PlayerCommand::Deposit(amount) => ActionReceipt::Deposited {
            amount: *amount,
            savings: bank::deposit(player, *amount)?,
        },
        PlayerCommand::Withdraw(amount) => ActionReceipt::Withdrew {
            amount: *amount,
            savings: bank::withdraw(player, *amount)?,
        },
        PlayerCommand::Repay(amount) => ActionReceipt::Repaid {
            amount: *amount,
            debt: bank::repay(player, *amount)?,
        },
        PlayerCommand::Treat(points) => {
            ActionReceipt::Treated(hospital::treat(player, *points, &settings.hospital)?)
        }
    };
    Ok(receipt)
}
