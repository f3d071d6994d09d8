// src/console/render.rs
//
// Plain-text screens for the console front-end.

use crate::{
    core::turn::{DayAdvanced, DayReason},
    ledger::components::{Player, MAX_HEALTH},
    market::resources::MarketListing,
    services::bank::InterestAccrued,
    session::{
        commands::{ActionReceipt, CommandResolved},
        scoring::{EndReason, FinalScore},
    },
    world::locations::{City, LocationAtlas, LocationId},
};

pub const HELP: &str = "\
Commands:
  status                      show cash, savings, debt, health and inventory
  goods                       list goods traded at this stop
  locations                   list stops in the current city
  travel <n>                  ride to stop n (one day)
  city <beijing|shanghai>     change city (one day)
  buy <good> <qty>            buy by id or name prefix
  sell <good> <qty>           sell by id or name prefix
  deposit|withdraw <amount>   move cash to or from savings
  repay <amount>              pay down the loan from cash
  treat <points>              pay the hospital to restore health
  help                        this list
  quit                        leave the game";

pub fn status(player: &Player, atlas: &LocationAtlas) -> String {
    let mut lines = vec![
        format!(
            "{} | {} - {} (stop {}) | {} days left",
            player.name(),
            player.city(),
            atlas.name(player.city(), player.location()),
            player.location(),
            player.days_left()
        ),
        format!(
            "cash {} | savings {} | debt {} | net {}",
            player.cash(),
            player.savings(),
            player.debt(),
            player.net_worth()
        ),
        format!(
            "health {}/{MAX_HEALTH} | fame {} | space {}/{}",
            player.health(),
            player.fame(),
            player.inventory().used(),
            player.inventory().capacity()
        ),
    ];

    if player.inventory().is_empty() {
        lines.push("  (carrying nothing)".to_string());
    }
    for (id, entry) in player.inventory().entries() {
        lines.push(format!(
            "  [{}] {:<22} x{:<4} avg cost {}",
            id.index(),
            entry.name,
            entry.quantity,
            entry.average_cost
        ));
    }
    lines.join("\n")
}

pub fn market(listings: &[MarketListing]) -> String {
    if listings.is_empty() {
        return "Nothing is traded here today.".to_string();
    }
    let mut lines = vec!["Today's prices:".to_string()];
    lines.extend(listings.iter().map(|listing| {
        format!(
            "  [{}] {:<22} {:>7}",
            listing.id.index(),
            listing.name,
            listing.price
        )
    }));
    lines.join("\n")
}

pub fn locations(atlas: &LocationAtlas, city: City, current: LocationId) -> String {
    let mut lines = vec![format!("{city}:")];
    lines.extend(atlas.locations(city).iter().map(|location| {
        let marker = if location.id == current { '*' } else { ' ' };
        format!("{marker} {:>2}. {}", location.id.value(), location.name)
    }));
    lines.join("\n")
}

pub fn day_header(day: &DayAdvanced, atlas: &LocationAtlas) -> String {
    let arrival = match day.reason {
        DayReason::Travel => "arrived at",
        DayReason::CitySwitch => "took the train to",
    };
    format!(
        "=== Day {} === {arrival} {} in {} ({} days left)",
        day.day,
        atlas.name(day.city, day.location),
        day.city,
        day.days_left
    )
}

pub fn interest(accrued: &InterestAccrued) -> Option<String> {
    if accrued.savings_interest == 0 && accrued.debt_interest == 0 {
        return None;
    }
    Some(format!(
        "[Bank] savings +{}, debt +{}",
        accrued.savings_interest, accrued.debt_interest
    ))
}

pub fn receipt(resolved: &CommandResolved) -> Option<String> {
    let receipt = match &resolved.outcome {
        Ok(receipt) => receipt,
        Err(error) => return Some(format!("'{}' failed: {error}", resolved.command)),
    };

    match receipt {
        // The day header announces the arrival.
        ActionReceipt::Moved(_) => None,
        ActionReceipt::Bought(purchase) => Some(format!(
            "Bought {} {} at {} for {}",
            purchase.quantity, purchase.name, purchase.unit_price, purchase.total_cost
        )),
        ActionReceipt::Sold(sale) => Some(format!(
            "Sold {} {} at {} for {} (profit {})",
            sale.quantity, sale.name, sale.unit_price, sale.revenue, sale.profit
        )),
        ActionReceipt::Deposited { amount, savings } => {
            Some(format!("Deposited {amount}; savings now {savings}"))
        }
        ActionReceipt::Withdrew { amount, savings } => {
            Some(format!("Withdrew {amount}; savings now {savings}"))
        }
        ActionReceipt::Repaid { amount, debt } => {
            Some(format!("Repaid {amount}; debt now {debt}"))
        }
        ActionReceipt::Treated(treatment) => Some(format!(
            "Treated {} points for {}; health now {}",
            treatment.points, treatment.cost, treatment.health
        )),
    }
}

pub fn final_score(day: u32, result: &FinalScore) -> String {
    let reason = match result.reason {
        EndReason::DaysOver => "Your time in the city is up.",
        EndReason::HealthZero => "You collapsed in the street.",
    };
    let mut lines = vec![format!("=== Game over on day {day} === {reason}")];
    for sale in &result.liquidation {
        lines.push(format!(
            "  sold off {} {} at {} ({})",
            sale.quantity, sale.name, sale.unit_price, sale.revenue
        ));
    }
    lines.push(format!(
        "cash {} + savings {} - debt {} = score {}",
        result.cash, result.savings, result.debt, result.score
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        market::components::GoodId,
        session::commands::{CommandError, PlayerCommand},
    };

    #[test]
    fn market_lists_ids_names_and_prices() {
        let text = market(&[MarketListing {
            id: GoodId::new(7),
            name: "Fake Cosmetics".to_string(),
            price: 120,
        }]);
        assert!(text.contains("[7] Fake Cosmetics"));
        assert!(text.trim_end().ends_with("120"));
        assert_eq!(market(&[]), "Nothing is traded here today.");
    }

    #[test]
    fn locations_mark_the_current_stop() {
        let atlas = LocationAtlas::default();
        let text = locations(&atlas, City::Shanghai, LocationId::new(6));
        assert!(text.starts_with("Shanghai:"));
        assert!(text.contains("*  6. The Bund"));
        assert_eq!(text.lines().count(), 11);
    }

    #[test]
    fn rejected_commands_explain_themselves() {
        let resolved = CommandResolved {
            command: PlayerCommand::Deposit(10),
            outcome: Err(CommandError::GameOver),
        };
        assert_eq!(
            receipt(&resolved).as_deref(),
            Some("'deposit 10' failed: the game is over")
        );
    }

    #[test]
    fn final_score_shows_the_arithmetic() {
        let text = final_score(
            40,
            &FinalScore {
                reason: EndReason::DaysOver,
                cash: 9_000,
                savings: 1_000,
                debt: 4_000,
                score: 6_000,
                liquidation: Vec::new(),
            },
        );
        assert!(text.contains("day 40"));
        assert!(text.ends_with("cash 9000 + savings 1000 - debt 4000 = score 6000"));
    }
}
