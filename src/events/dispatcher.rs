//! Daily event rolls. Each category scans its table in order and applies at most one event.
use bevy::log::debug;
use bevy::prelude::Resource;

use crate::{
    core::rng::RandomSource,
    ledger::components::Player,
    market::resources::MarketBoard,
    world::locations::LocationAtlas,
};

use super::{
    catalog::{
        CommercialEffect, CommercialEvent, EventCatalog, COMMERCIAL_ROLL_MAX, PERSONAL_ROLL_MAX,
    },
    reports::{delta, EffectDeltas, EventCategory, NewsReport, PriceChange},
};

#[derive(Resource, Debug, Clone, Default)]
pub struct EventDispatcher {
    catalog: EventCatalog,
}

impl EventDispatcher {
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Runs the commercial, health, money and hacker rolls in that order.
    pub fn dispatch<R: RandomSource + ?Sized>(
        &self,
        player: &mut Player,
        market: &mut MarketBoard,
        atlas: &LocationAtlas,
        rng: &mut R,
    ) -> Vec<NewsReport> {
        let mut reports = Vec::new();
        reports.extend(self.roll_commercial(player, market, rng));
        reports.extend(self.roll_health(player, atlas, rng));
        reports.extend(self.roll_money(player, rng));
        if player.hacker_events() {
            reports.extend(self.roll_hacker(player, rng));
        }
        reports
    }

    pub fn roll_commercial<R: RandomSource + ?Sized>(
        &self,
        player: &mut Player,
        market: &mut MarketBoard,
        rng: &mut R,
    ) -> Option<NewsReport> {
        for event in &self.catalog.commercial {
            if rng.roll(COMMERCIAL_ROLL_MAX) % event.freq != 0 {
                continue;
            }
            if !market.is_available(event.good) {
                debug!(
                    "Commercial event for good {} skipped: not traded here",
                    event.good
                );
                continue;
            }
            return Some(apply_commercial(event, player, market));
        }
        None
    }

    pub fn roll_health<R: RandomSource + ?Sized>(
        &self,
        player: &mut Player,
        atlas: &LocationAtlas,
        rng: &mut R,
    ) -> Option<NewsReport> {
        let event = self
            .catalog
            .health
            .iter()
            .find(|event| rng.roll(PERSONAL_ROLL_MAX) % event.freq == 0)?;

        let health_before = player.health();
        let rule = self.catalog.hospitalisation;
        // Unclamped: a hospital stay only clamps after the recovery is added.
        let wounded = i64::from(health_before) - i64::from(event.damage);

        if wounded >= i64::from(rule.health_below) || player.days_left() <= rule.days_above {
            let health = player.apply_health_delta(-i64::from(event.damage));
            let effects = EffectDeltas {
                health: i64::from(health) - i64::from(health_before),
                ..EffectDeltas::default()
            };
            return Some(NewsReport::new(
                EventCategory::Health,
                format!("{} Health -{}.", event.message, event.damage),
                effects,
            ));
        }

        let delay = 1 + rng.roll(1);
        let spot = self
            .catalog
            .pass_out_spots
            .get(rng.below(self.catalog.pass_out_spots.len() as u32) as usize)
            .copied()
            .unwrap_or("the street");
        let cost = u64::from(delay)
            * (rule.base_cost + u64::from(rng.roll(rule.cost_spread)));

        let debt_before = player.debt();
        let days_before = player.days_left();
        player.add_debt(cost);
        let health =
            player.apply_health_delta(i64::from(rule.recovery) - i64::from(event.damage));
        player.spend_days(delay);

        let location = atlas.name(player.city(), player.location());
        let effects = EffectDeltas {
            debt: delta(debt_before, player.debt()),
            health: i64::from(health) - i64::from(health_before),
            days: i64::from(player.days_left()) - i64::from(days_before),
            ..EffectDeltas::default()
        };
        Some(NewsReport::new(
            EventCategory::Health,
            format!(
                "{} You collapse and the doctor orders {delay} days of rest. \
                 You were found unconscious near {location}, in {spot}. \
                 The hospital director fronted {cost} yuan for your stay.",
                event.message
            ),
            effects,
        ))
    }

    pub fn roll_money<R: RandomSource + ?Sized>(
        &self,
        player: &mut Player,
        rng: &mut R,
    ) -> Option<NewsReport> {
        let event = self
            .catalog
            .money
            .iter()
            .find(|event| rng.roll(PERSONAL_ROLL_MAX) % event.freq == 0)?;

        let loss = (u128::from(player.cash()) * u128::from(event.ratio) / 100)
            .min(u128::from(u64::MAX)) as u64;
        let taken = player.drain_cash(loss);

        Some(NewsReport::new(
            EventCategory::Money,
            format!(
                "{} You lose {}% of your cash ({taken} yuan).",
                event.message, event.ratio
            ),
            EffectDeltas {
                cash: -delta(0, taken),
                ..EffectDeltas::default()
            },
        ))
    }

    pub fn roll_hacker<R: RandomSource + ?Sized>(
        &self,
        player: &mut Player,
        rng: &mut R,
    ) -> Option<NewsReport> {
        let rule = self.catalog.hacker;
        if rng.roll(PERSONAL_ROLL_MAX) % rule.freq != 0 {
            return None;
        }

        let savings = player.savings();
        if savings < rule.min_savings {
            return None;
        }

        let (amount, lost) = if savings > rule.large_savings {
            let amount = savings / u64::from(2 + rng.roll(19));
            (amount, rng.roll(20) % 3 != 0)
        } else {
            (savings / u64::from(1 + rng.roll(14)), false)
        };

        if lost {
            player.drain_savings(amount);
        } else {
            player.credit_savings(amount);
        }

        let verb = if lost { "drops" } else { "grows" };
        Some(NewsReport::new(
            EventCategory::Hacker,
            format!("Hackers break into the bank's database. Your deposit {verb} by {amount} yuan."),
            EffectDeltas {
                savings: delta(savings, player.savings()),
                ..EffectDeltas::default()
            },
        ))
    }
}

fn apply_commercial(
    event: &CommercialEvent,
    player: &mut Player,
    market: &mut MarketBoard,
) -> NewsReport {
    let mut effects = EffectDeltas::default();
    let mut message = event.message.to_string();
    let before = market.price(event.good).unwrap_or_default();

    match event.effect {
        CommercialEffect::Multiply(factor) => {
            let after = market.apply_multiplier(event.good, factor).unwrap_or(before);
            effects.price = Some(PriceChange {
                good: event.good,
                before,
                after,
            });
        }
        CommercialEffect::Divide(factor) => {
            let after = market.apply_divisor(event.good, factor).unwrap_or(before);
            effects.price = Some(PriceChange {
                good: event.good,
                before,
                after,
            });
        }
        CommercialEffect::Grant(quantity) => {
            if let Some(penalty) = event.debt_penalty {
                player.add_debt(penalty);
                effects.debt = delta(0, penalty);
            }

            let granted = quantity.min(player.inventory().free_space());
            let name = market
                .good(event.good)
                .map(|good| good.name.clone())
                .unwrap_or_default();
            if granted > 0 && player.stock(event.good, &name, granted, 0).is_ok() {
                effects.granted = granted;
            }
            if effects.granted < quantity {
                message.push_str(&format!(
                    " You only have room for {} of them.",
                    effects.granted
                ));
            }
        }
    }

    NewsReport::new(EventCategory::Commercial, message, effects)
}
