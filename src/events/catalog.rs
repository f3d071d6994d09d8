//! Fixed event tables. Entry order is part of the balance: the first match wins.
use std::fmt;

use crate::market::{components::GoodId, data::GoodsCatalog};

/// Upper bound (inclusive) of the commercial roll.
pub const COMMERCIAL_ROLL_MAX: u32 = 950;
/// Upper bound (inclusive) of the health, money and hacker rolls.
pub const PERSONAL_ROLL_MAX: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommercialEffect {
    Multiply(u64),
    Divide(u64),
    /// Free units, capped by remaining inventory space.
    Grant(u32),
}

#[derive(Debug, Clone)]
pub struct CommercialEvent {
    pub freq: u32,
    pub good: GoodId,
    pub effect: CommercialEffect,
    /// Debt charged when this entry's grant fires.
    pub debt_penalty: Option<u64>,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct HealthEvent {
    pub freq: u32,
    pub damage: u32,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct MoneyEvent {
    pub freq: u32,
    /// Percentage of cash lost.
    pub ratio: u64,
    pub message: &'static str,
}

/// Bank intrusion tuning.
#[derive(Debug, Clone, Copy)]
pub struct HackerRule {
    pub freq: u32,
    pub min_savings: u64,
    pub large_savings: u64,
}

impl Default for HackerRule {
    fn default() -> Self {
        Self {
            freq: 25,
            min_savings: 1_000,
            large_savings: 100_000,
        }
    }
}

/// Health threshold and calendar margin that turn a beating into a hospital stay.
#[derive(Debug, Clone, Copy)]
pub struct HospitalisationRule {
    pub health_below: u32,
    pub days_above: u32,
    pub recovery: u32,
    pub base_cost: u64,
    pub cost_spread: u32,
}

impl Default for HospitalisationRule {
    fn default() -> Self {
        Self {
            health_below: 85,
            days_above: 3,
            recovery: 10,
            base_cost: 1_000,
            cost_spread: 8_500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventCatalogError {
    ZeroFrequency { table: &'static str, index: usize },
    ZeroFactor { index: usize },
    UnknownGood { index: usize, good: GoodId },
    NoPassOutSpots,
}

impl fmt::Display for EventCatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFrequency { table, index } => {
                write!(f, "{table} event {index} has a zero frequency")
            }
            Self::ZeroFactor { index } => {
                write!(f, "commercial event {index} has a zero price factor")
            }
            Self::UnknownGood { index, good } => {
                write!(f, "commercial event {index} targets unknown good {good}")
            }
            Self::NoPassOutSpots => write!(f, "hospitalisation needs at least one pass-out spot"),
        }
    }
}

impl std::error::Error for EventCatalogError {}

#[derive(Debug, Clone)]
pub struct EventCatalog {
    pub commercial: Vec<CommercialEvent>,
    pub health: Vec<HealthEvent>,
    pub money: Vec<MoneyEvent>,
    pub hacker: HackerRule,
    pub hospitalisation: HospitalisationRule,
    pub pass_out_spots: Vec<&'static str>,
}

impl EventCatalog {
    pub fn standard() -> Self {
        use CommercialEffect::{Divide, Grant, Multiply};

        let news = |freq: u32, good: usize, effect: CommercialEffect, message: &'static str| {
            CommercialEvent {
                freq,
                good: GoodId::new(good),
                effect,
                debt_penalty: None,
                message,
            }
        };
        let health = |freq: u32, damage: u32, message: &'static str| HealthEvent {
            freq,
            damage,
            message,
        };
        let money = |freq: u32, ratio: u64, message: &'static str| MoneyEvent {
            freq,
            ratio,
            message,
        };

        let commercial = vec![
            news(170, 5, Multiply(2), "Experts say imported underwear is flying off the shelves!"),
            news(139, 3, Multiply(3), "Health inspectors find poisonous fake liquor; what little is left triples in price!"),
            news(100, 4, Multiply(5), "A hospital report praises Shanghai dolls as \"very soothing\"!"),
            news(41, 2, Multiply(4), "Old Cai says every Nobel laureate this year watches pirated VCDs!"),
            news(37, 1, Multiply(3), "City hall vows to crush cigarette smuggling; smuggled packs get scarce!"),
            news(23, 7, Multiply(4), "The commerce bureau says fake cosmetics are all the rage!"),
            news(37, 4, Multiply(8), "A popular website rates Shanghai dolls first class!"),
            news(15, 7, Multiply(7), "A pop star swears by fake cosmetics: stay young forever!"),
            news(40, 3, Multiply(7), "Half the city is bottling fake liquor and still cannot meet demand!"),
            news(29, 6, Multiply(7), "University students rush to buy grey-market phones!"),
            news(35, 1, Multiply(8), "Housing reform sends smuggled cigarette prices through the roof!"),
            news(17, 0, Divide(8), "The market is flooded with pirated software!"),
            news(24, 5, Divide(5), "Kids are too busy online to care about imported underwear."),
            news(18, 2, Divide(8), "A national crackdown busts a huge pirated VCD ring!"),
            news(160, 1, Grant(2), "A classmate gives you two cartons of smuggled cigarettes. Thank him!"),
            news(45, 0, Grant(6), "A police raid recovers pirated software that was stolen from you."),
            news(35, 3, Grant(4), "On your way home someone presses some counterfeit liquor on you!"),
            CommercialEvent {
                debt_penalty: Some(2_500),
                ..news(
                    140,
                    6,
                    Grant(1),
                    "A smooth talker hands you an unbranded grey-market phone and bills it to your debt: 2500 yuan.",
                )
            },
        ];

        let health = vec![
            health(117, 3, "You get shaken down on the street!"),
            health(157, 20, "Someone punches you on the subway!"),
            health(21, 1, "A mad dog chases you down the block."),
            health(100, 1, "You get stuck in a crushing traffic jam!"),
            health(35, 1, "A pickpocket punches you!"),
            health(313, 10, "A gang of beggars beats you up!"),
            health(120, 5, "A brick hits you at a street stall!"),
            health(29, 3, "You are threatened with a knife in an office lobby!"),
            health(43, 1, "A snack stall gives you food poisoning!"),
            health(45, 1, "You are mocked at the market and lose face!"),
            health(48, 1, "You are fined 40 yuan. Sigh..."),
            health(33, 1, "Someone throws sand at you while you admire the view!"),
        ];

        let money = vec![
            money(60, 10, "A con artist corners you on the road!"),
            money(125, 10, "A thug blocks your way: \"Hand over the cash!\""),
            money(100, 40, "A policeman stops you: \"Pay the fee!\""),
            money(65, 20, "A neighbourhood warden demands to know your business, and your money!"),
            money(35, 15, "The telecom office chases you for an unpaid phone bill."),
            money(27, 10, "A policeman asks for your business licence, and a little something extra."),
            money(40, 5, "You catch something on the street and pay for medicine."),
        ];

        Self {
            commercial,
            health,
            money,
            hacker: HackerRule::default(),
            hospitalisation: HospitalisationRule::default(),
            pass_out_spots: vec![
                "a cafe",
                "a newsstand",
                "a phone booth",
                "a public toilet",
                "a bus stop",
                "a subway entrance",
                "a restaurant",
                "a taxi",
                "a corner shop",
                "a cinema",
                "a snack kiosk",
                "a fitting room",
                "a gym",
                "a back alley",
                "the roadside",
                "a bank doorway",
                "a public park",
                "the hospital gate",
                "an arcade doorway",
            ],
        }
    }

    /// Checks frequencies, factors and targets against the loaded goods.
    pub fn validate(&self, goods: &GoodsCatalog) -> Result<(), EventCatalogError> {
        for (index, event) in self.commercial.iter().enumerate() {
            if event.freq == 0 {
                return Err(EventCatalogError::ZeroFrequency {
                    table: "commercial",
                    index,
                });
            }
            if matches!(
                event.effect,
                CommercialEffect::Multiply(0) | CommercialEffect::Divide(0)
            ) {
                return Err(EventCatalogError::ZeroFactor { index });
            }
            if goods.get(event.good).is_none() {
                return Err(EventCatalogError::UnknownGood {
                    index,
                    good: event.good,
                });
            }
        }

        if let Some(index) = self.health.iter().position(|event| event.freq == 0) {
            return Err(EventCatalogError::ZeroFrequency {
                table: "health",
                index,
            });
        }
        if let Some(index) = self.money.iter().position(|event| event.freq == 0) {
            return Err(EventCatalogError::ZeroFrequency {
                table: "money",
                index,
            });
        }
        if self.hacker.freq == 0 {
            return Err(EventCatalogError::ZeroFrequency {
                table: "hacker",
                index: 0,
            });
        }
        if self.pass_out_spots.is_empty() {
            return Err(EventCatalogError::NoPassOutSpots);
        }

        Ok(())
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
