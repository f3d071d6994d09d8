//! Reports emitted after an event's effects have been applied.
use std::fmt;

use serde::Serialize;

use crate::market::components::GoodId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Commercial,
    Health,
    Money,
    Hacker,
}

impl EventCategory {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Commercial => "[Commercial News]",
            Self::Health => "[Health]",
            Self::Money => "[Finance]",
            Self::Hacker => "[Hacker]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceChange {
    pub good: GoodId,
    pub before: u64,
    pub after: u64,
}

/// Numeric deltas of a completed event, for the journal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EffectDeltas {
    pub cash: i64,
    pub savings: i64,
    pub debt: i64,
    pub health: i64,
    pub days: i64,
    pub granted: u32,
    pub price: Option<PriceChange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsReport {
    pub category: EventCategory,
    pub message: String,
    pub effects: EffectDeltas,
}

impl NewsReport {
    pub fn new(category: EventCategory, message: impl Into<String>, effects: EffectDeltas) -> Self {
        Self {
            category,
            message: message.into(),
            effects,
        }
    }
}

impl fmt::Display for NewsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category.tag(), self.message)
    }
}

/// Signed difference `after - before` of two unsigned ledger values.
pub(crate) fn delta(before: u64, after: u64) -> i64 {
    let diff = i128::from(after) - i128::from(before);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_prefixed_with_category_tag() {
        let report = NewsReport::new(EventCategory::Money, "A thug robs you.", EffectDeltas::default());
        assert_eq!(report.to_string(), "[Finance] A thug robs you.");
        assert_eq!(delta(1_000, 900), -100);
        assert_eq!(delta(5, 7), 2);
    }
}
