//! Game configuration loaded from `config/game.toml` with environment overrides.
use std::{env, fs, path::Path, path::PathBuf};

use bevy::prelude::*;
use serde::Deserialize;

use crate::world::locations::{City, LocationId};

const CONFIG_PATH: &str = "config/game.toml";

pub const ENV_SEED: &str = "FUSHENGJI_SEED";
pub const ENV_PLAYER: &str = "FUSHENGJI_PLAYER";
pub const ENV_JOURNAL_DIR: &str = "FUSHENGJI_JOURNAL_DIR";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameConfig {
    #[serde(default)]
    player: RawPlayerSection,
    #[serde(default)]
    bank: RawBankSection,
    #[serde(default)]
    hospital: RawHospitalSection,
    #[serde(default)]
    journal: RawJournalSection,
    #[serde(default)]
    rng: RawRngSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayerSection {
    name: String,
    cash: u64,
    debt: u64,
    savings: u64,
    health: u32,
    fame: u32,
    days: u32,
    inventory_capacity: u32,
    hacker_events: bool,
    city: City,
    location: u32,
}

impl Default for RawPlayerSection {
    fn default() -> Self {
        Self {
            name: "Xiao Fusheng".to_string(),
            cash: 2_000,
            debt: 5_000,
            savings: 0,
            health: 100,
            fame: 100,
            days: 40,
            inventory_capacity: 100,
            hacker_events: false,
            city: City::Beijing,
            location: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawBankSection {
    deposit_rate_percent: u64,
    debt_rate_percent: u64,
}

impl Default for RawBankSection {
    fn default() -> Self {
        Self {
            deposit_rate_percent: 1,
            debt_rate_percent: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHospitalSection {
    cost_per_point: u64,
}

impl Default for RawHospitalSection {
    fn default() -> Self {
        Self {
            cost_per_point: 3_500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawJournalSection {
    enabled: bool,
    directory: String,
}

impl Default for RawJournalSection {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRngSection {
    seed: Option<u64>,
}

/// Starting ledger for a new game.
#[derive(Debug, Clone)]
pub struct PlayerSettings {
    pub name: String,
    pub cash: u64,
    pub debt: u64,
    pub savings: u64,
    pub health: u32,
    pub fame: u32,
    pub days: u32,
    pub inventory_capacity: u32,
    pub hacker_events: bool,
    pub city: City,
    pub location: LocationId,
}

#[derive(Debug, Clone, Copy)]
pub struct BankSettings {
    pub deposit_rate_percent: u64,
    pub debt_rate_percent: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct HospitalSettings {
    pub cost_per_point: u64,
}

#[derive(Debug, Clone)]
pub struct JournalSettings {
    pub enabled: bool,
    pub directory: PathBuf,
}

/// Runtime configuration derived from `config/game.toml`.
#[derive(Resource, Debug, Clone)]
pub struct GameSettings {
    pub player: PlayerSettings,
    pub bank: BankSettings,
    pub hospital: HospitalSettings,
    pub journal: JournalSettings,
    pub seed: Option<u64>,
}

impl GameSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        let raw = match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawGameConfig>(&data) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawGameConfig::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawGameConfig::default()
            }
        };

        let mut settings = Self::from(raw);
        settings.apply_env_overrides();
        settings
    }

    /// Applies `FUSHENGJI_*` overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = env::var(ENV_SEED)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
        {
            self.seed = Some(seed);
        }

        if let Ok(name) = env::var(ENV_PLAYER) {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                self.player.name = trimmed.to_string();
            }
        }

        if let Ok(directory) = env::var(ENV_JOURNAL_DIR) {
            let trimmed = directory.trim();
            if !trimmed.is_empty() {
                self.journal.directory = PathBuf::from(trimmed);
            }
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        RawGameConfig::default().into()
    }
}

impl From<RawGameConfig> for GameSettings {
    fn from(value: RawGameConfig) -> Self {
        let player = value.player;
        let name = player.name.trim();

        Self {
            player: PlayerSettings {
                name: if name.is_empty() {
                    RawPlayerSection::default().name
                } else {
                    name.to_string()
                },
                cash: player.cash,
                debt: player.debt,
                savings: player.savings,
                health: player.health.clamp(1, 100),
                fame: player.fame.min(100),
                days: player.days.max(1),
                inventory_capacity: player.inventory_capacity.max(1),
                hacker_events: player.hacker_events,
                city: player.city,
                location: LocationId::new(player.location.clamp(1, 10)),
            },
            bank: BankSettings {
                deposit_rate_percent: value.bank.deposit_rate_percent.min(100),
                debt_rate_percent: value.bank.debt_rate_percent.min(100),
            },
            hospital: HospitalSettings {
                cost_per_point: value.hospital.cost_per_point.max(1),
            },
            journal: JournalSettings {
                enabled: value.journal.enabled,
                directory: PathBuf::from(value.journal.directory),
            },
            seed: value.rng.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.player.cash, 2_000);
        assert_eq!(settings.player.debt, 5_000);
        assert_eq!(settings.player.days, 40);
        assert_eq!(settings.player.inventory_capacity, 100);
        assert_eq!(settings.player.city, City::Beijing);
        assert_eq!(settings.bank.debt_rate_percent, 10);
        assert_eq!(settings.hospital.cost_per_point, 3_500);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn partial_toml_keeps_section_defaults() {
        let raw: RawGameConfig = toml::from_str(
            r#"
            [player]
            cash = 500
            city = "shanghai"
            location = 42
            health = 0

            [rng]
            seed = 12
            "#,
        )
        .expect("config should parse");

        let settings = GameSettings::from(raw);
        assert_eq!(settings.player.cash, 500);
        assert_eq!(settings.player.debt, 5_000);
        assert_eq!(settings.player.city, City::Shanghai);
        assert_eq!(settings.player.location, LocationId::new(10));
        assert_eq!(settings.player.health, 1);
        assert_eq!(settings.seed, Some(12));
        assert_eq!(settings.bank.deposit_rate_percent, 1);
    }
}
