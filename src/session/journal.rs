//! JSON-lines journal of everything that changed the ledger.
use std::{
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use crate::{
    core::{
        rng::GameRng,
        settings::{GameSettings, JournalSettings},
        turn::DayAdvanced,
    },
    events::{
        reports::{EffectDeltas, EventCategory, NewsReport},
        systems::NewsReported,
    },
    ledger::{
        components::Player,
        trade::{Purchase, Sale},
    },
    market::resources::{MarketBoard, MarketListing},
    services::bank::InterestAccrued,
    world::locations::{City, LocationId},
};

use super::{
    commands::{ActionReceipt, CommandResolved},
    scoring::{FinalScore, GameEnded},
};

/// Single journal entry.
#[derive(Debug, Clone)]
pub struct JournalRecord {
    pub day: u32,
    pub event: JournalEvent,
}

#[derive(Debug, Clone)]
pub enum JournalEvent {
    Started {
        player: String,
        seed: Option<u64>,
        city: City,
        location: LocationId,
        cash: u64,
        debt: u64,
        days_left: u32,
    },
    Command(CommandResolved),
    DayStarted {
        advance: DayAdvanced,
        prices: Vec<MarketListing>,
    },
    News(NewsReport),
    Interest(InterestAccrued),
    /// Ledger snapshot after the day's events and interest have settled.
    PlayerStatus(Player),
    Ended(FinalScore),
}

/// Buffers records and appends them to a `.jsonl` file on flush.
#[derive(Resource, Debug)]
pub struct GameJournal {
    output_path: Option<PathBuf>,
    pending: Vec<JournalRecord>,
}

impl GameJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: Some(path.into()),
            pending: Vec::new(),
        }
    }

    /// A journal that drops every record.
    pub fn disabled() -> Self {
        Self {
            output_path: None,
            pending: Vec::new(),
        }
    }

    /// `<directory>/<unix-seconds>_<player>.jsonl`, or disabled.
    pub fn for_session(settings: &JournalSettings, player: &str) -> Self {
        if !settings.enabled {
            return Self::disabled();
        }
        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        let slug: String = player
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        Self::new(settings.directory.join(format!("{started}_{slug}.jsonl")))
    }

    pub fn push(&mut self, record: JournalRecord) {
        if self.output_path.is_some() {
            self.pending.push(record);
        }
    }

    fn ensure_directory(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        let Some(path) = self.output_path.as_deref() else {
            return Ok(());
        };
        if self.pending.is_empty() {
            return Ok(());
        }

        Self::ensure_directory(path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        for record in std::mem::take(&mut self.pending) {
            let serialisable: SerializableJournalRecord = record.into();
            serde_json::to_writer(&mut file, &serialisable)?;
            file.write_all(b"\n")?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for GameJournal {
    fn default() -> Self {
        Self::disabled()
    }
}

pub fn record_session_start(
    player: Res<Player>,
    rng: Res<GameRng>,
    mut journal: ResMut<GameJournal>,
) {
    journal.push(JournalRecord {
        day: 0,
        event: JournalEvent::Started {
            player: player.name().to_string(),
            seed: rng.seed(),
            city: player.city(),
            location: player.location(),
            cash: player.cash(),
            debt: player.debt(),
            days_left: player.days_left(),
        },
    });
    journal.push(JournalRecord {
        day: 0,
        event: JournalEvent::PlayerStatus(player.clone()),
    });
    if let Some(path) = journal.path() {
        info!("Journal writing to {}", path.display());
    }
}

/// Records the turn's messages in pipeline order: command, new day, news, interest,
/// player status, ending.
#[allow(clippy::too_many_arguments)]
pub fn record_turn(
    player: Res<Player>,
    market: Res<MarketBoard>,
    settings: Res<GameSettings>,
    mut resolved: MessageReader<CommandResolved>,
    mut days: MessageReader<DayAdvanced>,
    mut news: MessageReader<NewsReported>,
    mut interest: MessageReader<InterestAccrued>,
    mut ended: MessageReader<GameEnded>,
    mut journal: ResMut<GameJournal>,
) {
    let today = settings.player.days.saturating_sub(player.days_left());

    for command in resolved.read() {
        journal.push(JournalRecord {
            day: today,
            event: JournalEvent::Command(command.clone()),
        });
    }
    let mut settled_day = None;
    for advance in days.read() {
        settled_day = Some(advance.day);
        journal.push(JournalRecord {
            day: advance.day,
            event: JournalEvent::DayStarted {
                advance: *advance,
                prices: market.available_goods(),
            },
        });
    }
    for reported in news.read() {
        journal.push(JournalRecord {
            day: reported.day,
            event: JournalEvent::News(reported.report.clone()),
        });
    }
    for accrued in interest.read() {
        journal.push(JournalRecord {
            day: accrued.day,
            event: JournalEvent::Interest(*accrued),
        });
    }
    if let Some(day) = settled_day {
        journal.push(JournalRecord {
            day,
            event: JournalEvent::PlayerStatus(player.clone()),
        });
    }
    for end in ended.read() {
        journal.push(JournalRecord {
            day: end.day,
            event: JournalEvent::Ended(end.result.clone()),
        });
    }
}

/// Flushes pending records, logging a warning if persistence fails.
pub fn flush_game_journal(mut journal: ResMut<GameJournal>) {
    if let Err(err) = journal.flush() {
        warn!("Failed to persist game journal to {:?}: {}", journal.path(), err);
    }
}

#[derive(Serialize)]
struct SerializableJournalRecord {
    recorded_at_ms: u64,
    day: u32,
    event: SerializableJournalEvent,
}

impl From<JournalRecord> for SerializableJournalRecord {
    fn from(value: JournalRecord) -> Self {
        Self {
            recorded_at_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or_default(),
            day: value.day,
            event: value.event.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum SerializableJournalEvent {
    SessionStarted {
        player: String,
        seed: Option<u64>,
        city: City,
        location: LocationId,
        cash: u64,
        debt: u64,
        days_left: u32,
    },
    Command {
        command: String,
        accepted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        receipt: Option<SerializableReceipt>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    DayStarted {
        days_left: u32,
        city: City,
        location: LocationId,
        prices: Vec<SerializablePrice>,
    },
    News {
        category: EventCategory,
        message: String,
        effects: EffectDeltas,
    },
    Interest {
        savings_interest: u64,
        debt_interest: u64,
    },
    PlayerStatus(Player),
    GameEnded {
        reason: String,
        cash: u64,
        savings: u64,
        debt: u64,
        score: i64,
        liquidation: Vec<Sale>,
    },
}

#[derive(Serialize)]
struct SerializablePrice {
    good: String,
    price: u64,
}

#[derive(Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum SerializableReceipt {
    Moved {
        from_city: City,
        from: LocationId,
        to_city: City,
        to: LocationId,
    },
    Bought(Purchase),
    Sold(Sale),
    Deposited { amount: u64, savings: u64 },
    Withdrew { amount: u64, savings: u64 },
    Repaid { amount: u64, debt: u64 },
    Treated { points: u32, cost: u64, health: u32 },
}

impl From<ActionReceipt> for SerializableReceipt {
    fn from(value: ActionReceipt) -> Self {
        match value {
            ActionReceipt::Moved(journey) => Self::Moved {
                from_city: journey.from_city,
                from: journey.from,
                to_city: journey.to_city,
                to: journey.to,
            },
            ActionReceipt::Bought(purchase) => Self::Bought(purchase),
            ActionReceipt::Sold(sale) => Self::Sold(sale),
            ActionReceipt::Deposited { amount, savings } => Self::Deposited { amount, savings },
            ActionReceipt::Withdrew { amount, savings } => Self::Withdrew { amount, savings },
            ActionReceipt::Repaid { amount, debt } => Self::Repaid { amount, debt },
            ActionReceipt::Treated(treatment) => Self::Treated {
                points: treatment.points,
                cost: treatment.cost,
                health: treatment.health,
            },
        }
    }
}

impl From<JournalEvent> for SerializableJournalEvent {
    fn from(value: JournalEvent) -> Self {
        match value {
            JournalEvent::Started {
                player,
                seed,
                city,
                location,
                cash,
                debt,
                days_left,
            } => Self::SessionStarted {
                player,
                seed,
                city,
                location,
                cash,
                debt,
                days_left,
            },
            JournalEvent::Command(resolved) => {
                let command = resolved.command.to_string();
                match resolved.outcome {
                    Ok(receipt) => Self::Command {
                        command,
                        accepted: true,
                        receipt: Some(receipt.into()),
                        error: None,
                    },
                    Err(error) => Self::Command {
                        command,
                        accepted: false,
                        receipt: None,
                        error: Some(error.to_string()),
                    },
                }
            }
            JournalEvent::DayStarted { advance, prices } => Self::DayStarted {
                days_left: advance.days_left,
                city: advance.city,
                location: advance.location,
                prices: prices
                    .into_iter()
                    .map(|listing| SerializablePrice {
                        good: listing.name,
                        price: listing.price,
                    })
                    .collect(),
            },
            JournalEvent::News(report) => Self::News {
                category: report.category,
                message: report.message,
                effects: report.effects,
            },
            JournalEvent::Interest(accrued) => Self::Interest {
                savings_interest: accrued.savings_interest,
                debt_interest: accrued.debt_interest,
            },
            JournalEvent::PlayerStatus(player) => Self::PlayerStatus(player),
            JournalEvent::Ended(result) => Self::GameEnded {
                reason: result.reason.to_string(),
                cash: result.cash,
                savings: result.savings,
                debt: result.debt,
                score: result.score,
                liquidation: result.liquidation,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        market::components::GoodId,
        session::commands::{CommandError, PlayerCommand},
    };
    use serde_json::Value;
    use std::{env, fs};

    fn temp_journal_path(label: &str) -> PathBuf {
        let unique_suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir().join(format!("fushengji_{label}_{unique_suffix}.jsonl"))
    }

    #[test]
    fn journal_writes_tagged_json_lines() {
        let path = temp_journal_path("journal");
        let mut journal = GameJournal::new(&path);

        journal.push(JournalRecord {
            day: 3,
            event: JournalEvent::News(NewsReport::new(
                EventCategory::Money,
                "A thug blocks your way.",
                EffectDeltas {
                    cash: -120,
                    ..EffectDeltas::default()
                },
            )),
        });
        journal.push(JournalRecord {
            day: 3,
            event: JournalEvent::Command(CommandResolved {
                command: PlayerCommand::Deposit(0),
                outcome: Err(CommandError::Bank(crate::services::bank::BankError::InvalidAmount)),
            }),
        });
        let mut player = Player::default();
        player.drain_cash(500);
        player
            .stock(GoodId::new(2), "Fake Cosmetics", 4, 150)
            .expect("room for four");
        journal.push(JournalRecord {
            day: 3,
            event: JournalEvent::PlayerStatus(player),
        });
        journal.flush().expect("journal should flush");
        assert!(journal.is_empty());

        let raw = fs::read_to_string(&path).expect("journal file should exist");
        let lines: Vec<_> = raw.lines().collect();
        assert_eq!(lines.len(), 3);

        let news: Value = serde_json::from_str(lines[0]).expect("json line should parse");
        assert_eq!(news["day"], 3);
        assert_eq!(news["event"]["event_type"], "news");
        assert_eq!(news["event"]["category"], "money");
        assert_eq!(news["event"]["effects"]["cash"], -120);

        let command: Value = serde_json::from_str(lines[1]).expect("json line should parse");
        assert_eq!(command["event"]["event_type"], "command");
        assert_eq!(command["event"]["command"], "deposit 0");
        assert_eq!(command["event"]["accepted"], false);
        assert!(command["event"].get("receipt").is_none());

        let status: Value = serde_json::from_str(lines[2]).expect("json line should parse");
        assert_eq!(status["event"]["event_type"], "player_status");
        assert_eq!(status["event"]["cash"], 1_500);
        assert_eq!(status["event"]["health"], 100);
        assert_eq!(status["event"]["city"], "beijing");
        let held = &status["event"]["inventory"]["entries"]["2"];
        assert_eq!(held["quantity"], 4);
        assert_eq!(held["average_cost"], 150);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn disabled_journal_drops_records() {
        let mut journal = GameJournal::for_session(
            &JournalSettings {
                enabled: false,
                directory: PathBuf::from("unused"),
            },
            "Nobody",
        );
        journal.push(JournalRecord {
            day: 0,
            event: JournalEvent::Interest(InterestAccrued::default()),
        });
        assert!(journal.is_empty());
        assert!(journal.path().is_none());
        assert!(journal.flush().is_ok());
    }

    #[test]
    fn session_file_name_uses_player_slug() {
        let journal = GameJournal::for_session(
            &JournalSettings {
                enabled: true,
                directory: PathBuf::from("logs"),
            },
            "Xiao Fusheng",
        );
        let name = journal
            .path()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .expect("file name")
            .to_string();
        assert!(name.ends_with("_xiao_fusheng.jsonl"), "{name}");
    }
}
