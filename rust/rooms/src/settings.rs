use holdem_shot_engine::game::ScheduledStep;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "HOLDEM_SHOT_ROOMS_CONFIG";

/// Pacing and capacity of a room actor. Applied to rooms opened after the
/// settings were handed to the manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSettings {
    /// Pause on Dealing before the flop is shown
    pub deal_delay_ms: u64,
    /// How long the elimination spin is shown before its result is revealed
    pub roulette_spin_ms: u64,
    /// Pause after a tie or a survived draw before the next deal
    pub next_round_delay_ms: u64,
    /// Lapsed turns stand pat; `None` waits forever
    pub turn_timeout_ms: Option<u64>,
    /// Commands a room accepts before senders have to wait
    pub command_buffer: usize,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            deal_delay_ms: 600,
            roulette_spin_ms: 800,
            next_round_delay_ms: 3000,
            turn_timeout_ms: None,
            command_buffer: 64,
        }
    }
}

impl RoomSettings {
    /// No pacing at all. Used by tests and simulations.
    pub fn immediate() -> Self {
        Self {
            deal_delay_ms: 0,
            roulette_spin_ms: 0,
            next_round_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.command_buffer == 0 {
            return Err(SettingsError::InvalidValue(
                "command_buffer must be greater than 0".to_string(),
            ));
        }
        if self.turn_timeout_ms == Some(0) {
            return Err(SettingsError::InvalidValue(
                "turn_timeout_ms must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay before a deferred step fires, or `None` when it never fires on
    /// its own.
    pub fn delay_for(&self, step: ScheduledStep) -> Option<Duration> {
        let ms = match step {
            ScheduledStep::RevealFlop => self.deal_delay_ms,
            ScheduledStep::RevealRoulette => self.roulette_spin_ms,
            ScheduledStep::StartNextRound => self.next_round_delay_ms,
            ScheduledStep::TurnTimeout => self.turn_timeout_ms?,
        };
        Some(Duration::from_millis(ms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsSources {
    pub deal_delay_ms: ValueSource,
    pub roulette_spin_ms: ValueSource,
    pub next_round_delay_ms: ValueSource,
    pub turn_timeout_ms: ValueSource,
    pub command_buffer: ValueSource,
}

impl Default for SettingsSources {
    fn default() -> Self {
        Self {
            deal_delay_ms: ValueSource::Default,
            roulette_spin_ms: ValueSource::Default,
            next_round_delay_ms: ValueSource::Default,
            turn_timeout_ms: ValueSource::Default,
            command_buffer: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsResolved {
    pub settings: RoomSettings,
    pub sources: SettingsSources,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    #[serde(default)]
    deal_delay_ms: Option<u64>,
    #[serde(default)]
    roulette_spin_ms: Option<u64>,
    #[serde(default)]
    next_round_delay_ms: Option<u64>,
    #[serde(default)]
    turn_timeout_ms: Option<u64>,
    #[serde(default)]
    command_buffer: Option<usize>,
}

/// Defaults, then the TOML file named by `HOLDEM_SHOT_ROOMS_CONFIG`, then
/// `HOLDEM_SHOT_*` variables.
pub fn load_with_sources() -> Result<SettingsResolved, SettingsError> {
    let file = match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => Some(fs::read_to_string(path)?),
        _ => None,
    };
    resolve(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load() -> Result<RoomSettings, SettingsError> {
    load_with_sources().map(|resolved| resolved.settings)
}

/// Layers `file` (TOML text) and variables from `env` over the defaults.
pub fn resolve<F>(file: Option<&str>, env: F) -> Result<SettingsResolved, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = RoomSettings::default();
    let mut sources = SettingsSources::default();

    if let Some(text) = file {
        let f: FileSettings = toml::from_str(text)?;
        if let Some(v) = f.deal_delay_ms {
            settings.deal_delay_ms = v;
            sources.deal_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.roulette_spin_ms {
            settings.roulette_spin_ms = v;
            sources.roulette_spin_ms = ValueSource::File;
        }
        if let Some(v) = f.next_round_delay_ms {
            settings.next_round_delay_ms = v;
            sources.next_round_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.turn_timeout_ms {
            settings.turn_timeout_ms = Some(v);
            sources.turn_timeout_ms = ValueSource::File;
        }
        if let Some(v) = f.command_buffer {
            settings.command_buffer = v;
            sources.command_buffer = ValueSource::File;
        }
    }

    let var = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(v) = var("HOLDEM_SHOT_DEAL_DELAY_MS") {
        settings.deal_delay_ms = parse_number(&v, "HOLDEM_SHOT_DEAL_DELAY_MS")?;
        sources.deal_delay_ms = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_SHOT_ROULETTE_SPIN_MS") {
        settings.roulette_spin_ms = parse_number(&v, "HOLDEM_SHOT_ROULETTE_SPIN_MS")?;
        sources.roulette_spin_ms = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_SHOT_NEXT_ROUND_DELAY_MS") {
        settings.next_round_delay_ms = parse_number(&v, "HOLDEM_SHOT_NEXT_ROUND_DELAY_MS")?;
        sources.next_round_delay_ms = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_SHOT_TURN_TIMEOUT_MS") {
        settings.turn_timeout_ms = if v.eq_ignore_ascii_case("off") {
            None
        } else {
            Some(parse_number(&v, "HOLDEM_SHOT_TURN_TIMEOUT_MS")?)
        };
        sources.turn_timeout_ms = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_SHOT_COMMAND_BUFFER") {
        settings.command_buffer = parse_number(&v, "HOLDEM_SHOT_COMMAND_BUFFER")?;
        sources.command_buffer = ValueSource::Env;
    }

    settings.validate()?;
    Ok(SettingsResolved { settings, sources })
}

fn parse_number<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue(format!("{} must be a number, got {:?}", key, value)))
}
