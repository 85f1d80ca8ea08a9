use crate::policy::Policy;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HOLDEM_SHOT_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    /// Matches played by `sim` when `--matches` is not given
    pub matches: u32,
    /// Rounds after which a simulated match is abandoned as unfinished
    pub max_rounds: u32,
    pub policy: Policy,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub matches: ValueSource,
    pub max_rounds: ValueSource,
    pub policy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            matches: ValueSource::Default,
            max_rounds: ValueSource::Default,
            policy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            matches: 100,
            max_rounds: 50,
            policy: Policy::Stand,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.matches {
            cfg.matches = v;
            sources.matches = ValueSource::File;
        }
        if let Some(v) = f.max_rounds {
            cfg.max_rounds = v;
            sources.max_rounds = ValueSource::File;
        }
        if let Some(v) = f.policy {
            cfg.policy = v;
            sources.policy = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("HOLDEM_SHOT_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(matches) = std::env::var("HOLDEM_SHOT_MATCHES")
        && !matches.is_empty()
    {
        cfg.matches = matches
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid matches".into()))?;
        sources.matches = ValueSource::Env;
    }
    if let Ok(rounds) = std::env::var("HOLDEM_SHOT_MAX_ROUNDS")
        && !rounds.is_empty()
    {
        cfg.max_rounds = rounds
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_rounds".into()))?;
        sources.max_rounds = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var("HOLDEM_SHOT_POLICY")
        && !policy.is_empty()
    {
        cfg.policy = Policy::parse(&policy)
            .ok_or_else(|| ConfigError::Invalid("Invalid policy".into()))?;
        sources.policy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    matches: Option<u32>,
    #[serde(default)]
    max_rounds: Option<u32>,
    #[serde(default)]
    policy: Option<Policy>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.matches == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: matches must be >=1".into(),
        ));
    }
    if cfg.max_rounds == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_rounds must be >=1".into(),
        ));
    }
    Ok(())
}
