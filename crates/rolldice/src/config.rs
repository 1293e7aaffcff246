use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "rolldice.yaml";

/// Largest Shut the Box roster.
pub const MAX_PLAYERS: usize = 16;

const DEFAULT_LOG_DIRECTORY: &str = "logs";
const LOG_FILE_NAME: &str = "rolldice.jsonl";
const MAX_PLAYER_NAME: usize = 32;

/// Root configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Seed for the random source; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Default Shut the Box players for `shut-the-box` without `--players`.
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let mut cfg = match File::open(&path) {
            Ok(file) => match serde_yaml::from_reader::<_, AppConfig>(BufReader::new(file)) {
                Ok(cfg) => cfg,
                Err(source) => return Err(ConfigError::Parse { source, path }),
            },
            Err(source) => return Err(ConfigError::Read { source, path }),
        };
        if let Err(source) = cfg.validate() {
            return Err(ConfigError::Invalid { path, source });
        }
        Ok(cfg)
    }

    /// Load `explicit` when given, otherwise [`DEFAULT_CONFIG_PATH`] if it
    /// exists, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_path(DEFAULT_CONFIG_PATH)
            }
            None => Ok(Self::default()),
        }
    }

    /// Trims player names and fills in logging defaults. No I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_players(&mut self.players)?;
        self.logging.normalize();
        Ok(())
    }
}

/// `logging:` block. Structured logs are off unless enabled here.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            directory: default_log_directory(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.directory.trim().is_empty() {
            self.directory = default_log_directory();
        }
    }

    /// Parsed `tracing_level`; `None` when it names no level.
    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim() {
            level if level.eq_ignore_ascii_case("warning") => Some(Level::WARN),
            level => level.parse().ok(),
        }
    }

    pub fn directory(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }

    /// JSON log file inside [`directory`](Self::directory).
    pub fn log_path(&self) -> PathBuf {
        self.directory().join(LOG_FILE_NAME)
    }
}

fn default_tracing_level() -> String {
    Level::INFO.as_str().to_ascii_lowercase()
}

fn default_log_directory() -> String {
    DEFAULT_LOG_DIRECTORY.to_string()
}

/// Trims names in place and rejects blank, overlong or repeated ones, and
/// rosters larger than [`MAX_PLAYERS`].
pub(crate) fn validate_players(players: &mut [String]) -> Result<(), ValidationError> {
    if players.len() > MAX_PLAYERS {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!("at most {MAX_PLAYERS} players are supported"),
        });
    }

    let mut seen = HashSet::new();
    for (index, player) in players.iter_mut().enumerate() {
        let trimmed = player.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("players[{index}]"),
                message: "player name must not be empty".to_string(),
            });
        }

        if trimmed.chars().count() > MAX_PLAYER_NAME || trimmed.chars().any(char::is_control) {
            return Err(ValidationError::InvalidField {
                field: format!("players[{index}]"),
                message: format!(
                    "player name must be at most {MAX_PLAYER_NAME} printable characters"
                ),
            });
        }

        if !seen.insert(trimmed.to_string()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player '{trimmed}' listed more than once"),
            });
        }

        *player = trimmed.to_string();
    }
    Ok(())
}

/// Why a configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// A rejected field, named by its YAML path (`players[1]`).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
