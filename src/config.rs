//! Configuration for a SANCdpd session.
//!
//! The config is a JSON object read once at startup. It is kept in an explicit
//! [`Config`] value that the rest of the program borrows from `AppCtx`.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::defaults::Defaults;

/// Keys that every config file must carry.
pub const REQUIRED_KEYS: [&str; 5] = [
    "logging",
    "logdir",
    "dbfile",
    "person_agent_code",
    "access_copy_root",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SANCdpd config file not found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("reading config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config JSON")]
    Parse(#[from] serde_json::Error),

    #[error("required config key `{0}` is missing")]
    MissingKey(&'static str),

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Whether a session log file is written. Accepts `true`/`false` or the
    /// strings `"true"`/`"false"`.
    #[serde(deserialize_with = "bool_or_string")]
    pub logging: bool,

    /// Directory that receives session log files. Must already exist.
    pub logdir: PathBuf,

    /// SQLite database file.
    pub dbfile: PathBuf,

    /// `agent`.`agent_code` of the default person agent.
    pub person_agent_code: String,

    /// Root directory under which access copies are stored.
    pub access_copy_root: PathBuf,

    #[serde(default = "default_render_delay_ms")]
    pub render_delay_ms: u64,

    #[serde(default = "default_input_delay_ms")]
    pub input_delay_ms: u64,

    #[serde(default = "default_pause_after_procedure")]
    pub pause_after_procedure: bool,
}

fn default_render_delay_ms() -> u64 {
    Defaults::RENDER_DELAY_MS
}

fn default_input_delay_ms() -> u64 {
    Defaults::INPUT_DELAY_MS
}

fn default_pause_after_procedure() -> bool {
    Defaults::PAUSE_AFTER_PROCEDURE
}

fn bool_or_string<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(de)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", got \"{other}\""
            ))),
        },
    }
}

impl Config {
    /// Find the config file: `explicit` if given, otherwise the first of
    /// [`Defaults::CONFIG_SEARCH_DIRS`] (relative to `base`) that has one.
    pub fn locate(base: &Path, explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(p) = explicit {
            return if p.is_file() {
                Ok(p.to_path_buf())
            } else {
                Err(ConfigError::NotFound {
                    searched: vec![p.to_path_buf()],
                })
            };
        }

        let searched: Vec<PathBuf> = Defaults::CONFIG_SEARCH_DIRS
            .iter()
            .map(|dir| base.join(dir).join(Defaults::CONFIG_FILE_NAME))
            .collect();

        match searched.iter().find(|p| p.is_file()) {
            Some(found) => Ok(found.clone()),
            None => Err(ConfigError::NotFound { searched }),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Value = serde_json::from_str(text)?;
        let obj = raw
            .as_object()
            .ok_or_else(|| ConfigError::Invalid("top level must be a JSON object".into()))?;

        if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !obj.contains_key(**k)) {
            return Err(ConfigError::MissingKey(*missing));
        }

        let cfg: Config = serde_json::from_value(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.person_agent_code.trim().is_empty() {
            return Err(ConfigError::Invalid("person_agent_code is empty".into()));
        }
        Ok(())
    }
}
