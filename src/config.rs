use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::mode::{Mode, ModeOptions};
use crate::source::{RemoteEndpoints, DEFAULT_CODE_API_URL, DEFAULT_WORD_API_URL};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub timed_secs: u64,
    pub hard_words: usize,
    pub shuffle_alphabet: bool,
    pub offline: bool,
    pub word_api_url: String,
    pub code_api_url: String,
    pub request_timeout_secs: u64,
    pub analytics_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let opts = ModeOptions::default();
        Self {
            mode: Mode::Quick,
            timed_secs: opts.timed_secs,
            hard_words: opts.hard_words,
            shuffle_alphabet: opts.shuffle_alphabet,
            offline: false,
            word_api_url: DEFAULT_WORD_API_URL.to_string(),
            code_api_url: DEFAULT_CODE_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            analytics_id: None,
        }
    }
}

impl Config {
    /// Zero durations and counts from the file fall back to the defaults
    pub fn mode_options(&self) -> ModeOptions {
        let defaults = ModeOptions::default();
        ModeOptions {
            timed_secs: nonzero_or("timed_secs", self.timed_secs, defaults.timed_secs),
            hard_words: nonzero_or("hard_words", self.hard_words, defaults.hard_words),
            shuffle_alphabet: self.shuffle_alphabet,
            ..defaults
        }
    }

    /// `None` when running offline
    pub fn remote_endpoints(&self) -> Option<RemoteEndpoints> {
        (!self.offline).then(|| RemoteEndpoints {
            word_api_url: self.word_api_url.clone(),
            code_api_url: self.code_api_url.clone(),
            timeout: Duration::from_secs(nonzero_or(
                "request_timeout_secs",
                self.request_timeout_secs,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        })
    }
}

fn nonzero_or<T>(field: &str, value: T, default: T) -> T
where
    T: Copy + Default + PartialEq + std::fmt::Display,
{
    if value == T::default() {
        warn!(field, %default, "config value must be positive, using default");
        default
    } else {
        value
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like `load`, but reports why the file could not be used
    pub fn try_load(&self) -> Result<Option<Config>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Config::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring config file");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
