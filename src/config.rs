//! Run configuration read from the process environment.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const SHEET_ID_KEY: &str = "WITB_SHEET_ID";
pub const SHEETS_KEY: &str = "WITB_SHEETS";
pub const STATS_SHEET_KEY: &str = "WITB_STATS_SHEET";
pub const OUT_DIR_KEY: &str = "WITB_OUT_DIR";
pub const CONCURRENCY_KEY: &str = "WITB_FETCH_CONCURRENCY";
pub const TIMEOUT_KEY: &str = "WITB_FETCH_TIMEOUT_SECS";
pub const BASE_URL_KEY: &str = "WITB_BASE_URL";

pub const DEFAULT_SHEETS: &str = "witb_rows";
pub const DEFAULT_STATS_SHEET: &str = "player_stats";
pub const DEFAULT_OUT_DIR: &str = "public";
pub const DEFAULT_CONCURRENCY: usize = 4;

pub const INDEX_FILE_NAME: &str = "witb_index.json";
pub const STATS_FILE_NAME: &str = "player_stats.json";

/// Fatal configuration problems. Each names the offending key.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} env var is required")]
    Missing(&'static str),

    #[error("{0} is empty (default: witb_rows)")]
    EmptyTabList(&'static str),

    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub sheet_id: String,
    /// Index tabs in processing order. Earlier tabs win on duplicate ids.
    pub tabs: Vec<String>,
    pub stats_tab: String,
    pub out_dir: PathBuf,
    pub fetch_concurrency: usize,
    pub fetch_timeout: Option<Duration>,
    /// Overrides the spreadsheet export host, e.g. a local mirror.
    pub base_url: Option<String>,
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let sheet_id = non_blank(SHEET_ID_KEY).ok_or(ConfigError::Missing(SHEET_ID_KEY))?;

        // An explicitly empty list is fatal; only an unset key gets the default.
        let tabs = parse_tab_list(&lookup(SHEETS_KEY).unwrap_or_else(|| DEFAULT_SHEETS.to_string()));
        if tabs.is_empty() {
            return Err(ConfigError::EmptyTabList(SHEETS_KEY));
        }

        let fetch_concurrency = match non_blank(CONCURRENCY_KEY) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: CONCURRENCY_KEY,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_CONCURRENCY,
        };

        let fetch_timeout = match non_blank(TIMEOUT_KEY) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: TIMEOUT_KEY,
                        value: raw,
                    })
                }
            },
            None => None,
        };

        Ok(Self {
            sheet_id,
            tabs,
            stats_tab: non_blank(STATS_SHEET_KEY).unwrap_or_else(|| DEFAULT_STATS_SHEET.to_string()),
            out_dir: PathBuf::from(non_blank(OUT_DIR_KEY).unwrap_or_else(|| DEFAULT_OUT_DIR.to_string())),
            fetch_concurrency,
            fetch_timeout,
            base_url: non_blank(BASE_URL_KEY),
        })
    }

    pub fn index_path(&self) -> PathBuf {
        self.out_dir.join(INDEX_FILE_NAME)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.out_dir.join(STATS_FILE_NAME)
    }
}

/// Splits a comma-separated tab list, trimming entries and dropping blanks.
pub fn parse_tab_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a boolean flag such as `WITB_LOG_JSON`.
pub fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}
