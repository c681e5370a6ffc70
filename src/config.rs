use crate::errors::CounterError;
use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_STORAGE_KEY: &str = "missionControlVisitorCount";
pub const DEFAULT_API_BASE: &str = "https://api.countapi.xyz";
pub const DEFAULT_NAMESPACE: &str = "space-mission-control-eswar";
pub const DEFAULT_KEY: &str = "visits";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Where the count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMode {
    /// The local slot is the source of truth.
    Local,
    /// A remote shared counter is the source of truth, the local slot is the fallback.
    Networked,
}

impl CounterMode {
    fn parse(value: &str) -> Result<Self, CounterError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "networked" | "remote" => Ok(Self::Networked),
            other => Err(CounterError::Config(format!(
                "COUNTER_MODE must be 'local' or 'networked', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub namespace: String,
    pub key: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn hit_url(&self) -> String {
        self.endpoint("hit")
    }

    pub fn get_url(&self) -> String {
        self.endpoint("get")
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{action}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.namespace,
            self.key
        )
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            key: DEFAULT_KEY.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub mode: CounterMode,
    pub storage_key: String,
    pub remote: RemoteConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, CounterError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CounterError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/storage.json"));

        let mode = match lookup("COUNTER_MODE") {
            Some(value) => CounterMode::parse(&value)?,
            None => CounterMode::Networked,
        };

        let timeout_ms = match lookup("COUNTER_API_TIMEOUT_MS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                CounterError::Config(format!("COUNTER_API_TIMEOUT_MS is not a number: '{value}'"))
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let defaults = RemoteConfig::default();
        let remote = RemoteConfig {
            base_url: lookup("COUNTER_API_BASE").unwrap_or(defaults.base_url),
            namespace: lookup("COUNTER_NAMESPACE").unwrap_or(defaults.namespace),
            key: lookup("COUNTER_KEY").unwrap_or(defaults.key),
            timeout: Duration::from_millis(timeout_ms),
        };

        Ok(Self {
            port,
            data_path,
            mode,
            storage_key: lookup("COUNTER_STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            remote,
        })
    }
}
