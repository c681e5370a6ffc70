use crate::errors::CounterError;
use std::{collections::BTreeMap, path::PathBuf};
use tokio::fs;
use tracing::error;

/// Durable key-value slots backed by a single JSON file, shaped like a
/// browser's per-origin local storage: string keys, string values.
#[derive(Debug, Clone)]
pub struct SlotStore {
    path: PathBuf,
}

impl SlotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, CounterError> {
        let mut slots = self.read_slots().await?;
        Ok(slots.remove(key))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), CounterError> {
        let mut slots = self.read_slots().await?;
        slots.insert(key.to_string(), value.to_string());

        let payload = serde_json::to_vec_pretty(&slots)
            .map_err(|err| CounterError::StorageUnavailable(err.to_string()))?;
        fs::write(&self.path, payload)
            .await
            .map_err(|err| CounterError::StorageUnavailable(err.to_string()))?;
        Ok(())
    }

    async fn read_slots(&self) -> Result<BTreeMap<String, String>, CounterError> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(slots) => Ok(slots),
                Err(err) => {
                    error!("failed to parse storage file {}: {err}", self.path.display());
                    Ok(BTreeMap::new())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(CounterError::StorageUnavailable(err.to_string())),
        }
    }
}

/// Parses a stored count. Only a plain non-negative decimal integer is accepted.
pub fn parse_count(raw: &str) -> Result<u64, CounterError> {
    let malformed = || CounterError::MalformedStoredValue {
        raw: raw.to_string(),
    };
    let value = raw.trim().parse::<i128>().map_err(|_| malformed())?;
    u64::try_from(value).map_err(|_| malformed())
}

#[cfg(test)]
pub(crate) fn temp_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("mission_control_{tag}_{}_{nanos}.json", std::process::id()));
    path
}
