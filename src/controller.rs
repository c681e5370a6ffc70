//! The visitor counter itself: where the count comes from, where it is
//! saved, and whether it may be reset.
//!
//! In [`CounterMode::Local`] the slot store is the source of truth. In
//! [`CounterMode::Networked`] the remote counter is, and the slot store only
//! takes over once a remote call has failed. That degraded mode lasts until
//! the next remote call succeeds; there is no retry within a page load.

use crate::config::CounterMode;
use crate::errors::CounterError;
use crate::models::{Scope, SystemInfo};
use crate::remote::RemoteCounter;
use crate::storage::{parse_count, SlotStore};
use tracing::{error, info, warn};

pub const COMMANDS: &[&str] = &[
    "getVisitorCount()    : Get current count",
    "resetVisitorCount()  : Reset count to 0",
    "await getCurrentCount() : Fetch latest global count",
    "Ctrl+Shift+R         : Reset counter",
    "Ctrl+Shift+I         : Show this info",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Reset,
    Cancelled,
}

pub struct Controller<R> {
    mode: CounterMode,
    store: SlotStore,
    storage_key: String,
    remote: Option<R>,
    count: u64,
    service_available: bool,
}

impl<R: RemoteCounter> Controller<R> {
    pub fn local(store: SlotStore, storage_key: impl Into<String>) -> Self {
        Self {
            mode: CounterMode::Local,
            store,
            storage_key: storage_key.into(),
            remote: None,
            count: 0,
            service_available: false,
        }
    }

    pub fn networked(store: SlotStore, storage_key: impl Into<String>, remote: R) -> Self {
        Self {
            mode: CounterMode::Networked,
            store,
            storage_key: storage_key.into(),
            remote: Some(remote),
            count: 0,
            service_available: true,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn service_available(&self) -> bool {
        self.mode == CounterMode::Networked && self.service_available
    }

    pub fn scope(&self) -> Scope {
        if self.service_available() {
            Scope::Global
        } else {
            Scope::Local
        }
    }

    /// Reset is blocked only while the remote counter is authoritative.
    pub fn reset_permitted(&self) -> bool {
        !self.service_available()
    }

    /// One page load: obtain the count and increment it exactly once.
    pub async fn acquire(&mut self) -> u64 {
        match self.mode {
            CounterMode::Local => {
                self.load().await;
                self.increment().await
            }
            CounterMode::Networked => match self.increment_remote().await {
                Ok(count) => count,
                Err(err) => {
                    error!("error accessing global counter: {err}");
                    warn!("falling back to local storage");
                    self.increment_local().await
                }
            },
        }
    }

    /// Reads the stored count. Absent, malformed or unreadable values load as 0.
    pub async fn load(&mut self) -> u64 {
        self.count = match self.store.get_item(&self.storage_key).await {
            Ok(Some(raw)) => parse_count(&raw).unwrap_or_else(|err| {
                warn!("{err}, resetting to 0");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                error!("failed to read visitor count: {err}");
                0
            }
        };
        self.count
    }

    pub async fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.persist(self.count).await;
        info!(count = self.count, "local visitor count");
        self.count
    }

    pub async fn increment_remote(&mut self) -> Result<u64, CounterError> {
        let result = match &self.remote {
            Some(remote) => remote.hit().await,
            None => Err(CounterError::RemoteUnavailable(
                "no remote counter configured".to_string(),
            )),
        };

        match result {
            Ok(count) => {
                self.count = count;
                self.service_available = true;
                info!(count, "global visitor count (shared across all users)");
                Ok(count)
            }
            Err(err) => {
                self.service_available = false;
                Err(err)
            }
        }
    }

    /// Fallback increment against the slot store. The visit being recorded
    /// counts, so anything unusable in the store restarts at 1.
    pub async fn increment_local(&mut self) -> u64 {
        let next = match self.store.get_item(&self.storage_key).await {
            Ok(Some(raw)) => match parse_count(&raw) {
                Ok(stored) => stored.saturating_add(1),
                Err(err) => {
                    warn!("{err}, restarting local count at 1");
                    1
                }
            },
            Ok(None) => 1,
            Err(err) => {
                error!("error with fallback counter: {err}");
                self.count = 0;
                return 0;
            }
        };

        self.count = next;
        self.persist(next).await;
        warn!(count = next, "using local counter (this origin only)");
        next
    }

    /// Writes the count to the slot store. Failures are logged and dropped;
    /// the in-memory count stays authoritative for the session.
    pub async fn persist(&self, count: u64) {
        if let Err(err) = self.store.set_item(&self.storage_key, &count.to_string()).await {
            error!("failed to persist visitor count {count}: {err}");
        }
    }

    /// Reads the remote counter without incrementing. Never changes state.
    pub async fn fetch_remote_count(&self) -> u64 {
        let result = match &self.remote {
            Some(remote) => remote.get().await,
            None => Err(CounterError::RemoteUnavailable(
                "no remote counter configured".to_string(),
            )),
        };

        match result {
            Ok(count) => {
                info!(count, "current global visitor count");
                count
            }
            Err(err) => {
                error!("error fetching count: {err}");
                info!(count = self.count, "last known count");
                self.count
            }
        }
    }

    pub async fn reset(&mut self, confirmed: bool) -> Result<ResetOutcome, CounterError> {
        if !self.reset_permitted() {
            info!(count = self.count, "global counter cannot be reset");
            return Err(CounterError::ResetRefused { count: self.count });
        }
        if !confirmed {
            return Ok(ResetOutcome::Cancelled);
        }

        self.persist(0).await;
        self.count = 0;
        info!("local visitor count has been reset");
        Ok(ResetOutcome::Reset)
    }

    pub fn visitor_count(&self) -> u64 {
        info!(count = self.count, scope = ?self.scope(), "current visitor count");
        self.count
    }

    pub fn info(&self, mission_time: String) -> SystemInfo {
        let info = SystemInfo {
            total_visitors: self.count,
            storage_key: self.storage_key.clone(),
            mission_time,
            scope: self.scope(),
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        };
        info!(
            total = info.total_visitors,
            storage_key = %info.storage_key,
            mission_time = %info.mission_time,
            "MISSION CONTROL - System Information"
        );
        info
    }
}
