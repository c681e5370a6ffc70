use crate::schedule;
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

/// What the four display regions currently show.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub counter: String,
    pub badge_active: bool,
    pub visits: String,
    pub time: String,
}

#[derive(Debug, Default)]
struct DisplayInner {
    snapshot: DisplaySnapshot,
    badge_shows: u64,
}

/// Shared handle to the rendered surface.
#[derive(Debug, Clone, Default)]
pub struct Display {
    inner: Arc<Mutex<DisplayInner>>,
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> DisplaySnapshot {
        self.inner.lock().await.snapshot.clone()
    }

    /// Writes the count into the counter and the visits echo.
    pub async fn show_count(&self, count: u64) {
        let mut inner = self.inner.lock().await;
        inner.snapshot.counter = count.to_string();
        inner.snapshot.visits = count.to_string();
    }

    pub async fn set_time(&self, time: String) {
        self.inner.lock().await.snapshot.time = time;
    }

    /// Raises the "+1" badge and schedules it to drop after `duration`.
    /// A later show restarts the badge; the earlier deferred hide then no-ops.
    pub async fn flash_badge(&self, duration: Duration) {
        let show = {
            let mut inner = self.inner.lock().await;
            inner.badge_shows += 1;
            inner.snapshot.badge_active = true;
            inner.badge_shows
        };

        let inner = Arc::clone(&self.inner);
        schedule::defer(duration, move || async move {
            let mut inner = inner.lock().await;
            if inner.badge_shows == show {
                inner.snapshot.badge_active = false;
            }
        });
    }
}
