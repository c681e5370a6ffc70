use std::{future::Future, time::Duration};
use tokio::{task::JoinHandle, time};

/// Runs `task` once after `delay`.
pub fn defer<F, Fut>(delay: Duration, task: F) -> JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        time::sleep(delay).await;
        task().await;
    })
}

/// Runs `task` immediately, then once every `period` for as long as the
/// runtime lives.
pub fn every<F, Fut>(period: Duration, mut task: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            task().await;
        }
    })
}
