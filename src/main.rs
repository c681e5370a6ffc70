use mission_control::{
    clock, router, schedule, AppState, Config, Controller, CounterMode, SlotStore,
    remote::HttpCounter,
};
use std::{net::SocketAddr, time::Duration};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = SlotStore::new(&config.data_path);
    let controller = match config.mode {
        CounterMode::Local => Controller::local(store, config.storage_key.clone()),
        CounterMode::Networked => Controller::networked(
            store,
            config.storage_key.clone(),
            HttpCounter::new(&config.remote)?,
        ),
    };
    let state = AppState::new(controller);

    let display = state.display.clone();
    schedule::every(Duration::from_secs(1), move || {
        let display = display.clone();
        async move { display.set_time(clock::mission_time()).await }
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("MISSION CONTROL INITIALIZED");
    info!(
        mode = ?config.mode,
        storage = %config.data_path.display(),
        "system status: OPERATIONAL"
    );
    if config.mode == CounterMode::Networked {
        info!(endpoint = %config.remote.hit_url(), "global counter: ENABLED");
    }
    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
