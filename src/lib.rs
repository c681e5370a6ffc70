pub mod animation;
pub mod app;
pub mod clock;
pub mod config;
pub mod controller;
pub mod display;
pub mod entrance;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod remote;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::{Config, CounterMode};
pub use controller::Controller;
pub use state::AppState;
pub use storage::SlotStore;
