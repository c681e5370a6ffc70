use crate::controller::Controller;
use crate::display::Display;
use crate::remote::HttpCounter;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<Controller<HttpCounter>>>,
    pub display: Display,
}

impl AppState {
    pub fn new(controller: Controller<HttpCounter>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            display: Display::new(),
        }
    }
}
