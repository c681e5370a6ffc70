use serde::{Deserialize, Serialize};

/// Whether the count shown is the shared global one or this origin's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Local,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
    pub service_available: bool,
    pub scope: Scope,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteCountResponse {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub reset: bool,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub total_visitors: u64,
    pub storage_key: String,
    pub mission_time: String,
    pub scope: Scope,
    pub commands: Vec<String>,
}
