use axum::http::StatusCode;

/// Failures the counter controller can run into. All of them are handled
/// inside the controller except [`CounterError::ResetRefused`], which is
/// surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("local storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("malformed stored value {raw:?}")]
    MalformedStoredValue { raw: String },

    #[error("remote counter unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("global counter cannot be reset from the client (current count {count})")]
    ResetRefused { count: u64 },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CounterError {
    fn from(err: reqwest::Error) -> Self {
        Self::RemoteUnavailable(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<CounterError> for AppError {
    fn from(err: CounterError) -> Self {
        match err {
            CounterError::ResetRefused { count } => Self::conflict(refusal_message(count)),
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

pub fn refusal_message(count: u64) -> String {
    format!(
        "Cannot reset global counter!\n\n\
         The visitor count is shared across ALL users globally.\n\
         It cannot be reset from the client side.\n\n\
         Current count: {count}"
    )
}
