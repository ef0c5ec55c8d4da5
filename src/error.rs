use thiserror::Error;

use crate::types::WorkOrderStatus;

#[derive(Error, Debug)]
pub enum ShopfloorError {
    #[error("session expired or invalid, run `shopfloor login`")]
    Unauthorized,

    #[error("not logged in, run `shopfloor login`")]
    NotLoggedIn,

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("cannot move work order from {from} to {to}")]
    InvalidTransition {
        from: WorkOrderStatus,
        to: WorkOrderStatus,
    },

    #[error("work order {0} not found")]
    NotFound(u64),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl ShopfloorError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ShopfloorError::Timeout(_) | ShopfloorError::Http(_) => true,
            ShopfloorError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ShopfloorError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, ShopfloorError>;
