//! Conversion of non-success HTTP responses into crate errors.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::ShopfloorError;

/// A rejected request: status code plus the server's message, if it sent one.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build from a response body, preferring `{"error": ..}` then `{"message": ..}`.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let from_json = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .filter(|m| !m.trim().is_empty());

        let message = from_json.unwrap_or_else(|| {
            let text = body.trim();
            if text.is_empty() || text.starts_with('<') {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text.to_string()
            }
        });

        Self { status, message }
    }

    pub fn is_transient(&self) -> bool {
        self.status.is_server_error()
    }

    /// Map to a crate error. `resource` names the work order the request targeted.
    pub fn into_error(self, resource: Option<u64>) -> ShopfloorError {
        match (self.status, resource) {
            (StatusCode::UNAUTHORIZED, _) => ShopfloorError::Unauthorized,
            (StatusCode::FORBIDDEN, _) => ShopfloorError::Forbidden(self.message),
            (StatusCode::NOT_FOUND, Some(id)) => ShopfloorError::NotFound(id),
            (status, _) => ShopfloorError::Api {
                status: status.as_u16(),
                message: self.message,
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status.as_u16())
    }
}

impl From<ApiError> for ShopfloorError {
    fn from(error: ApiError) -> Self {
        error.into_error(None)
    }
}
