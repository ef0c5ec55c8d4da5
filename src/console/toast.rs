//! Transient notifications.
//!
//! Rendering lives in `tui::components::toast`; this type only carries the
//! message, severity and creation time so expiry can be decided without a UI.

use std::time::{Duration, Instant};

/// A toast notification message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// The message to display
    pub message: String,
    /// The severity level of the toast
    pub level: ToastLevel,
    /// When the toast was created
    pub timestamp: Instant,
}

/// Severity level for toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self::at(message, level, Instant::now())
    }

    pub fn at(message: impl Into<String>, level: ToastLevel, timestamp: Instant) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    /// Whether the toast has been visible for at least `ttl`.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expiry() {
        let start = Instant::now();
        let toast = Toast::at("saved", ToastLevel::Success, start);
        let ttl = Duration::from_secs(5);
        assert!(!toast.is_expired(ttl, start + Duration::from_secs(4)));
        assert!(toast.is_expired(ttl, start + Duration::from_secs(5)));
    }
}
