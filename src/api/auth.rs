//! Global handling of 401 responses.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::session::SessionContext;

type ExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Clears the session and fires the "go to login" hook on the first 401.
///
/// Later 401s, from the same or a concurrent request, are absorbed until
/// `reset` is called after a successful login.
#[derive(Clone, Default)]
pub struct AuthGate {
    tripped: Arc<AtomicBool>,
    on_expired: Option<ExpiredHook>,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(on_expired: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            tripped: Arc::new(AtomicBool::new(false)),
            on_expired: Some(Arc::new(on_expired)),
        }
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }

    /// Returns true only for the call that actually tripped the gate.
    pub fn trip(&self, session: &SessionContext) -> bool {
        if self
            .tripped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        if let Err(e) = session.clear() {
            warn!(error = %e, "failed to clear session after 401");
        }
        warn!("session rejected by server, login required");

        if let Some(hook) = &self.on_expired {
            hook();
        }
        true
    }

    pub fn reset(&self) {
        self.tripped.store(false, Ordering::SeqCst);
    }
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("tripped", &self.is_tripped())
            .field("has_hook", &self.on_expired.is_some())
            .finish()
    }
}
