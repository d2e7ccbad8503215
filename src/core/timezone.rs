use chrono_tz::Tz;
use std::sync::{Arc, PoisonError, RwLock};

/// The bot's current timezone, shared by every request handler. A
/// `timezone` command replaces it for all later requests.
#[derive(Debug, Clone)]
pub struct TimezoneState {
    inner: Arc<RwLock<Tz>>,
}

impl TimezoneState {
    pub fn new(initial: Tz) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> Tz {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, tz: Tz) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = tz;
    }
}
