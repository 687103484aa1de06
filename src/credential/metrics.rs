//! Refresh bookkeeping.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of a credential's refresh history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshMetrics {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    /// Message of the most recent failed fetch, cleared by the next success.
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct RefreshCounters {
    attempts: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    last_error: Mutex<Option<String>>,
}

impl RefreshCounters {
    pub(crate) fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub(crate) fn record_failure(&self, error: &crate::Error) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(error.to_string());
    }

    pub(crate) fn snapshot(&self) -> RefreshMetrics {
        RefreshMetrics {
            attempts: self.attempts.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            last_error: self
                .last_error
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
        }
    }
}
