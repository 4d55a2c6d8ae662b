//! Cooperative cancellation for long-running calls.
//!
//! The engine never blocks, so there is nothing to interrupt. Instead the
//! trial loops and the rejection loop poll a shared flag and bail out
//! with `SimError::Cancelled` once it is set.

use crate::error::{SimError, SimResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns `Err(Cancelled)` once `cancel()` has been called on any clone.
    pub fn check(&self) -> SimResult<()> {
        if self.is_cancelled() {
            return Err(SimError::Cancelled);
        }
        Ok(())
    }
}
