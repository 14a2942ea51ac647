//! Transient "copied" indicator with a single per-instance reset deadline.

use std::time::{Duration, Instant};

/// How long the indicator stays on after a copy
pub const COPY_RESET: Duration = Duration::from_millis(2000);

/// `Idle --copy--> Copied --timeout--> Idle`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyState {
    copied_until: Option<Instant>,
}

impl CopyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_copied(&self) -> bool {
        self.copied_until.is_some()
    }

    /// Pending reset deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.copied_until
    }

    /// Arm the reset, replacing any pending one.
    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_until = Some(now + COPY_RESET);
    }

    /// User-facing copy. Disabled while the indicator is on.
    pub fn copy(&mut self, now: Instant) -> bool {
        if self.is_copied() {
            return false;
        }
        self.mark_copied(now);
        true
    }

    pub fn tick(&mut self, now: Instant) {
        if matches!(self.copied_until, Some(deadline) if now >= deadline) {
            self.copied_until = None;
        }
    }

    /// Drop the pending reset without firing it.
    pub fn cancel(&mut self) {
        self.copied_until = None;
    }
}
