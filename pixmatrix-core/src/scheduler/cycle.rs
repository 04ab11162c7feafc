//! Automatic cycle timer
//!
//! Times are milliseconds on a monotonic clock supplied by the caller.

/// Automatic cycling deadline tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackScheduler {
    /// Cycle interval (0 = never)
    interval_ms: u64,
    /// Time of the next automatic advance
    deadline_ms: u64,
    /// Play/pause flag
    enabled: bool,
}

impl PlaybackScheduler {
    /// Create a scheduler armed at `now`
    pub fn new(interval_s: u16, enabled: bool, now: u64) -> Self {
        let interval_ms = interval_s as u64 * 1000;
        Self {
            interval_ms,
            deadline_ms: now.saturating_add(interval_ms),
            enabled,
        }
    }

    /// Check whether an automatic advance is due
    ///
    /// Returns true at most once per interval; the deadline is re-armed
    /// relative to `now`.
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.is_cycling() || now < self.deadline_ms {
            return false;
        }
        self.rearm(now);
        true
    }

    /// Postpone the next advance after a user switch
    pub fn on_manual_navigation(&mut self, now: u64) {
        self.rearm(now);
    }

    /// Change the interval; the countdown restarts immediately
    pub fn set_interval(&mut self, interval_s: u16, now: u64) {
        self.interval_ms = interval_s as u64 * 1000;
        self.rearm(now);
    }

    /// Enable automatic cycling and restart the countdown
    pub fn play(&mut self, now: u64) {
        self.enabled = true;
        self.rearm(now);
    }

    /// Disable automatic cycling
    pub fn pause(&mut self) {
        self.enabled = false;
    }

    /// Play/pause flag
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when advances can actually happen
    pub fn is_cycling(&self) -> bool {
        self.enabled && self.interval_ms > 0
    }

    pub fn interval_s(&self) -> u16 {
        (self.interval_ms / 1000) as u16
    }

    pub fn deadline(&self) -> u64 {
        self.deadline_ms
    }

    /// Milliseconds until the next advance, `None` when not cycling
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.is_cycling()
            .then(|| self.deadline_ms.saturating_sub(now))
    }

    fn rearm(&mut self, now: u64) {
        self.deadline_ms = now.saturating_add(self.interval_ms);
    }
}
