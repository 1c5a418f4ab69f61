//! Orchestrator timing configuration.

use std::time::Duration;

/// Timing of the create → settle → poll sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Pause after all records are created, before the first poll
    pub settle_time: Duration,

    /// Pause between unsuccessful propagation checks
    pub backoff: Duration,

    /// Per-record polling deadline; `None` waits forever
    pub max_wait: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PollConfig {
    /// Default settle time in seconds
    pub const DEFAULT_SETTLE_SECS: u64 = 10;

    /// Fixed backoff between polls in seconds
    pub const BACKOFF_SECS: u64 = 30;

    /// Create the default configuration (10s settle, 30s backoff, no deadline)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            settle_time: Duration::from_secs(Self::DEFAULT_SETTLE_SECS),
            backoff: Duration::from_secs(Self::BACKOFF_SECS),
            max_wait: None,
        }
    }

    /// Set the settle time
    #[must_use]
    pub const fn settle_time(mut self, duration: Duration) -> Self {
        self.settle_time = duration;
        self
    }

    /// Set the backoff between polls
    #[must_use]
    pub const fn backoff(mut self, duration: Duration) -> Self {
        self.backoff = duration;
        self
    }

    /// Bound the time spent polling a single record
    #[must_use]
    pub const fn max_wait(mut self, deadline: Option<Duration>) -> Self {
        self.max_wait = deadline;
        self
    }

    /// Whether polling that has run for `waited` must stop
    #[must_use]
    pub fn deadline_passed(&self, waited: Duration) -> bool {
        self.max_wait.is_some_and(|max| waited >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hook_contract() {
        let config = PollConfig::default();
        assert_eq!(config.settle_time, Duration::from_secs(10));
        assert_eq!(config.backoff, Duration::from_secs(30));
        assert_eq!(config.max_wait, None);
    }

    #[test]
    fn unbounded_never_passes_deadline() {
        let config = PollConfig::new();
        assert!(!config.deadline_passed(Duration::from_secs(u64::from(u32::MAX))));
    }

    #[test]
    fn bounded_deadline() {
        let config = PollConfig::new().max_wait(Some(Duration::from_secs(90)));
        assert!(!config.deadline_passed(Duration::from_secs(60)));
        assert!(config.deadline_passed(Duration::from_secs(90)));
    }
}
