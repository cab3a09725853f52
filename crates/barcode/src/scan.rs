//! Duplicate-scan suppression for continuous camera decoding.

use std::time::{Duration, Instant};

pub const DEFAULT_SCAN_COOLDOWN: Duration = Duration::from_secs(2);

/// Drops repeats of the same code inside a cooldown window.
///
/// The window starts at the last *accepted* scan; suppressed repeats do not
/// extend it. A different code is always accepted and replaces the last one.
#[derive(Debug, Clone)]
pub struct ScanDebouncer {
    cooldown: Duration,
    last: Option<(String, Instant)>,
}

impl Default for ScanDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_COOLDOWN)
    }
}

impl ScanDebouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown, last: None }
    }

    /// Returns true when the scan should be processed.
    pub fn observe(&mut self, code: &str, now: Instant) -> bool {
        if let Some((last_code, accepted_at)) = &self.last {
            let cooling_down = now.saturating_duration_since(*accepted_at) < self.cooldown;
            if last_code == code && cooling_down {
                return false;
            }
        }
        self.last = Some((code.to_string(), now));
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
