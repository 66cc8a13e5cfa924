//! Rate tolerance over a fixed time window
//!
//! A window opens at the first eligible failure after the previous one
//! expired. Up to `frequency` failures inside it are tolerated; every further
//! failure inside the same window trips. A trip does not close the window.

use parking_lot::Mutex;
use std::time::Duration;
use tracing::trace;

/// Unit for the tolerance duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Convert `amount` of this unit to a `Duration`, saturating on overflow
    pub fn to_duration(self, amount: u64) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(amount),
            TimeUnit::Microseconds => Duration::from_micros(amount),
            TimeUnit::Milliseconds => Duration::from_millis(amount),
            TimeUnit::Seconds => Duration::from_secs(amount),
            TimeUnit::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(amount.saturating_mul(60 * 60)),
            TimeUnit::Days => Duration::from_secs(amount.saturating_mul(24 * 60 * 60)),
        }
    }
}

/// How many eligible failures to tolerate, and over how long
///
/// `frequency = 0` disables tolerance: every eligible failure trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ToleranceConfig {
    /// Failures tolerated per window
    pub frequency: u32,
    /// Window length, in `unit`
    pub duration: u64,
    pub unit: TimeUnit,
}

impl ToleranceConfig {
    pub fn new(frequency: u32, duration: u64, unit: TimeUnit) -> Self {
        Self {
            frequency,
            duration,
            unit,
        }
    }

    /// No tolerance: trip on the first eligible failure
    pub fn none() -> Self {
        Self::default()
    }

    /// Window length as a `Duration`
    pub fn window(&self) -> Duration {
        self.unit.to_duration(self.duration)
    }
}

#[derive(Debug, Default)]
struct WindowState {
    window_start: Option<Duration>,
    count_in_window: u32,
}

/// Fixed-window failure counter
///
/// `record` takes `&self`; the whole read-increment-compare-reset sequence
/// runs under one lock so concurrent callers never double-count a slot.
#[derive(Debug, Default)]
pub struct ToleranceWindow {
    config: ToleranceConfig,
    state: Mutex<WindowState>,
}

impl ToleranceWindow {
    pub fn new(config: ToleranceConfig) -> Self {
        Self {
            config,
            state: Mutex::new(WindowState::default()),
        }
    }

    pub fn config(&self) -> ToleranceConfig {
        self.config
    }

    /// Replace the tolerance; the current window and its count are kept
    pub fn set_config(&mut self, config: ToleranceConfig) {
        self.config = config;
    }

    /// Record one eligible failure at `now`; returns true if it trips
    pub fn record(&self, now: Duration) -> bool {
        let frequency = self.config.frequency;
        if frequency == 0 {
            return true;
        }

        let window = self.config.window();
        let mut state = self.state.lock();

        match state.window_start {
            Some(start) if now.saturating_sub(start) < window => {
                state.count_in_window = state.count_in_window.saturating_add(1);
                state.count_in_window > frequency
            }
            _ => {
                trace!(
                    now_ms = now.as_millis() as u64,
                    window_ms = window.as_millis() as u64,
                    "Opening new tolerance window"
                );
                state.window_start = Some(now);
                state.count_in_window = 1;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_time_unit_conversion() {
        assert_eq!(TimeUnit::Nanoseconds.to_duration(5), Duration::from_nanos(5));
        assert_eq!(TimeUnit::Microseconds.to_duration(5), Duration::from_micros(5));
        assert_eq!(TimeUnit::Milliseconds.to_duration(5), ms(5));
        assert_eq!(TimeUnit::Seconds.to_duration(5), Duration::from_secs(5));
        assert_eq!(TimeUnit::Minutes.to_duration(2), Duration::from_secs(120));
        assert_eq!(TimeUnit::Hours.to_duration(1), Duration::from_secs(3600));
        assert_eq!(TimeUnit::Days.to_duration(1), Duration::from_secs(86_400));
    }

    #[test]
    fn test_time_unit_saturates() {
        assert_eq!(
            TimeUnit::Days.to_duration(u64::MAX),
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn test_default_config_has_no_tolerance() {
        let config = ToleranceConfig::default();
        assert_eq!(config, ToleranceConfig::none());
        assert_eq!(config.frequency, 0);
        assert_eq!(config.duration, 0);
        assert_eq!(config.unit, TimeUnit::Milliseconds);
    }

    #[test]
    fn test_zero_frequency_always_trips() {
        let window = ToleranceWindow::new(ToleranceConfig::none());
        assert!(window.record(ms(0)));
        assert!(window.record(ms(0)));
        assert!(window.record(ms(10_000)));
    }

    #[test]
    fn test_trips_after_frequency_exceeded() {
        let window = ToleranceWindow::new(ToleranceConfig::new(2, 1, TimeUnit::Seconds));

        assert!(!window.record(ms(0)));
        assert!(!window.record(ms(10)));
        assert!(window.record(ms(20)));
    }

    #[test]
    fn test_trip_does_not_reset_window() {
        let window = ToleranceWindow::new(ToleranceConfig::new(1, 100, TimeUnit::Milliseconds));

        assert!(!window.record(ms(0)));
        assert!(window.record(ms(10)));
        assert!(window.record(ms(20)));
        assert!(window.record(ms(99)));
    }

    #[test]
    fn test_window_expiry_starts_fresh_window() {
        let window = ToleranceWindow::new(ToleranceConfig::new(1, 100, TimeUnit::Milliseconds));

        assert!(!window.record(ms(0)));
        assert!(window.record(ms(50)));

        // Exactly one duration after the start counts as expired
        assert!(!window.record(ms(100)));
        assert!(window.record(ms(150)));
        assert!(!window.record(ms(500)));
    }

    #[test]
    fn test_window_anchored_at_first_failure_not_last() {
        let window = ToleranceWindow::new(ToleranceConfig::new(3, 100, TimeUnit::Milliseconds));

        assert!(!window.record(ms(0)));
        assert!(!window.record(ms(60)));
        assert!(!window.record(ms(90)));
        // Still inside [0, 100), so this is the fourth in the window
        assert!(window.record(ms(99)));
        // Window from 0 has expired even though the last failure was at 99
        assert!(!window.record(ms(100)));
    }

    #[test]
    fn test_zero_duration_never_accumulates() {
        let window = ToleranceWindow::new(ToleranceConfig::new(1, 0, TimeUnit::Seconds));

        for _ in 0..10 {
            assert!(!window.record(ms(0)));
        }
    }

    #[test]
    fn test_set_config_keeps_current_window() {
        let mut window = ToleranceWindow::new(ToleranceConfig::new(5, 1, TimeUnit::Seconds));

        assert!(!window.record(ms(0)));
        assert!(!window.record(ms(1)));

        window.set_config(ToleranceConfig::new(1, 1, TimeUnit::Seconds));
        assert!(window.record(ms(2)));
    }

    #[test]
    fn test_concurrent_records_tolerate_exactly_frequency() {
        use std::thread;

        let window = Arc::new(ToleranceWindow::new(ToleranceConfig::new(
            10,
            1,
            TimeUnit::Hours,
        )));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let window = Arc::clone(&window);
                thread::spawn(move || (0..100).filter(|_| !window.record(ms(1))).count())
            })
            .collect();

        let tolerated: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(tolerated, 10);
    }
}
