//! Builder API for ergonomic interpreter configuration

use crate::{
    category::{Category, CategorySet},
    clock::{Clock, MonotonicClock},
    config::InterpreterConfig,
    errors::Result,
    interpreter::CategoryInterpreter,
    window::{TimeUnit, ToleranceConfig},
};

/// Builder for creating interpreters with a fluent API
///
/// Validation happens once, in `build`.
#[derive(Debug, Clone)]
pub struct InterpreterBuilder<C: Category, K: Clock = MonotonicClock> {
    config: InterpreterConfig<C>,
    clock: K,
}

impl<C: Category> InterpreterBuilder<C> {
    pub fn new() -> Self {
        Self {
            config: InterpreterConfig::default(),
            clock: MonotonicClock::new(),
        }
    }
}

impl<C: Category> Default for InterpreterBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category, K: Clock> InterpreterBuilder<C, K> {
    /// Replace the whole configuration
    pub fn config(mut self, config: InterpreterConfig<C>) -> Self {
        self.config = config;
        self
    }

    /// Set categories that never trip
    pub fn ignore(mut self, ignore: impl Into<CategorySet<C>>) -> Self {
        self.config.ignore = ignore.into();
        self
    }

    /// Set categories eligible to trip (default: everything)
    pub fn trip(mut self, trip: impl Into<CategorySet<C>>) -> Self {
        self.config.trip = trip.into();
        self
    }

    /// Number of eligible failures tolerated per window
    pub fn frequency(mut self, frequency: u32) -> Self {
        self.config.tolerance.frequency = frequency;
        self
    }

    /// Tolerance window length
    pub fn duration(mut self, duration: u64, unit: TimeUnit) -> Self {
        self.config.tolerance.duration = duration;
        self.config.tolerance.unit = unit;
        self
    }

    pub fn tolerance(mut self, tolerance: ToleranceConfig) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Use a custom time source
    pub fn clock<K2: Clock>(self, clock: K2) -> InterpreterBuilder<C, K2> {
        InterpreterBuilder {
            config: self.config,
            clock,
        }
    }

    /// Validate the configuration and build the interpreter
    pub fn build(self) -> Result<CategoryInterpreter<C, K>, C> {
        CategoryInterpreter::from_config_with_clock(self.config, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, FailureKind, ManualClock};
    use std::sync::Arc;

    #[test]
    fn test_builder_defaults() {
        let interpreter = InterpreterBuilder::<FailureKind>::new().build().unwrap();

        assert!(interpreter.ignore().is_empty());
        assert_eq!(interpreter.trip(), &CategorySet::root());
        assert_eq!(interpreter.frequency(), 0);
        assert_eq!(interpreter.duration(), 0);
    }

    #[test]
    fn test_builder_custom_config() {
        let interpreter = InterpreterBuilder::new()
            .ignore(FailureKind::NotFound)
            .trip([FailureKind::Io, FailureKind::Fatal])
            .frequency(3)
            .duration(30, TimeUnit::Seconds)
            .build()
            .unwrap();

        assert_eq!(interpreter.ignore(), &CategorySet::singleton(FailureKind::NotFound));
        assert_eq!(interpreter.trip().len(), 2);
        assert_eq!(interpreter.frequency(), 3);
        assert_eq!(interpreter.duration(), 30);
        assert_eq!(interpreter.unit(), TimeUnit::Seconds);
    }

    #[test]
    fn test_builder_rejects_shadowed_trip() {
        let result = InterpreterBuilder::new()
            .ignore(FailureKind::Io)
            .trip(FailureKind::Timeout)
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfiguration {
                conflicting_trip: FailureKind::Timeout,
                conflicting_ignore: FailureKind::Io,
            })
        ));
    }

    #[test]
    fn test_builder_with_clock() {
        let clock = Arc::new(ManualClock::new());
        let interpreter = InterpreterBuilder::new()
            .frequency(1)
            .duration(1, TimeUnit::Seconds)
            .clock(Arc::clone(&clock))
            .build()
            .unwrap();

        assert!(!interpreter.should_trip(&FailureKind::Io));
        assert!(interpreter.should_trip(&FailureKind::Io));

        clock.advance(std::time::Duration::from_secs(1));
        assert!(!interpreter.should_trip(&FailureKind::Io));
    }
}
