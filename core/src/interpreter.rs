//! Category-based failure interpreter with rate tolerance
//!
//! Combines the `TypeClassifier` (is this kind of failure relevant?) with the
//! `ToleranceWindow` (has this happened too often lately?) behind a single
//! `should_trip` verdict.

use crate::{
    builder::InterpreterBuilder,
    category::{Category, CategorySet, Failure},
    classifier::{FailureInterpreter, TypeClassifier},
    clock::{Clock, MonotonicClock},
    config::InterpreterConfig,
    errors::Result,
    validator::validate,
    window::{TimeUnit, ToleranceConfig, ToleranceWindow},
};
use std::time::Duration;
use tracing::debug;

/// Interprets failures by category, then by rate
///
/// - Failures whose category is-a ignored category never trip and do not
///   consume tolerance.
/// - Failures outside the trip set never trip.
/// - Everything else is recorded in the tolerance window, which decides.
///
/// `should_trip` takes `&self` and may be called from many threads; the
/// window is internally locked. Reconfiguration takes `&mut self`.
///
/// # Example
///
/// ```rust
/// use failure_interpreter::{CategoryInterpreter, FailureKind, InterpreterConfig};
///
/// let interpreter = CategoryInterpreter::from_config(
///     InterpreterConfig::with_ignore(FailureKind::NotFound),
/// )
/// .unwrap();
///
/// assert!(interpreter.should_trip(&FailureKind::Timeout));
/// assert!(!interpreter.should_trip(&FailureKind::NotFound));
/// ```
#[derive(Debug)]
pub struct CategoryInterpreter<C: Category, K: Clock = MonotonicClock> {
    classifier: TypeClassifier<C>,
    window: ToleranceWindow,
    clock: K,
}

impl<C: Category> CategoryInterpreter<C> {
    /// Interpreter with the default configuration: every failure trips
    pub fn new() -> Self {
        Self {
            classifier: TypeClassifier::default(),
            window: ToleranceWindow::default(),
            clock: MonotonicClock::new(),
        }
    }

    /// Validate `config` and build an interpreter on the monotonic clock
    pub fn from_config(config: InterpreterConfig<C>) -> Result<Self, C> {
        Self::from_config_with_clock(config, MonotonicClock::new())
    }

    /// Create a new interpreter builder
    pub fn builder() -> InterpreterBuilder<C> {
        InterpreterBuilder::new()
    }
}

impl<C: Category> Default for CategoryInterpreter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category, K: Clock> CategoryInterpreter<C, K> {
    /// Validate `config` and build an interpreter reading time from `clock`
    pub fn from_config_with_clock(config: InterpreterConfig<C>, clock: K) -> Result<Self, C> {
        if let Err(err) = config.validate() {
            debug!(error = %err, "Rejected interpreter configuration");
            return Err(err);
        }

        Ok(Self {
            classifier: TypeClassifier::new(config.ignore, config.trip),
            window: ToleranceWindow::new(config.tolerance),
            clock,
        })
    }

    /// Decide whether `failure` should trip, using the interpreter's clock
    pub fn should_trip<F>(&self, failure: &F) -> bool
    where
        F: Failure<Category = C> + ?Sized,
    {
        self.should_trip_at(failure, self.clock.now())
    }

    /// Decide whether `failure` should trip, as observed at `now`
    ///
    /// `now` must come from the same time base as previous observations.
    pub fn should_trip_at<F>(&self, failure: &F, now: Duration) -> bool
    where
        F: Failure<Category = C> + ?Sized,
    {
        let category = failure.category();

        if !self.classifier.counts(&category) {
            return false;
        }

        let trip = self.window.record(now);
        if trip {
            debug!(
                category = ?category,
                frequency = self.window.config().frequency,
                "Failure exceeded tolerance"
            );
        }
        trip
    }

    /// Replace the ignore set; rejected if it would shadow a trip category
    pub fn set_ignore(&mut self, ignore: impl Into<CategorySet<C>>) -> Result<(), C> {
        let ignore = ignore.into();
        self.check(&ignore, self.classifier.trip())?;

        debug!(ignore = ?ignore, "Updated ignored categories");
        self.classifier.set_ignore(ignore);
        Ok(())
    }

    /// Replace the trip set; rejected if an ignored category shadows it
    pub fn set_trip(&mut self, trip: impl Into<CategorySet<C>>) -> Result<(), C> {
        let trip = trip.into();
        self.check(self.classifier.ignore(), &trip)?;

        debug!(trip = ?trip, "Updated trip categories");
        self.classifier.set_trip(trip);
        Ok(())
    }

    /// Failures tolerated per window; 0 trips on every eligible failure
    pub fn set_frequency(&mut self, frequency: u32) {
        let tolerance = ToleranceConfig {
            frequency,
            ..self.tolerance()
        };
        self.set_tolerance(tolerance);
    }

    pub fn set_duration(&mut self, duration: u64, unit: TimeUnit) {
        let tolerance = ToleranceConfig {
            duration,
            unit,
            ..self.tolerance()
        };
        self.set_tolerance(tolerance);
    }

    /// Replace frequency, duration and unit together
    ///
    /// The current window and its count carry over.
    pub fn set_tolerance(&mut self, tolerance: ToleranceConfig) {
        debug!(
            frequency = tolerance.frequency,
            duration = tolerance.duration,
            unit = ?tolerance.unit,
            "Updated tolerance"
        );
        self.window.set_config(tolerance);
    }

    pub fn ignore(&self) -> &CategorySet<C> {
        self.classifier.ignore()
    }

    pub fn trip(&self) -> &CategorySet<C> {
        self.classifier.trip()
    }

    pub fn frequency(&self) -> u32 {
        self.window.config().frequency
    }

    pub fn duration(&self) -> u64 {
        self.window.config().duration
    }

    pub fn unit(&self) -> TimeUnit {
        self.window.config().unit
    }

    pub fn tolerance(&self) -> ToleranceConfig {
        self.window.config()
    }

    pub fn classifier(&self) -> &TypeClassifier<C> {
        &self.classifier
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> InterpreterConfig<C> {
        InterpreterConfig {
            ignore: self.ignore().clone(),
            trip: self.trip().clone(),
            tolerance: self.tolerance(),
        }
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    fn check(&self, ignore: &CategorySet<C>, trip: &CategorySet<C>) -> Result<(), C> {
        validate(ignore, trip).inspect_err(|err| {
            debug!(error = %err, "Rejected interpreter configuration change");
        })
    }
}

impl<C, K, F> FailureInterpreter<F> for CategoryInterpreter<C, K>
where
    C: Category,
    K: Clock,
    F: Failure<Category = C> + ?Sized,
{
    fn should_trip(&self, failure: &F) -> bool {
        self.should_trip_at(failure, self.clock.now())
    }
}
