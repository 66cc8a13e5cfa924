//! Interpreter configuration with defaulted fields

use crate::category::{Category, CategorySet};
use crate::errors::Result;
use crate::validator::validate;
use crate::window::ToleranceConfig;

/// Full interpreter configuration
///
/// Every field has a default, so each constructor variant is just a
/// partially filled config:
/// - `ignore`: empty
/// - `trip`: the root category (everything trips)
/// - `tolerance`: none (trip on first eligible failure)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        default,
        bound(
            serialize = "C: Category + serde::Serialize",
            deserialize = "C: Category + serde::Deserialize<'de>"
        )
    )
)]
pub struct InterpreterConfig<C: Category> {
    /// Categories that never trip
    pub ignore: CategorySet<C>,
    /// Categories eligible to trip
    pub trip: CategorySet<C>,
    pub tolerance: ToleranceConfig,
}

impl<C: Category> Default for InterpreterConfig<C> {
    fn default() -> Self {
        Self {
            ignore: CategorySet::new(),
            trip: CategorySet::root(),
            tolerance: ToleranceConfig::none(),
        }
    }
}

impl<C: Category> InterpreterConfig<C> {
    pub fn with_ignore(ignore: impl Into<CategorySet<C>>) -> Self {
        Self {
            ignore: ignore.into(),
            ..Default::default()
        }
    }

    pub fn with_ignore_and_tolerance(
        ignore: impl Into<CategorySet<C>>,
        tolerance: ToleranceConfig,
    ) -> Self {
        Self {
            ignore: ignore.into(),
            tolerance,
            ..Default::default()
        }
    }

    pub fn with_ignore_and_trip(
        ignore: impl Into<CategorySet<C>>,
        trip: impl Into<CategorySet<C>>,
    ) -> Self {
        Self {
            ignore: ignore.into(),
            trip: trip.into(),
            ..Default::default()
        }
    }

    pub fn with_ignore_trip_and_tolerance(
        ignore: impl Into<CategorySet<C>>,
        trip: impl Into<CategorySet<C>>,
        tolerance: ToleranceConfig,
    ) -> Self {
        Self {
            ignore: ignore.into(),
            trip: trip.into(),
            tolerance,
        }
    }

    /// Check the ignore and trip sets for contradictions
    pub fn validate(&self) -> Result<(), C> {
        validate(&self.ignore, &self.trip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureKind, TimeUnit};

    #[test]
    fn test_default_config() {
        let config = InterpreterConfig::<FailureKind>::default();

        assert!(config.ignore.is_empty());
        assert_eq!(config.trip.len(), 1);
        assert!(config.trip.contains(&FailureKind::Any));
        assert_eq!(config.tolerance, ToleranceConfig::none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shorthands_fill_remaining_defaults() {
        let tolerance = ToleranceConfig::new(7777, 1234, TimeUnit::Milliseconds);

        let config = InterpreterConfig::with_ignore(FailureKind::Runtime);
        assert_eq!(config.trip, CategorySet::root());
        assert_eq!(config.tolerance, ToleranceConfig::none());

        let config = InterpreterConfig::with_ignore_and_tolerance(FailureKind::Runtime, tolerance);
        assert_eq!(config.trip, CategorySet::root());
        assert_eq!(config.tolerance, tolerance);

        let config = InterpreterConfig::with_ignore_and_trip(FailureKind::Runtime, FailureKind::Io);
        assert_eq!(config.trip, CategorySet::singleton(FailureKind::Io));
        assert_eq!(config.tolerance, ToleranceConfig::none());

        let config = InterpreterConfig::with_ignore_trip_and_tolerance(
            [FailureKind::Runtime],
            [FailureKind::Io, FailureKind::Fatal],
            tolerance,
        );
        assert_eq!(config.ignore, CategorySet::singleton(FailureKind::Runtime));
        assert_eq!(config.trip.len(), 2);
        assert_eq!(config.tolerance, tolerance);
    }

    #[test]
    fn test_root_ignore_conflicts_with_default_trip() {
        let config = InterpreterConfig::with_ignore(FailureKind::Any);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_toml() {
        let config: InterpreterConfig<FailureKind> = toml::from_str(
            r#"
            ignore = ["invalid_argument"]
            trip = ["runtime", "io"]

            [tolerance]
            frequency = 3
            duration = 10
            unit = "seconds"
            "#,
        )
        .unwrap();

        assert_eq!(config.ignore, CategorySet::singleton(FailureKind::InvalidArgument));
        assert_eq!(
            config.trip,
            CategorySet::of([FailureKind::Io, FailureKind::Runtime])
        );
        assert_eq!(config.tolerance, ToleranceConfig::new(3, 10, TimeUnit::Seconds));
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_toml_uses_defaults() {
        let config: InterpreterConfig<FailureKind> = toml::from_str(
            r#"
            [tolerance]
            frequency = 2
            "#,
        )
        .unwrap();

        assert!(config.ignore.is_empty());
        assert_eq!(config.trip, CategorySet::root());
        assert_eq!(config.tolerance.frequency, 2);
        assert_eq!(config.tolerance.unit, TimeUnit::Milliseconds);
    }
}
