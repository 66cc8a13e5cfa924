//! Error types for interpreter configuration

use crate::category::Category;
use thiserror::Error;

/// Errors raised while constructing or reconfiguring an interpreter
///
/// Runtime evaluation never fails; only configuration can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError<C: Category> {
    /// A trip category equals or descends from an ignored category and
    /// could therefore never trip
    #[error(
        "invalid configuration: trip category {conflicting_trip:?} is shadowed by ignored category {conflicting_ignore:?}"
    )]
    InvalidConfiguration {
        conflicting_trip: C,
        conflicting_ignore: C,
    },
}

/// Result alias for configuration operations
pub type Result<T, C> = std::result::Result<T, ConfigError<C>>;
