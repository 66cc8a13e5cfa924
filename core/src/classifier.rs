//! Structural failure classification
//!
//! This module provides the `FailureInterpreter` seam a circuit breaker
//! consults for each failure, plus the category-based `TypeClassifier` that
//! decides whether a failure is ignored or eligible to trip.

use crate::category::{Category, CategorySet};

/// Decides whether an observed failure should count toward opening a breaker
///
/// # Examples
///
/// ```rust
/// use failure_interpreter::{FailureInterpreter, FailureKind};
///
/// #[derive(Debug)]
/// struct OnlyTimeouts;
///
/// impl FailureInterpreter<FailureKind> for OnlyTimeouts {
///     fn should_trip(&self, failure: &FailureKind) -> bool {
///         *failure == FailureKind::Timeout
///     }
/// }
///
/// assert!(OnlyTimeouts.should_trip(&FailureKind::Timeout));
/// assert!(!OnlyTimeouts.should_trip(&FailureKind::NotFound));
/// ```
pub trait FailureInterpreter<F: ?Sized>: Send + Sync + std::fmt::Debug {
    /// Returns `true` if this failure should trip the breaker, `false` to ignore it.
    fn should_trip(&self, failure: &F) -> bool;
}

/// Interpreter that trips on every failure
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInterpreter;

impl<F: ?Sized> FailureInterpreter<F> for DefaultInterpreter {
    fn should_trip(&self, _failure: &F) -> bool {
        true
    }
}

/// Predicate-based interpreter using a closure
pub struct PredicateInterpreter<P> {
    predicate: P,
}

impl<P> PredicateInterpreter<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<F: ?Sized, P> FailureInterpreter<F> for PredicateInterpreter<P>
where
    P: Fn(&F) -> bool + Send + Sync,
{
    fn should_trip(&self, failure: &F) -> bool {
        (self.predicate)(failure)
    }
}

impl<P> std::fmt::Debug for PredicateInterpreter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateInterpreter")
            .field("predicate", &"<closure>")
            .finish()
    }
}

/// Stateless check of a category against ignore and trip sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeClassifier<C: Category> {
    ignore: CategorySet<C>,
    trip: CategorySet<C>,
}

impl<C: Category> TypeClassifier<C> {
    /// Build a classifier without validating the sets against each other
    pub fn new(ignore: CategorySet<C>, trip: CategorySet<C>) -> Self {
        Self { ignore, trip }
    }

    /// True iff `category` is-a any ignored category
    pub fn is_ignored(&self, category: &C) -> bool {
        self.ignore.matches(category)
    }

    /// True iff `category` is-a any trip category
    pub fn is_trip_eligible(&self, category: &C) -> bool {
        self.trip.matches(category)
    }

    /// Ignored categories take precedence over trip categories
    pub fn counts(&self, category: &C) -> bool {
        !self.is_ignored(category) && self.is_trip_eligible(category)
    }

    pub fn ignore(&self) -> &CategorySet<C> {
        &self.ignore
    }

    pub fn trip(&self) -> &CategorySet<C> {
        &self.trip
    }

    pub(crate) fn set_ignore(&mut self, ignore: CategorySet<C>) {
        self.ignore = ignore;
    }

    pub(crate) fn set_trip(&mut self, trip: CategorySet<C>) {
        self.trip = trip;
    }
}

impl<C: Category> Default for TypeClassifier<C> {
    fn default() -> Self {
        Self::new(CategorySet::new(), CategorySet::root())
    }
}
