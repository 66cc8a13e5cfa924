//! FailureInterpreter - decides which failures should trip a circuit breaker
//!
//! This crate provides the policy half of a circuit breaker:
//! - Category hierarchy with an explicit `is-a` relation (no runtime type info)
//! - Ignore/trip category sets, validated against each other at setup time
//! - Fixed-window rate tolerance with thread-safe state
//! - Monotonic or manually driven time sources
//!
//! The breaker itself (open/half-open/closed) is out of scope; it only
//! consumes the boolean verdict.
//!
//! # Example
//!
//! ```rust
//! use failure_interpreter::{CategoryInterpreter, FailureKind, TimeUnit};
//!
//! let interpreter = CategoryInterpreter::builder()
//!     .ignore(FailureKind::InvalidArgument)
//!     .trip(FailureKind::Error)
//!     .frequency(2)
//!     .duration(1, TimeUnit::Seconds)
//!     .build()
//!     .expect("trip set is not shadowed by ignore set");
//!
//! // Caller errors never count
//! assert!(!interpreter.should_trip(&FailureKind::InvalidArgument));
//!
//! // Two timeouts are tolerated, the third inside the window trips
//! assert!(!interpreter.should_trip(&FailureKind::Timeout));
//! assert!(!interpreter.should_trip(&FailureKind::Timeout));
//! assert!(interpreter.should_trip(&FailureKind::Timeout));
//! ```

pub mod builder;
pub mod category;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod errors;
pub mod interpreter;
pub mod validator;
pub mod window;

pub use builder::InterpreterBuilder;
pub use category::{Ancestors, Category, CategorySet, Failure, FailureKind};
pub use classifier::{DefaultInterpreter, FailureInterpreter, PredicateInterpreter, TypeClassifier};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::InterpreterConfig;
pub use errors::ConfigError;
pub use interpreter::CategoryInterpreter;
pub use validator::validate;
pub use window::{TimeUnit, ToleranceConfig, ToleranceWindow};
