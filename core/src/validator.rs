//! Consistency check between ignore and trip sets

use crate::category::{Category, CategorySet};
use crate::errors::{ConfigError, Result};

/// Reject trip categories that an ignore entry would always shadow
///
/// Every `(trip, ignore)` pair is checked; the first trip entry that equals
/// or descends from an ignored category is reported. The reverse (an ignored
/// category narrower than a trip category) is the normal way to carve out a
/// subtype and is accepted.
pub fn validate<C: Category>(ignore: &CategorySet<C>, trip: &CategorySet<C>) -> Result<(), C> {
    for t in trip {
        if let Some(i) = ignore.iter().find(|i| t.is_a(i)) {
            return Err(ConfigError::InvalidConfiguration {
                conflicting_trip: *t,
                conflicting_ignore: *i,
            });
        }
    }
    Ok(())
}
