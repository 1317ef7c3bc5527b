//! Intersects two normalized series on shared time keys.

use crate::CovaryError;
use crate::types::{AlignedPair, Series};

/// Minimum number of shared keys for a pairing to be usable.
pub const MIN_OVERLAP: usize = 3;

/// Keys present in both series, sorted ascending. Lexicographic order on
/// canonical keys is chronological order.
#[must_use]
pub fn intersect_keys(a: &Series, b: &Series) -> Vec<String> {
    let mut keys: Vec<String> = a
        .keys()
        .filter(|k| b.contains_key(k))
        .map(str::to_string)
        .collect();
    keys.sort_unstable();
    keys
}

/// Restrict both series to their shared keys, producing parallel value
/// arrays in chronological order.
///
/// # Errors
/// `CovaryError::InsufficientOverlap` when fewer than [`MIN_OVERLAP`] keys
/// are shared; the statistics engine must not run on such a pairing.
pub fn align(a: &Series, b: &Series) -> Result<AlignedPair, CovaryError> {
    let keys = intersect_keys(a, b);
    if keys.len() < MIN_OVERLAP {
        return Err(CovaryError::InsufficientOverlap { found: keys.len() });
    }
    let mut xs = Vec::with_capacity(keys.len());
    let mut ys = Vec::with_capacity(keys.len());
    for k in &keys {
        // Both lookups hit: the keys are the intersection by construction.
        xs.push(a.get(k).unwrap_or(f64::NAN));
        ys.push(b.get(k).unwrap_or(f64::NAN));
    }
    Ok(AlignedPair { keys, xs, ys })
}
