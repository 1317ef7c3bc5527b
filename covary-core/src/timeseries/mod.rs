//! Time-series utilities: key codec, aggregation, alignment, statistics.

/// Monthly aggregation reducers and cumulative differencing.
pub mod aggregate;
/// Intersection of two normalized series on shared time keys.
pub mod align;
/// Canonical time-key codec and calendar range helpers.
pub mod key;
/// Pearson correlation and ordinary-least-squares fit.
pub mod stats;
