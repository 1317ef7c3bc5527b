//! covary-core
//!
//! Core types, the provider adapter trait, and time-series utilities shared
//! across the covary workspace.
//!
//! - `types`: query specifications, normalized series, capability
//!   descriptors, aligned pairs.
//! - `provider`: the `ProviderAdapter` trait implemented by upstream
//!   adapter crates.
//! - `timeseries`: time-key codec, monthly aggregation, series alignment,
//!   and descriptive statistics.
//!
//! The adapter contract is async and assumes the Tokio ecosystem via
//! `async-trait`; everything else in this crate is pure and synchronous.
#![warn(missing_docs)]

/// Unified error type for the workspace.
pub mod error;
/// The `ProviderAdapter` trait implemented by each upstream adapter.
pub mod provider;
pub mod timeseries;
pub mod types;

pub use error::CovaryError;
pub use provider::ProviderAdapter;
pub use timeseries::aggregate::{diff_cumulative, monthly_mean, monthly_sum};
pub use timeseries::align::{MIN_OVERLAP, align, intersect_keys};
pub use timeseries::key::{DateRange, KeyRange, date_range, day_key, key_range, month_key};
pub use timeseries::stats::{linear_fit, pearson_r};
pub use types::*;
