//! Covary pairs deliberately unrelated public time series and measures
//! how well they correlate anyway.
//!
//! Overview
//! - Draws random pairs of series specs from a pool spanning eight public
//!   data providers (Wikipedia pageviews, weather, FX rates, crypto
//!   prices, scholarly publication counts, COVID-19 timelines, earthquake
//!   catalogs, World Bank indicators).
//! - Fetches both series of a pair concurrently through the
//!   `covary_providers` adapters, normalized onto shared `YYYYMM` or
//!   `YYYYMMDD` time keys.
//! - Aligns each pair on the intersection of its keys and scores it with
//!   a Pearson coefficient and a least-squares fit from `covary_core`.
//! - A pair needs at least three overlapping keys to be scored; pairs
//!   involving a provider without daily data drop to monthly resolution.
//! - Batch runs isolate failures: one unreachable upstream marks its pair
//!   failed and the rest of the batch proceeds.
//!
//! Scoring a batch of random pairs:
//! ```rust,ignore
//! use covary::{Covary, Granularity, PairOutcome};
//!
//! let engine = Covary::builder()
//!     .months_back(36)
//!     .granularity(Granularity::Monthly)
//!     .pair_count(10)
//!     .build();
//!
//! let mut rng = rand::rng();
//! for outcome in engine.run_batch(&mut rng).await? {
//!     match outcome {
//!         PairOutcome::Correlated(c) => {
//!             println!("{} vs {}: r = {:.3}", c.label_a, c.label_b, c.r);
//!         }
//!         PairOutcome::Failed { label_a, label_b, error } => {
//!             eprintln!("{label_a} vs {label_b}: {error}");
//!         }
//!     }
//! }
//! ```
//!
//! Scoring one hand-picked pair:
//! ```rust,ignore
//! use covary::{Covary, SeriesSpec};
//!
//! let engine = Covary::builder().build();
//! let c = engine
//!     .correlate(
//!         &SeriesSpec::pageviews("Beekeeping"),
//!         &SeriesSpec::exchange_rate("USD", "EUR"),
//!     )
//!     .await?;
//! println!("r = {:.3} over {} points", c.r, c.keys.len());
//! ```
#![warn(missing_docs)]

mod engine;
mod pairs;
mod pool;
mod registry;

pub use engine::{Correlation, Covary, CovaryBuilder, PairOutcome};
pub use pairs::{SpecPair, effective_granularity, generate_pairs};
pub use pool::default_pool;
pub use registry::ProviderSet;

// Re-export core types so callers rarely need covary-core directly.
pub use covary_core::{
    AlignedPair, CovaryError, EpidemicField, FetchWindow, Granularity, GranularitySupport,
    LinearFit, MAX_MONTHS_BACK, MIN_MONTHS_BACK, MIN_OVERLAP, ProviderAdapter, ProviderId,
    Series, SeriesSpec,
};
