//! covary-providers
//!
//! One HTTP adapter per upstream data source. Each adapter owns request
//! construction and response parsing for its one API and emits a normalized
//! [`covary_core::Series`]; nothing about upstream schemas leaks past
//! `fetch`. Base URLs are overridable so tests can point an adapter at a
//! local mock server.
#![warn(missing_docs)]

/// Shared JSON-over-GET HTTP client.
pub mod client;

/// CoinGecko market-chart price history.
pub mod crypto;
/// disease.sh COVID-19 historical timeline (cumulative counters).
pub mod epidemic;
/// exchangerate.host currency time series.
pub mod fx;
/// World Bank annual development indicators.
pub mod indicators;
/// Wikimedia per-article pageview statistics.
pub mod pageviews;
/// USGS earthquake catalog (discrete events).
pub mod quakes;
/// OpenAlex scholarly works grouped by publication year.
pub mod scholar;
/// Open-Meteo historical weather archive.
pub mod weather;

pub use client::HttpClient;
pub use crypto::CoinMarketAdapter;
pub use epidemic::EpidemicAdapter;
pub use fx::ExchangeRateAdapter;
pub use indicators::AnnualIndicatorAdapter;
pub use pageviews::PageviewsAdapter;
pub use quakes::EarthquakesAdapter;
pub use scholar::ScholarlyAdapter;
pub use weather::WeatherAdapter;

use covary_core::{CovaryError, SeriesSpec};
use url::Url;

/// A spec was routed to an adapter of a different provider. The registry
/// dispatches on the spec's own provider id, so this is unreachable through
/// the public API and only guards direct adapter use.
pub(crate) fn unexpected_spec(provider: &'static str, spec: &SeriesSpec) -> CovaryError {
    CovaryError::invalid_arg(format!(
        "{provider} adapter received a {} spec",
        spec.provider()
    ))
}

pub(crate) fn parse_base(provider: &'static str, base_url: &str) -> Result<Url, CovaryError> {
    Url::parse(base_url)
        .map_err(|e| CovaryError::invalid_arg(format!("{provider} base URL: {e}")))
}

/// Append path segments to a parsed base URL, percent-encoding as needed.
pub(crate) fn push_segments(
    provider: &'static str,
    url: &mut Url,
    segments: &[&str],
) -> Result<(), CovaryError> {
    url.path_segments_mut()
        .map_err(|()| CovaryError::invalid_arg(format!("{provider} base URL cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

pub(crate) fn is_four_digit_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}
