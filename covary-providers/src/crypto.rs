use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use covary_core::timeseries::key::day_key;
use covary_core::{
    CovaryError, FetchWindow, Granularity, ProviderAdapter, ProviderId, Series, SeriesSpec,
    monthly_mean,
};

use crate::client::HttpClient;
use crate::{parse_base, push_segments, unexpected_spec};

/// Production endpoint of the CoinGecko API.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

const PROVIDER: &str = "coin-market";

/// Adapter for one coin's market-chart price history.
///
/// The upstream takes a day-count lookback rather than a date range; the
/// month window is widened to `months_back * 31` days (bounded to the API's
/// accepted range) so no requested month is cut short.
pub struct CoinMarketAdapter {
    http: HttpClient,
    base_url: String,
}

impl CoinMarketAdapter {
    /// Adapter against the production endpoint.
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Adapter against a custom endpoint (tests).
    pub fn with_base_url(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[millisecond timestamp, price]` pairs.
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

#[async_trait]
impl ProviderAdapter for CoinMarketAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::CoinMarket
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::CoinMarket {
            coin_id,
            vs_currency,
            ..
        } = spec
        else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let days = (window.months_back * 31).clamp(30, 3650);
        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &[
            "api",
            "v3",
            "coins",
            coin_id,
            "market_chart",
        ])?;
        url.query_pairs_mut()
            .append_pair("vs_currency", vs_currency)
            .append_pair("days", &days.to_string());

        let body: MarketChartResponse = self.http.get_json(PROVIDER, url).await?;
        let entries: Vec<(String, f64)> = body
            .prices
            .iter()
            .filter_map(|&(ms, price)| {
                DateTime::from_timestamp_millis(ms as i64)
                    .map(|ts| (day_key(ts.date_naive()), price))
            })
            .collect();

        match window.granularity {
            // Several samples can land on one day; the latest wins, as the
            // insertion order is chronological.
            Granularity::Daily => Ok(Series::from_points(Granularity::Daily, entries)),
            Granularity::Monthly => Ok(monthly_mean(
                entries.iter().map(|(k, v)| (k.as_str(), *v)),
            )),
        }
    }
}
