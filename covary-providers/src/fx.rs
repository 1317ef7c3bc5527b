use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::Deserialize;

use covary_core::timeseries::key::{date_range, day_key_from_iso};
use covary_core::{
    CovaryError, FetchWindow, Granularity, ProviderAdapter, ProviderId, Series, SeriesSpec,
    monthly_mean,
};

use crate::client::HttpClient;
use crate::{parse_base, push_segments, unexpected_spec};

/// Production endpoint of the exchangerate.host API.
pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate.host";

const PROVIDER: &str = "exchange-rate";

/// Adapter for one currency pair's daily exchange-rate series.
pub struct ExchangeRateAdapter {
    http: HttpClient,
    base_url: String,
}

impl ExchangeRateAdapter {
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
struct TimeseriesResponse {
    /// ISO date → { symbol → rate }. A `BTreeMap` keeps dates
    /// chronologically sorted for free.
    #[serde(default)]
    rates: BTreeMap<String, HashMap<String, f64>>,
}

#[async_trait]
impl ProviderAdapter for ExchangeRateAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::ExchangeRate
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::ExchangeRate { base, symbol } = spec else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let range = date_range(window.today, window.months_back);
        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &["timeseries"])?;
        url.query_pairs_mut()
            .append_pair("start_date", &range.start.to_string())
            .append_pair("end_date", &range.end.to_string())
            .append_pair("base", base)
            .append_pair("symbols", symbol);

        let body: TimeseriesResponse = self.http.get_json(PROVIDER, url).await?;
        let entries = body
            .rates
            .iter()
            .filter_map(|(iso, by_symbol)| {
                by_symbol
                    .get(symbol)
                    .map(|rate| (day_key_from_iso(iso), *rate))
            });

        match window.granularity {
            Granularity::Daily => Ok(Series::from_points(Granularity::Daily, entries)),
            Granularity::Monthly => {
                let entries: Vec<(String, f64)> = entries.collect();
                Ok(monthly_mean(
                    entries.iter().map(|(k, v)| (k.as_str(), *v)),
                ))
            }
        }
    }
}
