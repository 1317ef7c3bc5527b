use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use covary_core::timeseries::key::{date_range, day_key_from_iso};
use covary_core::{
    CovaryError, FetchWindow, Granularity, ProviderAdapter, ProviderId, Series, SeriesSpec,
    monthly_mean,
};

use crate::client::HttpClient;
use crate::{parse_base, push_segments, unexpected_spec};

/// Production endpoint of the Open-Meteo historical archive.
pub const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com";

const PROVIDER: &str = "weather";

/// Adapter for one daily Open-Meteo weather variable at a coordinate.
///
/// The upstream returns parallel `daily.time[]` and `daily.<variable>[]`
/// arrays; daily output maps them directly, monthly output averages them.
pub struct WeatherAdapter {
    http: HttpClient,
    base_url: String,
}

impl WeatherAdapter {
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
struct WeatherResponse {
    daily: Option<DailyBlock>,
}

#[derive(Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    /// One array per requested variable; observations may be null.
    #[serde(flatten)]
    variables: HashMap<String, Vec<Option<f64>>>,
}

#[async_trait]
impl ProviderAdapter for WeatherAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Weather
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::Weather {
            latitude,
            longitude,
            variable,
            ..
        } = spec
        else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let range = date_range(window.today, window.months_back);
        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &["v1", "era5"])?;
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("start_date", &range.start.to_string())
            .append_pair("end_date", &range.end.to_string())
            .append_pair("daily", variable)
            .append_pair("timezone", "UTC");

        let body: WeatherResponse = self.http.get_json(PROVIDER, url).await?;
        let Some(daily) = body.daily else {
            return Ok(Series::new(window.granularity));
        };
        let values = daily.variables.get(variable).cloned().unwrap_or_default();
        let entries = daily
            .time
            .iter()
            .zip(values)
            .filter_map(|(iso, v)| v.map(|v| (day_key_from_iso(iso), v)));

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
