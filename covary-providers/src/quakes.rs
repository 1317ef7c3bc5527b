use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use covary_core::timeseries::key::{date_range, day_key};
use covary_core::{
    CovaryError, FetchWindow, Granularity, ProviderAdapter, ProviderId, Series, SeriesSpec,
    monthly_sum,
};

use crate::client::HttpClient;
use crate::{parse_base, push_segments, unexpected_spec};

/// Production endpoint of the USGS FDSN event service.
pub const DEFAULT_BASE_URL: &str = "https://earthquake.usgs.gov";

const PROVIDER: &str = "earthquakes";

/// Adapter counting seismic events at or above a magnitude threshold.
///
/// The catalog returns discrete event timestamps; the adapter aggregates
/// them to occurrence counts per day, or per month by summing.
pub struct EarthquakesAdapter {
    http: HttpClient,
    base_url: String,
}

impl EarthquakesAdapter {
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
struct CatalogResponse {
    #[serde(default)]
    features: Vec<EventFeature>,
}

#[derive(Deserialize)]
struct EventFeature {
    properties: Option<EventProperties>,
}

#[derive(Deserialize)]
struct EventProperties {
    /// Millisecond epoch timestamp of the event.
    time: Option<i64>,
}

#[async_trait]
impl ProviderAdapter for EarthquakesAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Earthquakes
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::Earthquakes { min_magnitude } = spec else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let range = date_range(window.today, window.months_back);
        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &["fdsnws", "event", "1", "query"])?;
        url.query_pairs_mut()
            .append_pair("format", "geojson")
            .append_pair("starttime", &range.start.to_string())
            .append_pair("endtime", &range.end.to_string())
            .append_pair("minmagnitude", &min_magnitude.to_string());

        let body: CatalogResponse = self.http.get_json(PROVIDER, url).await?;
        let day_keys = body.features.iter().filter_map(|f| {
            f.properties
                .as_ref()
                .and_then(|p| p.time)
                .and_then(DateTime::from_timestamp_millis)
                .map(|ts| day_key(ts.date_naive()))
        });

        match window.granularity {
            Granularity::Daily => {
                let mut series = Series::new(Granularity::Daily);
                for key in day_keys {
                    series.add(key, 1.0);
                }
                Ok(series)
            }
            Granularity::Monthly => {
                let day_keys: Vec<String> = day_keys.collect();
                Ok(monthly_sum(day_keys.iter().map(|k| (k.as_str(), 1.0))))
            }
        }
    }
}
