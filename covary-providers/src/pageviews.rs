use async_trait::async_trait;
use serde::Deserialize;

use covary_core::timeseries::key::key_range;
use covary_core::{CovaryError, FetchWindow, ProviderAdapter, ProviderId, Series, SeriesSpec};

use crate::client::HttpClient;
use crate::{parse_base, push_segments, unexpected_spec};

/// Production endpoint of the Wikimedia REST API.
pub const DEFAULT_BASE_URL: &str = "https://wikimedia.org/api/rest_v1";

const PROVIDER: &str = "pageviews";
const PROJECT: &str = "en.wikipedia.org";
const ACCESS: &str = "all-access";
const AGENT: &str = "user";

/// Adapter for per-article Wikimedia pageview counts.
///
/// The upstream serves both monthly and daily counts from the same
/// path-templated endpoint with an inclusive 8-digit key range, so this is
/// the one adapter that never aggregates locally.
pub struct PageviewsAdapter {
    http: HttpClient,
    base_url: String,
}

impl PageviewsAdapter {
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
struct PageviewsResponse {
    #[serde(default)]
    items: Vec<PageviewItem>,
}

#[derive(Deserialize)]
struct PageviewItem {
    timestamp: String,
    views: f64,
}

#[async_trait]
impl ProviderAdapter for PageviewsAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Pageviews
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::Pageviews { article } = spec else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let range = key_range(window.today, window.months_back, window.granularity);
        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &[
            "metrics",
            "pageviews",
            "per-article",
            PROJECT,
            ACCESS,
            AGENT,
            article,
            window.granularity.as_str(),
            &range.start,
            &range.end,
        ])?;

        let body: PageviewsResponse = self.http.get_json(PROVIDER, url).await?;

        // Upstream timestamps are 10-digit (YYYYMMDDHH); truncate to the
        // requested key length.
        let key_len = window.granularity.key_len();
        let mut series = Series::new(window.granularity);
        for item in body.items {
            if item.timestamp.len() >= key_len {
                series.insert(item.timestamp[..key_len].to_string(), item.views);
            }
        }
        Ok(series)
    }
}
