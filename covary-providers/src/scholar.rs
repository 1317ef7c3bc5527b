use async_trait::async_trait;
use serde::Deserialize;

use covary_core::timeseries::key::{add_months, date_range};
use covary_core::{
    CovaryError, FetchWindow, Granularity, ProviderAdapter, ProviderId, Series, SeriesSpec,
};

use crate::client::HttpClient;
use crate::{is_four_digit_year, parse_base, push_segments, unexpected_spec};

/// Production endpoint of the OpenAlex API.
pub const DEFAULT_BASE_URL: &str = "https://api.openalex.org";

const PROVIDER: &str = "scholarly";

/// Adapter for publication counts of a free-text scholarly search.
///
/// The upstream groups matches by publication year; each year bucket maps
/// to the synthetic monthly key `"<year>01"`. The publication-date filter
/// is widened 24 months before the window start so slow-to-index years near
/// the boundary still appear.
pub struct ScholarlyAdapter {
    http: HttpClient,
    base_url: String,
}

impl ScholarlyAdapter {
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
struct WorksResponse {
    #[serde(default)]
    group_by: Vec<YearGroup>,
}

#[derive(Deserialize)]
struct YearGroup {
    key: Option<String>,
    count: Option<f64>,
}

#[async_trait]
impl ProviderAdapter for ScholarlyAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Scholarly
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::Scholarly { query } = spec else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let range = date_range(window.today, window.months_back);
        let from = add_months(range.start, -24);
        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &["works"])?;
        url.query_pairs_mut()
            .append_pair("search", query)
            .append_pair("group_by", "publication_year")
            .append_pair("per_page", "200")
            .append_pair(
                "filter",
                &format!("from_publication_date:{from},to_publication_date:{}", range.end),
            );

        let body: WorksResponse = self.http.get_json(PROVIDER, url).await?;
        let mut series = Series::new(Granularity::Monthly);
        for group in body.group_by {
            // Only plain 4-digit year keys; OpenAlex sometimes emits URIs
            // or "unknown" buckets, which are discarded.
            let Some(year) = group.key else { continue };
            if !is_four_digit_year(&year) {
                continue;
            }
            series.insert(format!("{year}01"), group.count.unwrap_or(0.0));
        }
        Ok(series)
    }
}
