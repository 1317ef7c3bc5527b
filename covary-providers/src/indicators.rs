use async_trait::async_trait;
use serde::Deserialize;

use covary_core::{
    CovaryError, FetchWindow, Granularity, ProviderAdapter, ProviderId, Series, SeriesSpec,
};

use crate::client::HttpClient;
use crate::{is_four_digit_year, parse_base, push_segments, unexpected_spec};

/// Production endpoint of the World Bank API.
pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org";

const PROVIDER: &str = "annual-indicator";

/// Adapter for one country's annual World Bank indicator.
///
/// Rows arrive as `[metadata, rows]`; rows with a 4-digit year and a
/// non-null value map to the synthetic monthly key `"<year>01"`. The
/// upstream has no notion of a lookback window, so the whole indicator
/// history is fetched and alignment narrows it later.
pub struct AnnualIndicatorAdapter {
    http: HttpClient,
    base_url: String,
}

impl AnnualIndicatorAdapter {
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

/// `[metadata, rows]`; the metadata object is ignored.
#[derive(Deserialize)]
struct IndicatorResponse(serde_json::Value, Option<Vec<IndicatorRow>>);

#[derive(Deserialize)]
struct IndicatorRow {
    date: Option<String>,
    value: Option<f64>,
}

#[async_trait]
impl ProviderAdapter for AnnualIndicatorAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::AnnualIndicator
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        _window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::AnnualIndicator {
            country, indicator, ..
        } = spec
        else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &["v2", "country", country, "indicator", indicator])?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("per_page", "2000");

        let body: IndicatorResponse = self.http.get_json(PROVIDER, url).await?;
        let mut series = Series::new(Granularity::Monthly);
        for row in body.1.unwrap_or_default() {
            let (Some(year), Some(value)) = (row.date, row.value) else {
                continue;
            };
            if !is_four_digit_year(&year) {
                continue;
            }
            series.insert(format!("{year}01"), value);
        }
        Ok(series)
    }
}
