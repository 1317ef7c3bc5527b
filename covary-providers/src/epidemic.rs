use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use covary_core::timeseries::key::day_key;
use covary_core::{
    CovaryError, EpidemicField, FetchWindow, Granularity, ProviderAdapter, ProviderId, Series,
    SeriesSpec, diff_cumulative, monthly_sum,
};

use crate::client::HttpClient;
use crate::{parse_base, push_segments, unexpected_spec};

/// Production endpoint of the disease.sh API.
pub const DEFAULT_BASE_URL: &str = "https://disease.sh";

const PROVIDER: &str = "epidemic";

/// Adapter for a country's historical COVID-19 timeline.
///
/// The upstream reports *cumulative* counters keyed by `M/D/YY` dates. The
/// adapter sorts them chronologically and takes first differences, clamping
/// negative deltas (upstream data corrections) to zero; the result is an
/// inherently daily series, summed into monthly buckets on request.
pub struct EpidemicAdapter {
    http: HttpClient,
    base_url: String,
}

impl EpidemicAdapter {
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
struct HistoricalResponse {
    /// Country-level responses nest the fields under `timeline`; global
    /// responses put them at the top level.
    timeline: Option<TimelineBlock>,
    #[serde(flatten)]
    top_level: TimelineBlock,
}

#[derive(Deserialize, Default)]
struct TimelineBlock {
    cases: Option<HashMap<String, f64>>,
    deaths: Option<HashMap<String, f64>>,
}

impl TimelineBlock {
    fn field(&self, field: EpidemicField) -> Option<&HashMap<String, f64>> {
        match field {
            EpidemicField::Cases => self.cases.as_ref(),
            EpidemicField::Deaths => self.deaths.as_ref(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for EpidemicAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Epidemic
    }

    async fn fetch(
        &self,
        spec: &SeriesSpec,
        window: &FetchWindow,
    ) -> Result<Series, CovaryError> {
        let SeriesSpec::Epidemic { country, field } = spec else {
            return Err(unexpected_spec(PROVIDER, spec));
        };

        let lastdays = (window.months_back * 31).max(30);
        let mut url = parse_base(PROVIDER, &self.base_url)?;
        push_segments(PROVIDER, &mut url, &["v3", "covid-19", "historical", country])?;
        url.query_pairs_mut()
            .append_pair("lastdays", &lastdays.to_string());

        let body: HistoricalResponse = self.http.get_json(PROVIDER, url).await?;
        let timeline = body
            .timeline
            .as_ref()
            .and_then(|t| t.field(*field))
            .or_else(|| body.top_level.field(*field));
        let Some(timeline) = timeline else {
            return Ok(Series::new(window.granularity));
        };

        // Upstream keys look like "1/22/20"; unparseable ones are dropped.
        let mut cumulative: Vec<(String, f64)> = timeline
            .iter()
            .filter_map(|(mdy, value)| {
                NaiveDate::parse_from_str(mdy, "%m/%d/%y")
                    .ok()
                    .map(|date| (day_key(date), *value))
            })
            .collect();
        cumulative.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let daily = diff_cumulative(&cumulative);
        match window.granularity {
            Granularity::Daily => Ok(Series::from_points(Granularity::Daily, daily)),
            Granularity::Monthly => Ok(monthly_sum(
                daily.iter().map(|(k, v)| (k.as_str(), *v)),
            )),
        }
    }
}
