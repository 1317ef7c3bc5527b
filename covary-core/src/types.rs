//! Common value types shared across the covary workspace.

use core::fmt;
use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Smallest lookback window callers may request, in months.
pub const MIN_MONTHS_BACK: u32 = 6;
/// Largest lookback window callers may request, in months.
pub const MAX_MONTHS_BACK: u32 = 120;

/// Time-key resolution of a normalized series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// One value per calendar month, keyed `YYYYMM`.
    Monthly,
    /// One value per calendar day, keyed `YYYYMMDD`.
    Daily,
}

impl Granularity {
    /// Stable, kebab-case identifier for logs, errors, and request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }

    /// Length of a canonical time key at this granularity.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::Monthly => 6,
            Self::Daily => 8,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static per-provider capability descriptor: which granularities the
/// upstream can natively serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranularitySupport {
    /// Whether the provider can serve daily-keyed series.
    pub daily: bool,
    /// Whether the provider can serve monthly-keyed series.
    pub monthly: bool,
}

impl GranularitySupport {
    /// Both daily and monthly output.
    pub const BOTH: Self = Self {
        daily: true,
        monthly: true,
    };
    /// Monthly output only (per-year aggregates included).
    pub const MONTHLY_ONLY: Self = Self {
        daily: false,
        monthly: true,
    };

    /// Whether the given granularity is supported.
    #[must_use]
    pub const fn supports(self, granularity: Granularity) -> bool {
        match granularity {
            Granularity::Daily => self.daily,
            Granularity::Monthly => self.monthly,
        }
    }

    /// Downgrade a requested granularity to the best supported one.
    ///
    /// Daily survives only when natively supported; everything else falls
    /// back to monthly.
    #[must_use]
    pub const fn effective(self, requested: Granularity) -> Granularity {
        if matches!(requested, Granularity::Daily) && self.daily {
            Granularity::Daily
        } else {
            Granularity::Monthly
        }
    }
}

/// Identifier of one upstream data source. Closed set: adding a provider
/// means adding a variant here and an adapter for it, and the compiler
/// points at every dispatch site that must learn about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    /// Wikimedia per-article pageview statistics.
    Pageviews,
    /// Open-Meteo historical weather archive.
    Weather,
    /// exchangerate.host currency time series.
    ExchangeRate,
    /// CoinGecko market-chart price history.
    CoinMarket,
    /// OpenAlex scholarly works, grouped by publication year.
    Scholarly,
    /// disease.sh COVID-19 historical timeline (cumulative counters).
    Epidemic,
    /// USGS earthquake catalog (discrete events).
    Earthquakes,
    /// World Bank annual development indicators.
    AnnualIndicator,
}

impl ProviderId {
    /// Stable, kebab-case identifier for logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pageviews => "pageviews",
            Self::Weather => "weather",
            Self::ExchangeRate => "exchange-rate",
            Self::CoinMarket => "coin-market",
            Self::Scholarly => "scholarly",
            Self::Epidemic => "epidemic",
            Self::Earthquakes => "earthquakes",
            Self::AnnualIndicator => "annual-indicator",
        }
    }

    /// Granularities this provider's upstream can natively serve.
    ///
    /// Year-bucketed upstreams (scholarly works, annual indicators) only
    /// ever emit monthly-keyed series; everything else can do both.
    #[must_use]
    pub const fn granularity_support(self) -> GranularitySupport {
        match self {
            Self::Scholarly | Self::AnnualIndicator => GranularitySupport::MONTHLY_ONLY,
            _ => GranularitySupport::BOTH,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reported COVID-19 timeline field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpidemicField {
    /// Cumulative confirmed case counter.
    Cases,
    /// Cumulative death counter.
    Deaths,
}

impl EpidemicField {
    /// Field name as it appears in the upstream timeline payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Deaths => "deaths",
        }
    }
}

impl fmt::Display for EpidemicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable descriptor of one requested data series: which provider to ask
/// and the parameters it needs. Two specs are equal when all their fields
/// are equal; identity plays no role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesSpec {
    /// Monthly or daily view counts for one Wikipedia article.
    Pageviews {
        /// Article title, with spaces (e.g. "Nicolas Cage").
        article: String,
    },
    /// One daily weather variable at a fixed coordinate.
    Weather {
        /// Human-readable label (e.g. "London precipitation").
        label: String,
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
        /// Open-Meteo daily variable name (e.g. "precipitation_sum").
        variable: String,
    },
    /// Daily exchange rate of one currency pair.
    ExchangeRate {
        /// Base currency code (e.g. "USD").
        base: String,
        /// Quote currency code (e.g. "EUR").
        symbol: String,
    },
    /// Daily market price of one cryptocurrency.
    CoinMarket {
        /// Upstream coin identifier (e.g. "bitcoin").
        coin_id: String,
        /// Quote currency code (e.g. "usd").
        vs_currency: String,
        /// Display name; falls back to `coin_id` when empty.
        coin_name: String,
    },
    /// Publication counts per year for a free-text scholarly search.
    Scholarly {
        /// Search query (e.g. "kombucha").
        query: String,
    },
    /// Daily increments derived from a cumulative epidemiological counter.
    Epidemic {
        /// Country name as the upstream spells it (e.g. "USA").
        country: String,
        /// Which cumulative timeline field to difference.
        field: EpidemicField,
    },
    /// Daily counts of seismic events at or above a magnitude threshold.
    Earthquakes {
        /// Minimum event magnitude (e.g. 5.0).
        min_magnitude: f64,
    },
    /// One annual development indicator for one country.
    AnnualIndicator {
        /// ISO-3 country code (e.g. "USA").
        country: String,
        /// Indicator code (e.g. "SP.POP.TOTL").
        indicator: String,
        /// Human-readable label (e.g. "USA population").
        label: String,
    },
}

impl SeriesSpec {
    /// Pageviews spec for an article title.
    pub fn pageviews(article: impl Into<String>) -> Self {
        Self::Pageviews {
            article: article.into(),
        }
    }

    /// Weather spec for a labeled coordinate and daily variable.
    pub fn weather(
        label: impl Into<String>,
        latitude: f64,
        longitude: f64,
        variable: impl Into<String>,
    ) -> Self {
        Self::Weather {
            label: label.into(),
            latitude,
            longitude,
            variable: variable.into(),
        }
    }

    /// Exchange-rate spec for a currency pair.
    pub fn exchange_rate(base: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::ExchangeRate {
            base: base.into(),
            symbol: symbol.into(),
        }
    }

    /// Coin-market spec for a coin priced in a quote currency.
    pub fn coin_market(
        coin_id: impl Into<String>,
        vs_currency: impl Into<String>,
        coin_name: impl Into<String>,
    ) -> Self {
        Self::CoinMarket {
            coin_id: coin_id.into(),
            vs_currency: vs_currency.into(),
            coin_name: coin_name.into(),
        }
    }

    /// Scholarly spec for a free-text search query.
    pub fn scholarly(query: impl Into<String>) -> Self {
        Self::Scholarly {
            query: query.into(),
        }
    }

    /// Epidemic spec for a country and cumulative field.
    pub fn epidemic(country: impl Into<String>, field: EpidemicField) -> Self {
        Self::Epidemic {
            country: country.into(),
            field,
        }
    }

    /// Earthquake spec for a minimum magnitude.
    #[must_use]
    pub const fn earthquakes(min_magnitude: f64) -> Self {
        Self::Earthquakes { min_magnitude }
    }

    /// Annual-indicator spec for a country, indicator code, and label.
    pub fn annual_indicator(
        country: impl Into<String>,
        indicator: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self::AnnualIndicator {
            country: country.into(),
            indicator: indicator.into(),
            label: label.into(),
        }
    }

    /// Which provider serves this spec.
    #[must_use]
    pub const fn provider(&self) -> ProviderId {
        match self {
            Self::Pageviews { .. } => ProviderId::Pageviews,
            Self::Weather { .. } => ProviderId::Weather,
            Self::ExchangeRate { .. } => ProviderId::ExchangeRate,
            Self::CoinMarket { .. } => ProviderId::CoinMarket,
            Self::Scholarly { .. } => ProviderId::Scholarly,
            Self::Epidemic { .. } => ProviderId::Epidemic,
            Self::Earthquakes { .. } => ProviderId::Earthquakes,
            Self::AnnualIndicator { .. } => ProviderId::AnnualIndicator,
        }
    }

    /// Granularities the serving provider supports.
    #[must_use]
    pub const fn granularity_support(&self) -> GranularitySupport {
        self.provider().granularity_support()
    }

    /// Short display label for cards, logs, and pair dedup.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Pageviews { article } => article.clone(),
            Self::Weather { label, .. } => label.clone(),
            Self::ExchangeRate { base, symbol } => format!("{base}\u{2192}{symbol} FX"),
            Self::CoinMarket {
                coin_id,
                vs_currency,
                coin_name,
            } => {
                let name = if coin_name.is_empty() {
                    coin_id
                } else {
                    coin_name
                };
                format!("{name} price ({})", vs_currency.to_uppercase())
            }
            Self::Scholarly { query } => format!("Publications mentioning {query}"),
            Self::Epidemic { country, field } => format!("COVID-19 {field} ({country})"),
            Self::Earthquakes { min_magnitude } => {
                format!("Earthquakes \u{2265}{min_magnitude}")
            }
            Self::AnnualIndicator {
                country,
                indicator,
                label,
            } => {
                if label.is_empty() {
                    format!("World Bank {indicator} ({country})")
                } else {
                    label.clone()
                }
            }
        }
    }

    /// External "more info" link for this series, suitable for a card footer.
    #[must_use]
    pub fn source_url(&self) -> String {
        match self {
            Self::Pageviews { article } => {
                url_with_segments("https://en.wikipedia.org/wiki/", &[&article.replace(' ', "_")])
            }
            Self::Weather { .. } => "https://open-meteo.com/en/docs".to_string(),
            Self::ExchangeRate { .. } => "https://exchangerate.host/#/".to_string(),
            Self::CoinMarket { coin_id, .. } => {
                url_with_segments("https://www.coingecko.com/en/coins/", &[coin_id])
            }
            Self::Scholarly { query } => {
                url_with_params("https://api.openalex.org/works", &[("search", query)])
            }
            Self::Epidemic { country, .. } => {
                let base = url_with_segments("https://disease.sh/v3/covid-19/historical/", &[
                    country,
                ]);
                format!("{base}?lastdays=all")
            }
            Self::Earthquakes { .. } => "https://earthquake.usgs.gov/fdsnws/event/1/".to_string(),
            Self::AnnualIndicator {
                country, indicator, ..
            } => {
                let base =
                    url_with_segments("https://data.worldbank.org/indicator/", &[indicator]);
                format!("{base}?locations={country}")
            }
        }
    }
}

fn url_with_segments(base: &'static str, segments: &[&str]) -> String {
    let Ok(mut url) = Url::parse(base) else {
        return base.to_string();
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    String::from(url)
}

fn url_with_params(base: &'static str, params: &[(&str, &str)]) -> String {
    Url::parse_with_params(base, params).map_or_else(|_| base.to_string(), String::from)
}

/// Provider-agnostic normalized series: a time-key-to-value mapping at a
/// single granularity. Keys are unique; ordering is imposed later by the
/// aligner. Constructed once per fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    granularity: Granularity,
    points: HashMap<String, f64>,
}

impl Series {
    /// Empty series at the given granularity.
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            points: HashMap::new(),
        }
    }

    /// Build a series from `(key, value)` pairs. Later duplicates win.
    pub fn from_points<I>(granularity: Granularity, points: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            granularity,
            points: points.into_iter().collect(),
        }
    }

    /// Insert or overwrite one observation.
    pub fn insert(&mut self, key: String, value: f64) {
        self.points.insert(key, value);
    }

    /// Add `delta` to the value at `key`, starting from zero. Used for
    /// point-event providers that count occurrences per key.
    pub fn add(&mut self, key: String, delta: f64) {
        *self.points.entry(key).or_insert(0.0) += delta;
    }

    /// Value at a time key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.points.get(key).copied()
    }

    /// Whether the series has an observation at `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.points.contains_key(key)
    }

    /// Key resolution of this series.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no observations. An empty fetch result is
    /// valid; insufficiency is detected by the aligner, not here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }
}

/// Requested time window and resolution for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// Anchor date standing in for "now"; ranges never include the month
    /// containing this date.
    pub today: NaiveDate,
    /// Lookback in whole months. Callers clamp to
    /// [`MIN_MONTHS_BACK`]..=[`MAX_MONTHS_BACK`] before constructing.
    pub months_back: u32,
    /// Requested (already downgraded) key resolution.
    pub granularity: Granularity,
}

impl FetchWindow {
    /// Window anchored at the current UTC date.
    #[must_use]
    pub fn new(months_back: u32, granularity: Granularity) -> Self {
        Self::anchored(Utc::now().date_naive(), months_back, granularity)
    }

    /// Window with an explicit anchor date, for deterministic tests.
    #[must_use]
    pub const fn anchored(today: NaiveDate, months_back: u32, granularity: Granularity) -> Self {
        Self {
            today,
            months_back,
            granularity,
        }
    }
}

/// Two value sequences restricted to shared time keys, chronologically
/// sorted. Produced by the aligner, consumed by the statistics engine and
/// the presentation layer; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// Sorted ascending keys present in both input series.
    pub keys: Vec<String>,
    /// Values of series A at `keys`, index-parallel.
    pub xs: Vec<f64>,
    /// Values of series B at `keys`, index-parallel.
    pub ys: Vec<f64>,
}

impl AlignedPair {
    /// Number of aligned samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys aligned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Ordinary-least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
}
