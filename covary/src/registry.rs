use std::sync::Arc;

use covary_core::{ProviderAdapter, ProviderId};
use covary_providers::{
    AnnualIndicatorAdapter, CoinMarketAdapter, EarthquakesAdapter, EpidemicAdapter,
    ExchangeRateAdapter, HttpClient, PageviewsAdapter, ScholarlyAdapter, WeatherAdapter,
};

/// One adapter per provider, shared by the whole engine.
///
/// Every provider always has an adapter; there is no "unknown provider"
/// state to handle at dispatch time. [`with_adapter`](Self::with_adapter)
/// swaps a single slot, which is how tests substitute scripted adapters.
pub struct ProviderSet {
    pageviews: Arc<dyn ProviderAdapter>,
    weather: Arc<dyn ProviderAdapter>,
    exchange_rate: Arc<dyn ProviderAdapter>,
    coin_market: Arc<dyn ProviderAdapter>,
    scholarly: Arc<dyn ProviderAdapter>,
    epidemic: Arc<dyn ProviderAdapter>,
    earthquakes: Arc<dyn ProviderAdapter>,
    annual_indicator: Arc<dyn ProviderAdapter>,
}

impl ProviderSet {
    /// All eight production adapters behind one shared HTTP client.
    #[must_use]
    pub fn defaults() -> Self {
        let http = HttpClient::new();
        Self {
            pageviews: Arc::new(PageviewsAdapter::new(http.clone())),
            weather: Arc::new(WeatherAdapter::new(http.clone())),
            exchange_rate: Arc::new(ExchangeRateAdapter::new(http.clone())),
            coin_market: Arc::new(CoinMarketAdapter::new(http.clone())),
            scholarly: Arc::new(ScholarlyAdapter::new(http.clone())),
            epidemic: Arc::new(EpidemicAdapter::new(http.clone())),
            earthquakes: Arc::new(EarthquakesAdapter::new(http.clone())),
            annual_indicator: Arc::new(AnnualIndicatorAdapter::new(http)),
        }
    }

    /// Replace the slot matching the adapter's own [`ProviderAdapter::id`].
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        let slot = match adapter.id() {
            ProviderId::Pageviews => &mut self.pageviews,
            ProviderId::Weather => &mut self.weather,
            ProviderId::ExchangeRate => &mut self.exchange_rate,
            ProviderId::CoinMarket => &mut self.coin_market,
            ProviderId::Scholarly => &mut self.scholarly,
            ProviderId::Epidemic => &mut self.epidemic,
            ProviderId::Earthquakes => &mut self.earthquakes,
            ProviderId::AnnualIndicator => &mut self.annual_indicator,
        };
        *slot = adapter;
        self
    }

    /// The adapter serving a given provider.
    #[must_use]
    pub fn adapter_for(&self, id: ProviderId) -> Arc<dyn ProviderAdapter> {
        match id {
            ProviderId::Pageviews => Arc::clone(&self.pageviews),
            ProviderId::Weather => Arc::clone(&self.weather),
            ProviderId::ExchangeRate => Arc::clone(&self.exchange_rate),
            ProviderId::CoinMarket => Arc::clone(&self.coin_market),
            ProviderId::Scholarly => Arc::clone(&self.scholarly),
            ProviderId::Epidemic => Arc::clone(&self.epidemic),
            ProviderId::Earthquakes => Arc::clone(&self.earthquakes),
            ProviderId::AnnualIndicator => Arc::clone(&self.annual_indicator),
        }
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::defaults()
    }
}
