use covary_core::{EpidemicField, SeriesSpec};

/// Built-in pool of deliberately unrelated series spanning every provider.
///
/// Dashboards draw random pairs from this list; callers with their own
/// ideas pass a custom pool to the builder instead.
#[must_use]
pub fn default_pool() -> Vec<SeriesSpec> {
    vec![
        // Wikipedia articles
        SeriesSpec::pageviews("Nicolas Cage"),
        SeriesSpec::pageviews("Beekeeping"),
        SeriesSpec::pageviews("Quantum entanglement"),
        SeriesSpec::pageviews("Banana bread"),
        SeriesSpec::pageviews("Cryptozoology"),
        SeriesSpec::pageviews("Pineapple"),
        SeriesSpec::pageviews("Corgi"),
        SeriesSpec::pageviews("Blockchain"),
        SeriesSpec::pageviews("Astrology"),
        SeriesSpec::pageviews("Loch Ness Monster"),
        SeriesSpec::pageviews("Sourdough"),
        SeriesSpec::pageviews("Kombucha"),
        SeriesSpec::pageviews("Crop circle"),
        SeriesSpec::pageviews("Toilet paper"),
        SeriesSpec::pageviews("Flat Earth"),
        SeriesSpec::pageviews("Trombone"),
        SeriesSpec::pageviews("Llama"),
        SeriesSpec::pageviews("Minecraft"),
        SeriesSpec::pageviews("Kale"),
        SeriesSpec::pageviews("Zombie"),
        // Weather stations and metrics
        SeriesSpec::weather("London precipitation", 51.5074, -0.1278, "precipitation_sum"),
        SeriesSpec::weather("Seattle precipitation", 47.6062, -122.3321, "precipitation_sum"),
        SeriesSpec::weather("Phoenix max temp", 33.4484, -112.0740, "temperature_2m_max"),
        SeriesSpec::weather("Reykjavik max wind", 64.1466, -21.9426, "windspeed_10m_max"),
        SeriesSpec::weather("Singapore precipitation", 1.3521, 103.8198, "precipitation_sum"),
        SeriesSpec::weather("Cairo max temp", 30.0444, 31.2357, "temperature_2m_max"),
        SeriesSpec::weather("Tokyo precipitation", 35.6762, 139.6503, "precipitation_sum"),
        SeriesSpec::weather("Sydney max wind", -33.8688, 151.2093, "windspeed_10m_max"),
        // Currency pairs
        SeriesSpec::exchange_rate("USD", "EUR"),
        SeriesSpec::exchange_rate("USD", "JPY"),
        SeriesSpec::exchange_rate("GBP", "USD"),
        SeriesSpec::exchange_rate("EUR", "CHF"),
        SeriesSpec::exchange_rate("AUD", "USD"),
        // Crypto prices
        SeriesSpec::coin_market("bitcoin", "usd", "Bitcoin"),
        SeriesSpec::coin_market("ethereum", "usd", "Ethereum"),
        SeriesSpec::coin_market("dogecoin", "usd", "Dogecoin"),
        SeriesSpec::coin_market("shiba-inu", "usd", "Shiba Inu"),
        SeriesSpec::coin_market("litecoin", "usd", "Litecoin"),
        // Scholarly topics
        SeriesSpec::scholarly("zombie"),
        SeriesSpec::scholarly("kombucha"),
        SeriesSpec::scholarly("banana bread"),
        SeriesSpec::scholarly("ufology"),
        SeriesSpec::scholarly("sourdough"),
        SeriesSpec::scholarly("astrology"),
        SeriesSpec::scholarly("quantum entanglement"),
        // COVID-19 timelines
        SeriesSpec::epidemic("USA", EpidemicField::Cases),
        SeriesSpec::epidemic("United Kingdom", EpidemicField::Cases),
        SeriesSpec::epidemic("India", EpidemicField::Cases),
        SeriesSpec::epidemic("Japan", EpidemicField::Cases),
        SeriesSpec::epidemic("USA", EpidemicField::Deaths),
        SeriesSpec::epidemic("United Kingdom", EpidemicField::Deaths),
        // Earthquake magnitude thresholds
        SeriesSpec::earthquakes(4.5),
        SeriesSpec::earthquakes(5.0),
        SeriesSpec::earthquakes(6.0),
        // World Bank annual indicators
        SeriesSpec::annual_indicator("USA", "SP.POP.TOTL", "USA population"),
        SeriesSpec::annual_indicator("JPN", "SP.POP.TOTL", "Japan population"),
        SeriesSpec::annual_indicator("IND", "SP.POP.TOTL", "India population"),
        SeriesSpec::annual_indicator("USA", "NY.GDP.PCAP.CD", "USA GDP per capita (current US$)"),
        SeriesSpec::annual_indicator("USA", "IT.NET.USER.ZS", "USA Internet users (%)"),
        SeriesSpec::annual_indicator("AUS", "SP.POP.TOTL", "Australia population"),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use covary_core::ProviderId;

    use super::*;

    #[test]
    fn pool_labels_are_unique() {
        let pool = default_pool();
        let labels: HashSet<String> = pool.iter().map(SeriesSpec::label).collect();
        assert_eq!(labels.len(), pool.len());
    }

    #[test]
    fn pool_covers_every_provider() {
        let providers: HashSet<ProviderId> =
            default_pool().iter().map(SeriesSpec::provider).collect();
        assert_eq!(providers.len(), 8);
    }
}
