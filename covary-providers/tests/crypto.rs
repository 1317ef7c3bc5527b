use chrono::NaiveDate;
use covary_core::{FetchWindow, Granularity, ProviderAdapter, SeriesSpec};
use covary_providers::{CoinMarketAdapter, HttpClient};
use httpmock::prelude::*;
use serde_json::json;

fn window(granularity: Granularity) -> FetchWindow {
    FetchWindow::anchored(
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        6,
        granularity,
    )
}

fn spec() -> SeriesSpec {
    SeriesSpec::coin_market("dogecoin", "usd", "Dogecoin")
}

// 2023-09-01T00:00:00Z and friends, in millisecond epochs.
const SEP_1: f64 = 1_693_526_400_000.0;
const SEP_1_NOON: f64 = 1_693_569_600_000.0;
const SEP_2: f64 = 1_693_612_800_000.0;

#[tokio::test]
async fn daily_fetch_keys_prices_by_utc_day() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v3/coins/dogecoin/market_chart")
                .query_param("vs_currency", "usd")
                .query_param("days", "186");
            then.status(200).json_body(json!({
                "prices": [[SEP_1, 0.063], [SEP_2, 0.065]]
            }));
        })
        .await;

    let adapter = CoinMarketAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter
        .fetch(&spec(), &window(Granularity::Daily))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(series.get("20230901"), Some(0.063));
    assert_eq!(series.get("20230902"), Some(0.065));
}

#[tokio::test]
async fn intraday_samples_collapse_to_latest_per_day() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({
                "prices": [[SEP_1, 0.060], [SEP_1_NOON, 0.064]]
            }));
        })
        .await;

    let adapter = CoinMarketAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter
        .fetch(&spec(), &window(Granularity::Daily))
        .await
        .unwrap();

    assert_eq!(series.get("20230901"), Some(0.064));
    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn monthly_fetch_averages_all_samples_in_month() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({
                "prices": [[SEP_1, 0.06], [SEP_2, 0.08]]
            }));
        })
        .await;

    let adapter = CoinMarketAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter
        .fetch(&spec(), &window(Granularity::Monthly))
        .await
        .unwrap();

    let value = series.get("202309").unwrap();
    assert!((value - 0.07).abs() < 1e-12);
}
