use chrono::NaiveDate;
use covary_core::{FetchWindow, Granularity, ProviderAdapter, SeriesSpec};
use covary_providers::{EarthquakesAdapter, HttpClient};
use httpmock::prelude::*;
use serde_json::json;

fn window(granularity: Granularity) -> FetchWindow {
    FetchWindow::anchored(
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        6,
        granularity,
    )
}

// 2023-09-01T00:00:00Z, 2023-09-01T12:00:00Z, 2023-10-02T00:00:00Z.
const SEP_1: i64 = 1_693_526_400_000;
const SEP_1_NOON: i64 = 1_693_569_600_000;
const OCT_2: i64 = 1_696_204_800_000;

#[tokio::test]
async fn daily_fetch_counts_events_per_day() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fdsnws/event/1/query")
                .query_param("format", "geojson")
                .query_param("starttime", "2023-09-01")
                .query_param("endtime", "2024-02-29")
                .query_param("minmagnitude", "5");
            then.status(200).json_body(json!({
                "features": [
                    { "properties": { "time": SEP_1 } },
                    { "properties": { "time": SEP_1_NOON } },
                    { "properties": { "time": OCT_2 } }
                ]
            }));
        })
        .await;

    let adapter = EarthquakesAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter
        .fetch(&SeriesSpec::earthquakes(5.0), &window(Granularity::Daily))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(series.get("20230901"), Some(2.0));
    assert_eq!(series.get("20231002"), Some(1.0));
}

#[tokio::test]
async fn monthly_fetch_sums_counts_per_month() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({
                "features": [
                    { "properties": { "time": SEP_1 } },
                    { "properties": { "time": SEP_1_NOON } },
                    { "properties": { "time": OCT_2 } },
                    { "properties": { "time": null } },
                    { "properties": null }
                ]
            }));
        })
        .await;

    let adapter = EarthquakesAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter
        .fetch(&SeriesSpec::earthquakes(5.0), &window(Granularity::Monthly))
        .await
        .unwrap();

    assert_eq!(series.get("202309"), Some(2.0));
    assert_eq!(series.get("202310"), Some(1.0));
    // Events without a timestamp are not counted anywhere.
    assert_eq!(series.len(), 2);
}

#[tokio::test]
async fn empty_catalog_yields_empty_series() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({ "features": [] }));
        })
        .await;

    let adapter = EarthquakesAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter
        .fetch(&SeriesSpec::earthquakes(6.5), &window(Granularity::Monthly))
        .await
        .unwrap();

    assert!(series.is_empty());
}
