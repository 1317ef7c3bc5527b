use chrono::NaiveDate;
use covary_core::{FetchWindow, Granularity, ProviderAdapter, SeriesSpec};
use covary_providers::{AnnualIndicatorAdapter, HttpClient};
use httpmock::prelude::*;
use serde_json::json;

fn window() -> FetchWindow {
    FetchWindow::anchored(
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        6,
        Granularity::Monthly,
    )
}

fn spec() -> SeriesSpec {
    SeriesSpec::annual_indicator("ISL", "SP.POP.TOTL", "Population of Iceland")
}

#[tokio::test]
async fn annual_rows_become_synthetic_january_keys() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/country/ISL/indicator/SP.POP.TOTL")
                .query_param("format", "json")
                .query_param("per_page", "2000");
            then.status(200).json_body(json!([
                { "page": 1, "pages": 1 },
                [
                    { "date": "2022", "value": 376_248.0 },
                    { "date": "2021", "value": 372_520.0 },
                    { "date": "2020", "value": null }
                ]
            ]));
        })
        .await;

    let adapter = AnnualIndicatorAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter.fetch(&spec(), &window()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(series.granularity(), Granularity::Monthly);
    assert_eq!(series.get("202201"), Some(376_248.0));
    assert_eq!(series.get("202101"), Some(372_520.0));
    // Null values are dropped, not zeroed.
    assert_eq!(series.len(), 2);
}

#[tokio::test]
async fn null_row_block_yields_empty_series() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .json_body(json!([{ "message": "no data" }, null]));
        })
        .await;

    let adapter = AnnualIndicatorAdapter::with_base_url(HttpClient::new(), server.base_url());
    let series = adapter.fetch(&spec(), &window()).await.unwrap();

    assert!(series.is_empty());
}
