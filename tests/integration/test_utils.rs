use std::time::Duration;

use serde_json::{json, Value};
use stock_analyzer::services::YahooMarketDataProvider;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// First bar at 2024-01-02 00:00:00 UTC.
pub const START_TIMESTAMP: i64 = 1_704_153_600;
const DAY: i64 = 86_400;

/// Chart payload with one bar per close, one day apart.
pub fn chart_body(closes: &[Option<f64>]) -> Value {
    let timestamps: Vec<i64> = (0..closes.len() as i64)
        .map(|i| START_TIMESTAMP + i * DAY)
        .collect();
    chart_body_with_timestamps(&timestamps, closes)
}

pub fn chart_body_with_timestamps(timestamps: &[i64], closes: &[Option<f64>]) -> Value {
    let offset = |delta: f64| -> Vec<Option<f64>> {
        closes.iter().map(|c| c.map(|v| v + delta)).collect()
    };
    json!({
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "regularMarketPrice": closes.last().copied().flatten()},
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": closes,
                        "high": offset(1.0),
                        "low": offset(-1.0),
                        "close": closes,
                        "volume": closes.iter().map(|c| c.map(|_| 1_000_000)).collect::<Vec<_>>()
                    }]
                }
            }],
            "error": null
        }
    })
}

pub fn not_found_body() -> Value {
    json!({
        "chart": {
            "result": null,
            "error": {
                "code": "Not Found",
                "description": "No data found, symbol may be delisted"
            }
        }
    })
}

pub fn rising_closes(count: usize, base: f64) -> Vec<Option<f64>> {
    (0..count).map(|i| Some(base + i as f64)).collect()
}

pub async fn mock_chart(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", symbol)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_not_found(server: &MockServer, symbol: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", symbol)))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(server)
        .await;
}

pub fn provider_for(server: &MockServer) -> YahooMarketDataProvider {
    YahooMarketDataProvider::with_client(server.uri(), reqwest::Client::new())
        .with_min_retry_delay(Duration::from_millis(1))
}
