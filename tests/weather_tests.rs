mod common;

use std::collections::HashMap;

use ap_faas::api::respond;
use ap_faas::core::config::WeatherConfig;
use ap_faas::functions::WeatherFunction;
use common::{CannedServer, event};
use serde_json::{Value, json};

fn weather(api_url: &str) -> WeatherFunction {
    let config = WeatherConfig {
        api_url: api_url.to_string(),
        api_key: "secret-key".to_string(),
        expiration_time: None,
    };
    WeatherFunction::new(config, reqwest::Client::new())
}

fn query_of(request: &reqwest::Request) -> HashMap<String, String> {
    request.url().query_pairs().into_owned().collect()
}

#[test]
fn test_units_default_to_imperial() {
    let request = weather("https://api.example.com/data/2.5/weather")
        .request("London", None)
        .unwrap();
    let query = query_of(&request);

    assert_eq!(query.get("q").map(String::as_str), Some("London"));
    assert_eq!(query.get("units").map(String::as_str), Some("imperial"));
    assert_eq!(query.get("appid").map(String::as_str), Some("secret-key"));
    assert_eq!(request.url().path(), "/data/2.5/weather");
}

#[test]
fn test_units_forwarded_unchanged() {
    let request = weather("https://api.example.com/weather")
        .request("London", Some("metric"))
        .unwrap();
    assert_eq!(
        query_of(&request).get("units").map(String::as_str),
        Some("metric")
    );
}

#[test]
fn test_city_is_percent_decoded() {
    let request = weather("https://api.example.com/weather")
        .request("New%20York", None)
        .unwrap();
    assert_eq!(
        query_of(&request).get("q").map(String::as_str),
        Some("New York")
    );
}

#[test]
fn test_malformed_city_is_bad_request() {
    let function = weather("https://api.example.com/weather");
    for city in ["%FF%FE", "Lon%zzdon", "London%A", "London%"] {
        let err = function.request(city, None).unwrap_err();
        assert!(
            matches!(err, ap_faas::FunctionError::BadRequest(_)),
            "{city} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_extra_segments_rejected_before_any_call() {
    let function = weather("http://127.0.0.1:9/weather");
    let response = respond(&function, &event("/weather/London/today", json!(null)), "req-1").await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, "Inconsistent parameters");
    assert_eq!(response.header("Request-Id"), None);
}

#[tokio::test]
async fn test_unreachable_api_is_400_without_leaking_key() {
    let function = weather("http://127.0.0.1:9/weather");
    let response = respond(&function, &event("/weather/London", json!(null)), "req-1").await;

    assert_eq!(response.status_code, 400);
    assert!(!response.body.is_empty());
    assert!(!response.body.contains("secret-key"));
    assert_eq!(response.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_weather_passes_upstream_json_through_with_metadata() {
    let upstream = r#"{"name":"London","main":{"temp":51.3},"weather":[{"main":"Clouds"}]}"#;
    let server = CannedServer::start("200 OK", upstream).await;
    let config = WeatherConfig {
        api_url: format!("{}/data/2.5/weather", server.base_url),
        api_key: "secret-key".to_string(),
        expiration_time: Some("600".to_string()),
    };
    let function = WeatherFunction::new(config, reqwest::Client::new());

    let response = respond(&function, &event("/weather/London", json!(null)), "req-42").await;

    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body, serde_json::from_str::<Value>(upstream).unwrap());
    assert_eq!(response.header("Request-Id"), Some("req-42"));
    assert_eq!(response.header("Expiration-Time"), Some("600"));
    assert!(response.header("Execution-Time").is_some());
    assert_eq!(response.header("Content-Type"), Some("application/json"));

    let line = server.request_line().await;
    assert!(line.starts_with("GET /data/2.5/weather?"), "{line}");
    assert!(line.contains("q=London"), "{line}");
    assert!(line.contains("units=imperial"), "{line}");
    assert!(line.contains("appid=secret-key"), "{line}");
}

#[tokio::test]
async fn test_weather_upstream_error_status_is_400() {
    let upstream = r#"{"cod":"404","message":"city not found"}"#;
    let server = CannedServer::start("404 Not Found", upstream).await;
    let function = weather(&format!("{}/weather", server.base_url));

    let response = respond(
        &function,
        &event("/weather/Atlantis", json!({ "units": "metric" })),
        "req-1",
    )
    .await;

    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("404"), "body: {}", response.body);
    assert!(!response.body.contains("secret-key"));
    assert_eq!(response.header("Request-Id"), None);

    let line = server.request_line().await;
    assert!(line.contains("units=metric"), "{line}");
}
