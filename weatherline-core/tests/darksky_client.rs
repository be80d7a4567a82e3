//! Integration tests for `DarkSkyClient` using wiremock HTTP mocks.

use weatherline_core::{
    DarkSkyClient, Error, ForecastApiError, ForecastResponse, ForecastSource, Language, UnitSystem,
    WeatherCondition,
};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORECAST_PATH: &str = "/forecast/test-token/35.6895,139.6917";

fn test_client(base_url: &str) -> DarkSkyClient {
    DarkSkyClient::with_base_url(base_url, "test-token", "35.6895", "139.6917")
        .expect("client construction should not fail")
}

fn sample_forecast() -> serde_json::Value {
    serde_json::json!({
        "latitude": 35.6895,
        "longitude": 139.6917,
        "timezone": "Asia/Tokyo",
        "hourly": {
            "summary": "Snow until this evening.",
            "icon": "snow",
            "data": [
                {
                    "time": 1514764800,
                    "summary": "Light Snow",
                    "icon": "snow",
                    "precipProbability": 0.76,
                    "precipAccumulation": 1.2,
                    "temperature": -0.4,
                    "apparentTemperature": -3.9
                }
            ]
        },
        "daily": {
            "summary": "Mixed precipitation throughout the week.",
            "icon": "sleet",
            "data": [
                {
                    "time": 1514732400,
                    "summary": "Snow in the morning.",
                    "icon": "snow",
                    "precipProbability": 0.8,
                    "precipAccumulation": 3.4,
                    "temperatureHigh": 2.1,
                    "temperatureHighTime": 1514782800,
                    "temperatureLow": -2.3,
                    "temperatureLowTime": 1514840400,
                    "apparentTemperatureHigh": -0.5,
                    "apparentTemperatureHighTime": 1514782800,
                    "apparentTemperatureLow": -6.0,
                    "apparentTemperatureLowTime": 1514840400
                }
            ]
        }
    })
}

#[tokio::test]
async fn get_returns_parsed_forecast() {
    let server = MockServer::start().await;
    let body = sample_forecast();

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("lang", "ja"))
        .and(query_param("units", "si"))
        .and(query_param("exclude", "currently,minutely,alerts,flags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = test_client(&server.uri())
        .get(Language::Japanese, UnitSystem::Si)
        .await
        .expect("should parse forecast");

    let direct = ForecastResponse::from_json(&body.to_string()).expect("fixture is valid");
    assert_eq!(forecast, direct);
    assert_eq!(forecast.timezone.name(), "Asia/Tokyo");
    assert_eq!(forecast.daily.condition, WeatherCondition::Sleet);
    assert_eq!(forecast.hourly.data[0].condition, WeatherCondition::Snow);
}

#[tokio::test]
async fn unknown_lang_and_units_are_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param_is_missing("lang"))
        .and(query_param_is_missing("units"))
        .and(query_param("exclude", "currently,minutely,alerts,flags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .get(Language::Unknown, UnitSystem::Unknown)
        .await
        .expect("should parse forecast");
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"timezone\":"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get(Language::English, UnitSystem::Imperial)
        .await
        .expect_err("truncated JSON must fail");

    assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn bad_request_returns_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({"code": 400, "error": "x"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get(Language::English, UnitSystem::Si)
        .await
        .expect_err("400 must fail");

    match err {
        Error::Forecast(ForecastApiError { code, message }) => {
            assert_eq!(code, 400);
            assert_eq!(message, "x");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bad_request_with_unreadable_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get(Language::English, UnitSystem::Si)
        .await
        .expect_err("400 must fail");

    assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn other_status_carries_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("\"boom\""))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get(Language::English, UnitSystem::Si)
        .await
        .expect_err("500 must fail");

    match err {
        Error::Forecast(ForecastApiError { code, message }) => {
            assert_eq!(code, 500);
            assert_eq!(message, "\"boom\"");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let uri = closed_port_uri();

    let err = test_client(&uri)
        .get(Language::English, UnitSystem::Si)
        .await
        .expect_err("closed port must fail");

    assert!(matches!(err, Error::Transport(_)), "unexpected error: {err:?}");
}

/// A local URI nothing is listening on.
fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind an ephemeral port");
    let port = listener.local_addr().expect("bound address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
