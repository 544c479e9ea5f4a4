use std::time::Duration;

use citycast_core::{
    Coordinate, Endpoint, Geocoder, LookupError, OpenWeatherClient, WeatherFetcher, WeatherLookup,
    config::EndpointConfig, formatter,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "TEST_KEY";

fn client_for(server: &MockServer, timeout: Duration) -> OpenWeatherClient {
    let endpoints = EndpointConfig { geocoding_url: server.uri(), weather_url: server.uri() };
    OpenWeatherClient::new(KEY.to_string(), endpoints, timeout).expect("client should build")
}

fn client(server: &MockServer) -> OpenWeatherClient {
    client_for(server, Duration::from_secs(5))
}

fn weather_fixture() -> serde_json::Value {
    json!({
        "coord": {"lon": 81.6337, "lat": 21.2381},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {
            "temp": 300.12,
            "feels_like": 299.5,
            "temp_max": 301,
            "temp_min": 298,
            "humidity": 55,
            "pressure": 1013
        },
        "name": "Raipur"
    })
}

#[tokio::test]
async fn geocoder_sends_query_and_returns_first_coordinate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Raipur"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "Raipur",
                "local_names": {"hi": "रायपुर", "en": "Raipur"},
                "lat": 21.2380912,
                "lon": 81.6336993,
                "country": "IN",
                "state": "Chhattisgarh"
            },
            {"name": "Raipur", "lat": 23.0, "lon": 88.0, "country": "BD"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let coord = client(&server).resolve("Raipur").await.expect("resolve should succeed");

    assert_eq!(coord, Coordinate::new(21.2380912, 81.6336993));
    server.verify().await;
}

#[tokio::test]
async fn geocoder_candidate_keeps_local_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Munich", "local_names": {"de": "München"}, "lat": 48.13, "lon": 11.57,
             "country": "DE", "state": "Bavaria"}
        ])))
        .mount(&server)
        .await;

    let candidate = client(&server).resolve_candidate("Munich").await.unwrap();

    assert_eq!(candidate.local_names.get("de").map(String::as_str), Some("München"));
    assert_eq!(candidate.display_name(), "Munich, Bavaria, DE");
}

#[tokio::test]
async fn empty_geocoding_list_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client(&server).resolve("").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound { ref query } if query.is_empty()));
}

#[tokio::test]
async fn geocoding_garbage_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cod": "400"})))
        .mount(&server)
        .await;

    let err = client(&server).resolve("Raipur").await.unwrap_err();

    assert!(matches!(err, LookupError::Decode { endpoint: Endpoint::Geocoding, .. }));
}

#[tokio::test]
async fn fetcher_sends_five_decimal_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "21.23809"))
        .and(query_param("lon", "81.63370"))
        .and(query_param("appid", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let report = client(&server)
        .fetch_current(Coordinate::new(21.2380912, 81.6336993))
        .await
        .expect("fetch should succeed");

    assert_eq!(report.humidity, 55);
    assert_eq!(report.pressure, 1013);
    assert_eq!(report.description.as_deref(), Some("clear sky"));
    server.verify().await;
}

#[tokio::test]
async fn fixture_report_formats_values_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 300.12, "feels_like": 299.5, "temp_max": 301, "temp_min": 298,
                     "humidity": 55, "pressure": 1013},
            "weather": [{"description": "clear sky"}]
        })))
        .mount(&server)
        .await;

    let report = client(&server).fetch_current(Coordinate::new(0.0, 0.0)).await.unwrap();
    let text = formatter::format(&report);

    let expected = ["300.12", "299.50", "clear sky", "301.00", "298.00", "55", "1013"];
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), expected.len());
    for (line, value) in lines.iter().zip(expected) {
        assert!(line.contains(value), "expected {value:?} in {line:?}");
    }
}

#[tokio::test]
async fn non_success_status_is_not_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("{\"cod\":401, \"message\": \"Invalid API key\"}"),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch_current(Coordinate::new(1.0, 2.0)).await.unwrap_err();

    match err {
        LookupError::UpstreamStatus { endpoint, status, body } => {
            assert_eq!(endpoint, Endpoint::CurrentWeather);
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_with_garbage_body_is_still_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).resolve("Raipur").await.unwrap_err();

    assert!(matches!(err, LookupError::UpstreamStatus { endpoint: Endpoint::Geocoding, .. }));
}

#[tokio::test]
async fn malformed_weather_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"main\": {\"temp\": "))
        .mount(&server)
        .await;

    let err = client(&server).fetch_current(Coordinate::new(1.0, 2.0)).await.unwrap_err();

    assert!(matches!(err, LookupError::Decode { endpoint: Endpoint::CurrentWeather, .. }));
}

#[tokio::test]
async fn weather_with_missing_fields_is_decode_error_not_zeros() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"weather": []})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_current(Coordinate::new(1.0, 2.0)).await.unwrap_err();

    assert!(matches!(err, LookupError::Decode { .. }));
}

#[tokio::test]
async fn slow_upstream_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(weather_fixture())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    let err = client.fetch_current(Coordinate::new(1.0, 2.0)).await.unwrap_err();

    assert!(matches!(err, LookupError::Network { endpoint: Endpoint::CurrentWeather, .. }));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    // Bind then drop a listener to get a local port with nothing behind it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("ephemeral port")
        .port();
    let base = format!("http://127.0.0.1:{port}");
    let endpoints = EndpointConfig { geocoding_url: base.clone(), weather_url: base };
    let client = OpenWeatherClient::new(KEY.to_string(), endpoints, Duration::from_secs(5))
        .expect("client should build");

    let err = client.resolve("Raipur").await.unwrap_err();

    assert!(matches!(err, LookupError::Network { endpoint: Endpoint::Geocoding, .. }));
    assert_eq!(err.user_message(), "Could not fetch weather forecast");
}

#[tokio::test]
async fn failed_geocoding_never_calls_weather_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_fixture()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let lookup = WeatherLookup::new(Box::new(client.clone()), Box::new(client));

    let text = lookup.report("Raipur").await;

    assert!(text.contains("API key"));
    server.verify().await;
}

#[tokio::test]
async fn full_lookup_against_fixture_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Raipur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Raipur", "lat": 21.2380912, "lon": 81.6336993, "country": "IN",
             "state": "Chhattisgarh"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "21.23809"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let lookup = WeatherLookup::new(Box::new(client.clone()), Box::new(client));

    let text = lookup.report("Raipur").await;

    assert!(text.starts_with("Raipur, Chhattisgarh, IN\n"));
    assert!(text.contains("300.12 K"));
    assert!(text.contains("clear sky"));
    server.verify().await;
}
