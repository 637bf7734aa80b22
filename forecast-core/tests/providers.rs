//! HTTP collaborators against a mock server.

use forecast_core::{
    Coordinates, PlaceSearch, WeatherSource, normalize,
    provider::{openmeteo::OpenMeteo, restcountries::RestCountries},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn country(name: &str, latlng: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "name": { "common": name, "official": format!("Republic of {name}") },
        "capital": ["Capital City"],
        "population": 1000,
        "region": "Europe",
        "flags": { "svg": format!("https://flags.example/{name}.svg") },
        "latlng": latlng
    })
}

#[tokio::test]
async fn countries_search_maps_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/name/france"))
        .and(query_param("fields", "name,capital,population,region,flags,latlng"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            country("French Republic", serde_json::json!([46.0, 2.0])),
            country("France", serde_json::json!([])),
        ])))
        .mount(&mock_server)
        .await;

    let provider = RestCountries::new(format!("{}/v3.1", mock_server.uri()));
    let places = provider.search("france").await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].common_name, "French Republic");
    assert_eq!(places[0].coordinates, Some(Coordinates::new(46.0, 2.0)));
    assert_eq!(places[0].capital.as_deref(), Some("Capital City"));
    assert_eq!(places[0].population, Some(1000));
    assert_eq!(places[1].coordinates, None);
    assert_eq!(
        places[1].flag_image_url.as_deref(),
        Some("https://flags.example/France.svg")
    );
}

#[tokio::test]
async fn countries_search_survives_null_capital_and_latlng() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/name/nor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "name": { "common": "Bouvet Island" },
                "capital": null,
                "population": 0,
                "region": "Antarctic",
                "flags": { "png": "https://flags.example/bv.png" },
                "latlng": null
            },
            country("Norway", serde_json::json!([62.0, 10.0])),
        ])))
        .mount(&mock_server)
        .await;

    let provider = RestCountries::new(format!("{}/v3.1", mock_server.uri()));
    let places = provider.search("nor").await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].common_name, "Bouvet Island");
    assert_eq!(places[0].capital, None);
    assert_eq!(places[0].coordinates, None);
    assert_eq!(places[1].common_name, "Norway");
    assert_eq!(places[1].coordinates, Some(Coordinates::new(62.0, 10.0)));
}

#[tokio::test]
async fn countries_not_found_is_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/name/xyzzy"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "status": 404, "message": "Not Found"
        })))
        .mount(&mock_server)
        .await;

    let provider = RestCountries::new(format!("{}/v3.1", mock_server.uri()));
    let places = provider.search("xyzzy").await.unwrap();

    assert!(places.is_empty());
}

#[tokio::test]
async fn countries_server_error_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let provider = RestCountries::new(mock_server.uri());
    let err = provider.search("peru").await.unwrap_err();

    assert!(err.to_string().contains("status 500"));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn open_meteo_requests_daily_series() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "46.5"))
        .and(query_param("longitude", "2"))
        .and(query_param("current_weather", "true"))
        .and(query_param("hourly", "precipitation"))
        .and(query_param(
            "daily",
            "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": { "temperature": 18.2, "windspeed": 7.0, "time": "2024-07-01T10:00" },
            "hourly": { "time": ["2024-07-01T10:00"], "precipitation": [0.0] },
            "daily": {
                "time": ["2024-07-01", "2024-07-02"],
                "temperature_2m_max": [21.0, 23.0],
                "temperature_2m_min": [11.0, 12.0],
                "precipitation_sum": [0.0, 3.0]
            }
        })))
        .mount(&mock_server)
        .await;

    let provider = OpenMeteo::new(mock_server.uri());
    let payload = provider.forecast(Coordinates::new(46.5, 2.0)).await.unwrap();
    let snapshot = normalize(&payload).unwrap();

    assert_eq!(snapshot.days(), 2);
    assert_eq!(snapshot.current_precipitation_mm, Some(0.0));
    assert_eq!(snapshot.daily_precipitation_mm, vec![Some(0.0), Some(3.0)]);
}

#[tokio::test]
async fn open_meteo_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true, "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&mock_server)
        .await;

    let provider = OpenMeteo::new(format!("{}/", mock_server.uri()));
    let err = provider.forecast(Coordinates::new(123.0, 0.0)).await.unwrap_err();

    assert!(err.to_string().contains("status 400"));
}
