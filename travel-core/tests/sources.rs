//! HTTP source clients against a mock server.

use reqwest::Client;
use travel_core::{
    Place, TravelError,
    source::{
        GeocodingSource, PlaceSearchSource, PoiSource, WeatherSource,
        nominatim::NominatimPlaceSearch,
        open_meteo::{OpenMeteoGeocoder, OpenMeteoWeather},
        wikipedia::WikipediaPoiSource,
    },
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paris() -> Place {
    Place {
        name: "Paris".to_string(),
        admin_region: "Île-de-France".to_string(),
        country: "France".to_string(),
        timezone: "Europe/Paris".to_string(),
        latitude: 48.85341,
        longitude: 2.3488,
        population: Some(2_138_551),
    }
}

fn wikipedia(server: &MockServer) -> WikipediaPoiSource {
    WikipediaPoiSource::new(
        Client::new(),
        format!("{}/w/api.php", server.uri()),
        "https://en.wikipedia.org/?curid=".to_string(),
    )
}

#[tokio::test]
async fn test_geocoder_maps_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "id": 2988507,
                    "name": "Paris",
                    "latitude": 48.85341,
                    "longitude": 2.3488,
                    "country": "France",
                    "admin1": "Île-de-France",
                    "timezone": "Europe/Paris",
                    "population": 2138551
                },
                {
                    "id": 4717560,
                    "name": "Paris",
                    "latitude": 33.66094,
                    "longitude": -95.55551,
                    "country": "United States",
                    "admin1": "Texas"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::new(Client::new(), format!("{}/v1/search", mock_server.uri()));
    let places = geocoder.search("Paris").await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0], paris());
    assert_eq!(places[1].timezone, "auto");
    assert_eq!(places[1].population, None);
}

#[tokio::test]
async fn test_geocoder_without_results_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.4 })),
        )
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::new(Client::new(), format!("{}/v1/search", mock_server.uri()));
    let places = geocoder.search("Nowhereville").await.unwrap();

    assert!(places.is_empty());
}

#[tokio::test]
async fn test_geocoder_server_error_is_upstream_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::new(Client::new(), format!("{}/v1/search", mock_server.uri()));
    let err = geocoder.search("Paris").await.unwrap_err();

    assert!(err.is_upstream());
    let msg = err.to_string();
    assert!(msg.contains("503"));
    assert!(msg.contains("maintenance"));
}

#[tokio::test]
async fn test_geocoder_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::new(Client::new(), format!("{}/v1/search", mock_server.uri()));
    let err = geocoder.search("Paris").await.unwrap_err();

    assert!(matches!(err, TravelError::UpstreamUnavailable { .. }));
    assert!(err.to_string().contains("malformed response"));
}

#[tokio::test]
async fn test_weather_current_conditions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "Europe/Paris"))
        .and(query_param(
            "current",
            "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code,is_day",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 48.86,
            "longitude": 2.35,
            "timezone": "Europe/Paris",
            "current": {
                "time": "2024-06-03T14:00",
                "interval": 900,
                "temperature_2m": 20.0,
                "apparent_temperature": 18.7,
                "relative_humidity_2m": 61,
                "wind_speed_10m": 13.4,
                "weather_code": 80,
                "is_day": 1
            }
        })))
        .mount(&mock_server)
        .await;

    let weather = OpenMeteoWeather::new(Client::new(), format!("{}/v1/forecast", mock_server.uri()));
    let snapshot = weather.current(&paris()).await.unwrap();

    assert_eq!(snapshot.temperature_c, 20.0);
    assert_eq!(snapshot.apparent_temperature_c, 18.7);
    assert_eq!(snapshot.relative_humidity_pct, 61);
    assert_eq!(snapshot.wind_speed_kmh, 13.4);
    assert_eq!(snapshot.weather_code, 80);
    assert!(snapshot.is_day);
}

#[tokio::test]
async fn test_weather_without_current_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 48.86,
            "longitude": 2.35
        })))
        .mount(&mock_server)
        .await;

    let weather = OpenMeteoWeather::new(Client::new(), format!("{}/v1/forecast", mock_server.uri()));
    let err = weather.current(&paris()).await.unwrap_err();

    assert!(err.is_upstream());
    assert!(err.to_string().contains("no current conditions"));
}

#[tokio::test]
async fn test_wikipedia_geosearch_clamps_radius() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "geosearch"))
        .and(query_param("gsradius", "10000"))
        .and(query_param("gslimit", "27"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "batchcomplete": true,
            "query": {
                "geosearch": [
                    { "pageid": 1359783, "ns": 0, "title": "Hôtel de Ville, Paris", "lat": 48.8564, "lon": 2.3525, "dist": 347.2, "primary": true },
                    { "pageid": 22989, "ns": 0, "title": "Notre-Dame de Paris", "lat": 48.853, "lon": 2.3498, "dist": 124.9, "primary": true }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let hits = wikipedia(&mock_server)
        .nearby(48.85341, 2.3488, 25_000, 27)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].page_id, 1359783);
    assert_eq!(hits[1].title, "Notre-Dame de Paris");
    assert_eq!(hits[1].distance_m, 124.9);
}

#[tokio::test]
async fn test_wikipedia_empty_geosearch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "geosearch"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "batchcomplete": true })),
        )
        .mount(&mock_server)
        .await;

    let hits = wikipedia(&mock_server).nearby(0.0, 0.0, 1_000, 3).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_wikipedia_text_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "Paris attractions landmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {
                "searchinfo": { "totalhits": 2 },
                "search": [
                    { "ns": 0, "title": "Tourism in Paris", "pageid": 2155640, "snippet": "..." },
                    { "ns": 0, "title": "Landmarks in Paris", "pageid": 5540120, "snippet": "..." }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let hits = wikipedia(&mock_server)
        .text_search("Paris attractions landmarks", 9)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].page_id, 2155640);
    assert_eq!(hits[0].title, "Tourism in Paris");
}

#[tokio::test]
async fn test_wikipedia_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("pageids", "22989"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {
                "pages": [
                    {
                        "pageid": 22989,
                        "title": "Notre-Dame de Paris",
                        "extract": "Notre-Dame de Paris is a medieval Catholic cathedral on the Île de la Cité.",
                        "thumbnail": { "source": "https://upload.test/notre-dame.jpg", "width": 480, "height": 320 },
                        "fullurl": "https://en.wikipedia.org/wiki/Notre-Dame_de_Paris"
                    }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let detail = wikipedia(&mock_server).detail(22989).await.unwrap();

    assert!(detail.extract.as_deref().unwrap_or_default().starts_with("Notre-Dame"));
    assert_eq!(detail.thumbnail_url.as_deref(), Some("https://upload.test/notre-dame.jpg"));
    assert_eq!(
        detail.url.as_deref(),
        Some("https://en.wikipedia.org/wiki/Notre-Dame_de_Paris")
    );
}

#[tokio::test]
async fn test_wikipedia_missing_page_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("pageids", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "pages": [ { "pageid": 1, "missing": true } ] }
        })))
        .mount(&mock_server)
        .await;

    let err = wikipedia(&mock_server).detail(1).await.unwrap_err();
    assert!(err.to_string().contains("page 1 not found"));
}

#[tokio::test]
async fn test_nominatim_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "tourist attractions in Paris"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "place_id": 88066702,
                "lat": "48.8606111",
                "lon": "2.337644",
                "category": "tourism",
                "type": "museum",
                "name": "Louvre Museum",
                "display_name": "Louvre Museum, Rue de Rivoli, Paris, France"
            },
            {
                "place_id": 88066703,
                "lat": "48.8738",
                "lon": "2.2950",
                "type": "attraction",
                "name": "",
                "display_name": "Arc de Triomphe, Place Charles de Gaulle, Paris, France"
            }
        ])))
        .mount(&mock_server)
        .await;

    let places = NominatimPlaceSearch::new(Client::new(), format!("{}/search", mock_server.uri()));
    let hits = places.search("tourist attractions in Paris", 9).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].name, "Louvre Museum");
    assert_eq!(hits[0].category, "museum");
    assert_eq!(hits[1].name, "Arc de Triomphe");
    assert!((hits[1].latitude - 48.8738).abs() < 1e-9);
}

#[tokio::test]
async fn test_nominatim_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let places = NominatimPlaceSearch::new(Client::new(), format!("{}/search", mock_server.uri()));
    let err = places.search("anything", 3).await.unwrap_err();

    assert!(err.is_upstream());
    assert!(err.to_string().contains("429"));
}
