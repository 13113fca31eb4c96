use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    TravelError,
    model::{Place, WeatherSnapshot},
    source::{GeocodingSource, WeatherSource, fetch_json},
};

const GEOCODING_SERVICE: &str = "Open-Meteo geocoding";
const WEATHER_SERVICE: &str = "Open-Meteo weather";

const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code,is_day";

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoWeather {
    http: Client,
    url: String,
}

impl OpenMeteoWeather {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    // Absent entirely when nothing matches.
    #[serde(default)]
    results: Option<Vec<OmGeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResult {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    timezone: Option<String>,
    latitude: f64,
    longitude: f64,
    population: Option<u64>,
}

impl From<OmGeocodingResult> for Place {
    fn from(r: OmGeocodingResult) -> Self {
        Place {
            name: r.name,
            admin_region: r.admin1.unwrap_or_default(),
            country: r.country.unwrap_or_default(),
            timezone: r
                .timezone
                .filter(|tz| !tz.is_empty())
                .unwrap_or_else(|| Place::AUTO_TIMEZONE.to_string()),
            latitude: r.latitude,
            longitude: r.longitude,
            population: r.population,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: Option<OmCurrent>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: i32,
    is_day: u8,
}

impl From<OmCurrent> for WeatherSnapshot {
    fn from(c: OmCurrent) -> Self {
        WeatherSnapshot {
            temperature_c: c.temperature_2m,
            apparent_temperature_c: c.apparent_temperature,
            relative_humidity_pct: c.relative_humidity_2m.round().clamp(0.0, 100.0) as u8,
            wind_speed_kmh: c.wind_speed_10m,
            weather_code: c.weather_code,
            is_day: c.is_day != 0,
        }
    }
}

#[async_trait]
impl GeocodingSource for OpenMeteoGeocoder {
    async fn search(&self, name: &str) -> Result<Vec<Place>, TravelError> {
        let request = self.http.get(&self.url).query(&[
            ("name", name),
            ("count", "5"),
            ("language", "en"),
            ("format", "json"),
        ]);

        let parsed: OmGeocodingResponse = fetch_json(GEOCODING_SERVICE, request).await?;
        let places: Vec<Place> = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Place::from)
            .collect();

        debug!("Geocoding '{}' returned {} matches", name, places.len());
        Ok(places)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoWeather {
    async fn current(&self, place: &Place) -> Result<WeatherSnapshot, TravelError> {
        let request = self.http.get(&self.url).query(&[
            ("latitude", place.latitude.to_string()),
            ("longitude", place.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", place.timezone.clone()),
        ]);

        let parsed: OmForecastResponse = fetch_json(WEATHER_SERVICE, request).await?;
        let current = parsed.current.ok_or_else(|| {
            TravelError::upstream(WEATHER_SERVICE, "no current conditions for this destination")
        })?;

        Ok(current.into())
    }
}
