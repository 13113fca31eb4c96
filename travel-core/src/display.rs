//! Display records handed to the presentation sink, plus the small formatting
//! helpers they are built from.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::model::{Place, WeatherSnapshot};

/// Longest summary kept before the "..." suffix is appended.
pub const SUMMARY_MAX_CHARS: usize = 180;

/// Half-width in degrees of the map shown for a destination.
pub const MAP_SPAN_DEG: f64 = 0.08;

/// Half-width in degrees of the map linked from a single place-search hit.
pub const HIT_MAP_SPAN_DEG: f64 = 0.01;

const OSM_EMBED_URL: &str = "https://www.openstreetmap.org/export/embed.html";
const OSM_LINK_URL: &str = "https://www.openstreetmap.org/";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationCard {
    pub title: String,
    /// "Region, Country" with empty parts left out.
    pub region: String,
    pub coordinates: String,
    pub population: Option<String>,
    pub timezone: String,
}

impl DestinationCard {
    pub fn from_place(place: &Place) -> Self {
        let region = [place.admin_region.as_str(), place.country.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            title: place.name.clone(),
            region,
            coordinates: format_coordinates(place.latitude, place.longitude),
            population: place.population.map(format_population),
            timezone: place.timezone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCard {
    /// Current weekday at the destination.
    pub weekday: String,
    pub condition: &'static str,
    pub temperature_c: String,
    pub temperature_f: String,
    pub feels_like_c: String,
    pub feels_like_f: String,
    pub humidity: String,
    pub wind: String,
    pub is_day: bool,
}

impl WeatherCard {
    pub fn new(snapshot: &WeatherSnapshot, timezone: &str, now: DateTime<Utc>) -> Self {
        Self {
            weekday: local_weekday(timezone, now),
            condition: weather_condition(snapshot.weather_code),
            temperature_c: format_temperature(snapshot.temperature_c),
            temperature_f: format_temperature(celsius_to_fahrenheit(snapshot.temperature_c)),
            feels_like_c: format_temperature(snapshot.apparent_temperature_c),
            feels_like_f: format_temperature(celsius_to_fahrenheit(
                snapshot.apparent_temperature_c,
            )),
            humidity: format!("{}%", snapshot.relative_humidity_pct),
            wind: format!("{:.1} km/h", snapshot.wind_speed_kmh),
            is_day: snapshot.is_day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Box of `span` degrees on each side of the point, clamped to valid coordinates.
    pub fn around(latitude: f64, longitude: f64, span: f64) -> Self {
        Self {
            min_lon: (longitude - span).clamp(-180.0, 180.0),
            min_lat: (latitude - span).clamp(-90.0, 90.0),
            max_lon: (longitude + span).clamp(-180.0, 180.0),
            max_lat: (latitude + span).clamp(-90.0, 90.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub bbox: BoundingBox,
    pub embed_url: String,
    pub link_url: String,
}

impl MapView {
    pub fn for_place(place: &Place) -> Self {
        Self {
            latitude: place.latitude,
            longitude: place.longitude,
            bbox: BoundingBox::around(place.latitude, place.longitude, MAP_SPAN_DEG),
            embed_url: embed_map_url(place.latitude, place.longitude, MAP_SPAN_DEG),
            link_url: map_link_url(place.latitude, place.longitude),
        }
    }
}

pub fn embed_map_url(latitude: f64, longitude: f64, span: f64) -> String {
    let bbox = BoundingBox::around(latitude, longitude, span);
    format!(
        "{OSM_EMBED_URL}?bbox={:.4}%2C{:.4}%2C{:.4}%2C{:.4}&layer=mapnik&marker={:.5}%2C{:.5}",
        bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat, latitude, longitude
    )
}

pub fn map_link_url(latitude: f64, longitude: f64) -> String {
    format!("{OSM_LINK_URL}?mlat={latitude:.5}&mlon={longitude:.5}#map=13/{latitude:.5}/{longitude:.5}")
}

/// WMO weather interpretation codes as returned by Open-Meteo.
pub fn weather_condition(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    (celsius * 9.0 / 5.0) + 32.0
}

pub fn format_temperature(degrees: f64) -> String {
    format!("{degrees:.1}")
}

/// Cut a summary to [`SUMMARY_MAX_CHARS`] characters, marking the cut with "...".
pub fn truncate_summary(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }

    let cut: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    format!("{}...", cut.trim_end())
}

/// "theme_park" -> "theme park".
pub fn humanize_category(category: &str) -> String {
    category.trim().replace('_', " ")
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let ns = if latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}\u{00b0} {ns}, {:.4}\u{00b0} {ew}",
        latitude.abs(),
        longitude.abs()
    )
}

fn local_weekday(timezone: &str, now: DateTime<Utc>) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).format("%A").to_string(),
        Err(_) => now.format("%A").to_string(),
    }
}
