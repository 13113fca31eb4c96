use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved destination. Built from the first geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// First-level administrative region; empty when the source omits it.
    pub admin_region: String,
    pub country: String,
    /// IANA zone name, or "auto" when the source did not provide one.
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: Option<u64>,
}

impl Place {
    pub const AUTO_TIMEZONE: &'static str = "auto";
}

/// Current conditions at a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub relative_humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
    pub is_day: bool,
}

/// Identifier of an attraction in its originating source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttractionId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for AttractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttractionId::Numeric(n) => write!(f, "{n}"),
            AttractionId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: AttractionId,
    pub title: String,
    pub distance_m: f64,
    pub summary: String,
    pub url: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Idle,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Idle => "idle",
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one user-facing status of the current search attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl SearchStatus {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn idle() -> Self {
        Self::new(StatusKind::Idle, "Search for a city to get started.")
    }

    pub fn loading(query: &str) -> Self {
        Self::new(StatusKind::Loading, format!("Searching for \"{query}\"..."))
    }

    pub fn success(place: &Place) -> Self {
        Self::new(
            StatusKind::Success,
            format!("Showing live travel insights for {}.", place.name),
        )
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl Default for SearchStatus {
    fn default() -> Self {
        Self::idle()
    }
}
