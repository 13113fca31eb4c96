use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    TravelError,
    source::{PlaceHit, PlaceSearchSource, fetch_json},
};

const SERVICE: &str = "Nominatim";

#[derive(Debug, Clone)]
pub struct NominatimPlaceSearch {
    http: Client,
    url: String,
}

impl NominatimPlaceSearch {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: u64,
    #[serde(default)]
    name: Option<String>,
    display_name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    // Coordinates arrive as strings.
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn into_hit(self) -> Option<PlaceHit> {
        let latitude = self.lat.parse::<f64>().ok()?;
        let longitude = self.lon.parse::<f64>().ok()?;

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.display_name.split(',').next().map(|s| s.trim().to_string()))
            .unwrap_or(self.display_name);

        Some(PlaceHit {
            place_id: self.place_id,
            name,
            category: self.kind.unwrap_or_else(|| "place".to_string()),
            latitude,
            longitude,
        })
    }
}

#[async_trait]
impl PlaceSearchSource for NominatimPlaceSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PlaceHit>, TravelError> {
        let request = self.http.get(&self.url).query(&[
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", limit.clamp(1, 40).to_string()),
        ]);

        let parsed: Vec<NominatimPlace> = fetch_json(SERVICE, request).await?;
        let total = parsed.len();
        let hits: Vec<PlaceHit> = parsed.into_iter().filter_map(NominatimPlace::into_hit).collect();

        if hits.len() < total {
            debug!("Dropped {} Nominatim hits with unreadable coordinates", total - hits.len());
        }
        Ok(hits)
    }
}
