use crate::{
    Config, Place, TravelError, WeatherSnapshot,
    source::{
        nominatim::NominatimPlaceSearch,
        open_meteo::{OpenMeteoGeocoder, OpenMeteoWeather},
        wikipedia::WikipediaPoiSource,
    },
};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::{fmt::Debug, sync::Arc};

pub mod nominatim;
pub mod open_meteo;
pub mod wikipedia;

/// A point of interest found around a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyHit {
    pub page_id: u64,
    pub title: String,
    pub distance_m: f64,
}

/// A point of interest found by free text; carries no distance.
#[derive(Debug, Clone, PartialEq)]
pub struct TextHit {
    pub page_id: u64,
    pub title: String,
}

/// Enrichment for a single point of interest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDetail {
    pub extract: Option<String>,
    pub thumbnail_url: Option<String>,
    pub url: Option<String>,
}

/// A hit from a general-purpose place search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceHit {
    pub place_id: u64,
    pub name: String,
    /// Raw category such as "theme_park" or "museum".
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait GeocodingSource: Send + Sync + Debug {
    /// Matches for a free-text name, best first.
    async fn search(&self, name: &str) -> Result<Vec<Place>, TravelError>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, place: &Place) -> Result<WeatherSnapshot, TravelError>;
}

#[async_trait]
pub trait PoiSource: Send + Sync + Debug {
    async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<NearbyHit>, TravelError>;

    async fn text_search(&self, query: &str, limit: usize) -> Result<Vec<TextHit>, TravelError>;

    async fn detail(&self, page_id: u64) -> Result<PageDetail, TravelError>;

    /// Direct link to an item when its detail record is unavailable.
    fn page_link(&self, page_id: u64) -> String;
}

#[async_trait]
pub trait PlaceSearchSource: Send + Sync + Debug {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PlaceHit>, TravelError>;
}

/// Every upstream the dashboard talks to.
#[derive(Debug, Clone)]
pub struct Sources {
    pub geocoder: Arc<dyn GeocodingSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub poi: Arc<dyn PoiSource>,
    pub places: Arc<dyn PlaceSearchSource>,
}

impl Sources {
    /// Construct the live sources from config, sharing one HTTP client.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = config.http.build_client()?;
        let endpoints = &config.endpoints;

        Ok(Self {
            geocoder: Arc::new(OpenMeteoGeocoder::new(
                http.clone(),
                endpoints.geocoding_url.clone(),
            )),
            weather: Arc::new(OpenMeteoWeather::new(http.clone(), endpoints.weather_url.clone())),
            poi: Arc::new(WikipediaPoiSource::new(
                http.clone(),
                endpoints.wikipedia_api_url.clone(),
                endpoints.wikipedia_page_url.clone(),
            )),
            places: Arc::new(NominatimPlaceSearch::new(http, endpoints.nominatim_url.clone())),
        })
    }
}

/// Send a request and decode its JSON body, mapping every failure to
/// [`TravelError::UpstreamUnavailable`] for `service`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T, TravelError> {
    let res = request
        .send()
        .await
        .map_err(|e| TravelError::upstream(service, format!("request failed: {e}")))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| TravelError::upstream(service, format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        return Err(TravelError::upstream(
            service,
            format!("request failed with status {}: {}", status, truncate_body(&body)),
        ));
    }

    serde_json::from_str(&body)
        .map_err(|e| TravelError::upstream(service, format!("malformed response: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
