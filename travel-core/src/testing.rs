//! In-memory data sources and a recording sink for unit tests.

use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    TravelError,
    display::{DestinationCard, MapView, WeatherCard},
    model::{Attraction, Place, StatusKind, WeatherSnapshot},
    search::PresentationSink,
    source::{
        GeocodingSource, NearbyHit, PageDetail, PlaceHit, PlaceSearchSource, PoiSource, TextHit,
        WeatherSource,
    },
};

pub fn place_named(name: &str) -> Place {
    Place {
        name: name.to_string(),
        admin_region: "Region".to_string(),
        country: "Country".to_string(),
        timezone: "Europe/Paris".to_string(),
        latitude: 45.76,
        longitude: 4.84,
        population: Some(513_275),
    }
}

pub fn snapshot(temperature_c: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c,
        apparent_temperature_c: temperature_c,
        relative_humidity_pct: 50,
        wind_speed_kmh: 5.0,
        weather_code: 1,
        is_day: true,
    }
}

#[derive(Debug, Default)]
pub struct FakeGeocoder {
    /// Keyed by the query as received.
    pub results: HashMap<String, Vec<Place>>,
    pub delays_ms: HashMap<String, u64>,
    pub fails: bool,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn knowing(names: &[&str]) -> Self {
        Self {
            results: names
                .iter()
                .map(|n| (n.to_string(), vec![place_named(n)]))
                .collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl GeocodingSource for FakeGeocoder {
    async fn search(&self, name: &str) -> Result<Vec<Place>, TravelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ms) = self.delays_ms.get(name) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.fails {
            return Err(TravelError::upstream("geocoder", "request failed with status 502"));
        }
        Ok(self.results.get(name).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Default)]
pub struct FakeWeather {
    /// `None` behaves like an upstream without current conditions.
    pub snapshot: Option<WeatherSnapshot>,
    pub calls: AtomicUsize,
}

impl FakeWeather {
    pub fn reporting(temperature_c: f64) -> Self {
        Self {
            snapshot: Some(snapshot(temperature_c)),
            ..Self::default()
        }
    }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn current(&self, _place: &Place) -> Result<WeatherSnapshot, TravelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot.clone().ok_or_else(|| {
            TravelError::upstream("weather", "no current conditions for this destination")
        })
    }
}

#[derive(Debug, Default)]
pub struct FakePoi {
    pub nearby: Vec<NearbyHit>,
    pub text: Vec<TextHit>,
    pub nearby_fails: bool,
    pub failing_details: HashSet<u64>,
    /// Replaces the generated per-page extract.
    pub extract: Option<String>,
    /// Makes lower page ids answer later than higher ones.
    pub stagger_details: bool,
    pub nearby_calls: AtomicUsize,
    pub text_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub last_nearby_limit: AtomicUsize,
    pub last_text_query: Mutex<Option<String>>,
}

impl FakePoi {
    pub fn with_nearby(count: u64) -> Self {
        Self {
            nearby: (1..=count)
                .map(|id| NearbyHit {
                    page_id: id,
                    title: format!("Page {id}"),
                    distance_m: id as f64 * 150.0,
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn text_hit(id: u64) -> TextHit {
        TextHit {
            page_id: id,
            title: format!("Page {id}"),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.nearby_calls.load(Ordering::SeqCst)
            + self.text_calls.load(Ordering::SeqCst)
            + self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PoiSource for FakePoi {
    async fn nearby(
        &self,
        _latitude: f64,
        _longitude: f64,
        _radius_m: u32,
        limit: usize,
    ) -> Result<Vec<NearbyHit>, TravelError> {
        self.nearby_calls.fetch_add(1, Ordering::SeqCst);
        self.last_nearby_limit.store(limit, Ordering::SeqCst);
        if self.nearby_fails {
            return Err(TravelError::upstream("poi", "request failed with status 500"));
        }
        Ok(self.nearby.iter().take(limit).cloned().collect())
    }

    async fn text_search(&self, query: &str, limit: usize) -> Result<Vec<TextHit>, TravelError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_text_query.lock() {
            *last = Some(query.to_string());
        }
        Ok(self.text.iter().take(limit).cloned().collect())
    }

    async fn detail(&self, page_id: u64) -> Result<PageDetail, TravelError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.stagger_details {
            tokio::time::sleep(Duration::from_millis(40u64.saturating_sub(page_id * 10))).await;
        }
        if self.failing_details.contains(&page_id) {
            return Err(TravelError::upstream("poi", "request failed with status 404"));
        }
        Ok(PageDetail {
            extract: Some(
                self.extract
                    .clone()
                    .unwrap_or_else(|| format!("Extract for page {page_id}.")),
            ),
            thumbnail_url: Some(format!("https://img.test/{page_id}.jpg")),
            url: Some(format!("https://pages.test/wiki/{page_id}")),
        })
    }

    fn page_link(&self, page_id: u64) -> String {
        format!("https://pages.test/?curid={page_id}")
    }
}

#[derive(Debug, Default)]
pub struct FakePlaces {
    pub hits: Vec<PlaceHit>,
    pub fails: bool,
    pub calls: AtomicUsize,
    pub last_query: Mutex<Option<String>>,
}

impl FakePlaces {
    pub fn with_hits(count: u64) -> Self {
        Self {
            hits: (1..=count)
                .map(|id| PlaceHit {
                    place_id: 1000 + id,
                    name: format!("Spot {id}"),
                    category: "tourist_attraction".to_string(),
                    latitude: 45.7 + id as f64 * 0.001,
                    longitude: 4.8,
                })
                .collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PlaceSearchSource for FakePlaces {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PlaceHit>, TravelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.to_string());
        }
        if self.fails {
            return Err(TravelError::upstream("places", "request failed with status 429"));
        }
        Ok(self.hits.iter().take(limit).cloned().collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Status(StatusKind, String),
    Cleared,
    Destination(DestinationCard),
    Weather(WeatherCard),
    Attractions(Vec<Attraction>),
    Map(MapView),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn statuses(&self) -> Vec<(StatusKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Status(kind, msg) => Some((kind, msg)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl PresentationSink for RecordingSink {
    fn set_status(&self, message: &str, kind: StatusKind) {
        self.push(SinkEvent::Status(kind, message.to_string()));
    }

    fn clear_results(&self) {
        self.push(SinkEvent::Cleared);
    }

    fn render_destination(&self, card: &DestinationCard) {
        self.push(SinkEvent::Destination(card.clone()));
    }

    fn render_weather(&self, card: &WeatherCard) {
        self.push(SinkEvent::Weather(card.clone()));
    }

    fn render_attractions(&self, attractions: &[Attraction]) {
        self.push(SinkEvent::Attractions(attractions.to_vec()));
    }

    fn render_map(&self, map: &MapView) {
        self.push(SinkEvent::Map(map.clone()));
    }
}
