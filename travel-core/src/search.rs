//! Search orchestration: validate, geocode, then weather and attractions in
//! parallel, then render.
//!
//! Every attempt takes a ticket. Results are only applied while that ticket is
//! the newest one, so a slow attempt cannot overwrite a later search. Stale
//! attempts are left to finish; nothing is cancelled.

use chrono::Utc;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::debug;

use crate::{
    Config, TravelError,
    attractions::AttractionResolver,
    config::AttractionSettings,
    display::{DestinationCard, MapView, WeatherCard},
    geocode::resolve_place,
    model::{Attraction, SearchStatus, StatusKind},
    source::{GeocodingSource, Sources, WeatherSource},
};

/// Where search results end up. Every call overwrites the previous content of
/// its panel.
pub trait PresentationSink: Send + Sync {
    fn set_status(&self, message: &str, kind: StatusKind);
    fn clear_results(&self);
    fn render_destination(&self, card: &DestinationCard);
    fn render_weather(&self, card: &WeatherCard);
    fn render_attractions(&self, attractions: &[Attraction]);
    fn render_map(&self, map: &MapView);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The attempt finished and its final status was shown.
    Applied(SearchStatus),
    /// A newer attempt started first; nothing further was shown.
    Superseded,
}

impl SearchOutcome {
    pub fn status(&self) -> Option<&SearchStatus> {
        match self {
            SearchOutcome::Applied(status) => Some(status),
            SearchOutcome::Superseded => None,
        }
    }
}

#[derive(Debug)]
pub struct SearchOrchestrator {
    geocoder: Arc<dyn GeocodingSource>,
    weather: Arc<dyn WeatherSource>,
    resolver: AttractionResolver,
    latest_ticket: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(sources: Sources, settings: AttractionSettings) -> Self {
        Self {
            geocoder: sources.geocoder,
            weather: sources.weather,
            resolver: AttractionResolver::new(sources.poi, sources.places, settings),
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let sources = Sources::from_config(config)?;
        Ok(Self::new(sources, config.attractions.clone()))
    }

    pub fn resolver(&self) -> &AttractionResolver {
        &self.resolver
    }

    pub async fn run_search(&self, raw_query: &str, sink: &dyn PresentationSink) -> SearchOutcome {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let query = raw_query.trim();
        if query.is_empty() {
            return self.finish(ticket, sink, error_status(&TravelError::empty_query()));
        }

        sink.clear_results();
        let loading = SearchStatus::loading(query);
        sink.set_status(&loading.message, loading.kind);

        let place = match resolve_place(self.geocoder.as_ref(), query).await {
            Ok(place) => place,
            Err(e) => return self.finish(ticket, sink, error_status(&e)),
        };

        if !self.is_current(ticket) {
            return self.superseded(ticket);
        }

        let (weather, attractions) =
            tokio::join!(self.weather.current(&place), self.resolver.resolve(&place));

        let weather = match weather {
            Ok(weather) => weather,
            Err(e) => return self.finish(ticket, sink, error_status(&e)),
        };

        if !self.is_current(ticket) {
            return self.superseded(ticket);
        }

        sink.render_destination(&DestinationCard::from_place(&place));
        sink.render_weather(&WeatherCard::new(&weather, &place.timezone, Utc::now()));
        sink.render_attractions(&attractions);
        sink.render_map(&MapView::for_place(&place));

        self.finish(ticket, sink, SearchStatus::success(&place))
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    fn finish(
        &self,
        ticket: u64,
        sink: &dyn PresentationSink,
        status: SearchStatus,
    ) -> SearchOutcome {
        if !self.is_current(ticket) {
            return self.superseded(ticket);
        }
        sink.set_status(&status.message, status.kind);
        SearchOutcome::Applied(status)
    }

    fn superseded(&self, ticket: u64) -> SearchOutcome {
        debug!(
            "Discarding results of search #{} (latest is #{})",
            ticket,
            self.latest_ticket.load(Ordering::SeqCst)
        );
        SearchOutcome::Superseded
    }
}

fn error_status(err: &TravelError) -> SearchStatus {
    SearchStatus::error(err.to_string())
}
