//! Attraction resolution: a fixed fallback chain over the point-of-interest
//! sources, converging on one [`Attraction`] record.
//!
//! 1. Proximity search around the place, or free-text search when that is empty,
//!    followed by concurrent per-item detail lookups.
//! 2. General place search.
//! 3. The built-in curated table.
//!
//! A tier runs only if every tier before it produced nothing. Resolution never
//! fails; the worst case is an empty list.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    config::AttractionSettings,
    model::{Attraction, Place},
    source::{PageDetail, PlaceSearchSource, PoiSource},
};

pub mod candidate;
pub mod curated;

pub use candidate::{Candidate, FALLBACK_IMAGE, FALLBACK_SUMMARY};

#[derive(Debug, Clone)]
pub struct AttractionResolver {
    poi: Arc<dyn PoiSource>,
    places: Arc<dyn PlaceSearchSource>,
    settings: AttractionSettings,
}

impl AttractionResolver {
    pub fn new(
        poi: Arc<dyn PoiSource>,
        places: Arc<dyn PlaceSearchSource>,
        settings: AttractionSettings,
    ) -> Self {
        Self {
            poi,
            places,
            settings,
        }
    }

    pub fn settings(&self) -> &AttractionSettings {
        &self.settings
    }

    /// Up to `max_results` attractions near `place`, in source order.
    pub async fn resolve(&self, place: &Place) -> Vec<Attraction> {
        let pages = self.page_candidates(place).await;
        if !pages.is_empty() {
            return self.enrich(place, pages).await;
        }

        debug!("No page candidates for {}, trying place search", place.name);
        let hits = self.place_candidates(place).await;
        if !hits.is_empty() {
            return hits
                .into_iter()
                .map(|c| c.into_attraction(place, None))
                .collect();
        }

        debug!("Place search empty for {}, using curated table", place.name);
        curated::lookup(&place.name)
            .iter()
            .take(self.settings.max_results)
            .enumerate()
            .map(|(rank, entry)| Candidate::Curated { entry, rank }.into_attraction(place, None))
            .collect()
    }

    async fn page_candidates(&self, place: &Place) -> Vec<Candidate> {
        let cap = self.settings.max_results;

        match self
            .poi
            .nearby(
                place.latitude,
                place.longitude,
                self.settings.search_radius_m,
                self.settings.candidate_limit(),
            )
            .await
        {
            Ok(hits) if !hits.is_empty() => {
                debug!("Proximity search found {} candidates", hits.len());
                return hits
                    .into_iter()
                    .take(cap)
                    .map(|hit| Candidate::Nearby {
                        link: self.poi.page_link(hit.page_id),
                        hit,
                    })
                    .collect();
            }
            Ok(_) => debug!("Proximity search returned nothing for {}", place.name),
            Err(e) => warn!("Proximity search failed for {}: {}", place.name, e),
        }

        let query = self.settings.text_query(&place.name);
        match self.poi.text_search(&query, cap).await {
            Ok(hits) => hits
                .into_iter()
                .take(cap)
                .enumerate()
                .map(|(rank, hit)| Candidate::Text {
                    link: self.poi.page_link(hit.page_id),
                    hit,
                    rank,
                })
                .collect(),
            Err(e) => {
                warn!("Text search '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn place_candidates(&self, place: &Place) -> Vec<Candidate> {
        let cap = self.settings.max_results;
        let query = self.settings.place_query(&place.name);

        match self.places.search(&query, cap).await {
            Ok(hits) => hits
                .into_iter()
                .take(cap)
                .enumerate()
                .map(|(rank, hit)| Candidate::Place { hit, rank })
                .collect(),
            Err(e) => {
                warn!("Place search '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Fetch every detail concurrently; results stay in candidate order.
    async fn enrich(&self, place: &Place, candidates: Vec<Candidate>) -> Vec<Attraction> {
        let details = join_all(candidates.iter().map(|c| self.fetch_detail(c))).await;

        candidates
            .into_iter()
            .zip(details)
            .map(|(candidate, detail)| candidate.into_attraction(place, detail))
            .collect()
    }

    async fn fetch_detail(&self, candidate: &Candidate) -> Option<PageDetail> {
        let page_id = candidate.page_id()?;
        match self.poi.detail(page_id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!("Detail fetch for page {} degraded: {}", page_id, e);
                None
            }
        }
    }
}
