//! Core library for the `travel` dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - Clients for the geocoding, weather and point-of-interest sources
//! - The attraction fallback chain and the search orchestrator
//! - Shared domain models and display records
//!
//! It is used by `travel-cli`, but the orchestrator only talks to a
//! [`PresentationSink`], so other front ends can reuse it.

pub mod attractions;
pub mod config;
pub mod display;
pub mod error;
pub mod geocode;
pub mod model;
pub mod search;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use attractions::AttractionResolver;
pub use config::{AttractionSettings, Config, Endpoints, HttpSettings};
pub use display::{DestinationCard, MapView, WeatherCard};
pub use error::TravelError;
pub use model::{Attraction, AttractionId, Place, SearchStatus, StatusKind, WeatherSnapshot};
pub use search::{PresentationSink, SearchOrchestrator, SearchOutcome};
pub use source::Sources;
