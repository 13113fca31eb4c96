//! Error taxonomy for a single search attempt.

use thiserror::Error;

/// Message shown when the query is blank.
pub const EMPTY_QUERY_MESSAGE: &str = "Enter a city name to search.";

/// Message shown when geocoding finds nothing.
pub const NO_MATCH_MESSAGE: &str = "No destination found. Try another city.";

#[derive(Error, Debug)]
pub enum TravelError {
    /// The user input cannot start a search.
    #[error("{0}")]
    Validation(String),

    /// Transport failure, non-success status or an unreadable payload.
    #[error("{service} is unavailable: {reason}")]
    UpstreamUnavailable {
        service: &'static str,
        reason: String,
    },

    #[error("No destination found. Try another city.")]
    NoMatch,
}

impl TravelError {
    pub fn empty_query() -> Self {
        Self::Validation(EMPTY_QUERY_MESSAGE.to_string())
    }

    pub fn upstream(service: &'static str, reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Whether the error came from a remote data source rather than the input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }
}
