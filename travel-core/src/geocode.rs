use tracing::info;

use crate::{Place, TravelError, source::GeocodingSource};

/// Resolve a free-text query to the first matching place.
pub async fn resolve_place(
    source: &dyn GeocodingSource,
    query: &str,
) -> Result<Place, TravelError> {
    let place = source
        .search(query)
        .await?
        .into_iter()
        .next()
        .ok_or(TravelError::NoMatch)?;

    info!(
        "Resolved '{}' to {} ({:.4}, {:.4})",
        query, place.name, place.latitude, place.longitude
    );
    Ok(place)
}
