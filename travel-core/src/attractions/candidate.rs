use crate::{
    attractions::curated::CuratedAttraction,
    display::{HIT_MAP_SPAN_DEG, embed_map_url, humanize_category, truncate_summary},
    model::{Attraction, AttractionId, Place},
    source::{NearbyHit, PageDetail, PlaceHit, TextHit},
};

/// Shown in place of an image when a source has none.
pub const FALLBACK_IMAGE: &str = "assets/attraction-placeholder.svg";

/// Shown when a candidate's detail record could not be fetched.
pub const FALLBACK_SUMMARY: &str = "No summary is available right now. Open the link to read more.";

/// A point of interest as reported by one tier, before normalization.
#[derive(Debug, Clone)]
pub enum Candidate {
    /// Proximity search hit; `link` opens the item directly.
    Nearby { hit: NearbyHit, link: String },
    /// Free-text hit at position `rank`; has no real distance.
    Text { hit: TextHit, rank: usize, link: String },
    /// General place-search hit at position `rank`.
    Place { hit: PlaceHit, rank: usize },
    Curated { entry: &'static CuratedAttraction, rank: usize },
}

/// Stand-in distance for sources that return none: 1000, 2000, 3000, ...
pub fn ordinal_distance(rank: usize) -> f64 {
    ((rank + 1) * 1000) as f64
}

impl Candidate {
    /// Page id for candidates that still need a detail lookup.
    pub fn page_id(&self) -> Option<u64> {
        match self {
            Candidate::Nearby { hit, .. } => Some(hit.page_id),
            Candidate::Text { hit, .. } => Some(hit.page_id),
            Candidate::Place { .. } | Candidate::Curated { .. } => None,
        }
    }

    pub fn distance_m(&self) -> f64 {
        match self {
            Candidate::Nearby { hit, .. } => hit.distance_m,
            Candidate::Text { rank, .. }
            | Candidate::Place { rank, .. }
            | Candidate::Curated { rank, .. } => ordinal_distance(*rank),
        }
    }

    /// Normalize into an [`Attraction`].
    ///
    /// `detail` is only consulted for page candidates; `None` there means the
    /// lookup failed and the record is degraded to fallback text and image.
    pub fn into_attraction(self, place: &Place, detail: Option<PageDetail>) -> Attraction {
        let distance_m = self.distance_m();

        match self {
            Candidate::Nearby { hit, link } => {
                page_attraction(hit.page_id, hit.title, distance_m, link, detail)
            }
            Candidate::Text { hit, link, .. } => {
                page_attraction(hit.page_id, hit.title, distance_m, link, detail)
            }
            Candidate::Place { hit, .. } => {
                let summary = format!(
                    "Popular {} in {}.",
                    humanize_category(&hit.category),
                    place.name
                );
                Attraction {
                    id: AttractionId::Numeric(hit.place_id),
                    title: hit.name,
                    distance_m,
                    summary: truncate_summary(&summary),
                    url: embed_map_url(hit.latitude, hit.longitude, HIT_MAP_SPAN_DEG),
                    image_url: FALLBACK_IMAGE.to_string(),
                }
            }
            Candidate::Curated { entry, .. } => Attraction {
                id: AttractionId::Text(entry.slug.to_string()),
                title: entry.title.to_string(),
                distance_m,
                summary: truncate_summary(entry.summary),
                url: entry.url.to_string(),
                image_url: FALLBACK_IMAGE.to_string(),
            },
        }
    }
}

fn page_attraction(
    page_id: u64,
    title: String,
    distance_m: f64,
    link: String,
    detail: Option<PageDetail>,
) -> Attraction {
    let detail = detail.unwrap_or_default();

    Attraction {
        id: AttractionId::Numeric(page_id),
        title,
        distance_m,
        summary: detail
            .extract
            .as_deref()
            .map(truncate_summary)
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string()),
        url: detail.url.unwrap_or(link),
        image_url: detail
            .thumbnail_url
            .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
    }
}
