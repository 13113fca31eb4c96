use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    TravelError,
    source::{NearbyHit, PageDetail, PoiSource, TextHit, fetch_json},
};

const SERVICE: &str = "Wikipedia";

/// The geosearch module rejects larger radii.
const MAX_GEOSEARCH_RADIUS_M: u32 = 10_000;
/// Per-request ceiling for list modules.
const MAX_LIST_LIMIT: usize = 500;

#[derive(Debug, Clone)]
pub struct WikipediaPoiSource {
    http: Client,
    api_url: String,
    page_url: String,
}

impl WikipediaPoiSource {
    pub fn new(http: Client, api_url: String, page_url: String) -> Self {
        Self {
            http,
            api_url,
            page_url,
        }
    }

    fn query(&self, params: &[(&str, String)]) -> reqwest::RequestBuilder {
        self.http
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
    }
}

#[derive(Debug, Deserialize)]
struct WikiResponse<T> {
    // Missing when the list is empty.
    query: Option<T>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchQuery {
    #[serde(default)]
    geosearch: Vec<GeoSearchItem>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchItem {
    pageid: u64,
    title: String,
    dist: f64,
}

#[derive(Debug, Deserialize)]
struct TextSearchQuery {
    #[serde(default)]
    search: Vec<TextSearchItem>,
}

#[derive(Debug, Deserialize)]
struct TextSearchItem {
    pageid: u64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<PageItem>,
}

#[derive(Debug, Deserialize)]
struct PageItem {
    #[serde(default)]
    missing: bool,
    extract: Option<String>,
    thumbnail: Option<Thumbnail>,
    fullurl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[async_trait]
impl PoiSource for WikipediaPoiSource {
    async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<NearbyHit>, TravelError> {
        let radius = radius_m.min(MAX_GEOSEARCH_RADIUS_M);
        if radius < radius_m {
            debug!("Clamping geosearch radius from {} m to {} m", radius_m, radius);
        }

        let request = self.query(&[
            ("list", "geosearch".to_string()),
            ("gscoord", format!("{latitude}|{longitude}")),
            ("gsradius", radius.to_string()),
            ("gslimit", limit.clamp(1, MAX_LIST_LIMIT).to_string()),
        ]);

        let parsed: WikiResponse<GeoSearchQuery> = fetch_json(SERVICE, request).await?;
        Ok(parsed
            .query
            .map(|q| q.geosearch)
            .unwrap_or_default()
            .into_iter()
            .map(|item| NearbyHit {
                page_id: item.pageid,
                title: item.title,
                distance_m: item.dist,
            })
            .collect())
    }

    async fn text_search(&self, query: &str, limit: usize) -> Result<Vec<TextHit>, TravelError> {
        let request = self.query(&[
            ("list", "search".to_string()),
            ("srsearch", query.to_string()),
            ("srlimit", limit.clamp(1, MAX_LIST_LIMIT).to_string()),
        ]);

        let parsed: WikiResponse<TextSearchQuery> = fetch_json(SERVICE, request).await?;
        Ok(parsed
            .query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .map(|item| TextHit {
                page_id: item.pageid,
                title: item.title,
            })
            .collect())
    }

    async fn detail(&self, page_id: u64) -> Result<PageDetail, TravelError> {
        let request = self.query(&[
            ("pageids", page_id.to_string()),
            ("prop", "extracts|pageimages|info".to_string()),
            ("exintro", "1".to_string()),
            ("explaintext", "1".to_string()),
            ("inprop", "url".to_string()),
            ("piprop", "thumbnail".to_string()),
            ("pithumbsize", "480".to_string()),
        ]);

        let parsed: WikiResponse<PagesQuery> = fetch_json(SERVICE, request).await?;
        let page = parsed
            .query
            .and_then(|q| q.pages.into_iter().next())
            .filter(|p| !p.missing)
            .ok_or_else(|| TravelError::upstream(SERVICE, format!("page {page_id} not found")))?;

        Ok(PageDetail {
            extract: page.extract.filter(|e| !e.trim().is_empty()),
            thumbnail_url: page.thumbnail.map(|t| t.source),
            url: page.fullurl,
        })
    }

    fn page_link(&self, page_id: u64) -> String {
        format!("{}{}", self.page_url, page_id)
    }
}
