//! Per-route page composition.
//!
//! Every composer takes the injected [`CatalogAccessor`] plus route/query
//! parameters and returns a serializable view model. Listing composers never
//! fail: a fetch error is logged and the page renders with zero items. Detail
//! composers return `None` for both a missing record and a failed fetch.

pub mod admin;
pub mod audio;
pub mod map;
pub mod sites;
pub mod tours;

pub use admin::AdminDashboardView;
pub use audio::{AudioGuideView, AudioListingView};
pub use map::{MapParams, MapView};
pub use sites::{SiteDetailView, SiteListingView};
pub use tours::{TourListingView, TourView};

use gompa_model::{HeritageSite, SiteId};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::catalog::{CatalogAccessor, Lookup, SiteOrder};
use crate::error::Result;
use crate::query::{CategoryFilter, SiteFilter};

/// Query parameters shared by the filterable listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tradition: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

impl ListingParams {
    pub fn filter(&self) -> SiteFilter {
        SiteFilter::new(
            self.search.clone().unwrap_or_default(),
            CategoryFilter::from_param(self.tradition.as_deref()),
        )
    }

    /// Unknown order values fall back to the default.
    pub fn order(&self) -> SiteOrder {
        self.order
            .as_deref()
            .and_then(SiteOrder::from_param)
            .unwrap_or_default()
    }
}

/// Compact record used by every listing grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteCard {
    pub id: SiteId,
    pub name: String,
    pub location: String,
    pub tradition: Option<String>,
    pub founded_year: Option<i32>,
    pub altitude: Option<i32>,
    pub description: Option<String>,
    pub cover_image: String,
    pub has_virtual_tour: bool,
    pub has_audio_guides: bool,
    pub audio_language_count: usize,
}

impl From<&HeritageSite> for SiteCard {
    fn from(site: &HeritageSite) -> Self {
        Self {
            id: site.id,
            name: site.name.clone(),
            location: site.location.clone(),
            tradition: site.tradition.clone(),
            founded_year: site.founded_year,
            altitude: site.altitude,
            description: site.description.clone(),
            cover_image: site.cover_image().to_string(),
            has_virtual_tour: site.has_virtual_tour(),
            has_audio_guides: site.has_audio_guides(),
            audio_language_count: site.audio_guide_urls.len(),
        }
    }
}

/// Listing fetch with the degrade-to-empty policy applied.
pub(crate) fn or_empty(route: &'static str, fetched: Result<Vec<HeritageSite>>) -> Vec<HeritageSite> {
    match fetched {
        Ok(sites) => sites,
        Err(err) => {
            error!(route, error = %err, "catalog fetch failed, rendering empty listing");
            Vec::new()
        }
    }
}

/// Detail fetch by raw path id; failures and malformed ids collapse to `None`.
pub(crate) async fn fetch_detail(
    route: &'static str,
    accessor: &CatalogAccessor,
    raw_id: &str,
) -> Option<HeritageSite> {
    match accessor.get_by_raw_id(raw_id).await {
        Ok(Lookup::Found(site)) => Some(*site),
        Ok(Lookup::NotFound) => None,
        Err(err) => {
            error!(route, site_id = raw_id, error = %err, "catalog fetch failed, rendering not found");
            None
        }
    }
}
