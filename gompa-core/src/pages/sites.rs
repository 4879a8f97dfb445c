use gompa_model::{ContactInfo, HeritageSite};
use serde::Serialize;

use super::{ListingParams, SiteCard, fetch_detail, or_empty};
use crate::catalog::{CatalogAccessor, SiteOrder};
use crate::presentation::{AudioLanguage, ImageCarousel};
use crate::query::{SiteFilter, apply_filter, distinct_traditions};

/// `/sites`: the full catalog with search and tradition filtering applied.
#[derive(Debug, Clone, Serialize)]
pub struct SiteListingView {
    pub items: Vec<SiteCard>,
    /// Options for the tradition selector, drawn from the unfiltered catalog.
    pub traditions: Vec<String>,
    pub showing: usize,
    pub total: usize,
    pub filter: SiteFilter,
    pub order: SiteOrder,
}

pub async fn compose_listing(accessor: &CatalogAccessor, params: &ListingParams) -> SiteListingView {
    let order = params.order();
    let filter = params.filter();
    let sites = or_empty("/sites", accessor.list_all(Some(order)).await);

    let items: Vec<SiteCard> = apply_filter(&sites, &filter)
        .into_iter()
        .map(SiteCard::from)
        .collect();

    SiteListingView {
        showing: items.len(),
        total: sites.len(),
        traditions: distinct_traditions(&sites),
        items,
        filter,
        order,
    }
}

/// `/sites/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct SiteDetailView {
    pub site: HeritageSite,
    pub cover_image: String,
    pub carousel: ImageCarousel,
    pub audio_languages: Vec<AudioLanguage>,
    pub has_virtual_tour: bool,
    pub has_audio_guides: bool,
    pub contact: Option<ContactInfo>,
}

impl From<HeritageSite> for SiteDetailView {
    fn from(site: HeritageSite) -> Self {
        Self {
            cover_image: site.cover_image().to_string(),
            carousel: ImageCarousel::new(site.images.len()),
            audio_languages: AudioLanguage::available_for(&site),
            has_virtual_tour: site.has_virtual_tour(),
            has_audio_guides: site.has_audio_guides(),
            contact: site.contact_info.clone().filter(|c| !c.is_empty()),
            site,
        }
    }
}

pub async fn compose_detail(accessor: &CatalogAccessor, raw_id: &str) -> Option<SiteDetailView> {
    fetch_detail("/sites/{id}", accessor, raw_id)
        .await
        .map(SiteDetailView::from)
}
