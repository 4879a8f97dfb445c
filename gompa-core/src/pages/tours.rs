use gompa_model::HeritageSite;
use serde::Serialize;

use super::{SiteCard, fetch_detail, or_empty};
use crate::catalog::{CatalogAccessor, SiteField, SitePredicate};
use crate::presentation::{TOUR_AREAS, TourViewer};

#[derive(Debug, Clone, Serialize)]
pub struct TourListingView {
    pub items: Vec<SiteCard>,
    pub total: usize,
}

/// `/tours`: sites offering a virtual tour, name ascending.
pub async fn compose_listing(accessor: &CatalogAccessor) -> TourListingView {
    let sites = or_empty(
        "/tours",
        accessor
            .list_where([SitePredicate::NotNull(SiteField::VirtualTourUrl)])
            .await,
    );
    let items: Vec<SiteCard> = sites.iter().map(SiteCard::from).collect();
    TourListingView {
        total: items.len(),
        items,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TourView {
    pub site: HeritageSite,
    pub tour_url: Option<String>,
    pub panorama: String,
    pub areas: Vec<&'static str>,
    pub viewer: TourViewer,
}

/// `/tours/{id}`. Any existing site renders; `tour_url` is `None` when the
/// site has no tour.
pub async fn compose_tour(accessor: &CatalogAccessor, raw_id: &str) -> Option<TourView> {
    let site = fetch_detail("/tours/{id}", accessor, raw_id).await?;
    Some(TourView {
        tour_url: site.virtual_tour_url.clone(),
        panorama: site.cover_image().to_string(),
        areas: TOUR_AREAS.to_vec(),
        viewer: TourViewer::default(),
        site,
    })
}
