use gompa_model::{HeritageSite, SiteId};
use serde::{Deserialize, Serialize};

use super::{SiteCard, or_empty};
use crate::catalog::{CatalogAccessor, SiteField, SitePredicate};
use crate::query::{
    CategoryFilter, MarkerPlacement, SiteFilter, apply_filter, distinct_traditions, place_markers,
};

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tradition: Option<String>,
    /// Kept as text so a malformed width falls back instead of rejecting
    /// the whole query.
    #[serde(default)]
    pub viewport_width: Option<String>,
    /// Site whose detail card is open.
    #[serde(default)]
    pub selected: Option<String>,
}

impl MapParams {
    pub fn filter(&self) -> SiteFilter {
        SiteFilter::new(
            self.search.clone().unwrap_or_default(),
            CategoryFilter::from_param(self.tradition.as_deref()),
        )
    }

    /// Requested width when it parses to a finite positive number, otherwise
    /// `default`.
    pub fn viewport_width(&self, default: f64) -> f64 {
        self.viewport_width
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(default)
    }
}

/// Sidebar entry for one visible site.
#[derive(Debug, Clone, Serialize)]
pub struct MapSiteItem {
    #[serde(flatten)]
    pub card: SiteCard,
    /// `"lat, lon"` to four decimals; absent unless both are set.
    pub coordinates: Option<String>,
    pub visiting_hours: Option<String>,
    pub entry_fee: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub items: Vec<MapSiteItem>,
    pub markers: Vec<MarkerPlacement>,
    pub traditions: Vec<String>,
    pub filter: SiteFilter,
    pub viewport_width: f64,
    pub selected: Option<MapSiteItem>,
}

pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}, {longitude:.4}")
}

fn item(site: &HeritageSite) -> MapSiteItem {
    MapSiteItem {
        card: SiteCard::from(site),
        coordinates: site
            .coordinates()
            .map(|(lat, lon)| format_coordinates(lat, lon)),
        visiting_hours: site.visiting_hours.clone(),
        entry_fee: site.entry_fee.clone(),
    }
}

/// `/map`: geo-tagged sites, filtered like the listing, with marker positions.
pub async fn compose_map(
    accessor: &CatalogAccessor,
    params: &MapParams,
    default_viewport_width: f64,
) -> MapView {
    let sites = or_empty(
        "/map",
        accessor
            .list_where([
                SitePredicate::NotNull(SiteField::Latitude),
                SitePredicate::NotNull(SiteField::Longitude),
            ])
            .await,
    );

    let filter = params.filter();
    let viewport_width = params.viewport_width(default_viewport_width);

    let visible = apply_filter(&sites, &filter);
    let markers = place_markers(visible.iter().copied(), viewport_width);
    let items: Vec<MapSiteItem> = visible.iter().copied().map(item).collect();

    let selected_id = params
        .selected
        .as_deref()
        .and_then(|raw| raw.parse::<SiteId>().ok());
    let selected = selected_id.and_then(|id| items.iter().find(|i| i.card.id == id).cloned());

    MapView {
        traditions: distinct_traditions(&sites),
        items,
        markers,
        filter,
        viewport_width,
        selected,
    }
}
