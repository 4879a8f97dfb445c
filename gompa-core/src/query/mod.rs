//! View filter and derivation layer.
//!
//! Everything here is a pure function of its input slice: no I/O, no shared
//! state, and every function is total (empty input yields empty or zeroed
//! output).

pub mod filtering;
pub mod geo;
pub mod stats;

pub use filtering::{CategoryFilter, SiteFilter, apply_filter, distinct_traditions};
pub use geo::{MarkerPlacement, place_markers, project};
pub use stats::{CatalogStats, TraditionShare};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use gompa_model::{AudioGuides, HeritageSite, SiteId};

    pub fn site(name: &str, location: &str, tradition: Option<&str>) -> HeritageSite {
        HeritageSite {
            id: SiteId::new(),
            name: name.into(),
            description: None,
            location: location.into(),
            latitude: None,
            longitude: None,
            altitude: None,
            founded_year: None,
            tradition: tradition.map(str::to_string),
            main_deity: None,
            significance: None,
            visiting_hours: None,
            entry_fee: None,
            contact_info: None,
            images: vec![],
            virtual_tour_url: None,
            audio_guide_urls: AudioGuides::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
