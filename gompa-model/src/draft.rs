use crate::site::{AudioGuides, ContactInfo, HeritageSite};

/// Store-ready payload for creating or replacing a site.
///
/// Produced by validating an admin form; `name` and `location` are already
/// known to be non-empty when a draft exists.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteDraft {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<i32>,
    pub founded_year: Option<i32>,
    pub tradition: Option<String>,
    pub main_deity: Option<String>,
    pub significance: Option<String>,
    pub visiting_hours: Option<String>,
    pub entry_fee: Option<String>,
    pub contact_info: Option<ContactInfo>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Vec<String>,
    pub virtual_tour_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub audio_guide_urls: AudioGuides,
}

impl From<&HeritageSite> for SiteDraft {
    fn from(site: &HeritageSite) -> Self {
        SiteDraft {
            name: site.name.clone(),
            description: site.description.clone(),
            location: site.location.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            altitude: site.altitude,
            founded_year: site.founded_year,
            tradition: site.tradition.clone(),
            main_deity: site.main_deity.clone(),
            significance: site.significance.clone(),
            visiting_hours: site.visiting_hours.clone(),
            entry_fee: site.entry_fee.clone(),
            contact_info: site.contact_info.clone(),
            images: site.images.clone(),
            virtual_tour_url: site.virtual_tour_url.clone(),
            audio_guide_urls: site.audio_guide_urls.clone(),
        }
    }
}
