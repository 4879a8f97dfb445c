use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::ids::SiteId;

/// Served in place of a cover image when a site has no images.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A single catalog entry (one monastery or comparable heritage site).
///
/// `created_at`/`updated_at` are owned by the backing store; the application
/// never sets them itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeritageSite {
    pub id: SiteId,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres above sea level.
    pub altitude: Option<i32>,
    pub founded_year: Option<i32>,
    pub tradition: Option<String>,
    pub main_deity: Option<String>,
    pub significance: Option<String>,
    pub visiting_hours: Option<String>,
    pub entry_fee: Option<String>,
    pub contact_info: Option<ContactInfo>,
    /// Ordered image URLs; the first one is the cover.
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Vec<String>,
    pub virtual_tour_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub audio_guide_urls: AudioGuides,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HeritageSite {
    /// Cover image URL, falling back to the placeholder.
    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn has_virtual_tour(&self) -> bool {
        self.virtual_tour_url.is_some()
    }

    pub fn has_audio_guides(&self) -> bool {
        !self.audio_guide_urls.is_empty()
    }

    /// Both the description and the significance have been written.
    pub fn has_complete_profile(&self) -> bool {
        self.description.is_some() && self.significance.is_some()
    }

    /// `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn tradition(&self) -> Option<&str> {
        self.tradition.as_deref()
    }
}

/// Contact details published for a site. Only phone and email are ever read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactInfo {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub phone: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub email: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none()
    }
}

/// Audio guide URLs keyed by language code.
///
/// An empty map means the site has no audio guide; it is still a valid value
/// rather than a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AudioGuides(pub BTreeMap<String, String>);

impl AudioGuides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn url_for(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    pub fn insert(
        &mut self,
        language: impl Into<String>,
        url: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(language.into(), url.into())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AudioGuides {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        AudioGuides(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
