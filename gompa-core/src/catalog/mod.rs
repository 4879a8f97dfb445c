//! Declarative catalog queries and the accessor every page composes through.

pub mod accessor;

pub use accessor::{CatalogAccessor, Lookup};

use gompa_model::HeritageSite;
use serde::{Deserialize, Serialize};

/// Columns a predicate may reference. Anything else cannot be expressed, so
/// adapters only ever see whitelisted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteField {
    Name,
    Description,
    Location,
    Latitude,
    Longitude,
    Tradition,
    Significance,
    Images,
    VirtualTourUrl,
    AudioGuideUrls,
}

impl SiteField {
    pub fn column(self) -> &'static str {
        match self {
            SiteField::Name => "name",
            SiteField::Description => "description",
            SiteField::Location => "location",
            SiteField::Latitude => "latitude",
            SiteField::Longitude => "longitude",
            SiteField::Tradition => "tradition",
            SiteField::Significance => "significance",
            SiteField::Images => "images",
            SiteField::VirtualTourUrl => "virtual_tour_url",
            SiteField::AudioGuideUrls => "audio_guide_urls",
        }
    }

    /// Value of the field rendered as text, `None` when the field is null.
    ///
    /// Collection fields are never null; they render as their element count.
    pub fn text_of(self, site: &HeritageSite) -> Option<String> {
        match self {
            SiteField::Name => Some(site.name.clone()),
            SiteField::Description => site.description.clone(),
            SiteField::Location => Some(site.location.clone()),
            SiteField::Latitude => site.latitude.map(|v| v.to_string()),
            SiteField::Longitude => site.longitude.map(|v| v.to_string()),
            SiteField::Tradition => site.tradition.clone(),
            SiteField::Significance => site.significance.clone(),
            SiteField::Images => Some(site.images.len().to_string()),
            SiteField::VirtualTourUrl => site.virtual_tour_url.clone(),
            SiteField::AudioGuideUrls => Some(site.audio_guide_urls.len().to_string()),
        }
    }

    fn is_null(self, site: &HeritageSite) -> bool {
        match self {
            SiteField::Latitude => site.latitude.is_none(),
            SiteField::Longitude => site.longitude.is_none(),
            SiteField::Images | SiteField::AudioGuideUrls => false,
            other => other.text_of(site).is_none(),
        }
    }

    fn is_empty(self, site: &HeritageSite) -> bool {
        match self {
            SiteField::Images => site.images.is_empty(),
            SiteField::AudioGuideUrls => site.audio_guide_urls.is_empty(),
            SiteField::Latitude | SiteField::Longitude => self.is_null(site),
            other => other.text_of(site).is_none_or(|text| text.is_empty()),
        }
    }
}

/// A single condition on a catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "args", rename_all = "snake_case")]
pub enum SitePredicate {
    NotNull(SiteField),
    /// Non-null and, for text and collection fields, non-empty.
    NotEmpty(SiteField),
    Equals(SiteField, String),
}

impl SitePredicate {
    pub fn matches(&self, site: &HeritageSite) -> bool {
        match self {
            SitePredicate::NotNull(field) => !field.is_null(site),
            SitePredicate::NotEmpty(field) => !field.is_empty(site),
            SitePredicate::Equals(field, expected) => {
                field.text_of(site).as_deref() == Some(expected.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteOrder {
    #[default]
    NameAscending,
    CreatedDescending,
}

impl SiteOrder {
    /// Parses the `order` query parameter: `name` or `recent`.
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SiteOrder::NameAscending),
            "recent" => Some(SiteOrder::CreatedDescending),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            SiteOrder::NameAscending => "name",
            SiteOrder::CreatedDescending => "recent",
        }
    }

    /// Sorts in place the same way the SQL adapter orders rows.
    pub fn sort(self, sites: &mut [HeritageSite]) {
        match self {
            SiteOrder::NameAscending => sites.sort_by(|a, b| a.name.cmp(&b.name)),
            SiteOrder::CreatedDescending => {
                sites.sort_by(|a, b| b.created_at.cmp(&a.created_at))
            }
        }
    }
}

/// Conjunction of predicates plus an ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteQuery {
    pub predicates: Vec<SitePredicate>,
    pub order: SiteOrder,
}

impl SiteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: SitePredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn ordered_by(mut self, order: SiteOrder) -> Self {
        self.order = order;
        self
    }

    pub fn matches(&self, site: &HeritageSite) -> bool {
        self.predicates.iter().all(|p| p.matches(site))
    }
}
