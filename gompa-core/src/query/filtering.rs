//! Client-side search and category filtering over an already-fetched list.

use gompa_model::HeritageSite;
use serde::{Deserialize, Serialize};

/// Sentinel accepted on the wire for "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Tradition(String),
}

impl CategoryFilter {
    /// `"all"` (or nothing) lifts the restriction; anything else must match a
    /// tradition exactly.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None => CategoryFilter::All,
            Some(value) if value.is_empty() || value == ALL_CATEGORIES => CategoryFilter::All,
            Some(value) => CategoryFilter::Tradition(value.to_string()),
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Tradition(t) => t,
        }
    }

    pub fn matches(&self, site: &HeritageSite) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Tradition(expected) => site.tradition() == Some(expected.as_str()),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_param())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(CategoryFilter::from_param(Some(&raw)))
    }
}

/// Search text plus category, applied as a conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: CategoryFilter,
}

impl SiteFilter {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty() && self.category == CategoryFilter::All
    }

    /// Case-insensitive substring match on name or location.
    pub fn matches_text(&self, site: &HeritageSite) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        site.name.to_lowercase().contains(&needle)
            || site.location.to_lowercase().contains(&needle)
    }

    pub fn matches(&self, site: &HeritageSite) -> bool {
        self.matches_text(site) && self.category.matches(site)
    }
}

/// Subset of `sites` passing `filter`, in input order.
pub fn apply_filter<'a>(sites: &'a [HeritageSite], filter: &SiteFilter) -> Vec<&'a HeritageSite> {
    sites.iter().filter(|site| filter.matches(site)).collect()
}

/// Each non-empty tradition once, in order of first appearance.
pub fn distinct_traditions(sites: &[HeritageSite]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for tradition in sites.iter().filter_map(HeritageSite::tradition) {
        if !tradition.is_empty() && !seen.iter().any(|t| t == tradition) {
            seen.push(tradition.to_string());
        }
    }
    seen
}
