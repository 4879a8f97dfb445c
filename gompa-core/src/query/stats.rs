use gompa_model::HeritageSite;
use serde::Serialize;

use super::filtering::distinct_traditions;

/// Share of the catalog held by one tradition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraditionShare {
    pub tradition: String,
    pub count: usize,
    /// `count / total * 100`, one decimal place.
    pub percentage: String,
}

/// Aggregate counters shown on the admin overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub with_virtual_tour: usize,
    pub with_audio_guides: usize,
    pub complete_profiles: usize,
    pub tradition_count: usize,
    pub breakdown: Vec<TraditionShare>,
}

impl CatalogStats {
    pub fn derive(sites: &[HeritageSite]) -> Self {
        let total = sites.len();
        if total == 0 {
            return Self::default();
        }

        let traditions = distinct_traditions(sites);
        let breakdown = traditions
            .iter()
            .map(|tradition| {
                let count = sites
                    .iter()
                    .filter(|s| s.tradition() == Some(tradition.as_str()))
                    .count();
                TraditionShare {
                    tradition: tradition.clone(),
                    count,
                    percentage: format!("{:.1}", count as f64 / total as f64 * 100.0),
                }
            })
            .collect();

        Self {
            total,
            with_virtual_tour: sites.iter().filter(|s| s.has_virtual_tour()).count(),
            with_audio_guides: sites.iter().filter(|s| s.has_audio_guides()).count(),
            complete_profiles: sites.iter().filter(|s| s.has_complete_profile()).count(),
            tradition_count: traditions.len(),
            breakdown,
        }
    }
}
