use gompa_model::HeritageSite;
use serde::Serialize;

use super::{SiteCard, fetch_detail, or_empty};
use crate::catalog::{CatalogAccessor, SiteField, SitePredicate};
use crate::presentation::{AudioChapter, AudioGuidePlayer, AudioLanguage, CHAPTERS};

#[derive(Debug, Clone, Serialize)]
pub struct AudioListingView {
    pub items: Vec<SiteCard>,
    pub total: usize,
}

/// `/audio-guides`: sites with at least one audio language.
pub async fn compose_listing(accessor: &CatalogAccessor) -> AudioListingView {
    let sites = or_empty(
        "/audio-guides",
        accessor
            .list_where([SitePredicate::NotEmpty(SiteField::AudioGuideUrls)])
            .await,
    );
    let items: Vec<SiteCard> = sites.iter().map(SiteCard::from).collect();
    AudioListingView {
        total: items.len(),
        items,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioGuideView {
    pub site: HeritageSite,
    pub languages: Vec<AudioLanguage>,
    pub chapters: Vec<AudioChapter>,
    /// Initial player state; `duration_label` is pre-rendered as `m:ss`.
    pub player: AudioGuidePlayer,
    pub duration_label: String,
}

/// `/audio-guides/{id}`.
pub async fn compose_guide(accessor: &CatalogAccessor, raw_id: &str) -> Option<AudioGuideView> {
    let site = fetch_detail("/audio-guides/{id}", accessor, raw_id).await?;
    let player = AudioGuidePlayer::default();
    Some(AudioGuideView {
        languages: AudioLanguage::available_for(&site),
        chapters: CHAPTERS.to_vec(),
        duration_label: player.duration_label(),
        player,
        site,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fixtures::{accessor, broken_accessor};

    #[tokio::test]
    async fn listing_skips_sites_without_languages() {
        let view = compose_listing(&accessor()).await;
        assert_eq!(view.total, 1);
        assert_eq!(view.items[0].audio_language_count, 2);
    }

    #[tokio::test]
    async fn listing_degrades_to_empty() {
        assert!(compose_listing(&broken_accessor()).await.items.is_empty());
    }

    #[tokio::test]
    async fn guide_view_has_chapters_and_default_player() {
        let accessor = accessor();
        let id = compose_listing(&accessor).await.items[0].id.to_string();

        let view = compose_guide(&accessor, &id).await.expect("found");
        assert_eq!(view.chapters.len(), 5);
        assert_eq!(view.chapters[2].title, "Religious Significance");
        assert_eq!(view.player.duration(), 1260);
        assert_eq!(view.duration_label, "21:00");
        assert_eq!(view.languages[1].name, "English");
    }

    #[tokio::test]
    async fn fetch_failure_is_not_found() {
        let id = gompa_model::SiteId::new().to_string();
        assert!(compose_guide(&broken_accessor(), &id).await.is_none());
    }
}
