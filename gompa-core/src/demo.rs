//! Seed catalog for `--demo` runs without a database.

use chrono::{Duration, TimeZone, Utc};
use gompa_model::{AudioGuides, ContactInfo, HeritageSite, SiteId};

use crate::database::InMemoryCatalogRepository;

/// Rumtek, Pemayangtse and Enchey with enough data to exercise every page.
pub fn demo_sites() -> Vec<HeritageSite> {
    let seeded_at = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    let rumtek = HeritageSite {
        id: SiteId::new(),
        name: "Rumtek Monastery".into(),
        description: Some(
            "The largest monastery in Sikkim and seat-in-exile of the Gyalwang Karmapa.".into(),
        ),
        location: "East Sikkim".into(),
        latitude: Some(27.2886),
        longitude: Some(88.5611),
        altitude: Some(1547),
        founded_year: Some(1966),
        tradition: Some("Kagyu".into()),
        main_deity: Some("Shakyamuni Buddha".into()),
        significance: Some("Seat of Karmapa".into()),
        visiting_hours: Some("6:00 AM - 6:00 PM".into()),
        entry_fee: Some("₹10".into()),
        contact_info: Some(ContactInfo {
            phone: Some("+91 3592 252 329".into()),
            email: None,
        }),
        images: vec![
            "/rumtek-monastery-with-golden-roofs-and-prayer-flag.jpg".into(),
            "/placeholder.svg?height=600&width=900".into(),
        ],
        virtual_tour_url: Some("/tours/rumtek/index.html".into()),
        audio_guide_urls: [
            ("en", "/audio/rumtek-en.mp3"),
            ("hi", "/audio/rumtek-hi.mp3"),
            ("bo", "/audio/rumtek-bo.mp3"),
        ]
        .into_iter()
        .collect(),
        created_at: seeded_at,
        updated_at: seeded_at,
    };

    let pemayangtse = HeritageSite {
        id: SiteId::new(),
        name: "Pemayangtse Monastery".into(),
        description: Some(
            "One of the oldest and premier monasteries of Sikkim, head monastery of Nyingma order."
                .into(),
        ),
        location: "West Sikkim".into(),
        latitude: Some(27.3047),
        longitude: Some(88.2517),
        altitude: Some(2085),
        founded_year: Some(1705),
        tradition: Some("Nyingma".into()),
        main_deity: Some("Guru Padmasambhava".into()),
        significance: Some("Premier Nyingma Monastery".into()),
        visiting_hours: Some("7:00 AM - 5:00 PM".into()),
        entry_fee: Some("₹20".into()),
        contact_info: None,
        images: vec!["/ancient-pemayangtse-monastery-on-hilltop-with-moun.jpg".into()],
        virtual_tour_url: None,
        audio_guide_urls: [("en", "/audio/pemayangtse-en.mp3"), ("ne", "/audio/pemayangtse-ne.mp3")]
            .into_iter()
            .collect(),
        created_at: seeded_at + Duration::minutes(1),
        updated_at: seeded_at + Duration::minutes(1),
    };

    let enchey = HeritageSite {
        id: SiteId::new(),
        name: "Enchey Monastery".into(),
        description: Some(
            "Located on a hilltop above Gangtok, famous for its annual Cham dance festival.".into(),
        ),
        location: "Gangtok".into(),
        latitude: Some(27.3358),
        longitude: Some(88.6192),
        altitude: Some(1839),
        founded_year: Some(1909),
        tradition: Some("Nyingma".into()),
        main_deity: None,
        significance: Some("Cham Dance Festival".into()),
        visiting_hours: None,
        entry_fee: None,
        contact_info: None,
        images: vec!["/enchey-monastery-with-traditional-architecture-and.jpg".into()],
        virtual_tour_url: Some("/tours/enchey/index.html".into()),
        audio_guide_urls: AudioGuides::new(),
        created_at: seeded_at + Duration::minutes(2),
        updated_at: seeded_at + Duration::minutes(2),
    };

    vec![rumtek, pemayangtse, enchey]
}

pub fn demo_repository() -> InMemoryCatalogRepository {
    InMemoryCatalogRepository::new(demo_sites())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CatalogStats;

    #[test]
    fn demo_catalog_covers_every_page() {
        let sites = demo_sites();
        let stats = CatalogStats::derive(&sites);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.with_virtual_tour, 2);
        assert_eq!(stats.with_audio_guides, 2);
        assert_eq!(stats.complete_profiles, 3);
        assert!(sites.iter().all(|s| s.coordinates().is_some()));
    }
}
