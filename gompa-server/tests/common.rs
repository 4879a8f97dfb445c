// Shared by several test crates; not every helper is used in each.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use gompa_core::{
    database::{InMemoryAllowList, InMemoryCatalogRepository, InMemoryIdentityProvider},
    model::{AudioGuides, HeritageSite, SessionUser, SiteId},
};
use gompa_server::{AppState, create_app, infra::config::Config};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "admin-session-token";
pub const VISITOR_TOKEN: &str = "visitor-session-token";

#[derive(Debug)]
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryCatalogRepository>,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub allow_list: Arc<InMemoryAllowList>,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn site(name: &str, location: &str, tradition: &str, age_days: i64) -> HeritageSite {
    let created = Utc::now() - Duration::days(age_days);
    HeritageSite {
        id: SiteId::new(),
        name: name.into(),
        description: None,
        location: location.into(),
        latitude: None,
        longitude: None,
        altitude: None,
        founded_year: None,
        tradition: Some(tradition.into()),
        main_deity: None,
        significance: None,
        visiting_hours: None,
        entry_fee: None,
        contact_info: None,
        images: Vec::new(),
        virtual_tour_url: None,
        audio_guide_urls: AudioGuides::new(),
        created_at: created,
        updated_at: created,
    }
}

/// Rumtek (tour, audio, coordinates), Pemayangtse (audio, coordinates) and
/// Enchey (bare), oldest first.
pub fn seed_catalog() -> Vec<HeritageSite> {
    let mut rumtek = site("Rumtek Monastery", "East Sikkim", "Kagyu", 3);
    rumtek.latitude = Some(27.2886);
    rumtek.longitude = Some(88.5611);
    rumtek.virtual_tour_url = Some("/tours/rumtek/index.html".into());
    rumtek.audio_guide_urls = [("en", "/audio/rumtek-en.mp3"), ("bo", "/audio/rumtek-bo.mp3")]
        .into_iter()
        .collect();
    rumtek.images = vec!["/images/rumtek-1.jpg".into(), "/images/rumtek-2.jpg".into()];
    rumtek.description = Some("Seat of the Karmapa in exile.".into());
    rumtek.significance = Some("Largest monastery in Sikkim.".into());

    let mut pemayangtse = site("Pemayangtse Monastery", "West Sikkim", "Nyingma", 2);
    pemayangtse.latitude = Some(27.3047);
    pemayangtse.longitude = Some(88.2517);
    pemayangtse.visiting_hours = Some("7:00 AM - 5:00 PM".into());
    pemayangtse.audio_guide_urls = [("en", "/audio/pemayangtse-en.mp3")].into_iter().collect();

    let enchey = site("Enchey Monastery", "Gangtok", "Nyingma", 1);

    vec![rumtek, pemayangtse, enchey]
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(seed_catalog())
}

pub fn build_test_app_with(sites: Vec<HeritageSite>) -> TestApp {
    let repo = Arc::new(InMemoryCatalogRepository::new(sites));
    let identity = Arc::new(InMemoryIdentityProvider::default());
    let allow_list = Arc::new(InMemoryAllowList::default());

    let admin = SessionUser {
        id: Uuid::new_v4(),
        email: Some("curator@gompa.example".into()),
    };
    identity.insert_session(ADMIN_TOKEN, admin.clone());
    allow_list.allow(admin.id);

    let visitor = SessionUser {
        id: Uuid::new_v4(),
        email: Some("visitor@gompa.example".into()),
    };
    identity.insert_session(VISITOR_TOKEN, visitor);

    let state = AppState::in_memory(
        Arc::new(Config::default()),
        repo.clone(),
        identity.clone(),
        allow_list.clone(),
    );

    TestApp {
        router: create_app(state),
        repo,
        identity,
        allow_list,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub fn site_id(&self, name: &str) -> SiteId {
        self.repo
            .snapshot()
            .into_iter()
            .find(|site| site.name == name)
            .map(|site| site.id)
            .expect("seeded site")
    }
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn names(&self, pointer: &str) -> Vec<String> {
        self.body
            .pointer(pointer)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
