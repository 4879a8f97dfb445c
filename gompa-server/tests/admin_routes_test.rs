//! Admin console: gating, dashboard and site management.

mod common;

use axum::http::{Method, StatusCode};
use common::{ADMIN_TOKEN, VISITOR_TOKEN, build_test_app};
use gompa_server::api::routes::{utils::replace_param, v1};
use serde_json::json;

fn dubdi() -> serde_json::Value {
    json!({
        "name": "Dubdi Monastery",
        "location": "Yuksom",
        "tradition": "Nyingma",
        "latitude": "27.3667",
        "longitude": "88.2333",
        "founded_year": "1701",
        "images": "/images/dubdi-1.jpg\n/images/dubdi-2.jpg",
        "audio_guide_urls": "EN=/audio/dubdi-en.mp3"
    })
}

#[tokio::test]
async fn test_admin_routes_redirect_unauthorized_callers() {
    let app = build_test_app();
    let site = replace_param(v1::admin::SITE, "{id}", app.site_id("Rumtek Monastery").to_string());

    let requests = [
        (Method::GET, v1::admin::DASHBOARD.to_string()),
        (Method::POST, v1::admin::SITES.to_string()),
        (Method::GET, site.clone()),
        (Method::PUT, site.clone()),
        (Method::DELETE, site),
    ];

    for (method, uri) in requests {
        for token in [None, Some("unknown-token"), Some(VISITOR_TOKEN)] {
            let body = matches!(method, Method::POST | Method::PUT).then(dubdi);
            let response = app.send(method.clone(), &uri, token, body).await;
            assert_eq!(
                response.status,
                StatusCode::SEE_OTHER,
                "{method} {uri} with {token:?}"
            );
            assert_eq!(response.location(), Some("/auth/login"));
        }
    }

    assert_eq!(app.repo.len(), 3);
}

#[tokio::test]
async fn test_invalid_body_from_non_admin_still_redirects() {
    let app = build_test_app();
    let response = app
        .send(
            Method::POST,
            v1::admin::SITES,
            Some(VISITOR_TOKEN),
            Some(json!("not a form")),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/auth/login"));
}

#[tokio::test]
async fn test_revoked_session_loses_access() {
    let app = build_test_app();
    assert!(app.identity.revoke(ADMIN_TOKEN));

    let response = app
        .send(Method::GET, v1::admin::DASHBOARD, Some(ADMIN_TOKEN), None)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_dashboard_summarizes_catalog() {
    let app = build_test_app();
    let response = app
        .send(Method::GET, v1::admin::DASHBOARD, Some(ADMIN_TOKEN), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["principal"]["user"]["email"], "curator@gompa.example");
    assert_eq!(data["stats"]["total"], 3);
    assert_eq!(data["stats"]["with_virtual_tour"], 1);
    assert_eq!(data["stats"]["with_audio_guides"], 2);
    assert_eq!(data["stats"]["complete_profiles"], 1);
    assert_eq!(data["stats"]["tradition_count"], 2);
    assert_eq!(
        response.names("/data/recent"),
        ["Enchey Monastery", "Pemayangtse Monastery", "Rumtek Monastery"]
    );
}

#[tokio::test]
async fn test_create_site_persists_record() {
    let app = build_test_app();
    let response = app
        .send(Method::POST, v1::admin::SITES, Some(ADMIN_TOKEN), Some(dubdi()))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Site created");
    let data = &response.body["data"];
    assert_eq!(data["name"], "Dubdi Monastery");
    assert_eq!(data["founded_year"], 1701);
    assert_eq!(data["images"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["audio_guide_urls"]["en"], "/audio/dubdi-en.mp3");

    assert_eq!(app.repo.len(), 4);
    let listing = app.get(v1::sites::COLLECTION).await;
    assert!(
        listing
            .names("/data/items")
            .contains(&"Dubdi Monastery".to_string())
    );
}

#[tokio::test]
async fn test_create_site_rejects_invalid_form() {
    let app = build_test_app();
    let response = app
        .send(
            Method::POST,
            v1::admin::SITES,
            Some(ADMIN_TOKEN),
            Some(json!({ "name": "  ", "location": "Yuksom", "latitude": "north" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = response.body["error"]["details"]["fields"]
        .as_array()
        .expect("field errors")
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"latitude"));
    assert_eq!(app.repo.len(), 3);
}

#[tokio::test]
async fn test_malformed_json_is_rejected_for_admin() {
    let app = build_test_app();
    let response = app
        .send(
            Method::POST,
            v1::admin::SITES,
            Some(ADMIN_TOKEN),
            Some(json!("not a form")),
        )
        .await;

    assert!(response.status.is_client_error());
    assert_eq!(app.repo.len(), 3);
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let app = build_test_app();
    let id = app.site_id("Rumtek Monastery");
    let response = app
        .send(
            Method::GET,
            &replace_param(v1::admin::SITE, "{id}", id.to_string()),
            Some(ADMIN_TOKEN),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let form = &response.body["data"];
    assert_eq!(form["name"], "Rumtek Monastery");
    assert_eq!(form["location"], "East Sikkim");
    assert_eq!(form["images"], "/images/rumtek-1.jpg\n/images/rumtek-2.jpg");
    assert_eq!(form["virtual_tour_url"], "/tours/rumtek/index.html");
}

#[tokio::test]
async fn test_update_site_replaces_fields() {
    let app = build_test_app();
    let id = app.site_id("Enchey Monastery");
    let uri = replace_param(v1::admin::SITE, "{id}", id.to_string());

    let response = app
        .send(
            Method::PUT,
            &uri,
            Some(ADMIN_TOKEN),
            Some(json!({
                "name": "Enchey Monastery",
                "location": "Gangtok, East Sikkim",
                "tradition": "Nyingma",
                "visiting_hours": "6:00 AM - 4:00 PM"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Site updated");
    assert_eq!(response.body["data"]["location"], "Gangtok, East Sikkim");

    let stored = app
        .repo
        .snapshot()
        .into_iter()
        .find(|site| site.id == id)
        .expect("stored");
    assert_eq!(stored.visiting_hours.as_deref(), Some("6:00 AM - 4:00 PM"));
    assert!(stored.updated_at > stored.created_at);
}

#[tokio::test]
async fn test_update_unknown_site_is_not_found() {
    let app = build_test_app();
    let uri = replace_param(v1::admin::SITE, "{id}", uuid::Uuid::new_v4().to_string());

    let response = app
        .send(Method::PUT, &uri, Some(ADMIN_TOKEN), Some(dubdi()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.repo.len(), 3);
}

#[tokio::test]
async fn test_delete_site_removes_record() {
    let app = build_test_app();
    let id = app.site_id("Pemayangtse Monastery");
    let uri = replace_param(v1::admin::SITE, "{id}", id.to_string());

    let response = app
        .send(Method::DELETE, &uri, Some(ADMIN_TOKEN), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Site deleted");
    assert_eq!(response.body["data"]["id"], id.to_string());
    assert_eq!(app.repo.len(), 2);

    let again = app
        .send(Method::DELETE, &uri, Some(ADMIN_TOKEN), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let detail = app
        .get(&replace_param(v1::sites::ITEM, "{id}", id.to_string()))
        .await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_admin_ids_are_not_found() {
    let app = build_test_app();
    let uri = replace_param(v1::admin::SITE, "{id}", "rumtek");

    for method in [Method::GET, Method::DELETE] {
        let response = app.send(method, &uri, Some(ADMIN_TOKEN), None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
