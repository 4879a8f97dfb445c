//! Admin console endpoints.
//!
//! Every handler runs the admin gate before anything else. Callers that are
//! not authorized (no session, unknown session, not on the allow-list, or a
//! failing identity store) receive a `303 See Other` to the configured login
//! path instead of an error body.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use gompa_core::{
    admin::{AdminPrincipal, GateState, SiteEditor, SiteForm},
    catalog::Lookup,
    model::SiteId,
    pages,
};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    AppState,
    api::ApiResponse,
    infra::{
        auth::BearerToken,
        errors::{AppError, AppResult},
    },
};

async fn admit(state: &AppState, token: &BearerToken) -> Result<AdminPrincipal, Response> {
    match state.gate.evaluate(token.as_deref()).await {
        GateState::Authorized(principal) => Ok(principal),
        GateState::AuthenticatedNonAdmin(user) => {
            info!(user_id = %user.id, "admin request by non-admin user, redirecting to login");
            Err(Redirect::to(state.config().login_path()).into_response())
        }
        GateState::Unauthenticated => {
            debug!("unauthenticated admin request, redirecting to login");
            Err(Redirect::to(state.config().login_path()).into_response())
        }
    }
}

fn parse_site_id(raw: &str) -> AppResult<SiteId> {
    raw.parse()
        .map_err(|_| AppError::not_found("Site not found"))
}

fn read_form(payload: Result<Json<SiteForm>, JsonRejection>) -> AppResult<SiteForm> {
    payload
        .map(|Json(form)| form)
        .map_err(|rejection| AppError::new(rejection.status(), rejection.body_text()))
}

/// Dashboard: analytics counters, five most recent sites and the full list.
pub async fn dashboard_handler(State(state): State<AppState>, token: BearerToken) -> Response {
    let principal = match admit(&state, &token).await {
        Ok(principal) => principal,
        Err(redirect) => return redirect,
    };

    let view = pages::admin::compose_admin(&state.catalog, principal).await;
    Json(ApiResponse::success(view)).into_response()
}

/// Form pre-filled from the stored site, for the edit dialog.
pub async fn edit_form_handler(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
) -> AppResult<Response> {
    if let Err(redirect) = admit(&state, &token).await {
        return Ok(redirect);
    }

    let site = match state.catalog.get_by_raw_id(&id).await? {
        Lookup::Found(site) => site,
        Lookup::NotFound => return Err(AppError::not_found("Site not found")),
    };

    let mut editor = SiteEditor::default();
    editor.open_edit(&site);
    let form = editor.form().cloned().unwrap_or_default();
    Ok(Json(ApiResponse::success(form)).into_response())
}

pub async fn create_site_handler(
    State(state): State<AppState>,
    token: BearerToken,
    payload: Result<Json<SiteForm>, JsonRejection>,
) -> AppResult<Response> {
    let principal = match admit(&state, &token).await {
        Ok(principal) => principal,
        Err(redirect) => return Ok(redirect),
    };

    let mut editor = SiteEditor::creating(read_form(payload)?);
    let site = editor.submit(state.writer.as_ref()).await?;
    info!(admin_id = %principal.id(), site_id = %site.id, name = %site.name, "site created via admin console");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(site).with_message("Site created")),
    )
        .into_response())
}

pub async fn update_site_handler(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
    payload: Result<Json<SiteForm>, JsonRejection>,
) -> AppResult<Response> {
    let principal = match admit(&state, &token).await {
        Ok(principal) => principal,
        Err(redirect) => return Ok(redirect),
    };

    let id = parse_site_id(&id)?;
    let mut editor = SiteEditor::editing(id, read_form(payload)?);
    let site = editor.submit(state.writer.as_ref()).await?;
    info!(admin_id = %principal.id(), site_id = %site.id, "site updated via admin console");

    Ok(Json(ApiResponse::success(site).with_message("Site updated")).into_response())
}

pub async fn delete_site_handler(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let principal = match admit(&state, &token).await {
        Ok(principal) => principal,
        Err(redirect) => return Ok(redirect),
    };

    let id = parse_site_id(&id)?;
    if !state.writer.delete_site(id).await? {
        return Err(AppError::not_found("Site not found"));
    }
    info!(admin_id = %principal.id(), site_id = %id, "site deleted via admin console");

    Ok(Json(ApiResponse::success(json!({ "id": id })).with_message("Site deleted")).into_response())
}
