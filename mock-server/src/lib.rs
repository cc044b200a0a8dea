//! In-process stand-in for the Contentful delivery API.
//!
//! Serves a fixed space under `/spaces/{space_id}/...` with the same
//! envelope, pagination fields and error statuses the real service uses.
//! Requests must carry `Authorization: Bearer <token>`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub mod fixtures;

pub use fixtures::{ACCESS_TOKEN, SPACE_ID};

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Resources of one space, kept as raw JSON exactly as served.
#[derive(Debug, Clone)]
pub struct Store {
    pub space_id: String,
    pub space: Value,
    pub content_types: Vec<Value>,
    pub entries: Vec<Value>,
    pub assets: Vec<Value>,
}

impl Store {
    pub fn sample() -> Self {
        fixtures::sample()
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<Store>,
    access_token: Arc<str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub content_type: Option<String>,
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Router over the sample space.
pub fn app(access_token: &str) -> Router {
    app_with(Store::sample(), access_token)
}

pub fn app_with(store: Store, access_token: &str) -> Router {
    let state = AppState {
        store: Arc::new(store),
        access_token: Arc::from(access_token),
    };
    Router::new()
        .route("/spaces/{space_id}", get(get_space))
        .route("/spaces/{space_id}/content_types", get(list_content_types))
        .route("/spaces/{space_id}/content_types/{id}", get(get_content_type))
        .route("/spaces/{space_id}/entries", get(list_entries))
        .route("/spaces/{space_id}/entries/{id}", get(get_entry))
        .route("/spaces/{space_id}/assets", get(list_assets))
        .route("/spaces/{space_id}/assets/{id}", get(get_asset))
        .with_state(state)
}

pub async fn run(listener: TcpListener, access_token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(access_token)).await
}

async fn get_space(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(space_id): Path<String>,
) -> Reply {
    authorize(&state, &headers, &space_id)?;
    Ok(Json(state.store.space.clone()))
}

async fn list_content_types(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(space_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Reply {
    authorize(&state, &headers, &space_id)?;
    Ok(Json(page(&state.store.content_types, &params, false)))
}

async fn get_content_type(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((space_id, id)): Path<(String, String)>,
) -> Reply {
    authorize(&state, &headers, &space_id)?;
    find(&state.store.content_types, &id)
}

async fn list_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(space_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Reply {
    authorize(&state, &headers, &space_id)?;
    Ok(Json(page(&state.store.entries, &params, true)))
}

async fn get_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((space_id, id)): Path<(String, String)>,
) -> Reply {
    authorize(&state, &headers, &space_id)?;
    find(&state.store.entries, &id)
}

async fn list_assets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(space_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Reply {
    authorize(&state, &headers, &space_id)?;
    Ok(Json(page(&state.store.assets, &params, false)))
}

async fn get_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((space_id, id)): Path<(String, String)>,
) -> Reply {
    authorize(&state, &headers, &space_id)?;
    find(&state.store.assets, &id)
}

/// Token is checked before the space so a bad token never reveals whether a
/// space exists.
fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    space_id: &str,
) -> Result<(), (StatusCode, Json<Value>)> {
    let expected = format!("Bearer {}", state.access_token);
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        debug!(space_id, "rejecting request with bad access token");
        return Err(error(
            StatusCode::UNAUTHORIZED,
            "AccessTokenInvalid",
            "The access token you sent could not be found or is invalid.",
        ));
    }
    if space_id != state.store.space_id {
        return Err(not_found());
    }
    Ok(())
}

fn find(items: &[Value], id: &str) -> Reply {
    items
        .iter()
        .find(|item| item["sys"]["id"] == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

/// Collection envelope. `total` counts every match, not just this page.
fn page(items: &[Value], params: &ListParams, filter_by_type: bool) -> Value {
    let matching: Vec<&Value> = items
        .iter()
        .filter(|item| match (&params.content_type, filter_by_type) {
            (Some(ct), true) => item["sys"]["contentType"]["sys"]["id"] == ct.as_str(),
            _ => true,
        })
        .collect();
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let page: Vec<Value> = matching.iter().skip(skip).take(limit).map(|v| (*v).clone()).collect();
    json!({
        "sys": {"type": "Array"},
        "total": matching.len(),
        "skip": skip,
        "limit": limit,
        "items": page
    })
}

fn not_found() -> (StatusCode, Json<Value>) {
    error(
        StatusCode::NOT_FOUND,
        "NotFound",
        "The resource could not be found.",
    )
}

fn error(status: StatusCode, id: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "sys": {"type": "Error", "id": id},
            "message": message
        })),
    )
}
