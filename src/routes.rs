use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header::CONTENT_TYPE, Method};
use axum::response::Html;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::error::ApiError;
use crate::model::{Favorite, Recipe};
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// POST /api/favorites body. thumb and source are optional.
#[derive(Deserialize)]
pub struct SaveFavorite {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumb: String,
    #[serde(default)]
    source: String,
}

/// PUT /api/favorites/{id} body.
#[derive(Deserialize)]
pub struct RenameFavorite {
    #[serde(default)]
    title: String,
}

/// Assemble the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index_handler))
        .route("/api/search", get(search_handler))
        .route("/api/random", get(random_handler))
        .route(
            "/api/favorites",
            get(list_favorites_handler).post(save_favorite_handler),
        )
        .route(
            "/api/favorites/{id}",
            put(rename_favorite_handler).delete(remove_favorite_handler),
        )
        .layer(cors)
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let results = state
        .catalog
        .search(&params.q)
        .await
        .map_err(|e| ApiError::upstream("search failed", e))?;

    Ok(Json(results))
}

async fn random_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<Recipe>>, ApiError> {
    let pick = state
        .catalog
        .random()
        .await
        .map_err(|e| ApiError::upstream("random failed", e))?;

    Ok(Json(pick))
}

async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let favorites = state
        .store
        .list()
        .map_err(|e| ApiError::storage("read failed", e))?;

    Ok(Json(favorites))
}

async fn save_favorite_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveFavorite>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .upsert(&body.id, &body.title, &body.thumb, &body.source)
        .map_err(|e| ApiError::storage("save failed", e))?;

    Ok(Json(json!({ "ok": true })))
}

async fn rename_favorite_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<RenameFavorite>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .update_title(&id, &body.title)
        .map_err(|e| ApiError::storage("update failed", e))?;

    Ok(Json(json!({ "ok": true })))
}

async fn remove_favorite_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .remove(&id)
        .map_err(|e| ApiError::storage("delete failed", e))?;

    Ok(Json(json!({ "ok": true })))
}
