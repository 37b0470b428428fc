use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use recipe_shelf::{router, AppState, CatalogClient, FavoritesStore};

/// App wired to a throwaway in-memory database. The catalog client points at
/// an unroutable address; favorites tests never touch it.
fn test_app() -> Router {
    let state = Arc::new(AppState {
        catalog: CatalogClient::new("http://127.0.0.1:9"),
        store: FavoritesStore::open_in_memory().unwrap(),
    });
    router(state)
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_favorite(payload: Value) -> Request<Body> {
    Request::post("/api/favorites")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn put_favorite(id: &str, payload: Value) -> Request<Body> {
    Request::put(format!("/api/favorites/{id}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_save_then_list_roundtrip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_favorite(
            json!({"id": "52772", "title": "Teriyaki Chicken"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let response = app.oneshot(get("/api/favorites")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let favorites = body_json(response).await;
    let favorites = favorites.as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["id"], "52772");
    assert_eq!(favorites[0]["title"], "Teriyaki Chicken");
    assert_eq!(favorites[0]["thumb"], "");
    assert_eq!(favorites[0]["source"], "");
}

#[tokio::test]
async fn test_save_requires_id_and_title() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_favorite(json!({"id": "52772"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "id and title required"})
    );

    let response = app
        .clone()
        .oneshot(post_favorite(json!({"title": "No Id"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/api/favorites")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_resave_overwrites_fields_not_position() {
    let app = test_app();

    app.clone()
        .oneshot(post_favorite(json!({"id": "1", "title": "First"})))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    app.clone()
        .oneshot(post_favorite(json!({"id": "2", "title": "Second"})))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;

    // Re-saving id 1 changes its title but not its place in the list.
    app.clone()
        .oneshot(post_favorite(
            json!({"id": "1", "title": "First Edited", "thumb": "t.jpg"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/favorites")).await.unwrap();
    let favorites = body_json(response).await;
    let favorites = favorites.as_array().unwrap();

    assert_eq!(favorites.len(), 2);
    assert_eq!(favorites[0]["id"], "2");
    assert_eq!(favorites[1]["id"], "1");
    assert_eq!(favorites[1]["title"], "First Edited");
    assert_eq!(favorites[1]["thumb"], "t.jpg");
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let app = test_app();

    for (id, title) in [("1", "oldest"), ("2", "middle"), ("3", "newest")] {
        app.clone()
            .oneshot(post_favorite(json!({"id": id, "title": title})))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let response = app.oneshot(get("/api/favorites")).await.unwrap();
    let favorites = body_json(response).await;
    let titles: Vec<&str> = favorites
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_update_title_roundtrip() {
    let app = test_app();

    app.clone()
        .oneshot(post_favorite(
            json!({"id": "52772", "title": "Teriyaki Chicken"}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(put_favorite("52772", json!({"title": "New Name"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let response = app.oneshot(get("/api/favorites")).await.unwrap();
    let favorites = body_json(response).await;
    let favorites = favorites.as_array().unwrap();

    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["id"], "52772");
    assert_eq!(favorites[0]["title"], "New Name");
}

#[tokio::test]
async fn test_update_requires_title() {
    let app = test_app();

    let response = app
        .oneshot(put_favorite("52772", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "title required"}));
}

#[tokio::test]
async fn test_update_unknown_id_reports_success() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(put_favorite("does-not-exist", json!({"title": "Whatever"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/favorites")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_delete_roundtrip() {
    let app = test_app();

    app.clone()
        .oneshot(post_favorite(
            json!({"id": "52772", "title": "Teriyaki Chicken"}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::delete("/api/favorites/52772")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let response = app.oneshot(get("/api/favorites")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_delete_unknown_id_reports_success() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::delete("/api/favorites/never-saved")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));
}

#[tokio::test]
async fn test_index_page_is_served() {
    let app = test_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Recipe Shelf"));
}
