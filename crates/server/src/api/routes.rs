use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use super::{handlers, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let ui_dir = state.ui_location().to_path_buf();

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Search proxy
        .route("/books_search", post(search::books_search))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Serve the front-end with SPA fallback
    let index_path = ui_dir.join("index.html");
    let serve_dir = ServeDir::new(&ui_dir).fallback(ServeFile::new(&index_path));

    Router::new()
        .nest("/api/v1", api_routes)
        .fallback_service(serve_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use zimplorer_core::load_config_from_str;
    use zimplorer_core::testing::MockSearchIndex;

    fn test_router(engine: Arc<MockSearchIndex>) -> Router {
        let config = load_config_from_str(
            r#"
[meilisearch]
url = "http://localhost:7700"
"#,
        )
        .unwrap();
        create_router(Arc::new(AppState::new(config, engine)))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router(Arc::new(MockSearchIndex::new()));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_config_is_sanitized() {
        let router = test_router(Arc::new(MockSearchIndex::new()));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["meilisearch"]["prod_index"], "books");
        assert!(json["meilisearch"].get("url").is_none());
    }

    #[tokio::test]
    async fn test_books_search_forwards_to_production_index() {
        let engine = Arc::new(MockSearchIndex::new());
        engine
            .set_search_response(serde_json::json!({ "hits": [], "estimatedTotalHits": 0 }))
            .await;
        let router = test_router(engine.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/books_search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"q":"math","filter":"language = fr"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["estimatedTotalHits"], 0);

        let searches = engine.recorded_searches().await;
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].index, "books");
        assert_eq!(searches[0].request.q.as_deref(), Some("math"));
        // The facet list is always appended server-side
        assert!(searches[0].request.facets.is_some());
    }

    #[tokio::test]
    async fn test_books_search_surfaces_engine_status() {
        let engine = Arc::new(MockSearchIndex::new());
        engine
            .set_next_error(zimplorer_core::IndexError::Engine {
                status: 400,
                body: "invalid filter expression".to_string(),
            })
            .await;
        let router = test_router(engine);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/books_search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"q":"math"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"invalid filter expression");
    }

    #[tokio::test]
    async fn test_unknown_api_route() {
        let router = test_router(Arc::new(MockSearchIndex::new()));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
