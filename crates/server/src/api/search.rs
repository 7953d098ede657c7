use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{debug, error};
use zimplorer_core::{IndexError, SearchRequest};

use crate::state::AppState;

/// Proxy a search to the engine's production index.
///
/// The fixed facet list is appended to every request so the front-end always
/// receives a facet distribution; everything else is forwarded untouched and
/// the engine's response body is returned verbatim.
pub async fn books_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let request = request.with_default_facets();
    debug!(query = ?request.q, "forwarding book search");

    match state.engine().search(state.prod_index(), &request).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            error!("Book search failed: {}", err);
            let status = err
                .status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let message = match err {
                IndexError::Engine { body, .. } => body,
                other => other.to_string(),
            };
            Err((status, message))
        }
    }
}
