//! Route definitions for the generation endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST   /keywords                  -> generate_keywords   (seedKeyword)
/// POST   /titles                    -> generate_titles     (keyword)
/// POST   /topics                    -> generate_topics     (title)
/// POST   /content                   -> generate_content    (topic)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/keywords", post(generation::generate_keywords))
        .route("/titles", post(generation::generate_titles))
        .route("/topics", post(generation::generate_topics))
        .route("/content", post(generation::generate_content))
}
