//! Route definitions for the public `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects` (public, read-only).
///
/// ```text
/// GET /         -> list (?featured=true)
/// GET /{slug}   -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list))
        .route("/{slug}", get(project::get_by_slug))
}
