//! Route definitions for the server-rendered public pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::page;
use crate::state::AppState;

/// Routes mounted at the root (NOT under `/api/v1`).
///
/// ```text
/// GET /projects/{slug}  -> project_page (HTML)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/projects/{slug}", get(page::project_page))
}
