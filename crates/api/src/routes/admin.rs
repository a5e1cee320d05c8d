//! Route definitions for the `/admin` surface: project CRUD, the layout
//! editor, uploads, and the audit trail.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use atelier_core::validation::MAX_VIDEO_BYTES;

use crate::handlers::{audit, layout, project, upload};
use crate::state::AppState;

/// Multipart request cap: the largest accepted file plus form overhead.
const UPLOAD_BODY_LIMIT: usize = MAX_VIDEO_BYTES + 1024 * 1024;

/// Routes mounted at `/admin`.
///
/// All routes require the `editor` role or better; `/audit-logs` requires
/// `admin` (enforced by handler extractors).
///
/// ```text
/// POST   /projects                      -> create
/// PUT    /projects/{id}                 -> update (owner or admin)
/// DELETE /projects/{id}                 -> delete (owner or admin)
///
/// GET    /projects/{id}/layout          -> get_layout
/// PUT    /projects/{id}/layout          -> save_layout (wholesale)
/// POST   /projects/{id}/layout/blocks   -> append_block
/// GET    /projects/{id}/layout/preview  -> preview (Edit-mode HTML)
/// GET    /projects/{id}/images          -> image_pool
///
/// POST   /uploads                       -> upload (multipart)
///
/// GET    /audit-logs                    -> list (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", post(project::create))
        .route(
            "/projects/{id}",
            put(project::update).delete(project::delete),
        )
        .route(
            "/projects/{id}/layout",
            get(layout::get_layout).put(layout::save_layout),
        )
        .route("/projects/{id}/layout/blocks", post(layout::append_block))
        .route("/projects/{id}/layout/preview", get(layout::preview))
        .route("/projects/{id}/images", get(layout::image_pool))
        .route(
            "/uploads",
            post(upload::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/audit-logs", get(audit::list))
}
