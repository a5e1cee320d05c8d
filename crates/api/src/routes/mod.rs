pub mod admin;
pub mod auth;
pub mod health;
pub mod page;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (requires auth)
/// /auth/me                              current user (requires auth)
///
/// /projects                             list (public, ?featured=true)
/// /projects/{slug}                      get one (public)
///
/// /admin/projects                       create (editor/admin)
/// /admin/projects/{id}                  update, delete (owner or admin)
/// /admin/projects/{id}/layout           load, save layout document
/// /admin/projects/{id}/layout/blocks    append one block
/// /admin/projects/{id}/layout/preview   Edit-mode HTML preview
/// /admin/projects/{id}/images           image pool for pickers
/// /admin/uploads                        multipart upload (editor/admin)
/// /admin/audit-logs                     audit trail (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Public project gallery.
        .nest("/projects", project::router())
        // Admin surface: project CRUD, layout editor, uploads, audit trail.
        .nest("/admin", admin::router())
}
