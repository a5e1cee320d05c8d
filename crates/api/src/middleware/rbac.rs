//! Role gates built as axum extractors.
//!
//! Wrapping [`AuthUser`] keeps authorization visible in the handler
//! signature: a handler that takes [`RequireAdmin`] cannot be reached
//! without an admin token.

use atelier_core::error::CoreError;
use atelier_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Admits only the `admin` role.
///
/// ```ignore
/// async fn list_audit(RequireAdmin(user): RequireAdmin) -> AppResult<Json<...>> { ... }
/// ```
pub struct RequireAdmin(pub AuthUser);

/// Admits the `editor` and `admin` roles. Content-mutating admin endpoints
/// (project CRUD, layout edits, uploads) all pass through this gate;
/// ownership checks on top of it live in the handlers.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role == ROLE_ADMIN {
            Ok(RequireAdmin(user))
        } else {
            Err(forbidden("Admin role required"))
        }
    }
}

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role.as_str() {
            ROLE_ADMIN | ROLE_EDITOR => Ok(RequireEditor(user)),
            _ => Err(forbidden("Editor or Admin role required")),
        }
    }
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.into()))
}
