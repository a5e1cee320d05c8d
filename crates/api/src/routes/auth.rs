//! Router for the `/auth` endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication endpoints, nested at `/auth`.
///
/// `login` and `refresh` accept unauthenticated requests. `logout` and `me`
/// extract [`AuthUser`](crate::middleware::auth::AuthUser) and reject callers
/// without a valid access token.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
