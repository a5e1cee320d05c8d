//! Handlers for the `/auth` resource (login, refresh, logout, me).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use atelier_core::audit::{actions, resources};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::audit::NewAuditLog;
use atelier_db::models::user::{User, UserResponse};
use atelier_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use crate::audit;
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Consecutive failed logins that trigger a temporary lock.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// How long a lockout lasts, in minutes.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Credentials for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair handed back by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // A missing account and a wrong password answer identically.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    ensure_login_allowed(&user)?;

    let password_ok = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_ok {
        note_failed_login(&state, &user).await?;
        return Err(invalid_credentials());
    }

    UserRepo::record_login_success(&state.pool, user.id).await?;

    let role_name = resolve_role_name(&state, user.role_id).await?;

    tracing::info!(user_id = user.id, role = %role_name, "User logged in");

    audit::record(
        &state.pool,
        NewAuditLog {
            user_id: Some(user.id),
            action: actions::USER_LOGIN.to_string(),
            resource_type: resources::USER.to_string(),
            resource_id: Some(user.id.to_string()),
            details: Some(json!({ "username": user.username })),
            ip_address: None,
            user_agent: user_agent_from(&headers),
        },
    );

    let response = create_auth_response(&state, user, role_name).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The
/// presented session is revoked (token rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_valid_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Refresh token is invalid or expired".into(),
            ))
        })?;

    // Rotation: the presented token is spent even if the rest fails.
    SessionRepo::revoke(&state.pool, &token_hash).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))?;

    // A lockout does not cut refresh short; deactivation does.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is disabled".into(),
        )));
    }

    let role_name = resolve_role_name(&state, user.role_id).await?;

    let response = create_auth_response(&state, user, role_name).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh session. Returns 204 No Content whether or
/// not the token still referenced a live session.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let token_hash = hash_refresh_token(&input.refresh_token);
    let revoked = SessionRepo::revoke(&state.pool, &token_hash).await?;

    if revoked {
        tracing::info!(user_id = auth_user.user_id, "User logged out");
        audit::record(
            &state.pool,
            NewAuditLog {
                user_id: Some(auth_user.user_id),
                action: actions::USER_LOGOUT.to_string(),
                resource_type: resources::USER.to_string(),
                resource_id: Some(auth_user.user_id.to_string()),
                details: None,
                ip_address: None,
                user_agent: user_agent_from(&headers),
            },
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's profile.
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))?;

    let role_name = resolve_role_name(&state, user.role_id).await?;

    Ok(Json(UserResponse::from_user(user, role_name)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// Reject deactivated and currently-locked accounts before any password work.
fn ensure_login_allowed(user: &User) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is disabled".into(),
        )));
    }
    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is locked from too many failed logins. Try again later.".into(),
        )));
    }
    Ok(())
}

/// Count a failed attempt and lock the account once the threshold is hit.
async fn note_failed_login(state: &AppState, user: &User) -> AppResult<()> {
    UserRepo::increment_failed_login(&state.pool, user.id).await?;

    let failures = user.failed_login_count + 1;
    if failures >= MAX_FAILED_ATTEMPTS {
        let until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
        UserRepo::lock_account(&state.pool, user.id, until).await?;
        tracing::warn!(
            user_id = user.id,
            failures,
            "Account locked after repeated failed logins"
        );
    }
    Ok(())
}

/// Resolve a role id to its name, failing closed if the row is missing.
async fn resolve_role_name(state: &AppState, role_id: DbId) -> AppResult<String> {
    RoleRepo::name_of(&state.pool, role_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Unknown role id {role_id}")))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: User,
    role: String,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at = Utc::now() + chrono::Duration::seconds(state.config.jwt.refresh_expiry_secs);
    SessionRepo::create(&state.pool, user.id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_expiry_secs,
        user: UserResponse::from_user(user, role),
    })
}

/// Pull the `User-Agent` header for audit entries, if present.
fn user_agent_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
