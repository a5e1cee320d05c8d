//! First-run provisioning: create the initial admin account.
//!
//! Runs once at startup, after migrations. When the users table is empty and
//! `ADMIN_USERNAME` / `ADMIN_EMAIL` / `ADMIN_PASSWORD` are all set, an admin
//! account is created so the instance is usable without manual SQL. On any
//! later start (or with the variables unset) this is a no-op.

use atelier_core::roles::ROLE_ADMIN;
use atelier_db::models::user::CreateUser;
use atelier_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};

/// Create the bootstrap admin account if no users exist yet.
pub async fn ensure_admin_account(pool: &PgPool) -> AppResult<()> {
    let user_count = UserRepo::count(pool).await?;
    if user_count > 0 {
        return Ok(());
    }

    let (username, email, password) = match (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(u), Ok(e), Ok(p)) => (u, e, p),
        _ => {
            tracing::warn!(
                "No users exist and ADMIN_USERNAME/ADMIN_EMAIL/ADMIN_PASSWORD are not set; \
                 skipping admin bootstrap"
            );
            return Ok(());
        }
    };

    validate_password_strength(&password).map_err(AppError::BadRequest)?;

    let admin_role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| AppError::InternalError("admin role is not seeded".into()))?;

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        username: username.clone(),
        email,
        display_name: String::new(),
        password_hash,
        role_id: admin_role.id,
    };
    let user = UserRepo::create(pool, &input).await?;

    tracing::info!(
        user_id = user.id,
        username = %username,
        "Created bootstrap admin account"
    );
    Ok(())
}
