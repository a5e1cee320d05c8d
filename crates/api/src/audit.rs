//! Fire-and-forget audit trail recording.
//!
//! Handlers call [`record`] after a successful mutation. The insert runs on a
//! spawned task so a slow or failing audit write never delays or fails the
//! request that triggered it; failures are logged and dropped.

use atelier_db::models::audit::NewAuditLog;
use atelier_db::repositories::AuditLogRepo;
use sqlx::PgPool;

/// Queue an audit log insert without blocking the calling handler.
pub fn record(pool: &PgPool, entry: NewAuditLog) {
    let pool = pool.clone();
    tokio::spawn(async move {
        if let Err(e) = AuditLogRepo::insert(&pool, &entry).await {
            tracing::warn!(
                error = %e,
                action = %entry.action,
                "Failed to write audit log entry"
            );
        }
    });
}
