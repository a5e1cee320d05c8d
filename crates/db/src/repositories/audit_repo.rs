//! Repository for the `audit_logs` table.

use sqlx::PgPool;

use atelier_core::audit::{action_to_category, redact_sensitive_fields};

use crate::models::audit::{AuditLog, AuditLogFilter, NewAuditLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action, category, resource_type, resource_id, details, \
                       ip_address, user_agent, created_at, updated_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

/// Append-style access to the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert an entry. The category is derived from the action and any
    /// sensitive keys in `details` are redacted before storage.
    pub async fn insert(pool: &PgPool, input: &NewAuditLog) -> Result<AuditLog, sqlx::Error> {
        let details = input
            .details
            .as_ref()
            .map(redact_sensitive_fields)
            .unwrap_or_else(|| serde_json::json!({}));
        let query = format!(
            "INSERT INTO audit_logs
                (user_id, action, category, resource_type, resource_id,
                 details, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(action_to_category(&input.action))
            .bind(&input.resource_type)
            .bind(&input.resource_id)
            .bind(&details)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// List entries, newest first, optionally narrowed to one action.
    /// `limit` is clamped to a sane page size.
    pub async fn list(
        pool: &PgPool,
        filter: &AuditLogFilter,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = filter.offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE ($1::TEXT IS NULL OR action = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(&filter.action)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
