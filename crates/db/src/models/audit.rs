//! Audit log entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::{DbId, Timestamp};

/// Row from the `audit_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub action: String,
    pub category: String,
    pub resource_type: String,
    /// Stringly typed so entries can reference ids, slugs or filenames.
    pub resource_id: Option<String>,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an audit log entry. The category is derived from the
/// action at insert time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAuditLog {
    pub user_id: Option<DbId>,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Query filter for listing audit log entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogFilter {
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
