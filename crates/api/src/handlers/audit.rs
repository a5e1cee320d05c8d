//! Handler for the audit trail admin endpoint.

use axum::extract::{Query, State};
use axum::Json;

use atelier_db::models::audit::{AuditLog, AuditLogFilter};
use atelier_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/audit-logs
///
/// Newest-first audit entries. Supports `action`, `limit` and `offset`
/// query parameters. Admin only.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(filter): Query<AuditLogFilter>,
) -> AppResult<Json<DataResponse<Vec<AuditLog>>>> {
    let entries = AuditLogRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: entries }))
}
