use crate::db::with_connection_async;
use crate::error::AppError;
use crate::models::AuditEntry;
use crate::roles::Capability;
use crate::state::AppState;
use crate::validation::validate_audit_limit;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::auth::AuthUser;
use super::dtos::{AuditQuery, AuditResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/audit", get(list_audit))
}

/// GET /api/audit?limit= - newest entries first
async fn list_audit(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditResponse>, AppError> {
    user.require(Capability::ManageSettings)?;
    let limit = validate_audit_limit(query.limit)?;

    // Entries queued by earlier requests should be visible.
    let audit = state.audit.clone();
    tokio::task::spawn_blocking(move || audit.flush())
        .await
        .map_err(|e| AppError::Internal(format!("Audit flush task failed: {e}")))?;
    let entries = with_connection_async(&state.db, "load audit log", move |conn| {
        AuditEntry::find_recent(conn, limit)
    })
    .await?;
    Ok(Json(AuditResponse { entries }))
}
