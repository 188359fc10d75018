use crate::db::with_connection_async;
use crate::error::AppError;
use crate::models::{AuditAction, AuditEntry, Template};
use crate::roles::Capability;
use crate::state::AppState;
use crate::validation::parse_day;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::json;

use super::auth::AuthUser;
use super::dtos::{
    BlockResponse, BlocksQuery, BlocksResponse, CreateBlockRequest, DeletedResponse, ReorderRequest, ReorderResponse,
    UpdateBlockRequest,
};
use super::extract::JsonBody;

const TABLE: &str = "template_blocks";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/blocks", get(list_blocks).post(create_block))
        .route("/api/blocks/reorder", post(reorder_blocks))
        .route("/api/blocks/{id}", patch(update_block).delete(delete_block))
}

/// GET /api/blocks?day= - template blocks, all days or one
async fn list_blocks(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BlocksQuery>,
) -> Result<Json<BlocksResponse>, AppError> {
    user.require(Capability::ViewSchedule)?;
    let day = query.day.as_deref().map(parse_day).transpose()?;

    let blocks =
        with_connection_async(&state.db, "list template blocks", move |conn| Template::list(conn, day)).await?;
    Ok(Json(BlocksResponse { blocks }))
}

/// POST /api/blocks
async fn create_block(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<CreateBlockRequest>,
) -> Result<(StatusCode, Json<BlockResponse>), AppError> {
    user.require(Capability::EditSchedule)?;
    let new = req.into_new_block()?;

    let block =
        with_connection_async(&state.db, "create template block", move |conn| Template::create(conn, &new)).await?;

    let mut entry = AuditEntry::new(AuditAction::Create, TABLE, user.email())
        .day(block.day)
        .details(serde_json::to_value(&block).unwrap_or_default());
    if let Some(id) = block.id {
        entry = entry.record(id);
    }
    state.audit.record(entry);

    Ok((StatusCode::CREATED, Json(BlockResponse { block })))
}

/// PATCH /api/blocks/{id}
async fn update_block(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<UpdateBlockRequest>,
) -> Result<Json<BlockResponse>, AppError> {
    user.require(Capability::EditSchedule)?;
    let patch = req.to_patch()?;

    let block = with_connection_async(&state.db, "update template block", move |conn| {
        Template::update(conn, id, &patch)
    })
    .await?;

    state.audit.record(
        AuditEntry::new(AuditAction::Update, TABLE, user.email())
            .record(id)
            .day(block.day)
            .details(serde_json::to_value(&req).unwrap_or_default()),
    );

    Ok(Json(BlockResponse { block }))
}

/// DELETE /api/blocks/{id} - succeeds whether or not the block existed
async fn delete_block(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>, AppError> {
    user.require(Capability::EditSchedule)?;

    let removed_from =
        with_connection_async(&state.db, "delete template block", move |conn| Template::delete(conn, id)).await?;

    if let Some(day) = removed_from {
        state
            .audit
            .record(AuditEntry::new(AuditAction::Delete, TABLE, user.email()).record(id).day(day));
    }

    Ok(Json(DeletedResponse { deleted: true }))
}

/// POST /api/blocks/reorder
async fn reorder_blocks(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<ReorderRequest>,
) -> Result<Json<ReorderResponse>, AppError> {
    user.require(Capability::EditSchedule)?;
    let day = parse_day(&req.day)?;

    let ordered_ids = req.ordered_ids.clone();
    let blocks = with_connection_async(&state.db, "reorder template blocks", move |conn| {
        Template::reorder(conn, day, &ordered_ids)
    })
    .await?;

    state.audit.record(
        AuditEntry::new(AuditAction::Reorder, TABLE, user.email())
            .day(day)
            .details(json!({ "orderedIds": req.ordered_ids })),
    );

    Ok(Json(ReorderResponse { success: true, blocks }))
}
