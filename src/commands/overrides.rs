use crate::db::with_connection_async;
use crate::error::AppError;
use crate::models::{AuditAction, AuditEntry, WeekOverride};
use crate::roles::Capability;
use crate::schedule::resolve;
use crate::state::AppState;
use crate::validation::{parse_day, validate_week_start};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::json;

use super::auth::AuthUser;
use super::dtos::{BlocksResponse, CreateOverrideRequest, OverridesQuery, OverridesResponse, RevertedResponse};
use super::extract::JsonBody;

const TABLE: &str = "week_overrides";

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/overrides",
        get(get_overrides).post(create_override).delete(delete_override),
    )
}

fn required_week(week: Option<&str>) -> Result<NaiveDate, AppError> {
    let week = week.ok_or_else(|| AppError::invalid("week", "is required"))?;
    validate_week_start(week)
}

/// GET /api/overrides?week=&day=
///
/// With `day`, the effective blocks for that day of the week. Without it, the
/// days of the week that have an override.
async fn get_overrides(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OverridesQuery>,
) -> Result<Json<OverridesResponse>, AppError> {
    user.require(Capability::ViewSchedule)?;
    let week_start = required_week(query.week.as_deref())?;

    let response = match query.day.as_deref().map(parse_day).transpose()? {
        Some(day) => {
            let effective = with_connection_async(&state.db, "resolve effective day", move |conn| {
                resolve(conn, day, Some(week_start))
            })
            .await?;
            OverridesResponse::Day(effective)
        }
        None => {
            let override_days = with_connection_async(&state.db, "list override days", move |conn| {
                WeekOverride::days_for_week(conn, week_start)
            })
            .await?;
            OverridesResponse::Week { override_days }
        }
    };

    Ok(Json(response))
}

/// POST /api/overrides - replace one day of one week
async fn create_override(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<CreateOverrideRequest>,
) -> Result<(StatusCode, Json<BlocksResponse>), AppError> {
    user.require(Capability::EditSchedule)?;
    let week_start = validate_week_start(&req.week_start)?;
    let day = parse_day(&req.day)?;
    let drafts = req.drafts()?;

    let created_by = user.email().to_string();
    let note = req.note.clone();
    let blocks = with_connection_async(&state.db, "create week override", move |conn| {
        WeekOverride::replace(conn, week_start, day, &drafts, &created_by, note.as_deref())
    })
    .await?;

    state.audit.record(
        AuditEntry::new(AuditAction::OverrideCreate, TABLE, user.email())
            .day(day)
            .details(json!({
                "weekStart": week_start,
                "blockCount": blocks.len(),
                "note": req.note,
            })),
    );

    Ok((StatusCode::CREATED, Json(BlocksResponse { blocks })))
}

/// DELETE /api/overrides?week=&day= - revert the day to the template
async fn delete_override(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OverridesQuery>,
) -> Result<Json<RevertedResponse>, AppError> {
    user.require(Capability::EditSchedule)?;
    let week_start = required_week(query.week.as_deref())?;
    let day = parse_day(query.day.as_deref().unwrap_or_default())?;

    let existed = with_connection_async(&state.db, "delete week override", move |conn| {
        WeekOverride::delete(conn, week_start, day)
    })
    .await?;

    if existed {
        state.audit.record(
            AuditEntry::new(AuditAction::OverrideDelete, TABLE, user.email())
                .day(day)
                .details(json!({ "weekStart": week_start })),
        );
    }

    Ok(Json(RevertedResponse { reverted: true }))
}
