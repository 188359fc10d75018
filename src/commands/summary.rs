use crate::db::with_connection_async;
use crate::error::AppError;
use crate::roles::Capability;
use crate::schedule::resolve_week;
use crate::state::AppState;
use crate::stats::{week_summary, WeekSummary};
use crate::validation::validate_week_start;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::auth::AuthUser;
use super::dtos::{CategoriesResponse, SummaryQuery};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/summary", get(get_summary))
        .route("/api/categories", get(get_categories))
}

/// GET /api/summary?week= - weekly totals of the effective week, or the template without `week`
async fn get_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<WeekSummary>, AppError> {
    user.require(Capability::ViewSchedule)?;
    let week_start = query.week.as_deref().map(validate_week_start).transpose()?;

    let days =
        with_connection_async(&state.db, "resolve week", move |conn| resolve_week(conn, week_start)).await?;
    Ok(Json(week_summary(&days)))
}

/// GET /api/categories - display metadata and day tags
async fn get_categories(user: AuthUser) -> Result<Json<CategoriesResponse>, AppError> {
    user.require(Capability::ViewSchedule)?;
    Ok(Json(CategoriesResponse::build()))
}
