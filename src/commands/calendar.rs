use crate::calendar::{current_week_range, fetch_merged, CalendarProvider, EventTime, NewEvent};
use crate::error::AppError;
use crate::models::{AuditAction, AuditEntry};
use crate::roles::Capability;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;

use super::auth::{AuthUser, BearerToken};
use super::dtos::{
    CalendarRangeQuery, CalendarsResponse, CreateEventRequest, DeleteEventQuery, DeletedResponse, EventResponse,
    EventsResponse, UpdateEventRequest,
};
use super::extract::JsonBody;

const TABLE: &str = "calendar_events";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/calendars", get(list_calendars))
        .route(
            "/api/calendar",
            get(list_events).post(create_event).patch(update_event).delete(delete_event),
        )
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::invalid(field, "is required"));
    }
    Ok(value)
}

/// Only configured calendars can be written through this service.
fn configured<'a>(state: &AppState, calendar_id: &'a str) -> Result<&'a str, AppError> {
    let calendar_id = required("calendarId", calendar_id)?;
    state
        .calendar(calendar_id)
        .map(|_| calendar_id)
        .ok_or(AppError::NotFound { entity: "Calendar" })
}

/// GET /api/calendars - configured calendar sources, no provider call
async fn list_calendars(State(state): State<AppState>, user: AuthUser) -> Result<Json<CalendarsResponse>, AppError> {
    user.require(Capability::ViewCalendar)?;
    Ok(Json(CalendarsResponse {
        calendars: state.calendars.to_vec(),
    }))
}

/// GET /api/calendar?start=&end= - merged events of every configured calendar,
/// the current week by default
async fn list_events(
    State(state): State<AppState>,
    user: AuthUser,
    BearerToken(token): BearerToken,
    Query(query): Query<CalendarRangeQuery>,
) -> Result<Json<EventsResponse>, AppError> {
    user.require(Capability::ViewCalendar)?;

    if state.calendars.is_empty() {
        return Ok(Json(EventsResponse {
            events: Vec::new(),
            message: Some("No calendar IDs configured. Add GCAL_ID_* env vars."),
        }));
    }

    let (default_start, default_end) = current_week_range(Utc::now());
    let time_min = query.start.filter(|s| !s.trim().is_empty()).unwrap_or(default_start);
    let time_max = query.end.filter(|s| !s.trim().is_empty()).unwrap_or(default_end);

    let provider = state.calendar_provider(&token)?;
    let events = fetch_merged(&provider, &state.calendars, &time_min, &time_max).await;
    Ok(Json(EventsResponse { events, message: None }))
}

/// POST /api/calendar
async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    BearerToken(token): BearerToken,
    JsonBody(req): JsonBody<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    user.require(Capability::EditCalendar)?;
    let calendar_id = configured(&state, &req.calendar_id)?;
    let at = |value: &str| EventTime {
        date_time: Some(value.to_string()),
        date: None,
        time_zone: req.time_zone.clone(),
    };
    let event = NewEvent {
        summary: required("summary", &req.summary)?.to_string(),
        start: at(required("start", &req.start)?),
        end: at(required("end", &req.end)?),
        description: req.description.clone(),
        location: req.location.clone(),
    };

    let provider = state.calendar_provider(&token)?;
    let created = provider.create_event(calendar_id, &event).await?;

    let mut entry = AuditEntry::new(AuditAction::Create, TABLE, user.email())
        .details(json!({ "calendarId": calendar_id, "summary": event.summary }));
    if let Some(id) = created.get("id").and_then(serde_json::Value::as_str) {
        entry = entry.record(id);
    }
    state.audit.record(entry);

    Ok((StatusCode::CREATED, Json(EventResponse { event: created })))
}

/// PATCH /api/calendar - body carries `calendarId`, `eventId` and the fields to change
async fn update_event(
    State(state): State<AppState>,
    user: AuthUser,
    BearerToken(token): BearerToken,
    JsonBody(req): JsonBody<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    user.require(Capability::EditCalendar)?;
    let calendar_id = configured(&state, &req.calendar_id)?;
    let event_id = required("eventId", &req.event_id)?;

    let provider = state.calendar_provider(&token)?;
    let updated = provider.update_event(calendar_id, event_id, &req.updates).await?;

    let fields: Vec<&String> = req.updates.keys().collect();
    state.audit.record(
        AuditEntry::new(AuditAction::Update, TABLE, user.email())
            .record(event_id)
            .details(json!({ "calendarId": calendar_id, "fields": fields })),
    );

    Ok(Json(EventResponse { event: updated }))
}

/// DELETE /api/calendar?calendarId=&eventId=
async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    BearerToken(token): BearerToken,
    Query(query): Query<DeleteEventQuery>,
) -> Result<Json<DeletedResponse>, AppError> {
    user.require(Capability::EditCalendar)?;
    let calendar_id = configured(&state, query.calendar_id.as_deref().unwrap_or_default())?;
    let event_id = required("eventId", query.event_id.as_deref().unwrap_or_default())?;

    let provider = state.calendar_provider(&token)?;
    provider.delete_event(calendar_id, event_id).await?;

    state.audit.record(
        AuditEntry::new(AuditAction::Delete, TABLE, user.email())
            .record(event_id)
            .details(json!({ "calendarId": calendar_id })),
    );

    Ok(Json(DeletedResponse { deleted: true }))
}
