//! External calendar fan-out: every configured calendar is read concurrently
//! and merged into one list ordered by start.

pub mod google;

pub use google::GoogleCalendar;

use crate::config::CalendarConfig;
use crate::error::AppError;
use crate::models::{week_start_of, Category};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// Start or end of a provider event. All-day events carry only `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    fn value(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

/// Event as returned by the provider; only the fields the merged view needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
}

/// Event in the merged calendar view, tagged with its source calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub start: String,
    pub end: String,
    pub calendar_id: String,
    pub calendar_label: String,
    pub calendar_color: String,
    pub role: Category,
    pub all_day: bool,
}

impl CalendarEvent {
    fn from_remote(item: RemoteEvent, calendar: &CalendarConfig) -> Self {
        let start = item.start.unwrap_or_default();
        let end = item.end.unwrap_or_default();
        Self {
            all_day: start.date_time.is_none(),
            id: item.id,
            summary: item
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "(No title)".to_string()),
            start: start.value().unwrap_or_default().to_string(),
            end: end.value().unwrap_or_default().to_string(),
            calendar_id: calendar.id.clone(),
            calendar_label: calendar.label.clone(),
            calendar_color: calendar.color.clone(),
            role: calendar.role,
        }
    }
}

/// Fields for a new timed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Expanded single events of one calendar in `[time_min, time_max)`, RFC 3339 bounds.
    async fn list_events(&self, calendar_id: &str, time_min: &str, time_max: &str) -> Result<Vec<RemoteEvent>, AppError>;

    /// Returns the provider's representation of the created event.
    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> Result<serde_json::Value, AppError>;

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        updates: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, AppError>;

    /// Deleting an event that no longer exists succeeds.
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), AppError>;
}

/// Read every calendar concurrently and merge by start.
///
/// A calendar that fails contributes no events; the failure is logged and the
/// others are still returned.
pub async fn fetch_merged(
    provider: &dyn CalendarProvider,
    calendars: &[CalendarConfig],
    time_min: &str,
    time_max: &str,
) -> Vec<CalendarEvent> {
    let fetches = calendars.iter().map(|calendar| async move {
        match provider.list_events(&calendar.id, time_min, time_max).await {
            Ok(items) => items
                .into_iter()
                .map(|item| CalendarEvent::from_remote(item, calendar))
                .collect::<Vec<_>>(),
            Err(e) => {
                log::warn!("Failed to fetch {} calendar: {e}", calendar.label);
                Vec::new()
            }
        }
    });

    let mut events: Vec<CalendarEvent> = join_all(fetches).await.into_iter().flatten().collect();
    // Unparseable starts sort last.
    events.sort_by_cached_key(|e| {
        let start = parse_start(&e.start);
        (start.is_none(), start)
    });
    events
}

/// Instant an event starts. All-day dates count from midnight UTC.
fn parse_start(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Monday 00:00 UTC of the week containing `now` through the following Monday,
/// as RFC 3339 strings.
pub fn current_week_range(now: DateTime<Utc>) -> (String, String) {
    let monday = week_start_of(now.date_naive());
    let next = monday.checked_add_days(Days::new(7)).unwrap_or(monday);
    let bound = |date: NaiveDate| date.and_time(NaiveTime::MIN).and_utc().to_rfc3339();
    (bound(monday), bound(next))
}
