use super::{CalendarProvider, NewEvent, RemoteEvent};
use crate::constants::{CALENDAR_MAX_RESULTS, GOOGLE_CALENDAR_API};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use url::Url;

/// Google Calendar v3 REST client acting with one user's access token.
pub struct GoogleCalendar {
    http: reqwest::Client,
    token: String,
    base_url: Url,
}

#[derive(Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<RemoteEvent>,
}

impl GoogleCalendar {
    pub fn new(http: reqwest::Client, token: impl Into<String>) -> Result<Self, AppError> {
        Self::with_base_url(http, token, GOOGLE_CALENDAR_API)
    }

    pub fn with_base_url(http: reqwest::Client, token: impl Into<String>, base_url: &str) -> Result<Self, AppError> {
        let base_url =
            Url::parse(base_url).map_err(|e| AppError::Internal(format!("Invalid calendar API URL: {e}")))?;
        Ok(Self {
            http,
            token: token.into(),
            base_url,
        })
    }

    /// `{base}/calendars/{calendar_id}/events[/{event_id}]`, each id percent-encoded.
    fn events_url(&self, calendar_id: &str, event_id: Option<&str>) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| AppError::Internal("Calendar API URL cannot be a base".to_string()))?;
            segments.pop_if_empty().extend(["calendars", calendar_id, "events"]);
            if let Some(event_id) = event_id {
                segments.push(event_id);
            }
        }
        Ok(url)
    }
}

fn transport(e: reqwest::Error) -> AppError {
    AppError::Calendar(e.to_string())
}

async fn check(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Calendar(format!("Calendar API error ({status}): {body}")))
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn list_events(&self, calendar_id: &str, time_min: &str, time_max: &str) -> Result<Vec<RemoteEvent>, AppError> {
        let max_results = CALENDAR_MAX_RESULTS.to_string();
        let response = self
            .http
            .get(self.events_url(calendar_id, None)?)
            .bearer_auth(&self.token)
            .query(&[
                ("timeMin", time_min),
                ("timeMax", time_max),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let list: EventList = check(response).await?.json().await.map_err(transport)?;
        Ok(list.items)
    }

    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .post(self.events_url(calendar_id, None)?)
            .bearer_auth(&self.token)
            .json(event)
            .send()
            .await
            .map_err(transport)?;

        check(response).await?.json().await.map_err(transport)
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        updates: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .patch(self.events_url(calendar_id, Some(event_id))?)
            .bearer_auth(&self.token)
            .json(updates)
            .send()
            .await
            .map_err(transport)?;

        check(response).await?.json().await.map_err(transport)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.events_url(calendar_id, Some(event_id))?)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("Event {event_id} already gone from {calendar_id}");
            return Ok(());
        }
        check(response).await?;
        Ok(())
    }
}
