use crate::audit::AuditLog;
use crate::calendar::GoogleCalendar;
use crate::config::CalendarConfig;
use crate::constants::GOOGLE_CALENDAR_API;
use crate::db::Database;
use crate::error::AppError;
use crate::roles::RoleDirectory;
use std::sync::{Arc, Mutex};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub audit: AuditLog,
    pub roles: Arc<RoleDirectory>,
    pub calendars: Arc<Vec<CalendarConfig>>,
    pub http: reqwest::Client,
    pub calendar_api: Arc<str>,
}

impl AppState {
    pub fn new(
        db: Arc<Mutex<Database>>,
        audit: AuditLog,
        roles: RoleDirectory,
        calendars: Vec<CalendarConfig>,
    ) -> Self {
        Self {
            db,
            audit,
            roles: Arc::new(roles),
            calendars: Arc::new(calendars),
            http: reqwest::Client::new(),
            calendar_api: Arc::from(GOOGLE_CALENDAR_API),
        }
    }

    /// Calendar client acting with the caller's access token.
    pub fn calendar_provider(&self, token: &str) -> Result<GoogleCalendar, AppError> {
        GoogleCalendar::with_base_url(self.http.clone(), token, &self.calendar_api)
    }

    pub fn calendar(&self, calendar_id: &str) -> Option<&CalendarConfig> {
        self.calendars.iter().find(|c| c.id == calendar_id)
    }
}
