//! Server configuration: `config.toml` in the platform config directory,
//! then environment overrides.

use crate::constants::DEFAULT_BIND;
use crate::models::Category;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A calendar source whose events are merged into the calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub id: String,
    pub label: String,
    pub color: String,
    pub role: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind: String,
    /// SQLite file. Defaults to `weekplan.db` in the platform data directory.
    pub database_path: Option<PathBuf>,
    pub owner_email: Option<String>,
    pub ea_email: Option<String>,
    pub calendars: Vec<CalendarConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            database_path: None,
            owner_email: None,
            ea_email: None,
            calendars: Vec::new(),
        }
    }
}

/// Environment variables naming a calendar for each role, with its display label and color.
const CALENDAR_ENV: &[(&str, Category, &str, &str)] = &[
    ("GCAL_ID_IMMUTABLE", Category::Immutable, "Immutable", "#22c55e"),
    ("GCAL_ID_ENGINEROOM", Category::Engineroom, "EngineRoom", "#a855f7"),
    ("GCAL_ID_FITFOCUS", Category::Fitfocus, "FitFocus", "#f97316"),
    ("GCAL_ID_PERSONAL", Category::Personal, "Personal", "#06b6d4"),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine project directories")]
    NoProjectDirs,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "weekplan", "Weekplan").ok_or(ConfigError::NoProjectDirs)
}

impl Config {
    /// Load `config.toml` from the platform config directory and apply
    /// environment overrides. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = project_dirs()?.config_dir().join("config.toml");
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    /// A `GCAL_ID_*` variable replaces any configured calendar with the same role.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(email) = lookup("OWNER_EMAIL") {
            self.owner_email = Some(email);
        }
        if let Some(email) = lookup("EA_EMAIL") {
            self.ea_email = Some(email);
        }
        if let Some(path) = lookup("WEEKPLAN_DB") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(bind) = lookup("WEEKPLAN_BIND") {
            self.bind = bind;
        }

        for &(key, role, label, color) in CALENDAR_ENV {
            if let Some(id) = lookup(key) {
                self.calendars.retain(|c| c.role != role);
                self.calendars.push(CalendarConfig {
                    id,
                    label: label.to_string(),
                    color: color.to_string(),
                    role,
                });
            }
        }
    }

    /// Configured database file, or the default in the platform data directory.
    /// Creates the parent directory.
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => project_dirs()?.data_dir().join("weekplan.db"),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }
}
