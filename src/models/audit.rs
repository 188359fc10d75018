use crate::models::Weekday;
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Result, Row};
use serde::Serialize;

/// Kind of change recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Reorder,
    OverrideCreate,
    OverrideDelete,
}

impl AuditAction {
    const ALL: [AuditAction; 6] = [
        AuditAction::Create,
        AuditAction::Update,
        AuditAction::Delete,
        AuditAction::Reorder,
        AuditAction::OverrideCreate,
        AuditAction::OverrideDelete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Reorder => "reorder",
            AuditAction::OverrideCreate => "override_create",
            AuditAction::OverrideDelete => "override_delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl ToSql for AuditAction {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AuditAction {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        AuditAction::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown audit action '{s}'").into()))
    }
}

/// Append-only record of one schedule mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub action: AuditAction,
    pub table_name: String,
    pub record_id: Option<String>,
    pub day: Option<Weekday>,
    pub details: serde_json::Value,
    pub performed_by: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(action: AuditAction, table_name: &str, performed_by: &str) -> Self {
        Self {
            id: None,
            action,
            table_name: table_name.to_string(),
            record_id: None,
            day: None,
            details: serde_json::Value::Null,
            performed_by: performed_by.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn record(mut self, record_id: impl ToString) -> Self {
        self.record_id = Some(record_id.to_string());
        self
    }

    pub fn day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    pub fn details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn save(&self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO schedule_audit
             (action, table_name, record_id, day, details, performed_by, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                self.action,
                self.table_name,
                self.record_id,
                self.day,
                self.details.to_string(),
                self.performed_by,
                self.timestamp,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent entries first.
    pub fn find_recent(conn: &Connection, limit: u32) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, action, table_name, record_id, day, details, performed_by, timestamp
             FROM schedule_audit ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], Self::from_row)?;
        rows.collect()
    }

    fn from_row(row: &Row<'_>) -> Result<Self> {
        let details: String = row.get(5)?;
        Ok(Self {
            id: Some(row.get(0)?),
            action: row.get(1)?,
            table_name: row.get(2)?,
            record_id: row.get(3)?,
            day: row.get(4)?,
            details: serde_json::from_str(&details)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e)))?,
            performed_by: row.get(6)?,
            timestamp: row.get(7)?,
        })
    }
}
