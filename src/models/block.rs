use crate::error::AppError;
use crate::models::{Category, Weekday};
use crate::validation::{validate_description, validate_hours, validate_sort_order, validate_time_label};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// One scheduled interval within a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub day: Weekday,
    pub sort_order: i64,
    pub time_label: String,
    pub category: Category,
    pub description: String,
    pub hours: f64,
}

impl Block {
    /// Map a row selected as `id, day, sort_order, time_label, category, description, hours`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            day: row.get(1)?,
            sort_order: row.get(2)?,
            time_label: row.get(3)?,
            category: row.get(4)?,
            description: row.get(5)?,
            hours: row.get(6)?,
        })
    }
}

/// Fields for a new template block.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlock {
    pub day: Weekday,
    pub sort_order: i64,
    pub time_label: String,
    pub category: Category,
    pub description: String,
    pub hours: f64,
}

impl NewBlock {
    /// Check every field, returning a copy with text trimmed.
    pub fn validate(&self) -> Result<Self, AppError> {
        Ok(Self {
            day: self.day,
            sort_order: validate_sort_order(self.sort_order)?,
            time_label: validate_time_label(&self.time_label)?.to_string(),
            category: self.category,
            description: validate_description(&self.description)?.to_string(),
            hours: validate_hours(self.hours)?,
        })
    }
}

/// Partial update of a template block. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub time_label: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub hours: Option<f64>,
    pub sort_order: Option<i64>,
}

impl BlockPatch {
    pub fn validate(&self) -> Result<Self, AppError> {
        Ok(Self {
            time_label: self
                .time_label
                .as_deref()
                .map(validate_time_label)
                .transpose()?
                .map(str::to_string),
            category: self.category,
            description: self
                .description
                .as_deref()
                .map(validate_description)
                .transpose()?
                .map(str::to_string),
            hours: self.hours.map(validate_hours).transpose()?,
            sort_order: self.sort_order.map(validate_sort_order).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Block content without placement, as submitted for an override.
/// Position comes from the order of the submitted list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDraft {
    pub time_label: String,
    pub category: Category,
    pub description: String,
    pub hours: f64,
}

impl BlockDraft {
    pub fn validate(&self) -> Result<Self, AppError> {
        Ok(Self {
            time_label: validate_time_label(&self.time_label)?.to_string(),
            category: self.category,
            description: validate_description(&self.description)?.to_string(),
            hours: validate_hours(self.hours)?,
        })
    }
}

/// Convert a list position into a stored sort order.
pub(crate) fn position(index: usize) -> rusqlite::Result<i64> {
    i64::try_from(index).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
