use crate::constants::*;
use crate::error::AppError;
use crate::models::{Category, Weekday};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Validate a block's display time label. Free text, never parsed as a range.
pub fn validate_time_label(label: &str) -> Result<&str, AppError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::invalid("time_label", "cannot be empty"));
    }
    if label.chars().count() > MAX_TIME_LABEL_LEN {
        return Err(AppError::invalid(
            "time_label",
            format!("cannot exceed {MAX_TIME_LABEL_LEN} characters"),
        ));
    }
    Ok(label)
}

/// Validate a block description.
pub fn validate_description(description: &str) -> Result<&str, AppError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(AppError::invalid("description", "cannot be empty"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::invalid(
            "description",
            format!("cannot exceed {MAX_DESCRIPTION_LEN} characters"),
        ));
    }
    Ok(description)
}

/// Validate block duration in hours.
pub fn validate_hours(hours: f64) -> Result<f64, AppError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AppError::invalid("hours", "must be positive"));
    }
    if hours > MAX_BLOCK_HOURS {
        return Err(AppError::invalid("hours", format!("cannot exceed {MAX_BLOCK_HOURS}")));
    }
    Ok(hours)
}

/// Validate a requested position within a day.
pub fn validate_sort_order(sort_order: i64) -> Result<i64, AppError> {
    if sort_order < 0 {
        return Err(AppError::invalid("sort_order", "cannot be negative"));
    }
    Ok(sort_order)
}

/// Parse a weekday name ("Monday".."Sunday").
pub fn parse_day(day: &str) -> Result<Weekday, AppError> {
    Weekday::parse(day.trim())
        .ok_or_else(|| AppError::invalid("day", format!("unknown day '{}'", day.trim())))
}

/// Parse a category tag.
pub fn parse_category(category: &str) -> Result<Category, AppError> {
    Category::parse(category.trim())
        .ok_or_else(|| AppError::invalid("category", format!("unknown category '{}'", category.trim())))
}

/// Parse an ISO week start date. Weeks start on Monday.
pub fn validate_week_start(week_start: &str) -> Result<NaiveDate, AppError> {
    let date = NaiveDate::parse_from_str(week_start.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid("week_start", "must be an ISO date (YYYY-MM-DD)"))?;
    ensure_monday(date)?;
    Ok(date)
}

pub fn ensure_monday(date: NaiveDate) -> Result<(), AppError> {
    if date.weekday() != chrono::Weekday::Mon {
        return Err(AppError::invalid("week_start", format!("{date} is not a Monday")));
    }
    Ok(())
}

/// Validate a reorder request: at least one id, none repeated.
pub fn validate_ordered_ids(ids: &[i64]) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::invalid("ordered_ids", "at least one id required"));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
        return Err(AppError::invalid("ordered_ids", format!("duplicate id {dup}")));
    }
    Ok(())
}

/// Validate an optional override note. Blank notes are dropped.
pub fn validate_note(note: Option<&str>) -> Result<Option<&str>, AppError> {
    let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if note.chars().count() > MAX_NOTE_LEN {
        return Err(AppError::invalid("note", format!("cannot exceed {MAX_NOTE_LEN} characters")));
    }
    Ok(Some(note))
}

/// Validate an audit page size, applying the default.
pub fn validate_audit_limit(limit: Option<u32>) -> Result<u32, AppError> {
    match limit {
        None => Ok(DEFAULT_AUDIT_LIMIT),
        Some(0) => Err(AppError::invalid("limit", "must be positive")),
        Some(n) if n > MAX_AUDIT_LIMIT => Err(AppError::invalid(
            "limit",
            format!("cannot exceed {MAX_AUDIT_LIMIT}"),
        )),
        Some(n) => Ok(n),
    }
}
