//! Effective schedule: a week's override for a day if one exists, otherwise the template.

use crate::models::{Block, Override, Template, WeekOverride, Weekday};
use chrono::NaiveDate;
use rusqlite::{Connection, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveDay {
    pub day: Weekday,
    pub blocks: Vec<Block>,
    pub is_override: bool,
}

/// Blocks shown for `day`. Without a week, always the template.
///
/// An override replaces the whole day; blocks are never merged across tiers.
pub fn resolve(conn: &Connection, day: Weekday, week_start: Option<NaiveDate>) -> Result<EffectiveDay> {
    if let Some(week_start) = week_start {
        if let Override::Present(blocks) = WeekOverride::find(conn, week_start, day)? {
            return Ok(EffectiveDay {
                day,
                blocks,
                is_override: true,
            });
        }
    }

    Ok(EffectiveDay {
        day,
        blocks: Template::list(conn, Some(day))?,
        is_override: false,
    })
}

/// All seven days, Monday first.
pub fn resolve_week(conn: &Connection, week_start: Option<NaiveDate>) -> Result<Vec<EffectiveDay>> {
    Weekday::ALL
        .into_iter()
        .map(|day| resolve(conn, day, week_start))
        .collect()
}
