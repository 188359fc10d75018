use crate::error::AppError;
use crate::models::block::position;
use crate::models::{Block, BlockDraft, Weekday};
use crate::validation::{ensure_monday, validate_note};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Whether a week-specific override exists for a day.
///
/// An override with zero blocks is still an override: the day is empty that week.
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    Absent,
    Present(Vec<Block>),
}

/// One-off replacements of a template day for a specific week.
pub struct WeekOverride;

impl WeekOverride {
    /// Days of the week starting `week_start` that have an override, Monday first.
    pub fn days_for_week(conn: &Connection, week_start: NaiveDate) -> Result<Vec<Weekday>> {
        let mut stmt = conn.prepare("SELECT day FROM week_overrides WHERE week_start = ?1")?;
        let rows = stmt.query_map(params![week_start], |row| row.get(0))?;
        let mut days = rows.collect::<Result<Vec<Weekday>>>()?;
        days.sort();
        days.dedup();
        Ok(days)
    }

    pub fn find(conn: &Connection, week_start: NaiveDate, day: Weekday) -> Result<Override> {
        let header: Option<i64> = conn
            .query_row(
                "SELECT id FROM week_overrides WHERE week_start = ?1 AND day = ?2",
                params![week_start, day],
                |row| row.get(0),
            )
            .optional()?;

        match header {
            Some(override_id) => Ok(Override::Present(blocks_for(conn, override_id)?)),
            None => Ok(Override::Absent),
        }
    }

    /// Replace the override for `(week_start, day)` with `blocks`, in submitted order.
    /// The old override, if any, and the new one are swapped in one transaction.
    pub fn replace(
        conn: &Connection,
        week_start: NaiveDate,
        day: Weekday,
        blocks: &[BlockDraft],
        created_by: &str,
        note: Option<&str>,
    ) -> Result<Vec<Block>, AppError> {
        ensure_monday(week_start)?;
        let note = validate_note(note)?;
        let blocks = blocks
            .iter()
            .map(BlockDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let tx = conn.unchecked_transaction()?;

        remove(&tx, week_start, day)?;

        tx.execute(
            "INSERT INTO week_overrides (week_start, day, note, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![week_start, day, note, created_by, Utc::now()],
        )?;
        let override_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO week_override_blocks
                 (override_id, sort_order, time_label, category, description, hours)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (index, block) in blocks.iter().enumerate() {
                stmt.execute(params![
                    override_id,
                    position(index)?,
                    block.time_label,
                    block.category,
                    block.description,
                    block.hours,
                ])?;
            }
        }

        let persisted = blocks_for(&tx, override_id)?;
        tx.commit()?;

        log::info!(
            "Override for {day} week of {week_start} now has {} blocks",
            persisted.len()
        );
        Ok(persisted)
    }

    /// Remove the override for `(week_start, day)`. Returns whether one existed.
    pub fn delete(conn: &Connection, week_start: NaiveDate, day: Weekday) -> Result<bool> {
        let tx = conn.unchecked_transaction()?;
        let removed = remove(&tx, week_start, day)?;
        tx.commit()?;
        Ok(removed)
    }
}

fn remove(conn: &Connection, week_start: NaiveDate, day: Weekday) -> Result<bool> {
    conn.execute(
        "DELETE FROM week_override_blocks WHERE override_id IN
         (SELECT id FROM week_overrides WHERE week_start = ?1 AND day = ?2)",
        params![week_start, day],
    )?;
    let removed = conn.execute(
        "DELETE FROM week_overrides WHERE week_start = ?1 AND day = ?2",
        params![week_start, day],
    )?;
    Ok(removed > 0)
}

fn blocks_for(conn: &Connection, override_id: i64) -> Result<Vec<Block>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, o.day, b.sort_order, b.time_label, b.category, b.description, b.hours
         FROM week_override_blocks b
         JOIN week_overrides o ON o.id = b.override_id
         WHERE b.override_id = ?1
         ORDER BY b.sort_order, b.id",
    )?;
    let rows = stmt.query_map(params![override_id], Block::from_row)?;
    rows.collect()
}
