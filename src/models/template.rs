use crate::error::AppError;
use crate::models::block::position;
use crate::models::{Block, BlockPatch, NewBlock, Weekday};
use crate::validation::validate_ordered_ids;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// The recurring week: one ordered list of blocks per weekday.
///
/// Every write keeps each day's `sort_order` values dense from zero. Multi-row
/// writes run in a single transaction so no intermediate ordering is visible.
pub struct Template;

impl Template {
    /// All template blocks, Monday first, or a single day's blocks.
    pub fn list(conn: &Connection, day: Option<Weekday>) -> Result<Vec<Block>> {
        let mut blocks = match day {
            Some(day) => {
                let mut stmt = conn.prepare(
                    "SELECT id, day, sort_order, time_label, category, description, hours
                     FROM template_blocks WHERE day = ?1 ORDER BY sort_order, id",
                )?;
                let rows = stmt.query_map(params![day], Block::from_row)?;
                rows.collect::<Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, day, sort_order, time_label, category, description, hours
                     FROM template_blocks ORDER BY sort_order, id",
                )?;
                let rows = stmt.query_map([], Block::from_row)?;
                rows.collect::<Result<Vec<_>>>()?
            }
        };
        // Stable sort keeps sort_order within each day.
        blocks.sort_by_key(|b| b.day);
        Ok(blocks)
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Block>> {
        conn.query_row(
            "SELECT id, day, sort_order, time_label, category, description, hours
             FROM template_blocks WHERE id = ?1",
            params![id],
            Block::from_row,
        )
        .optional()
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM template_blocks", [], |row| row.get(0))
    }

    /// Insert a block at `sort_order` (clamped to the end of the day),
    /// shifting later blocks down.
    pub fn create(conn: &Connection, new: &NewBlock) -> Result<Block, AppError> {
        let new = new.validate()?;

        let tx = conn.unchecked_transaction()?;
        let mut ids = ordered_ids(&tx, new.day)?;

        tx.execute(
            "INSERT INTO template_blocks (day, sort_order, time_label, category, description, hours)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.day,
                new.sort_order,
                new.time_label,
                new.category,
                new.description,
                new.hours,
            ],
        )?;
        let id = tx.last_insert_rowid();

        let at = clamp_position(new.sort_order, ids.len());
        ids.insert(at, id);
        write_order(&tx, &ids)?;

        let block = Self::find_by_id(&tx, id)?.ok_or(AppError::NotFound { entity: "Block" })?;
        tx.commit()?;
        Ok(block)
    }

    /// Apply a partial update. A new `sort_order` moves the block within its day.
    pub fn update(conn: &Connection, id: i64, patch: &BlockPatch) -> Result<Block, AppError> {
        let patch = patch.validate()?;

        let tx = conn.unchecked_transaction()?;
        let existing = Self::find_by_id(&tx, id)?.ok_or(AppError::NotFound { entity: "Block" })?;

        tx.execute(
            "UPDATE template_blocks
             SET time_label = COALESCE(?1, time_label),
                 category = COALESCE(?2, category),
                 description = COALESCE(?3, description),
                 hours = COALESCE(?4, hours)
             WHERE id = ?5",
            params![patch.time_label, patch.category, patch.description, patch.hours, id],
        )?;

        if let Some(sort_order) = patch.sort_order {
            let mut ids = ordered_ids(&tx, existing.day)?;
            ids.retain(|other| *other != id);
            let at = clamp_position(sort_order, ids.len());
            ids.insert(at, id);
            write_order(&tx, &ids)?;
        }

        let block = Self::find_by_id(&tx, id)?.ok_or(AppError::NotFound { entity: "Block" })?;
        tx.commit()?;
        Ok(block)
    }

    /// Delete a block and close the gap it leaves. Returns the day it was removed
    /// from, or `None` if no such block existed.
    pub fn delete(conn: &Connection, id: i64) -> Result<Option<Weekday>> {
        let tx = conn.unchecked_transaction()?;

        let day: Option<Weekday> = tx
            .query_row(
                "SELECT day FROM template_blocks WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(day) = day else {
            return Ok(None);
        };

        tx.execute("DELETE FROM template_blocks WHERE id = ?1", params![id])?;
        let ids = ordered_ids(&tx, day)?;
        write_order(&tx, &ids)?;
        tx.commit()?;

        Ok(Some(day))
    }

    /// Set `sort_order = index` for each id. Every id must belong to `day`;
    /// blocks of the day left out keep their relative order after the listed ones.
    /// Nothing is written unless every id checks out.
    pub fn reorder(conn: &Connection, day: Weekday, ordered: &[i64]) -> Result<Vec<Block>, AppError> {
        validate_ordered_ids(ordered)?;

        let tx = conn.unchecked_transaction()?;
        let current = ordered_ids(&tx, day)?;

        if let Some(unknown) = ordered.iter().find(|id| !current.contains(id)) {
            log::debug!("Reorder of {day} rejected: block {unknown} is not in that day");
            return Err(AppError::NotFound { entity: "Block" });
        }

        let mut ids = ordered.to_vec();
        ids.extend(current.iter().filter(|id| !ordered.contains(id)));
        write_order(&tx, &ids)?;
        tx.commit()?;

        Ok(Self::list(conn, Some(day))?)
    }
}

/// Ids of a day's blocks in display order.
fn ordered_ids(conn: &Connection, day: Weekday) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM template_blocks WHERE day = ?1 ORDER BY sort_order, id")?;
    let rows = stmt.query_map(params![day], |row| row.get(0))?;
    rows.collect()
}

/// Renumber blocks so each id's sort_order is its index.
fn write_order(conn: &Connection, ids: &[i64]) -> Result<()> {
    let mut stmt = conn.prepare("UPDATE template_blocks SET sort_order = ?1 WHERE id = ?2")?;
    for (index, id) in ids.iter().enumerate() {
        stmt.execute(params![position(index)?, id])?;
    }
    Ok(())
}

fn clamp_position(requested: i64, len: usize) -> usize {
    usize::try_from(requested).map_or(len, |p| p.min(len))
}
