use super::schema::SCHEMA;
use super::seed::SEED_WEEK;
use crate::models::block::position;
use crate::models::Template;
use rusqlite::{params, Connection, Result};

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    seed_template(conn)?;
    Ok(())
}

/// Seed the template week if the template table is empty.
/// Returns the number of blocks inserted.
fn seed_template(conn: &Connection) -> Result<usize> {
    if Template::count(conn)? > 0 {
        return Ok(0);
    }

    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO template_blocks (day, sort_order, time_label, category, description, hours)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (day, blocks) in SEED_WEEK {
            for (index, (time_label, category, description, hours)) in blocks.iter().enumerate() {
                stmt.execute(params![day, position(index)?, time_label, category, description, hours])?;
                inserted += 1;
            }
        }
    }
    tx.commit()?;

    log::info!("Seeded template week with {inserted} blocks");
    Ok(inserted)
}

/// Seed the template week. With `force`, existing template blocks are cleared
/// first; without it a populated template is left alone.
/// Overrides and the audit log are never touched.
pub fn reseed(conn: &Connection, force: bool) -> Result<usize> {
    conn.execute_batch(SCHEMA)?;

    if force {
        let cleared = conn.execute("DELETE FROM template_blocks", [])?;
        log::info!("Cleared {cleared} template blocks");
    }
    seed_template(conn)
}
