//! Shared test utilities.

#![cfg(test)]

use crate::db::{migrations, schema::SCHEMA, Database};
use tempfile::{tempdir, TempDir};

/// Create a temporary test database with migrations applied, so the template
/// week is seeded.
///
/// The TempDir must be kept alive for the duration of the test to prevent the
/// database file from being deleted.
pub fn setup_test_db() -> (Database, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    migrations::run(db.connection()).expect("Failed to run migrations on test DB");
    (db, dir)
}

/// Create a temporary test database with the schema only and no seed data.
pub fn setup_empty_test_db() -> (Database, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    db.connection()
        .execute_batch(SCHEMA)
        .expect("Failed to create schema on test DB");
    (db, dir)
}
