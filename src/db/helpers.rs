use crate::db::Database;
use crate::error::AppError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Run a store operation under the database lock.
///
/// Failures are logged with `operation` for context and passed through as
/// `AppError`, so handlers stay one line:
/// ```ignore
/// with_connection(&state.db, "list template blocks", |conn| Template::list(conn, day))
/// ```
pub fn with_connection<F, T, E>(db: &Arc<Mutex<Database>>, operation: &str, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Connection) -> Result<T, E>,
    E: Into<AppError>,
{
    let db = db.lock().map_err(|e| {
        log::error!("Failed to acquire database lock for {operation}: {e}");
        AppError::LockPoisoned
    })?;

    f(db.connection()).map_err(|e| {
        let err = e.into();
        if err.is_internal() {
            log::error!("Failed to {operation}: {err}");
        } else {
            log::debug!("Rejected {operation}: {err}");
        }
        err
    })
}

/// [`with_connection`] on the blocking pool, for async handlers.
pub async fn with_connection_async<F, T, E>(
    db: &Arc<Mutex<Database>>,
    operation: &'static str,
    f: F,
) -> Result<T, AppError>
where
    F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<AppError> + 'static,
{
    let db = Arc::clone(db);
    tokio::task::spawn_blocking(move || with_connection(&db, operation, f))
        .await
        .map_err(|e| AppError::Internal(format!("Task for {operation} failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Template, Weekday};
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_async_runs_off_the_runtime() {
        let (db, _dir) = setup_test_db();
        let db = Arc::new(Mutex::new(db));

        let blocks = with_connection_async(&db, "list template blocks", |conn| {
            Template::list(conn, Some(Weekday::Monday))
        })
        .await
        .unwrap();
        assert_eq!(blocks.len(), 14);
    }

    #[tokio::test]
    async fn test_async_passes_store_errors_through() {
        let (db, _dir) = setup_test_db();
        let db = Arc::new(Mutex::new(db));

        let result = with_connection_async(&db, "reorder template blocks", |conn| {
            Template::reorder(conn, Weekday::Monday, &[999_999])
        })
        .await;
        assert!(matches!(result, Err(AppError::NotFound { entity: "Block" })));
    }
}
