//! Database manager implementation
//!
//! SQLite connection pool (r2d2) with an async wrapper that moves blocking
//! calls onto the tokio blocking pool.

use crate::core::error::{RegistryError, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task;

/// Database manager with connection pool
#[derive(Clone)]
pub struct DatabaseManager {
    pool: Pool<SqliteConnectionManager>,
    db_path: PathBuf,
}

impl DatabaseManager {
    /// Open (or create) the database file and bootstrap the schema
    pub fn new(db_path: &Path, pool_size: u32, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_timeout(Duration::from_secs(30))
            .build(manager)
            .map_err(|e| {
                RegistryError::InitializationError(format!("Failed to build connection pool: {}", e))
            })?;

        let manager = Self {
            pool,
            db_path: db_path.to_path_buf(),
        };
        manager.initialize_schema()?;

        Ok(manager)
    }

    /// Create a DatabaseManager backed by an in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();

        // every pooled connection to :memory: would be a separate database
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_secs(30))
            .build(manager)
            .map_err(|e| {
                RegistryError::InitializationError(format!("Failed to build connection pool: {}", e))
            })?;

        let manager = Self {
            pool,
            db_path: PathBuf::from(":memory:"),
        };
        manager.initialize_schema()?;

        Ok(manager)
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Execute a database operation on the blocking pool
    pub async fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&conn)
        })
        .await
        .map_err(|e| RegistryError::TaskError(format!("Database task panicked: {}", e)))?
    }

    /// Create the tables if they are missing
    pub fn initialize_schema(&self) -> Result<()> {
        let conn = self.get_connection()?;
        crate::db::schema::initialize(&conn)
    }

    /// Get the database file path
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Get the configured pool size
    pub fn pool_size(&self) -> u32 {
        self.pool.max_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_db() -> (DatabaseManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");
        let manager = DatabaseManager::new(&db_path, 4, Duration::from_secs(5)).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_database_manager_creation() {
        let (manager, temp_dir) = create_test_db();
        assert_eq!(manager.pool_size(), 4);
        assert!(temp_dir.path().join("nested").join("test.db").exists());
    }

    #[tokio::test]
    async fn test_schema_is_created() {
        let (manager, _temp_dir) = create_test_db();

        let count: i64 = manager
            .execute(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'students'",
                    [],
                    |row| row.get(0),
                )
                .map_err(RegistryError::DatabaseError)
            })
            .await
            .unwrap();

        assert_eq!(count, 1);
    }

    #[test]
    fn test_schema_bootstrap_is_idempotent() {
        let (manager, _temp_dir) = create_test_db();
        assert!(manager.initialize_schema().is_ok());

        let reopened = DatabaseManager::new(manager.db_path(), 2, Duration::from_secs(5));
        assert!(reopened.is_ok());
    }

    #[tokio::test]
    async fn test_execute_propagates_closure_error() {
        let manager = DatabaseManager::new_in_memory().unwrap();

        let result: Result<()> = manager
            .execute(|_conn| Err(RegistryError::ValidationError("boom".into())))
            .await;

        assert!(matches!(result, Err(RegistryError::ValidationError(_))));
    }
}
