//! Table bootstrap
//!
//! There is a single table and it never changes shape, so startup only
//! creates it when missing.

use crate::core::error::Result;
use rusqlite::Connection;
use tracing::debug;

const STUDENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    roll_no TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    subject1 INTEGER NOT NULL,
    subject2 INTEGER NOT NULL,
    subject3 INTEGER NOT NULL,
    subject4 INTEGER NOT NULL,
    subject5 INTEGER NOT NULL
);
"#;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(STUDENTS_TABLE)?;
    debug!("Students table ready");
    Ok(())
}
