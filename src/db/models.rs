//! Database models

/// Student record as stored
///
/// Deliberately not `Serialize`: API responses go through
/// `StudentProfile`, which has no hash field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub password_hash: String,
    pub subject1: i64,
    pub subject2: i64,
    pub subject3: i64,
    pub subject4: i64,
    pub subject5: i64,
}

impl Student {
    /// Column list matching [`Student::from_row`]
    pub(crate) const COLUMNS: &'static str = "id, name, roll_no, password_hash, \
         subject1, subject2, subject3, subject4, subject5";

    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Student {
            id: row.get(0)?,
            name: row.get(1)?,
            roll_no: row.get(2)?,
            password_hash: row.get(3)?,
            subject1: row.get(4)?,
            subject2: row.get(5)?,
            subject3: row.get(6)?,
            subject4: row.get(7)?,
            subject5: row.get(8)?,
        })
    }
}
