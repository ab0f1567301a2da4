//! Database schema definitions

use rusqlite::Connection;

use crate::{Error, Result};

/// SQL to create the students table
///
/// `created_at`/`updated_at` keep a `CURRENT_TIMESTAMP` default for rows
/// created outside the store; the store itself writes both explicitly.
pub const CREATE_STUDENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    age INTEGER NOT NULL,
    class VARCHAR(50) NOT NULL,
    marks DECIMAL(5,2) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] =
    &["CREATE INDEX IF NOT EXISTS idx_students_name ON students(name)"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_STUDENTS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

/// Ensure the students table exists.
///
/// Conditional create only; safe to run on every startup against an existing
/// compatible table, and it never touches data. Creation failures (e.g.
/// insufficient privileges on the database file) surface as [`Error::Schema`].
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    for stmt in all_schema_statements() {
        conn.execute(stmt, []).map_err(Error::Schema)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema_creates_table() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='students'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO students (name, age, class, marks) VALUES ('Asha', 14, '8A', 88.5)",
            [],
        )
        .unwrap();

        // A second run must neither fail nor disturb existing rows.
        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
