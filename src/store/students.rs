//! SQLite-backed student store

use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use rusqlite::{Connection, OptionalExtension, ToSql, params};

use super::schema;
use crate::student::{MAX_AGE, MAX_CLASS_LEN, MAX_NAME_LEN, MIN_AGE, Student, StudentUpdate};
use crate::{Error, Result};

/// Timestamp layout written by the store (UTC, microsecond precision).
///
/// Microsecond precision keeps `updated_at` strictly advancing even for
/// back-to-back writes; the display layer truncates to whole seconds.
const TIMESTAMP_WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Timestamp layout accepted when reading rows back.
///
/// `%.f` also matches rows without a fractional part, i.e. rows that picked
/// up the schema's `CURRENT_TIMESTAMP` default.
const TIMESTAMP_READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// SQLite-backed storage for student records.
///
/// Owns the single live connection for the lifetime of the process. All
/// operations are synchronous; zero rows matched is a normal result, never
/// an error.
#[derive(Debug)]
pub struct StudentStore {
    conn: Option<Connection>,
}

impl StudentStore {
    /// Open a database file (creates if doesn't exist) and ensure the schema
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::Connection(Box::new(e)))?;
        schema::ensure_schema(&conn)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Connection(Box::new(e)))?;
        schema::ensure_schema(&conn)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Release the connection.
    ///
    /// Idempotent: calling it on an already-closed store is a no-op. Any
    /// operation after `close()` fails with [`Error::Closed`]. Dropping the
    /// store releases the connection as well, so every exit path is covered.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_conn, e)) = conn.close() {
                tracing::warn!("error releasing database connection: {e}");
            }
        }
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(Error::Closed)
    }

    // ========== Write Operations ==========

    /// Insert a new student and return the store-assigned id.
    ///
    /// Both timestamps are set to the same instant, so a freshly created
    /// record has `created_at == updated_at`.
    pub fn create(&self, name: &str, age: i64, class: &str, marks: f64) -> Result<i64> {
        validate_name(name)?;
        validate_class(class)?;
        validate_age(age)?;
        validate_marks(marks)?;

        let conn = self.conn()?;
        let now = now_timestamp();
        conn.execute(
            r#"
            INSERT INTO students (name, age, class, marks, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![name, age, class, round_marks(marks), now, now],
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, name, "created student record");
        Ok(id)
    }

    /// Apply a partial update to the record matching `id`.
    ///
    /// Builds a parameterized UPDATE touching exactly the supplied columns
    /// plus `updated_at`. Returns the number of rows affected (0 or 1); an
    /// empty update returns 0 without touching the store, and a missing id
    /// returns 0 rather than an error.
    pub fn update(&self, id: i64, update: &StudentUpdate) -> Result<usize> {
        if update.is_empty() {
            return Ok(0);
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();
        let rounded;

        if let Some(name) = &update.name {
            validate_name(name)?;
            assignments.push("name = ?");
            values.push(name);
        }
        if let Some(age) = &update.age {
            validate_age(*age)?;
            assignments.push("age = ?");
            values.push(age);
        }
        if let Some(class) = &update.class {
            validate_class(class)?;
            assignments.push("class = ?");
            values.push(class);
        }
        if let Some(marks) = update.marks {
            validate_marks(marks)?;
            rounded = round_marks(marks);
            assignments.push("marks = ?");
            values.push(&rounded);
        }

        let now = now_timestamp();
        assignments.push("updated_at = ?");
        values.push(&now);
        values.push(&id);

        let sql = format!("UPDATE students SET {} WHERE id = ?", assignments.join(", "));
        let rows = self.conn()?.execute(&sql, &values[..])?;
        tracing::debug!(id, rows, "updated student record");
        Ok(rows)
    }

    /// Delete the record matching `id`; returns rows affected (0 or 1).
    ///
    /// Hard delete, no recovery path.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let rows = self
            .conn()?
            .execute("DELETE FROM students WHERE id = ?1", params![id])?;
        tracing::debug!(id, rows, "deleted student record");
        Ok(rows)
    }

    // ========== Read Operations ==========

    /// All students, ascending by id
    pub fn list_all(&self) -> Result<Vec<Student>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, age, class, marks, created_at, updated_at FROM students ORDER BY id",
        )?;

        let students = stmt
            .query_map([], Self::row_to_student)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(students)
    }

    /// Students whose name contains `term`, case-insensitively, ascending by name
    pub fn search_by_name(&self, term: &str) -> Result<Vec<Student>> {
        let pattern = format!("%{}%", term);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, age, class, marks, created_at, updated_at FROM students \
             WHERE name LIKE ?1 ORDER BY name",
        )?;

        let students = stmt
            .query_map([pattern], Self::row_to_student)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(students)
    }

    /// The student matching `id`, if any
    pub fn search_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.conn()?
            .query_row(
                "SELECT id, name, age, class, marks, created_at, updated_at FROM students WHERE id = ?1",
                [id],
                Self::row_to_student,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Total number of students
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Student
    fn row_to_student(row: &rusqlite::Row) -> rusqlite::Result<Student> {
        Ok(Student {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            class: row.get(3)?,
            marks: row.get(4)?,
            created_at: parse_timestamp(row, 5)?,
            updated_at: parse_timestamp(row, 6)?,
        })
    }
}

fn now_timestamp() -> String {
    Utc::now()
        .naive_utc()
        .format(TIMESTAMP_WRITE_FORMAT)
        .to_string()
}

fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_READ_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Round marks to the two fractional digits the column stores
fn round_marks(marks: f64) -> f64 {
    (marks * 100.0).round() / 100.0
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::Validation(format!(
            "name is longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_class(class: &str) -> Result<()> {
    if class.trim().is_empty() {
        return Err(Error::Validation("class must not be empty".into()));
    }
    if class.chars().count() > MAX_CLASS_LEN {
        return Err(Error::Validation(format!(
            "class is longer than {MAX_CLASS_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_age(age: i64) -> Result<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(Error::Validation(format!(
            "age must be between {MIN_AGE} and {MAX_AGE}"
        )));
    }
    Ok(())
}

fn validate_marks(marks: f64) -> Result<()> {
    if !marks.is_finite() || !(0.0..=100.0).contains(&marks) {
        return Err(Error::Validation(
            "marks must be between 0.00 and 100.00".into(),
        ));
    }
    Ok(())
}
