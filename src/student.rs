//! Student record types
//!
//! `Student` is the persisted record as read back from the store.
//! `StudentUpdate` is a partial-update value: it carries only the fields the
//! caller intends to change, and the store translates it into an UPDATE
//! touching exactly those columns.

use chrono::NaiveDateTime;

/// Maximum length of a student name, matching the `VARCHAR(100)` column.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a class label, matching the `VARCHAR(50)` column.
pub const MAX_CLASS_LEN: usize = 50;

/// Lowest accepted student age.
pub const MIN_AGE: i64 = 5;

/// Highest accepted student age.
pub const MAX_AGE: i64 = 25;

/// A student record.
///
/// `id` uniquely and permanently identifies the record for its lifetime;
/// `created_at` is set once at creation and `updated_at` is refreshed on
/// every successful update, so `updated_at >= created_at` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Store-assigned identifier, immutable
    pub id: i64,
    /// Full name, non-empty, at most 100 characters
    pub name: String,
    /// Age in years, 5-25
    pub age: i64,
    /// Class/grade label, non-empty, at most 50 characters
    pub class: String,
    /// Marks out of 100, two fractional digits
    pub marks: f64,
    /// Creation instant (UTC), immutable
    pub created_at: NaiveDateTime,
    /// Last modification instant (UTC)
    pub updated_at: NaiveDateTime,
}

/// Partial update for a student record.
///
/// Only `Some` fields are written; everything else keeps its prior value.
/// An update with no fields set is a no-op, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub class: Option<String>,
    pub marks: Option<f64>,
}

impl StudentUpdate {
    /// Create an update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the student's name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Change the student's age
    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    /// Change the student's class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Change the student's marks
    pub fn marks(mut self, marks: f64) -> Self {
        self.marks = Some(marks);
        self
    }

    /// True when no field is set ("nothing requested")
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.class.is_none() && self.marks.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update() {
        let update = StudentUpdate::new();
        assert!(update.is_empty());
        assert_eq!(update, StudentUpdate::default());
    }

    #[test]
    fn test_builder_sets_only_named_fields() {
        let update = StudentUpdate::new().marks(91.25);
        assert!(!update.is_empty());
        assert_eq!(update.marks, Some(91.25));
        assert!(update.name.is_none());
        assert!(update.age.is_none());
        assert!(update.class.is_none());
    }

    #[test]
    fn test_builder_chains() {
        let update = StudentUpdate::new().name("Asha").age(15).class("9A");
        assert_eq!(update.name.as_deref(), Some("Asha"));
        assert_eq!(update.age, Some(15));
        assert_eq!(update.class.as_deref(), Some("9A"));
        assert!(update.marks.is_none());
    }
}
