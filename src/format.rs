//! Query result formatting
//!
//! Pure shaping of [`Student`] records into display rows: fixed-format
//! timestamps, two-digit marks, original order preserved. Nothing here
//! touches the store.

use tabled::{Table, Tabled, settings::Style};

use crate::student::Student;

/// Fixed display layout for record timestamps
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One student shaped for terminal display
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct StudentRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Age")]
    pub age: i64,
    #[tabled(rename = "Class")]
    pub class: String,
    #[tabled(rename = "Marks")]
    pub marks: String,
    #[tabled(rename = "Created")]
    pub created_at: String,
    #[tabled(rename = "Updated")]
    pub updated_at: String,
}

impl StudentRow {
    fn from_student(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            age: student.age,
            class: student.class.clone(),
            marks: format!("{:.2}", student.marks),
            created_at: student
                .created_at
                .format(DISPLAY_TIMESTAMP_FORMAT)
                .to_string(),
            updated_at: student
                .updated_at
                .format(DISPLAY_TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

/// Shape records for display, preserving their order
pub fn format_rows(students: &[Student]) -> Vec<StudentRow> {
    students.iter().map(StudentRow::from_student).collect()
}

/// Render rows as a rounded terminal table
pub fn roster_table(rows: &[StudentRow]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_student(id: i64, name: &str, marks: f64) -> Student {
        let created = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_micro_opt(8, 30, 5, 123_456)
            .unwrap();
        Student {
            id,
            name: name.to_string(),
            age: 14,
            class: "8A".to_string(),
            marks,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_timestamps_render_fixed_format() {
        let rows = format_rows(&[sample_student(1, "Asha", 88.5)]);
        assert_eq!(rows[0].created_at, "2025-03-09 08:30:05");
        assert_eq!(rows[0].updated_at, "2025-03-09 08:30:05");
    }

    #[test]
    fn test_marks_render_two_digits() {
        let rows = format_rows(&[
            sample_student(1, "Asha", 88.5),
            sample_student(2, "Ben", 100.0),
        ]);
        assert_eq!(rows[0].marks, "88.50");
        assert_eq!(rows[1].marks, "100.00");
    }

    #[test]
    fn test_order_preserved() {
        let students = [
            sample_student(3, "Meena", 91.0),
            sample_student(1, "Asha", 88.5),
            sample_student(2, "Ben", 72.0),
        ];
        let rows = format_rows(&students);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_input_renders_no_rows() {
        assert!(format_rows(&[]).is_empty());
    }

    #[test]
    fn test_roster_table_contains_headers_and_values() {
        let rows = format_rows(&[sample_student(1, "Asha", 88.5)]);
        let table = roster_table(&rows);
        assert!(table.contains("Name"));
        assert!(table.contains("Asha"));
        assert!(table.contains("88.50"));
    }
}
