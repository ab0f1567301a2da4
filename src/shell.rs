//! Interactive menu shell
//!
//! Thin I/O glue around the record layer: renders the menu, runs the input
//! validation loops, calls one store operation per choice, and renders the
//! result. Record-layer errors are reported and the session continues; the
//! shell itself never touches SQL.

use console::Term;

use crate::format::{format_rows, roster_table};
use crate::store::{self, Candidate, StudentStore};
use crate::student::{MAX_AGE, MIN_AGE, StudentUpdate};
use crate::ui::{self, Icons};

/// Connect using the configured candidates, falling back to a manually
/// entered location when every candidate fails and a terminal is attached.
pub fn bootstrap(candidates: &[Candidate]) -> anyhow::Result<StudentStore> {
    ui::header(&format!("{} DATABASE SETUP", Icons::WRENCH));

    match store::connect(candidates) {
        Ok(store) => {
            ui::success("Connected to the student database");
            return Ok(store);
        }
        Err(e) => ui::error(&format!("Could not open any configured database: {e}")),
    }

    let term = Term::stdout();
    if term.is_term() {
        ui::info("Enter a database location manually:");
        let dir = prompt(&term, "Data directory (default: .)")?;
        let dir = if dir.is_empty() { ".".to_string() } else { dir };
        let database = prompt(&term, "Database name (default: students)")?;
        let database = if database.is_empty() {
            "students".to_string()
        } else {
            database
        };

        let manual = Candidate::new(dir, database);
        match store::connect(std::slice::from_ref(&manual)) {
            Ok(store) => {
                ui::success(&format!("Connected to {manual}"));
                return Ok(store);
            }
            Err(e) => ui::error(&format!("Could not open {manual}: {e}")),
        }
    }

    ui::warn("Troubleshooting:");
    println!("  {}", ui::dim("1. Check that the data directory exists and is writable"));
    println!("  {}", ui::dim("2. Pass an explicit file with --database path/to/students.db"));
    println!("  {}", ui::dim("3. List candidate locations in rollbook.toml"));
    anyhow::bail!("failed to open a student database")
}

/// Run the menu loop until the user exits
pub fn run(store: &StudentStore) -> anyhow::Result<()> {
    let term = Term::stdout();
    ui::header(&format!("{} WELCOME TO THE STUDENT RECORD MANAGER", Icons::GRAD));

    loop {
        print_menu();
        let choice = prompt(&term, &format!("{} Enter your choice (1-8)", Icons::POINT))?;

        match choice.as_str() {
            "1" => add_student(&term, store)?,
            "2" => update_student(&term, store)?,
            "3" => delete_student(&term, store)?,
            "4" => view_all(store),
            "5" => search_by_name(&term, store)?,
            "6" => search_by_id(&term, store)?,
            "7" => show_count(store),
            "8" => {
                ui::info(&format!("{} Thank you for using the record manager. Goodbye!", Icons::WAVE));
                break;
            }
            _ => ui::warn("Invalid choice. Please enter a number between 1 and 8."),
        }
    }

    Ok(())
}

fn print_menu() {
    ui::header(&format!("{} STUDENT RECORD MANAGER", Icons::BOOKS));
    println!("1. {} Add New Student", Icons::ADD);
    println!("2. {} Update Student Information", Icons::EDIT);
    println!("3. {} Delete Student", Icons::TRASH);
    println!("4. {} View All Students", Icons::GROUP);
    println!("5. {} Search Student by Name", Icons::SEARCH);
    println!("6. {} Search Student by ID", Icons::MAG);
    println!("7. {} Display Student Count", Icons::STATS);
    println!("8. {} Exit", Icons::DOOR);
}

// ========== Menu Actions ==========

fn add_student(term: &Term, store: &StudentStore) -> anyhow::Result<()> {
    println!("\n{} Enter Student Details:", Icons::MEMO);
    let name = prompt_required(term, "Name")?;
    let age = prompt_age(term)?;
    let class = prompt_required(term, "Class")?;
    let marks = prompt_marks(term)?;

    match store.create(&name, age, &class, marks) {
        Ok(id) => ui::success(&format!("Student added successfully with ID: {id}")),
        Err(e) => ui::error(&format!("Error adding student: {e}")),
    }
    Ok(())
}

fn update_student(term: &Term, store: &StudentStore) -> anyhow::Result<()> {
    let id = prompt_id(term, "Enter student ID to update")?;

    println!("\nEnter new information (leave blank to keep current value):");
    let mut update = StudentUpdate::new();
    if let Some(name) = prompt_optional(term, "Name")? {
        update = update.name(name);
    }
    if let Some(age) = prompt_optional_age(term)? {
        update = update.age(age);
    }
    if let Some(class) = prompt_optional(term, "Class")? {
        update = update.class(class);
    }
    if let Some(marks) = prompt_optional_marks(term)? {
        update = update.marks(marks);
    }

    if update.is_empty() {
        ui::info("No changes provided");
        return Ok(());
    }

    match store.update(id, &update) {
        Ok(rows) if rows > 0 => ui::success(&format!("Student with ID {id} updated successfully")),
        Ok(_) => ui::warn(&format!("No student found with ID {id}")),
        Err(e) => ui::error(&format!("Error updating student: {e}")),
    }
    Ok(())
}

fn delete_student(term: &Term, store: &StudentStore) -> anyhow::Result<()> {
    let id = prompt_id(term, "Enter student ID to delete")?;

    let confirm = prompt(
        term,
        &format!("{} Are you sure you want to delete student with ID {id}? (yes/no)", Icons::WARN),
    )?;
    if !confirm.eq_ignore_ascii_case("yes") {
        ui::info("Deletion cancelled");
        return Ok(());
    }

    match store.delete(id) {
        Ok(rows) if rows > 0 => ui::success(&format!("Student with ID {id} deleted successfully")),
        Ok(_) => ui::warn(&format!("No student found with ID {id}")),
        Err(e) => ui::error(&format!("Error deleting student: {e}")),
    }
    Ok(())
}

fn view_all(store: &StudentStore) {
    match store.list_all() {
        Ok(students) if students.is_empty() => ui::info("No students found in the database"),
        Ok(students) => {
            println!("\n{}", roster_table(&format_rows(&students)));
            println!("Total students: {}", students.len());
        }
        Err(e) => ui::error(&format!("Error retrieving students: {e}")),
    }
}

fn search_by_name(term: &Term, store: &StudentStore) -> anyhow::Result<()> {
    let needle = prompt(term, "Enter student name or part of name to search")?;
    if needle.is_empty() {
        ui::warn("Please enter a search term");
        return Ok(());
    }

    match store.search_by_name(&needle) {
        Ok(students) if students.is_empty() => {
            ui::warn(&format!("No students found matching '{needle}'"));
        }
        Ok(students) => {
            println!("\n{}", roster_table(&format_rows(&students)));
            println!("Found {} matching student(s)", students.len());
        }
        Err(e) => ui::error(&format!("Error searching students: {e}")),
    }
    Ok(())
}

fn search_by_id(term: &Term, store: &StudentStore) -> anyhow::Result<()> {
    let id = prompt_id(term, "Enter student ID to search")?;

    match store.search_by_id(id) {
        Ok(Some(student)) => {
            println!("\n{}", roster_table(&format_rows(std::slice::from_ref(&student))));
        }
        Ok(None) => ui::warn(&format!("No student found with ID {id}")),
        Err(e) => ui::error(&format!("Error searching students: {e}")),
    }
    Ok(())
}

fn show_count(store: &StudentStore) {
    match store.count() {
        Ok(count) => println!("\n{} Total students in database: {count}", Icons::STATS),
        Err(e) => ui::error(&format!("Error getting student count: {e}")),
    }
}

// ========== Input Helpers ==========

fn prompt(term: &Term, label: &str) -> anyhow::Result<String> {
    term.write_str(&format!("{label}: "))?;
    let line = term.read_line()?;
    Ok(line.trim().to_string())
}

/// Prompt until a non-empty value is entered
fn prompt_required(term: &Term, label: &str) -> anyhow::Result<String> {
    loop {
        let value = prompt(term, label)?;
        if !value.is_empty() {
            return Ok(value);
        }
        ui::warn(&format!("{label} cannot be empty!"));
    }
}

/// Prompt until a valid age is entered
fn prompt_age(term: &Term) -> anyhow::Result<i64> {
    loop {
        match prompt(term, "Age")?.parse::<i64>() {
            Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => return Ok(age),
            Ok(_) => ui::warn(&format!("Please enter a valid age ({MIN_AGE}-{MAX_AGE})")),
            Err(_) => ui::warn("Please enter a valid number for age"),
        }
    }
}

/// Prompt until valid marks are entered
fn prompt_marks(term: &Term) -> anyhow::Result<f64> {
    loop {
        match prompt(term, "Marks (0-100)")?.parse::<f64>() {
            Ok(marks) if (0.0..=100.0).contains(&marks) => return Ok(marks),
            Ok(_) => ui::warn("Please enter marks between 0 and 100"),
            Err(_) => ui::warn("Please enter a valid number for marks"),
        }
    }
}

/// Prompt until a valid id is entered
fn prompt_id(term: &Term, label: &str) -> anyhow::Result<i64> {
    loop {
        match prompt(term, label)?.parse::<i64>() {
            Ok(id) => return Ok(id),
            Err(_) => ui::warn("Please enter a valid student ID"),
        }
    }
}

/// Optional text input; blank keeps the current value
fn prompt_optional(term: &Term, label: &str) -> anyhow::Result<Option<String>> {
    let value = prompt(term, label)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Optional age input; blank keeps the current value
fn prompt_optional_age(term: &Term) -> anyhow::Result<Option<i64>> {
    loop {
        let value = prompt(term, "Age")?;
        if value.is_empty() {
            return Ok(None);
        }
        match value.parse::<i64>() {
            Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => return Ok(Some(age)),
            Ok(_) => ui::warn(&format!("Please enter a valid age ({MIN_AGE}-{MAX_AGE})")),
            Err(_) => ui::warn("Please enter a valid number for age"),
        }
    }
}

/// Optional marks input; blank keeps the current value
fn prompt_optional_marks(term: &Term) -> anyhow::Result<Option<f64>> {
    loop {
        let value = prompt(term, "Marks")?;
        if value.is_empty() {
            return Ok(None);
        }
        match value.parse::<f64>() {
            Ok(marks) if (0.0..=100.0).contains(&marks) => return Ok(Some(marks)),
            Ok(_) => ui::warn("Please enter marks between 0 and 100"),
            Err(_) => ui::warn("Please enter a valid number for marks"),
        }
    }
}
