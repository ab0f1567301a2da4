//! Rollbook CLI - menu-driven student record manager

use std::path::PathBuf;

use clap::Parser;
use rollbook::store::Candidate;
use rollbook::{config, shell};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "rollbook")]
#[command(version)]
#[command(about = "Student record manager - SQLite-backed roster with an interactive shell")]
#[command(long_about = r#"
Rollbook keeps a roster of student records (name, age, class, marks) in a
SQLite database and manages them through an interactive menu.

On startup it tries each configured candidate location in order, creating
the database if it is absent, then drops into the menu.

Example usage:
  rollbook
  rollbook --database ./students.db
  rollbook --config ./rollbook.toml --verbose
"#)]
struct Cli {
    /// Path to the config file listing candidate database locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open exactly this database file, skipping candidate discovery
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let candidates = if let Some(path) = &cli.database {
        vec![Candidate::from_database_path(path)]
    } else {
        match config::load_config(cli.config.as_deref())? {
            Some(cfg) if !cfg.candidates.is_empty() => cfg.candidates,
            _ => config::default_candidates(),
        }
    };

    let mut store = shell::bootstrap(&candidates)?;
    let outcome = shell::run(&store);
    store.close();
    outcome
}
