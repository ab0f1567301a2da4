//! Configuration surface
//!
//! An optional TOML file supplies the ordered connection candidate list;
//! without one, the built-in defaults mirror the usual places a roster
//! database lives.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RollbookConfig {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("rollbook.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<RollbookConfig>> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: RollbookConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Candidate locations tried when no configuration names any:
/// the working directory first, then the per-user data directories.
pub fn default_candidates() -> Vec<Candidate> {
    let mut candidates = vec![Candidate::new(".", "students")];
    if let Some(data_dir) = dirs::data_dir() {
        candidates.push(Candidate::new(data_dir.join("rollbook"), "students"));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(Candidate::new(home.join(".rollbook"), "students"));
    }
    candidates
}
