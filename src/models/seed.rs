//! Seed fixture inserted by `Storage::ensure_populated` into an empty table.

use std::fs;
use std::path::Path;

use super::NewTrain;
use crate::error::{Error, Result};

const BUILTIN: &str = include_str!("../../fixtures/trains.json");

/// Built-in seed set shipped with the binary.
pub fn builtin() -> Result<Vec<NewTrain>> {
    parse(BUILTIN)
}

/// Loads a seed set from a JSON file holding an array of trains.
pub fn load(path: &Path) -> Result<Vec<NewTrain>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Configuration(format!("can't read seed file {}: {}", path.display(), e))
    })?;

    parse(&content)
}

fn parse(content: &str) -> Result<Vec<NewTrain>> {
    serde_json::from_str(content)
        .map_err(|e| Error::Configuration(format!("invalid seed data: {}", e)))
}
