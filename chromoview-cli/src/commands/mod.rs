//! Command implementations for the ChromoView CLI

pub mod bands;
pub mod locate;
pub mod render;
pub mod replay;

use crate::error::{require_file, CliError};
use anyhow::Result;
use chromoview_core::state::DEFAULT_SPECIES;
use chromoview_core::{ChromosomeItem, ChromosomeSource, JsonChromosomeFile};
use std::path::Path;

/// Read and normalize a metadata file.
pub fn load_chromosomes(path: &Path) -> Result<Vec<ChromosomeItem>> {
    require_file(path)?;
    JsonChromosomeFile::new(path).chromosomes(DEFAULT_SPECIES)
}

pub fn find_chromosome<'a>(chromosomes: &'a [ChromosomeItem], id: &str) -> Result<&'a ChromosomeItem, CliError> {
    chromosomes
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| CliError::unknown_chromosome(id))
}
