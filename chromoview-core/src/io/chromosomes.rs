use crate::error::{ChromoError, ChromoResult};
use crate::types::ChromosomeItem;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies chromosome metadata for a species.
pub trait ChromosomeSource {
    fn chromosomes(&self, species: &str) -> Result<Vec<ChromosomeItem>>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MetadataDocument {
    Wrapped { chromosomes: Vec<ChromosomeItem> },
    Bare(Vec<ChromosomeItem>),
}

/// Parse and normalize a metadata document.
pub fn parse_chromosomes(json: &str) -> Result<Vec<ChromosomeItem>> {
    let document: MetadataDocument =
        serde_json::from_str(json).context("Failed to parse chromosome metadata")?;
    let chromosomes = match document {
        MetadataDocument::Wrapped { chromosomes } => chromosomes,
        MetadataDocument::Bare(chromosomes) => chromosomes,
    };
    Ok(normalize_chromosomes(chromosomes)?)
}

/// Sort a chromosome's centromeres by start and validate them.
///
/// Fails on an empty chromosome, an interval with `start >= end` or
/// `end > size`, and overlapping intervals.
pub fn normalize_chromosome(mut chromosome: ChromosomeItem) -> ChromoResult<ChromosomeItem> {
    if chromosome.size == 0 {
        return Err(ChromoError::invalid_metadata(&chromosome.id, "size is zero"));
    }
    chromosome.centromeres.sort_by_key(|c| (c.start, c.end));

    for centromere in &chromosome.centromeres {
        if centromere.start >= centromere.end {
            return Err(ChromoError::invalid_metadata(
                &chromosome.id,
                format!(
                    "centromere {} is empty or reversed ({}-{})",
                    centromere.id, centromere.start, centromere.end
                ),
            ));
        }
        if centromere.end > chromosome.size {
            return Err(ChromoError::invalid_metadata(
                &chromosome.id,
                format!(
                    "centromere {} ends at {} past chromosome size {}",
                    centromere.id, centromere.end, chromosome.size
                ),
            ));
        }
    }
    if let Some(pair) = chromosome
        .centromeres
        .windows(2)
        .find(|pair| pair[1].start < pair[0].end)
    {
        return Err(ChromoError::invalid_metadata(
            &chromosome.id,
            format!("centromeres {} and {} overlap", pair[0].id, pair[1].id),
        ));
    }
    Ok(chromosome)
}

/// Normalize every chromosome and reject duplicate ids.
pub fn normalize_chromosomes(chromosomes: Vec<ChromosomeItem>) -> ChromoResult<Vec<ChromosomeItem>> {
    let mut seen = HashSet::new();
    chromosomes
        .into_iter()
        .map(|chromosome| {
            if !seen.insert(chromosome.id.clone()) {
                return Err(ChromoError::invalid_metadata(&chromosome.id, "duplicate id"));
            }
            normalize_chromosome(chromosome)
        })
        .collect()
}

/// Metadata read from a JSON file on disk. The file holds one species.
#[derive(Debug, Clone)]
pub struct JsonChromosomeFile {
    path: PathBuf,
}

impl JsonChromosomeFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChromosomeSource for JsonChromosomeFile {
    fn chromosomes(&self, species: &str) -> Result<Vec<ChromosomeItem>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let chromosomes = parse_chromosomes(&json)
            .with_context(|| format!("Invalid metadata in {}", self.path.display()))?;
        log::info!(
            "Loaded {} chromosomes for {} from {}",
            chromosomes.len(),
            species,
            self.path.display()
        );
        Ok(chromosomes)
    }
}
