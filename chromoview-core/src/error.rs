//! Error types for ChromoView core

use thiserror::Error;

/// Main error type for core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChromoError {
    #[error("Chromosome element is not measurable yet")]
    GeometryUnavailable,

    #[error("Chromosome is too short to map ({size} bp)")]
    DegenerateChromosome { size: u64 },

    #[error("Invalid chromosome metadata for {chromosome}: {message}")]
    InvalidMetadata { chromosome: String, message: String },

    #[error("Unknown chromosome: {id}")]
    UnknownChromosome { id: String },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },
}

impl ChromoError {
    pub fn invalid_metadata<S: Into<String>, M: Into<String>>(chromosome: S, message: M) -> Self {
        Self::InvalidMetadata {
            chromosome: chromosome.into(),
            message: message.into(),
        }
    }

    pub fn unknown_chromosome<S: Into<String>>(id: S) -> Self {
        Self::UnknownChromosome { id: id.into() }
    }

    pub fn parse<S: Into<String>, M: Into<String>>(file: S, message: M) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }
}

pub type ChromoResult<T> = Result<T, ChromoError>;

/// Failure reported by a gene-range source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneSourceError {
    #[error("Gene source unavailable: {0}")]
    Unavailable(String),

    #[error("Gene query rejected for {chromosome}: {message}")]
    Rejected { chromosome: String, message: String },
}
