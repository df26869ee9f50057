//! Chromosome metadata I/O
//!
//! Metadata arrives as the `chromosomeinfo` JSON document
//! (`{"chromosomes": [...]}`) or as a bare array of chromosome records.
//! Everything that enters the viewer passes through [`normalize_chromosome`].

pub mod chromosomes;

pub use chromosomes::{
    normalize_chromosome, normalize_chromosomes, parse_chromosomes, ChromosomeSource,
    JsonChromosomeFile,
};
