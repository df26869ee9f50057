//! Gene-range lookups
//!
//! The overlay asks a [`GeneSource`] for every genetic element intersecting
//! the selected range. [`AnnotationIndex`] is a file-backed source built from
//! GFF3 annotations.

use crate::error::{ChromoError, GeneSourceError};
use crate::types::{BasePair, BpRange, GeneticElement, Strand};
use anyhow::Result;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Feature types kept when indexing GFF3 annotations.
pub const GENE_FEATURE_TYPES: &[&str] = &[
    "gene",
    "pseudogene",
    "transposable_element_gene",
    "transposable_element",
];

pub trait GeneSource {
    fn genes_in_range(
        &self,
        chromosome_id: &str,
        range: BpRange,
    ) -> Result<Vec<GeneticElement>, GeneSourceError>;
}

/// Per-chromosome element lists, each sorted by start.
#[derive(Debug, Default)]
pub struct AnnotationIndex {
    by_chromosome: HashMap<String, Vec<GeneticElement>>,
}

impl AnnotationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements<I: IntoIterator<Item = GeneticElement>>(elements: I) -> Self {
        let mut index = Self::new();
        for element in elements {
            index
                .by_chromosome
                .entry(element.chromosome.clone())
                .or_default()
                .push(element);
        }
        for list in index.by_chromosome.values_mut() {
            list.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        }
        index
    }

    pub fn from_gff3_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let elements = Gff3Reader::open(&path)?.read_elements(GENE_FEATURE_TYPES)?;
        log::info!(
            "Indexed {} genetic elements from {}",
            elements.len(),
            path.as_ref().display()
        );
        Ok(Self::from_elements(elements))
    }

    pub fn len(&self) -> usize {
        self.by_chromosome.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.by_chromosome.keys().map(String::as_str)
    }
}

impl GeneSource for AnnotationIndex {
    fn genes_in_range(
        &self,
        chromosome_id: &str,
        range: BpRange,
    ) -> Result<Vec<GeneticElement>, GeneSourceError> {
        let Some(elements) = self.by_chromosome.get(chromosome_id) else {
            return Ok(Vec::new());
        };
        Ok(elements
            .iter()
            .take_while(|e| e.start <= range.end)
            .filter(|e| range.overlaps(e.start, e.end))
            .cloned()
            .collect())
    }
}

pub struct Gff3Reader<R: BufRead> {
    reader: R,
    source_name: String,
}

impl Gff3Reader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        Ok(Self {
            reader: BufReader::new(file),
            source_name: path.as_ref().display().to_string(),
        })
    }
}

impl<R: BufRead> Gff3Reader<R> {
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        Self {
            reader,
            source_name: source_name.into(),
        }
    }

    /// Read every feature whose type is in `feature_types`.
    pub fn read_elements(self, feature_types: &[&str]) -> Result<Vec<GeneticElement>> {
        let mut elements = Vec::new();
        for (line_no, line) in self.reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // FASTA section ends the feature table
            if line.starts_with('>') {
                break;
            }

            let element = parse_gff3_line(line).map_err(|message| {
                ChromoError::parse(&self.source_name, format!("line {}: {}", line_no + 1, message))
            })?;
            if let Some(element) = element.filter(|e| feature_types.contains(&e.feature_type.as_str())) {
                elements.push(element);
            }
        }
        Ok(elements)
    }
}

fn parse_gff3_line(line: &str) -> Result<Option<GeneticElement>, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 9 {
        return Err(format!("expected 9 fields, found {}", fields.len()));
    }

    let start: BasePair = fields[3]
        .parse()
        .map_err(|_| format!("invalid start '{}'", fields[3]))?;
    let end: BasePair = fields[4]
        .parse()
        .map_err(|_| format!("invalid end '{}'", fields[4]))?;
    if start > end {
        return Err(format!("start {} after end {}", start, end));
    }

    let strand = match fields[6] {
        "+" => Some(Strand::Forward),
        "-" => Some(Strand::Reverse),
        _ => None,
    };

    let attributes: HashMap<&str, &str> = fields[8]
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .collect();
    let Some(id) = attributes.get("ID").map(|id| decode_attribute(id)).transpose()? else {
        return Ok(None);
    };
    let name = attributes
        .get("Name")
        .map(|name| decode_attribute(name))
        .transpose()?
        .filter(|name| *name != id);

    Ok(Some(GeneticElement {
        id,
        chromosome: fields[0].to_string(),
        start,
        end,
        strand,
        name,
        feature_type: fields[2].to_string(),
    }))
}

/// Undo GFF3 `%XX` escaping in an attribute value.
fn decode_attribute(value: &str) -> Result<String, String> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| format!("attribute value '{}' is not valid UTF-8 once decoded", value))
}
