use serde::{Deserialize, Serialize};
use std::fmt;

pub type BasePair = u64;

/// A centromere interval on a single chromosome, in base pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentromereInterval {
    pub id: String,
    pub start: BasePair,
    pub end: BasePair,
}

impl CentromereInterval {
    pub fn new(id: impl Into<String>, start: BasePair, end: BasePair) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    pub fn span(&self) -> BpRange {
        BpRange::new(self.start, self.end)
    }
}

/// Chromosome metadata as supplied by the metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromosomeItem {
    pub id: String,
    pub name: String,
    pub size: BasePair,
    #[serde(default)]
    pub centromeres: Vec<CentromereInterval>,
}

impl ChromosomeItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: BasePair) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
            centromeres: Vec::new(),
        }
    }

    pub fn with_centromere(mut self, centromere: CentromereInterval) -> Self {
        self.centromeres.push(centromere);
        self
    }

    pub fn has_centromeres(&self) -> bool {
        !self.centromeres.is_empty()
    }

    /// End of the last centromere, or 0 when there is none.
    pub fn last_centromere_end(&self) -> BasePair {
        self.centromeres.last().map(|c| c.end).unwrap_or(0)
    }

    /// The chromosome's full extent.
    pub fn span(&self) -> BpRange {
        BpRange::new(0, self.size)
    }
}

/// A base-pair range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BpRange {
    pub start: BasePair,
    pub end: BasePair,
}

impl BpRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(start: BasePair, end: BasePair) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn len(&self) -> BasePair {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, bp: BasePair) -> bool {
        self.start <= bp && bp <= self.end
    }

    /// Closed-interval intersection test.
    pub fn overlaps(&self, start: BasePair, end: BasePair) -> bool {
        self.start <= end && start <= self.end
    }

    /// Clamp both bounds into `[0, size]`.
    pub fn clamp_to(&self, size: BasePair) -> Self {
        Self::new(self.start.min(size), self.end.min(size))
    }
}

impl fmt::Display for BpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl From<char> for Strand {
    fn from(c: char) -> Self {
        match c {
            '-' => Strand::Reverse,
            _ => Strand::Forward,
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// A genetic element (gene, transposable element, ...) located on a chromosome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticElement {
    pub id: String,
    pub chromosome: String,
    pub start: BasePair,
    pub end: BasePair,
    pub strand: Option<Strand>,
    pub name: Option<String>,
    pub feature_type: String,
}

impl GeneticElement {
    pub fn location(&self) -> BpRange {
        BpRange::new(self.start, self.end)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_orders_bounds() {
        let r = BpRange::new(900, 100);
        assert_eq!(r.start, 100);
        assert_eq!(r.end, 900);
        assert_eq!(r.len(), 800);
    }

    #[test]
    fn test_range_overlap_is_closed() {
        let r = BpRange::new(100, 200);
        assert!(r.overlaps(200, 300));
        assert!(r.overlaps(50, 100));
        assert!(!r.overlaps(201, 300));
        assert!(r.contains(100) && r.contains(200));
    }

    #[test]
    fn test_range_clamps_to_chromosome() {
        assert_eq!(BpRange::new(100_000, 900_000_000).clamp_to(154_478), BpRange::new(100_000, 154_478));
        assert_eq!(BpRange::new(10, 20).clamp_to(154_478), BpRange::new(10, 20));
    }

    #[test]
    fn test_chromosome_deserializes_without_centromeres() {
        let chr: ChromosomeItem =
            serde_json::from_str(r#"{"id":"ChrC","name":"Chr C","size":154478}"#).unwrap();
        assert!(!chr.has_centromeres());
        assert_eq!(chr.last_centromere_end(), 0);
    }

    #[test]
    fn test_strand_from_char() {
        assert_eq!(Strand::from('-'), Strand::Reverse);
        assert_eq!(char::from(Strand::Forward), '+');
    }
}
