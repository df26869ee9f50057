//! Chromosome glyph composition
//!
//! A chromosome is drawn as a stack of bands. Without centromeres it is a
//! single capsule. With centromeres, a narrow centromeric band marks each
//! centromere and full-width non-centromeric segments fill the arms between
//! them. Geometry here is logical (zoom 1.0); the viewport scales it.

use crate::types::{BasePair, BpRange, ChromosomeItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandKind {
    Centromeric,
    NonCentromeric,
}

/// Corner style of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Fully rounded pill covering the whole chromosome
    Capsule,
    /// Radius on the vertical axis only
    Vertical,
    /// Radius on both axes, used for the outer terminus
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub kind: BandKind,
    pub span: BpRange,
    pub rounding: Rounding,
}

/// Fixed glyph constants, in pixels at zoom 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub per_bp_height: f64,
    pub centromeric_width_factor: f64,
    pub non_centromeric_x_offset: f64,
}

impl Default for GlyphGeometry {
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 0.0,
            width: 10.0,
            per_bp_height: 0.000015,
            centromeric_width_factor: 0.6,
            non_centromeric_x_offset: -2.0,
        }
    }
}

impl GlyphGeometry {
    pub fn height_of(&self, bp: BasePair) -> f64 {
        bp as f64 * self.per_bp_height
    }

    pub fn corner_radius(&self) -> f64 {
        self.width / 2.0
    }
}

/// A band positioned in glyph-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rounding: Rounding,
    pub radius: f64,
}

impl BandRect {
    pub fn is_capsule(&self) -> bool {
        self.rounding == Rounding::Capsule
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

impl Band {
    pub fn rect(&self, geometry: &GlyphGeometry) -> BandRect {
        let y = geometry.y + geometry.height_of(self.span.start);
        let height = geometry.height_of(self.span.len());
        let (x, width) = match (self.kind, self.rounding) {
            (BandKind::Centromeric, _) => (
                geometry.x,
                geometry.width * geometry.centromeric_width_factor,
            ),
            (BandKind::NonCentromeric, Rounding::Capsule) => (geometry.x, geometry.width),
            (BandKind::NonCentromeric, _) => (
                geometry.x + geometry.non_centromeric_x_offset,
                geometry.width,
            ),
        };
        BandRect {
            x,
            y,
            width,
            height,
            rounding: self.rounding,
            radius: geometry.corner_radius(),
        }
    }
}

/// Compose the drawable bands of a chromosome, centromeric layer first.
///
/// Centromeres must be sorted by start and must not overlap; the composer
/// does not re-sort them (see [`crate::io::normalize_chromosome`]).
pub fn compose_bands(chromosome: &ChromosomeItem) -> Vec<Band> {
    if !chromosome.has_centromeres() {
        return vec![Band {
            kind: BandKind::NonCentromeric,
            span: chromosome.span(),
            rounding: Rounding::Capsule,
        }];
    }

    let mut bands: Vec<Band> = chromosome
        .centromeres
        .iter()
        .map(|centromere| Band {
            kind: BandKind::Centromeric,
            span: centromere.span(),
            rounding: Rounding::Vertical,
        })
        .collect();

    let last_end = chromosome
        .centromeres
        .iter()
        .fold(0, |previous_end, centromere| {
            bands.push(Band {
                kind: BandKind::NonCentromeric,
                span: BpRange::new(previous_end, centromere.start),
                rounding: Rounding::Vertical,
            });
            centromere.end
        });

    bands.push(Band {
        kind: BandKind::NonCentromeric,
        span: BpRange::new(last_end, chromosome.size),
        rounding: Rounding::Full,
    });
    bands
}

/// Transparent input layer drawn over every band; receives pointer events.
pub fn hit_region(chromosome: &ChromosomeItem, geometry: &GlyphGeometry) -> BandRect {
    BandRect {
        x: geometry.x + geometry.non_centromeric_x_offset,
        y: geometry.y,
        width: geometry.width,
        height: geometry.height_of(chromosome.size),
        rounding: Rounding::Full,
        radius: geometry.corner_radius(),
    }
}

/// Size a glyph to its content: `bbox.x + bbox.width + bbox.x` wide and
/// `bbox.y + bbox.height + bbox.y` tall.
pub fn glyph_extent(rects: &[BandRect]) -> (f64, f64) {
    if rects.is_empty() {
        return (0.0, 0.0);
    }
    let min_x = rects.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
    let min_y = rects.iter().map(|r| r.y).fold(f64::INFINITY, f64::min);
    let max_x = rects.iter().map(|r| r.right()).fold(f64::NEG_INFINITY, f64::max);
    let max_y = rects.iter().map(|r| r.bottom()).fold(f64::NEG_INFINITY, f64::max);
    (max_x + min_x, max_y + min_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CentromereInterval;

    fn chr1() -> ChromosomeItem {
        ChromosomeItem::new("Chr1", "Chr 1", 30_427_671)
            .with_centromere(CentromereInterval::new("CEN1", 15_086_046, 15_087_045))
    }

    fn count(bands: &[Band], kind: BandKind) -> usize {
        bands.iter().filter(|b| b.kind == kind).count()
    }

    #[test]
    fn test_no_centromeres_is_single_capsule() {
        let chr = ChromosomeItem::new("ChrC", "Chr C", 154_478);
        let bands = compose_bands(&chr);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].span, BpRange::new(0, 154_478));
        assert_eq!(bands[0].rounding, Rounding::Capsule);

        let rect = bands[0].rect(&GlyphGeometry::default());
        assert!(rect.is_capsule());
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.width, 10.0);
    }

    #[test]
    fn test_single_centromere_layers() {
        let bands = compose_bands(&chr1());
        assert_eq!(count(&bands, BandKind::Centromeric), 1);
        assert_eq!(count(&bands, BandKind::NonCentromeric), 2);

        assert_eq!(bands[0].span, BpRange::new(15_086_046, 15_087_045));
        assert_eq!(bands[1].span, BpRange::new(0, 15_086_046));
        assert_eq!(bands[1].rounding, Rounding::Vertical);
        assert_eq!(bands[2].span, BpRange::new(15_087_045, 30_427_671));
        assert_eq!(bands[2].rounding, Rounding::Full);
    }

    #[test]
    fn test_multiple_centromeres_tile_the_chromosome() {
        let chr = ChromosomeItem::new("Chr9", "Chr 9", 1_000_000)
            .with_centromere(CentromereInterval::new("CEN9a", 100_000, 120_000))
            .with_centromere(CentromereInterval::new("CEN9b", 400_000, 410_000))
            .with_centromere(CentromereInterval::new("CEN9c", 800_000, 805_000));
        let bands = compose_bands(&chr);

        assert_eq!(count(&bands, BandKind::Centromeric), 3);
        // one segment before each centromere plus the trailing terminus
        assert_eq!(count(&bands, BandKind::NonCentromeric), 4);

        let mut spans: Vec<BpRange> = bands.iter().map(|b| b.span).collect();
        spans.sort_by_key(|s| s.start);
        assert_eq!(spans.first().unwrap().start, 0);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }

        let last = bands.last().unwrap();
        assert_eq!(last.kind, BandKind::NonCentromeric);
        assert_eq!(last.span.end, chr.size);
        assert_eq!(last.rounding, Rounding::Full);
    }

    #[test]
    fn test_band_rects_follow_glyph_geometry() {
        let geometry = GlyphGeometry::default();
        let bands = compose_bands(&chr1());

        let centromere = bands[0].rect(&geometry);
        assert_eq!(centromere.x, 10.0);
        assert!((centromere.width - 6.0).abs() < 1e-9);
        assert!((centromere.y - 15_086_046.0 * 0.000015).abs() < 1e-9);

        let arm = bands[1].rect(&geometry);
        assert_eq!(arm.x, 8.0);
        assert_eq!(arm.width, 10.0);
        assert_eq!(arm.radius, 5.0);
    }

    #[test]
    fn test_hit_region_and_extent() {
        let geometry = GlyphGeometry::default();
        let chr = chr1();
        let input = hit_region(&chr, &geometry);
        assert!((input.height - 30_427_671.0 * 0.000015).abs() < 1e-9);

        let mut rects: Vec<BandRect> = compose_bands(&chr).iter().map(|b| b.rect(&geometry)).collect();
        rects.push(input);
        let (width, height) = glyph_extent(&rects);
        assert_eq!(width, 8.0 + 10.0 + 8.0);
        assert!((height - input.height).abs() < 1e-9);
        assert_eq!(glyph_extent(&[]), (0.0, 0.0));
    }
}
