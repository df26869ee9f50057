//! World-space placement of chromosome glyphs and their on-screen measurement

use chromoview_core::{
    compose_bands, glyph_extent, hit_region, Band, BandRect, Camera, ChromosomeItem, ElementBox,
    GlyphGeometry, MeasureElement, ViewportController,
};
use serde::{Deserialize, Serialize};

/// Default horizontal distance between glyph origins, in world pixels.
pub const DEFAULT_SPACING: f64 = 60.0;

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Lays chromosomes out left to right, top aligned.
#[derive(Debug, Clone)]
pub struct ChromosomeLayout {
    geometry: GlyphGeometry,
    spacing: f64,
    origin: (f64, f64),
}

impl Default for ChromosomeLayout {
    fn default() -> Self {
        Self::new(GlyphGeometry::default(), DEFAULT_SPACING)
    }
}

impl ChromosomeLayout {
    pub fn new(geometry: GlyphGeometry, spacing: f64) -> Self {
        Self {
            geometry,
            spacing,
            origin: (0.0, 0.0),
        }
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn geometry(&self) -> &GlyphGeometry {
        &self.geometry
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn place(&self, chromosomes: &[ChromosomeItem]) -> Vec<PlacedChromosome> {
        chromosomes
            .iter()
            .enumerate()
            .map(|(i, chromosome)| {
                let x = self.origin.0 + i as f64 * self.spacing;
                PlacedChromosome::new(chromosome.clone(), x, self.origin.1, &self.geometry)
            })
            .collect()
    }
}

/// A chromosome glyph with its world origin.
///
/// The glyph is not measurable until [`fit`](Self::fit) sizes it to its
/// content, which mirrors the one-shot resize after first paint.
#[derive(Debug, Clone)]
pub struct PlacedChromosome {
    chromosome: ChromosomeItem,
    x: f64,
    y: f64,
    bands: Vec<Band>,
    rects: Vec<BandRect>,
    hit: BandRect,
    size: Option<(f64, f64)>,
}

impl PlacedChromosome {
    pub fn new(chromosome: ChromosomeItem, x: f64, y: f64, geometry: &GlyphGeometry) -> Self {
        let bands = compose_bands(&chromosome);
        let rects = bands.iter().map(|b| b.rect(geometry)).collect();
        let hit = hit_region(&chromosome, geometry);
        Self {
            chromosome,
            x,
            y,
            bands,
            rects,
            hit,
            size: None,
        }
    }

    pub fn chromosome(&self) -> &ChromosomeItem {
        &self.chromosome
    }

    pub fn id(&self) -> &str {
        &self.chromosome.id
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Band rects in glyph-local coordinates, centromeric layer first.
    pub fn rects(&self) -> &[BandRect] {
        &self.rects
    }

    pub fn hit_rect(&self) -> &BandRect {
        &self.hit
    }

    /// Size the glyph to its content. Only the first call measures.
    pub fn fit(&mut self) -> (f64, f64) {
        if let Some(size) = self.size {
            return size;
        }
        let mut content = self.rects.clone();
        content.push(self.hit);
        let size = glyph_extent(&content);
        log::debug!("fitted {} to {:.1}x{:.1}", self.chromosome.id, size.0, size.1);
        self.size = Some(size);
        size
    }

    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    pub fn is_fitted(&self) -> bool {
        self.size.is_some()
    }

    /// World rect of the hit region, once fitted.
    pub fn world_hit_rect(&self) -> Option<WorldRect> {
        self.size?;
        Some(WorldRect {
            x: self.x + self.hit.x,
            y: self.y + self.hit.y,
            width: self.hit.width,
            height: self.hit.height,
        })
    }
}

/// Measures a placed glyph on screen through the live camera.
pub struct ScreenMeasure<'a> {
    placed: &'a PlacedChromosome,
    camera: &'a Camera,
}

impl<'a> ScreenMeasure<'a> {
    pub fn new(placed: &'a PlacedChromosome, camera: &'a Camera) -> Self {
        Self { placed, camera }
    }
}

impl MeasureElement for ScreenMeasure<'_> {
    fn measure(&self) -> Option<ElementBox> {
        let rect = self.placed.world_hit_rect()?;
        let (_, top) = self.camera.world_to_screen(rect.x, rect.y);
        Some(ElementBox::new(top, rect.height * self.camera.zoom_factor()))
    }
}

/// The chromosome whose hit region contains screen point `(x, y)`.
pub fn hit_test<'a>(
    placed: &'a [PlacedChromosome],
    camera: &Camera,
    x: f64,
    y: f64,
) -> Option<&'a PlacedChromosome> {
    let (wx, wy) = camera.screen_to_world(x, y);
    placed
        .iter()
        .find(|p| p.world_hit_rect().map_or(false, |r| r.contains(wx, wy)))
}
