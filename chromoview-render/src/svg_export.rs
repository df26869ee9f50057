/*!
# SVG Export

Writes the laid-out chromosomes as a static SVG: the band layers, the
transparent hit region, name labels, an optional selection marker and a
footer. Output is byte-identical for identical input.
*/

use crate::layout::PlacedChromosome;
use crate::RenderStyle;
use anyhow::{Context, Result};
use chromoview_core::{format_bp, BandKind, BandRect, BpRange, Rounding};
use std::path::Path;
use svg::node::element::{Group, Rectangle, Text};
use svg::Document;

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    /// Offset of the scene from the top-left corner
    pub margin: f64,
    pub title: Option<String>,
    pub show_labels: bool,
    pub show_footer: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 40.0,
            title: None,
            show_labels: true,
            show_footer: true,
        }
    }
}

/// A highlighted base-pair range on one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionMarker {
    pub chromosome_id: String,
    pub range: BpRange,
}

pub struct SvgExporter {
    config: ExportConfig,
    style: RenderStyle,
}

impl SvgExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            style: RenderStyle::default(),
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build the SVG document text.
    pub fn render(&self, placed: &[PlacedChromosome], selection: Option<&SelectionMarker>) -> String {
        let width = self.config.width;
        let height = self.config.height;
        let mut doc = Document::new()
            .set("viewBox", (0, 0, width, height))
            .set("width", width)
            .set("height", height)
            .add(
                Rectangle::new()
                    .set("width", width)
                    .set("height", height)
                    .set("fill", self.style.background_color.as_str()),
            );

        if let Some(title) = &self.config.title {
            doc = doc.add(
                Text::new(title.as_str())
                    .set("x", width as f64 / 2.0)
                    .set("y", self.style.font_size as f64 + 10.0)
                    .set("text-anchor", "middle")
                    .set("font-family", self.style.font_family.as_str())
                    .set("font-size", self.style.font_size + 4)
                    .set("font-weight", "bold")
                    .set("fill", self.style.label_color.as_str()),
            );
        }

        for chromosome in placed {
            let marker = selection.filter(|s| s.chromosome_id == chromosome.id());
            doc = doc.add(self.glyph(chromosome, marker));
        }

        if self.config.show_footer {
            doc = doc.add(
                Text::new(format!(
                    "ChromoView {} | {} chromosomes",
                    chromoview_core::VERSION,
                    placed.len()
                ))
                .set("x", 10)
                .set("y", height as f64 - 10.0)
                .set("font-family", self.style.font_family.as_str())
                .set("font-size", self.style.font_size.saturating_sub(2))
                .set("fill", "#666666"),
            );
        }

        doc.to_string()
    }

    /// Export to SVG format
    pub fn export_svg<P: AsRef<Path>>(
        &self,
        path: P,
        placed: &[PlacedChromosome],
        selection: Option<&SelectionMarker>,
    ) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render(placed, selection))
            .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
        log::info!("Exported {} chromosomes to {}", placed.len(), path.display());
        Ok(())
    }

    fn glyph(&self, placed: &PlacedChromosome, selection: Option<&SelectionMarker>) -> Group {
        let (x, y) = placed.origin();
        let mut group = Group::new()
            .set("id", placed.id())
            .set(
                "transform",
                format!("translate({},{})", x + self.config.margin, y + self.config.margin),
            );

        for (band, rect) in placed.bands().iter().zip(placed.rects()) {
            let fill = match band.kind {
                BandKind::Centromeric => self.style.centromere_color.as_str(),
                BandKind::NonCentromeric => self.style.arm_color.as_str(),
            };
            group = group.add(
                rounded(rect)
                    .set("fill", fill)
                    .set("stroke", self.style.outline_color.as_str())
                    .set("stroke-width", 0.5),
            );
        }

        let hit = placed.hit_rect();
        if let Some(marker) = selection {
            group = group.add(self.selection_marker(placed, hit, marker.range));
        }
        group = group.add(
            rounded(hit)
                .set("class", "hit-region")
                .set("fill", "transparent")
                .set("fill-opacity", 0),
        );

        if self.config.show_labels {
            group = group.add(
                Text::new(placed.chromosome().name.as_str())
                    .set("x", hit.x + hit.width / 2.0)
                    .set("y", hit.bottom() + self.style.font_size as f64 + 4.0)
                    .set("text-anchor", "middle")
                    .set("font-family", self.style.font_family.as_str())
                    .set("font-size", self.style.font_size)
                    .set("fill", self.style.label_color.as_str()),
            );
        }
        group
    }

    fn selection_marker(&self, placed: &PlacedChromosome, hit: &BandRect, range: BpRange) -> Group {
        let size = placed.chromosome().size.max(1) as f64;
        let top = hit.y + hit.height * (range.start.saturating_sub(1) as f64 / size);
        let height = (hit.height * (range.len() as f64 + 1.0) / size).max(1.0);
        Group::new()
            .set("class", "selection")
            .add(
                Rectangle::new()
                    .set("x", hit.x - 2.0)
                    .set("y", top)
                    .set("width", hit.width + 4.0)
                    .set("height", height)
                    .set("fill", self.style.selection_color.as_str())
                    .set("fill-opacity", 0.8),
            )
            .add(
                Text::new(format!("{}-{}", format_bp(range.start), format_bp(range.end)))
                    .set("x", hit.right() + 6.0)
                    .set("y", top + height / 2.0)
                    .set("dominant-baseline", "middle")
                    .set("font-family", self.style.font_family.as_str())
                    .set("font-size", self.style.font_size.saturating_sub(2))
                    .set("fill", self.style.label_color.as_str()),
            )
    }
}

fn rounded(rect: &BandRect) -> Rectangle {
    let base = Rectangle::new()
        .set("x", rect.x)
        .set("y", rect.y)
        .set("width", rect.width)
        .set("height", rect.height);
    match rect.rounding {
        Rounding::Vertical => base.set("ry", rect.radius),
        Rounding::Capsule | Rounding::Full => base.set("rx", rect.radius).set("ry", rect.radius),
    }
}
