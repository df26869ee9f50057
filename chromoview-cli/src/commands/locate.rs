//! Locate command - map a screen y-coordinate to a base-pair range

use anyhow::Result;
use chromoview_core::{
    AnnotationIndex, BpRange, ChromosomeItem, CoordinateMapper, ElementBox, GeneSource,
    GeneticElement, GlyphGeometry,
};
use std::path::PathBuf;

use super::{find_chromosome, load_chromosomes};
use crate::config::Config;
use crate::error::require_file;

/// Painted element for a chromosome: explicit height, or the glyph height at zoom 1.0.
pub fn element_for(
    chromosome: &ChromosomeItem,
    geometry: &GlyphGeometry,
    top: f64,
    height: Option<f64>,
) -> ElementBox {
    ElementBox::new(top, height.unwrap_or_else(|| geometry.height_of(chromosome.size)))
}

pub fn format_hit(element: &GeneticElement) -> String {
    let strand = element.strand.map(char::from).unwrap_or('.');
    format!(
        "{}\t{}:{}-{}\t{}\t{}",
        element.display_name(),
        element.chromosome,
        element.start,
        element.end,
        strand,
        element.feature_type
    )
}

pub fn execute(
    config: &Config,
    chromosomes: PathBuf,
    genes: PathBuf,
    id: String,
    y: f64,
    top: f64,
    height: Option<f64>,
) -> Result<()> {
    let all = load_chromosomes(&chromosomes)?;
    let chromosome = find_chromosome(&all, &id)?;
    let element = element_for(chromosome, &config.glyph_geometry(), top, height);
    log::debug!(
        "{}: element top {:.1} height {:.1}",
        chromosome.id,
        element.top,
        element.height
    );

    let mapper = CoordinateMapper::new(chromosome.size, &element);
    let Some(range) = mapper.pixel_to_bp(y) else {
        println!("{}: y={} is outside the chromosome", chromosome.id, y);
        return Ok(());
    };

    require_file(&genes)?;
    let index = AnnotationIndex::from_gff3_file(&genes)?;
    let hits = index.genes_in_range(&chromosome.id, range)?;
    print_range(&chromosome.id, range, &hits);
    Ok(())
}

fn print_range(id: &str, range: BpRange, hits: &[GeneticElement]) {
    println!(
        "{}:{}-{}\t{} elements",
        id,
        chromoview_core::format_bp(range.start),
        chromoview_core::format_bp(range.end),
        hits.len()
    );
    for hit in hits {
        println!("{}", format_hit(hit));
    }
}
