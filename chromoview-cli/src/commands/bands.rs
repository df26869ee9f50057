//! Bands command - print composed chromosome bands as JSON

use anyhow::Result;
use chromoview_core::{compose_bands, glyph_extent, hit_region, Band, BandRect, ChromosomeItem, GlyphGeometry};
use serde::Serialize;
use std::path::PathBuf;

use super::{find_chromosome, load_chromosomes};
use crate::config::Config;

#[derive(Debug, Serialize)]
pub struct BandReport {
    #[serde(flatten)]
    pub band: Band,
    pub rect: BandRect,
}

#[derive(Debug, Serialize)]
pub struct ChromosomeReport {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub extent: (f64, f64),
    pub hit_region: BandRect,
    pub bands: Vec<BandReport>,
}

pub fn report(chromosome: &ChromosomeItem, geometry: &GlyphGeometry) -> ChromosomeReport {
    let bands: Vec<BandReport> = compose_bands(chromosome)
        .into_iter()
        .map(|band| BandReport {
            rect: band.rect(geometry),
            band,
        })
        .collect();
    let hit = hit_region(chromosome, geometry);
    let mut rects: Vec<BandRect> = bands.iter().map(|b| b.rect).collect();
    rects.push(hit);

    ChromosomeReport {
        id: chromosome.id.clone(),
        name: chromosome.name.clone(),
        size: chromosome.size,
        extent: glyph_extent(&rects),
        hit_region: hit,
        bands,
    }
}

pub fn execute(config: &Config, chromosomes: PathBuf, id: Option<String>) -> Result<()> {
    let all = load_chromosomes(&chromosomes)?;
    let selected: Vec<&ChromosomeItem> = match &id {
        Some(id) => vec![find_chromosome(&all, id)?],
        None => all.iter().collect(),
    };

    let geometry = config.glyph_geometry();
    let reports: Vec<ChromosomeReport> = selected.iter().map(|c| report(c, &geometry)).collect();
    log::debug!("composed bands for {} chromosomes", reports.len());
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromoview_core::{BandKind, CentromereInterval};

    #[test]
    fn test_report_serializes_bands() {
        let chr = ChromosomeItem::new("Chr1", "Chr 1", 30_427_671)
            .with_centromere(CentromereInterval::new("CEN1", 15_086_046, 15_087_045));
        let report = report(&chr, &GlyphGeometry::default());
        assert_eq!(report.bands.len(), 3);
        assert_eq!(report.bands[0].band.kind, BandKind::Centromeric);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["bands"][0]["kind"], "Centromeric");
        assert_eq!(json["bands"][2]["rounding"], "Full");
        assert_eq!(json["bands"][1]["span"]["start"], 0);
    }
}
