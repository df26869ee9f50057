//! Render command - export the chromosome diagram to SVG

use anyhow::Result;
use chromoview_core::{BasePair, BpRange, ChromosomeItem};
use chromoview_render::{ChromosomeLayout, SelectionMarker, SvgExporter};
use std::path::PathBuf;

use super::{find_chromosome, load_chromosomes};
use crate::config::Config;
use crate::error::CliError;

/// Parse `CHROM:START-END`; positions may carry thousands separators.
pub fn parse_selection(text: &str) -> Result<SelectionMarker, CliError> {
    let invalid = |message: &str| CliError::parse("--select", format!("{}: {}", message, text));
    let (id, span) = text.rsplit_once(':').ok_or_else(|| invalid("expected CHROM:START-END"))?;
    let (start, end) = span.split_once('-').ok_or_else(|| invalid("expected START-END"))?;
    let position = |s: &str| -> Result<BasePair, CliError> {
        s.trim().replace(',', "").parse().map_err(|_| invalid("invalid position"))
    };
    Ok(SelectionMarker {
        chromosome_id: id.to_string(),
        range: BpRange::new(position(start)?, position(end)?),
    })
}

/// Parse a selection and bound its range to the named chromosome.
pub fn resolve_selection(text: &str, chromosomes: &[ChromosomeItem]) -> Result<SelectionMarker, CliError> {
    let mut marker = parse_selection(text)?;
    let chromosome = find_chromosome(chromosomes, &marker.chromosome_id)?;
    marker.range = marker.range.clamp_to(chromosome.size);
    Ok(marker)
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &Config,
    chromosomes: PathBuf,
    output: PathBuf,
    width: Option<u32>,
    height: Option<u32>,
    title: Option<String>,
    select: Option<String>,
) -> Result<()> {
    log::info!("Rendering {} to {}", chromosomes.display(), output.display());
    let all = load_chromosomes(&chromosomes)?;

    let marker = select
        .as_deref()
        .map(|text| resolve_selection(text, &all))
        .transpose()?;

    let layout = ChromosomeLayout::new(config.glyph_geometry(), config.render.spacing);
    let mut placed = layout.place(&all);
    for chromosome in placed.iter_mut() {
        chromosome.fit();
    }

    let mut export_config = config.export_config();
    export_config.width = width.unwrap_or(export_config.width);
    export_config.height = height.unwrap_or(export_config.height);
    export_config.title = title;

    SvgExporter::new(export_config)
        .with_style(config.render_style())
        .export_svg(&output, &placed, marker.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        let marker = parse_selection("Chr1:15,183,347-15,244,324").unwrap();
        assert_eq!(marker.chromosome_id, "Chr1");
        assert_eq!(marker.range, BpRange::new(15_183_347, 15_244_324));

        assert!(parse_selection("Chr1").is_err());
        assert!(parse_selection("Chr1:abc-10").is_err());
    }

    #[test]
    fn test_selection_is_bounded_by_chromosome() {
        let chromosomes = vec![ChromosomeItem::new("ChrC", "Chr C", 154_478)];
        let marker = resolve_selection("ChrC:100000-900000000", &chromosomes).unwrap();
        assert_eq!(marker.range, BpRange::new(100_000, 154_478));

        let marker = resolve_selection("ChrC:200000-900000000", &chromosomes).unwrap();
        assert_eq!(marker.range, BpRange::new(154_478, 154_478));

        assert!(matches!(
            resolve_selection("Chr9:1-10", &chromosomes),
            Err(CliError::UnknownChromosome { .. })
        ));
    }
}
