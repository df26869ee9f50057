use chromoview_core::{BpRange, CentromereInterval, ChromosomeItem};
use chromoview_render::{ChromosomeLayout, ExportConfig, SelectionMarker, SvgExporter};

fn demo_chromosomes() -> Vec<ChromosomeItem> {
    vec![
        ChromosomeItem::new("Chr1", "Chr 1", 30_427_671)
            .with_centromere(CentromereInterval::new("CEN1", 15_086_046, 15_087_045)),
        ChromosomeItem::new("Chr2", "Chr 2", 19_698_289)
            .with_centromere(CentromereInterval::new("CEN2", 3_607_930, 3_608_929)),
        ChromosomeItem::new("Chr4", "Chr 4", 18_585_056)
            .with_centromere(CentromereInterval::new("CEN4a", 2_000_000, 2_100_000))
            .with_centromere(CentromereInterval::new("CEN4b", 3_956_521, 3_957_520)),
        ChromosomeItem::new("ChrC", "Chr C", 154_478),
    ]
}

#[test]
fn svg_export_is_deterministic() {
    let mut placed = ChromosomeLayout::default().place(&demo_chromosomes());
    for p in placed.iter_mut() {
        p.fit();
    }
    let marker = SelectionMarker {
        chromosome_id: "Chr2".into(),
        range: BpRange::new(1, 40_000),
    };

    let cfg = ExportConfig {
        width: 400,
        height: 600,
        title: Some("Determinism Test".into()),
        ..Default::default()
    };
    let exporter = SvgExporter::new(cfg);

    let dir = tempfile::tempdir().unwrap();
    let f1 = dir.path().join("a.svg");
    let f2 = dir.path().join("b.svg");

    exporter.export_svg(&f1, &placed, Some(&marker)).unwrap();
    exporter.export_svg(&f2, &placed, Some(&marker)).unwrap();

    let b1 = std::fs::read(&f1).unwrap();
    let b2 = std::fs::read(&f2).unwrap();
    assert_eq!(b1, b2, "SVG bytes differ between identical renders");
    assert!(String::from_utf8(b1).unwrap().contains("Determinism Test"));
}

#[test]
fn export_to_missing_directory_fails() {
    let placed = ChromosomeLayout::default().place(&demo_chromosomes());
    let exporter = SvgExporter::new(ExportConfig::default());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.svg");
    assert!(exporter.export_svg(&path, &placed, None).is_err());
}
