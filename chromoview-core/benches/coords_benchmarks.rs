use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chromoview_core::{
    compose_bands, AnnotationIndex, BpRange, CentromereInterval, ChromosomeItem, CoordinateMapper,
    ElementBox, GeneSource, GeneticElement,
};

fn generate_chromosome(centromeres: u64) -> ChromosomeItem {
    let size = 30_427_671;
    let step = size / (centromeres + 1);
    (1..=centromeres).fold(ChromosomeItem::new("Chr1", "Chr 1", size), |chr, i| {
        let start = i * step;
        chr.with_centromere(CentromereInterval::new(format!("CEN{}", i), start, start + 1_000))
    })
}

fn generate_annotations(count: u64) -> AnnotationIndex {
    AnnotationIndex::from_elements((0..count).map(|i| GeneticElement {
        id: format!("AT1G{:05}", i),
        chromosome: "Chr1".to_string(),
        start: i * 3_000 + 1,
        end: i * 3_000 + 2_000,
        strand: None,
        name: None,
        feature_type: "gene".to_string(),
    }))
}

fn bench_pixel_to_bp(c: &mut Criterion) {
    let element = ElementBox::new(120.0, 500.0);
    let mapper = CoordinateMapper::new(30_427_671, &element);

    c.bench_function("pixel_to_bp_chr1", |b| {
        b.iter(|| black_box(mapper.pixel_to_bp(black_box(370.0))))
    });

    c.bench_function("bp_to_pixel_chr1", |b| {
        b.iter(|| black_box(mapper.bp_to_pixel(black_box(15_183_347))))
    });
}

fn bench_compose_bands(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_bands");

    for centromeres in [0u64, 1, 8, 64].iter() {
        let chromosome = generate_chromosome(*centromeres);
        group.bench_with_input(
            BenchmarkId::from_parameter(centromeres),
            &chromosome,
            |b, chromosome| b.iter(|| black_box(compose_bands(black_box(chromosome)))),
        );
    }

    group.finish();
}

fn bench_genes_in_range(c: &mut Criterion) {
    let index = generate_annotations(10_000);

    c.bench_function("genes_in_range_10k", |b| {
        b.iter(|| {
            let result = index.genes_in_range("Chr1", black_box(BpRange::new(15_000_000, 15_060_000)));
            black_box(result)
        })
    });
}

criterion_group!(
    benches,
    bench_pixel_to_bp,
    bench_compose_bands,
    bench_genes_in_range
);
criterion_main!(benches);
