use criterion::{Criterion, criterion_group, criterion_main};

use pgxguide::analysis::{AnalysisOptions, analyze_gene};
use pgxguide::gene::Gene;
use pgxguide::genotype::VariantCall;
use pgxguide::provider::Provider;
use pgxguide::raw_data::parse_raw_genotypes;
use pgxguide::report::build_report;

fn panel_calls() -> Vec<VariantCall> {
    [
        ("rs4148323", "AG"),
        ("rs887829", "CT"),
        ("rs4149056", "CT"),
        ("rs776746", "AG"),
        ("rs6025", "GA"),
        ("rs1799853", "CT"),
        ("rs1057910", "AC"),
        ("rs9923231", "CT"),
    ]
    .iter()
    .map(|(id, g)| VariantCall::new(id, Some(*g)))
    .collect()
}

/// A 23andMe-style export with the panel variants buried among filler rows.
fn raw_export(filler: usize) -> String {
    let mut text = String::from("# This data file generated by 23andMe\n");
    for i in 0..filler {
        text.push_str(&format!("rs{}\t1\t{}\tAA\n", 10_000_000 + i, 1000 + i));
    }
    for call in panel_calls() {
        let genotype = call.genotype.unwrap_or_default();
        text.push_str(&format!("{}\t1\t1\t{genotype}\n", call.variant_id));
    }
    text
}

fn bench_analyze_gene(c: &mut Criterion) {
    let calls = panel_calls();
    let options = AnalysisOptions::default();
    c.bench_function("analyze_gene (UGT1A1)", |b| {
        b.iter(|| analyze_gene(Gene::Ugt1a1, &calls, &options).unwrap());
    });
}

fn bench_build_report(c: &mut Criterion) {
    let calls = panel_calls();
    c.bench_function("build_report (6 genes)", |b| {
        b.iter(|| build_report(&calls, &Gene::ALL, Provider::Unknown).unwrap());
    });
}

fn bench_parse_raw(c: &mut Criterion) {
    let text = raw_export(100_000);
    c.bench_function("parse_raw_genotypes (100k rows)", |b| {
        b.iter(|| {
            let raw = parse_raw_genotypes(text.as_bytes()).unwrap();
            assert_eq!(raw.calls.len(), 8);
        });
    });
}

criterion_group!(benches, bench_analyze_gene, bench_build_report, bench_parse_raw);
criterion_main!(benches);
