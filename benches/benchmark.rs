// Performance benchmarks for the chemotype engine
use chemomatch::{
    aggregate, normalize_record, ChemotypeRecord, ChemotypeVector, CompareMode, Compound,
    Reference, SimilarityEngine, COMPOUND_COUNT,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

fn generate_random_record(rng: &mut StdRng, id: usize) -> ChemotypeRecord {
    let mut record = ChemotypeRecord::new(format!("cultivar {}", id));
    for compound in Compound::ALL {
        // leave roughly a third unmeasured so imputation is exercised
        if rng.random_bool(0.33) {
            continue;
        }
        let value = rng.random_range(0.0005..0.9);
        record = match compound.family() {
            chemomatch::Family::Cannabinoid => record.with_cannabinoid(compound.id(), value),
            chemomatch::Family::Terpene => record.with_terpene(compound.id(), value),
        };
    }
    record
        .with_effects(["relaxed", "happy", "uplifted"])
        .with_flavors(["earthy", "citrus"])
}

fn generate_random_vector(rng: &mut StdRng) -> ChemotypeVector {
    let mut data = [0.0; COMPOUND_COUNT];
    for slot in data.iter_mut() {
        *slot = rng.random_range(0.0001..0.9);
    }
    ChemotypeVector::new(data)
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let record = generate_random_record(&mut rng, 0);

    c.bench_function("normalize_record", |b| {
        b.iter(|| black_box(normalize_record(black_box(&record))));
    });
}

fn benchmark_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let mut rng = StdRng::seed_from_u64(2);
    let engine = SimilarityEngine::default();

    let candidate = generate_random_vector(&mut rng);
    let references: Vec<Reference> = (0..3)
        .map(|i| Reference::new(format!("fav {}", i), generate_random_vector(&mut rng)))
        .collect();

    for (label, mode, refs) in [
        ("ideal", CompareMode::Ideal, &references[..1]),
        ("ranked_individual", CompareMode::RankedIndividual, &references[..]),
        ("ranked_zscored", CompareMode::RankedZScored, &references[..]),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| black_box(engine.compare(black_box(&candidate), refs, mode)));
        });
    }

    group.finish();
}

fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let mut rng = StdRng::seed_from_u64(3);

    for size in [2, 5, 20].iter() {
        let records: Vec<ChemotypeRecord> =
            (0..*size).map(|i| generate_random_record(&mut rng, i)).collect();
        group.bench_with_input(BenchmarkId::new("favorites", size), &records, |b, records| {
            b.iter(|| black_box(aggregate(black_box(records))));
        });
    }

    group.finish();
}

fn benchmark_rank_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_candidates");
    let mut rng = StdRng::seed_from_u64(4);
    let engine = SimilarityEngine::default();
    let ideal = generate_random_vector(&mut rng);

    for size in [100, 1000, 10000].iter() {
        let candidates: Vec<Reference> = (0..*size)
            .map(|i| Reference::new(format!("c{}", i), generate_random_vector(&mut rng)))
            .collect();
        group.bench_with_input(BenchmarkId::new("parallel", size), &candidates, |b, candidates| {
            b.iter(|| black_box(engine.rank_candidates(&ideal, black_box(candidates), Some(10))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_compare,
    benchmark_aggregate,
    benchmark_rank_candidates
);
criterion_main!(benches);
