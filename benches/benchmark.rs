//! Benchmarks for script parsing and import.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use scriptboard::storyboard::store::encode_collection;
use scriptboard::{parse_script, MemoryStore, ScriptImporter, StoryboardStore};

fn script(num_scenes: usize) -> String {
    (0..num_scenes)
        .map(|i| {
            format!(
                "Script Segment: \"Line {} of the voice-over, spoken slowly.\"\nWide shot of the harbour.\nCut to close-up.",
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for num_scenes in [1, 10, 100, 1000].iter() {
        let text = script(*num_scenes);
        group.bench_with_input(BenchmarkId::new("scenes", num_scenes), &text, |b, text| {
            b.iter(|| black_box(parse_script(text).unwrap()))
        });
    }
    group.finish();
}

fn bench_parse_unlabeled(c: &mut Criterion) {
    let text = (0..100)
        .map(|i| format!("Scene {} notes only\nNo voice-over here", i))
        .collect::<Vec<_>>()
        .join("\n---\n");

    c.bench_function("parse_unlabeled_100", |b| {
        b.iter(|| black_box(parse_script(&text).unwrap()))
    });
}

fn bench_import(c: &mut Criterion) {
    let text = script(20);
    c.bench_function("import_memory_store", |b| {
        b.iter_batched(
            || ScriptImporter::new(MemoryStore::new()),
            |mut importer| black_box(importer.import(&text).unwrap()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for num_boards in [1, 10, 50].iter() {
        let mut store = MemoryStore::new();
        let mut collection = Vec::new();
        for _ in 0..*num_boards {
            collection.insert(0, parse_script(&script(20)).unwrap().into());
        }
        store.save(&collection).unwrap();

        group.bench_with_input(
            BenchmarkId::new("storyboards", num_boards),
            num_boards,
            |b, _| b.iter(|| black_box(encode_collection(store.entries()).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_parse_unlabeled,
    bench_import,
    bench_encode,
);
criterion_main!(benches);
