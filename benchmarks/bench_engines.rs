use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use wordtally::counter::count_occurrences;
use wordtally::tally::DEFAULT_WORDS;
use wordtally::{run_parallel, run_sequential, Counter, MemoryReader, Vocabulary};

const VERSE: &str = "To be, or not to be, that is the question: Whether 'tis nobler in the \
mind to suffer the slings and arrows of outrageous fortune, or to take arms against a sea of \
troubles and by opposing end them. To die, to sleep; no more; and by a sleep to say we end the \
heart-ache and the thousand natural shocks that flesh is heir to. My lord, the king, Hamlet. ";

fn corpus(files: usize, repeats: usize) -> MemoryReader {
    (0..files).fold(MemoryReader::new(), |reader, i| {
        reader.with_file(format!("shakespeare{}.txt", i + 1), VERSE.repeat(repeats))
    })
}

fn bench_count_occurrences(c: &mut Criterion) {
    let haystack = VERSE.repeat(64).to_lowercase();
    c.bench_function("count_occurrences_the", |b| {
        b.iter(|| black_box(count_occurrences(black_box(&haystack), black_box("the"))));
    });
}

fn bench_engines(c: &mut Criterion) {
    let reader = corpus(8, 500);
    let corpus = reader.corpus();
    let counter = Counter::new(Vocabulary::new(DEFAULT_WORDS.iter().copied()).unwrap());

    let mut group = c.benchmark_group("engines");
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_sequential(&corpus, &counter, &reader).unwrap()));
    });

    for workers in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, &workers| {
            b.iter(|| black_box(run_parallel(&corpus, &counter, &reader, workers).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_count_occurrences, bench_engines);
criterion_main!(benches);
