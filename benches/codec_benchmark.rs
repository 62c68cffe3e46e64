use bidex::posting;
use bidex::types::{AttrId, DocId, Posting};
use bidex::varint;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_varint_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint_round_trip");
    for n in [0u64, 127, 16_384, u32::MAX as u64] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut buf = Vec::new();
                varint::encode(&mut buf, black_box(n));
                black_box(varint::decode(&buf).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_posting_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("posting_round_trip");
    for position_count in [1usize, 16, 256] {
        let positions: Vec<u32> = (0..position_count as u32).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(position_count),
            &positions,
            |b, positions| {
                let post = Posting::new(DocId(1), Some(AttrId(0)), positions.clone());
                b.iter(|| {
                    let bytes = posting::encode(black_box(&post));
                    black_box(posting::decode(&bytes).unwrap());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_varint_round_trip, bench_posting_round_trip);
criterion_main!(benches);
