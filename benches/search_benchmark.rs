use bidex::config::Config;
use bidex::db::Database;
use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

fn words() -> &'static [&'static str] {
    &["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"]
}

fn seed_database(path: &std::path::Path, doc_count: usize, words_per_doc: usize) {
    let config = Config::new(path);
    Database::create(&config).unwrap();
    let mut db = Database::open_write(path).unwrap();
    for i in 0..doc_count {
        let body = (0..words_per_doc)
            .map(|j| words()[(i + j) % words().len()])
            .collect::<Vec<_>>()
            .join(" ");
        db.put(&body, &[]).unwrap();
    }
    db.close().unwrap();
}

fn bench_phrase_search(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.db");
    seed_database(&path, 500, 50);
    let db = Database::open_read(&path).unwrap();

    c.bench_function("phrase_search", |b| {
        b.iter(|| db.search("quick brown").unwrap());
    });
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.db");
    seed_database(&path, 500, 50);
    let db = Database::open_read(&path).unwrap();

    c.bench_function("fuzzy_search", |b| {
        b.iter(|| db.search("~\"quikc brown\"").unwrap());
    });
}

fn bench_boolean_search(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.db");
    seed_database(&path, 500, 50);
    let db = Database::open_read(&path).unwrap();

    c.bench_function("boolean_search", |b| {
        b.iter(|| db.search("fox AND dog").unwrap());
    });
}

criterion_group!(
    benches,
    bench_phrase_search,
    bench_fuzzy_search,
    bench_boolean_search
);
criterion_main!(benches);
