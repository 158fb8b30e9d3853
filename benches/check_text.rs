use criterion::{black_box, criterion_group, criterion_main, Criterion};
use writecoach::checker::suggestions;
use writecoach::GrammarChecker;

const PARAGRAPH: &str = "i think their going to recieve the letter tomorrow , maybe. \
    The result is better then expected and the team was very happy. \
    He are late again.She said it was alot of fun and we went home.";

fn bench_check_text(c: &mut Criterion) {
    let checker = GrammarChecker::new().unwrap();
    let essay = PARAGRAPH.repeat(20);

    c.bench_function("check_text/paragraph", |b| {
        b.iter(|| checker.check_text(black_box(PARAGRAPH)))
    });

    c.bench_function("check_text/essay", |b| {
        b.iter(|| checker.check_text(black_box(&essay)))
    });
}

fn bench_suggestions(c: &mut Criterion) {
    let checker = GrammarChecker::new().unwrap();

    c.bench_function("suggestions/hapy", |b| {
        b.iter(|| suggestions::generate(black_box("hapy"), checker.dictionary()))
    });
}

criterion_group!(benches, bench_check_text, bench_suggestions);
criterion_main!(benches);
