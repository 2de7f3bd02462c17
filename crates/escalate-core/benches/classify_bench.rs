use criterion::{black_box, criterion_group, criterion_main, Criterion};
use escalate_core::{Classifier, ImportProfile, ImportSelection, Session, Table, TrackerConfig, Vocabulary};

fn bench_classify(c: &mut Criterion) {
    let classifier = Classifier::new(&Vocabulary::default()).unwrap();
    let short = "The delivery was delayed and this is urgent";
    let long = "Customer reports the portal is slow but otherwise fine. ".repeat(40);

    c.bench_function("classify_short", |b| b.iter(|| classifier.classify(black_box(short))));
    c.bench_function("classify_long_no_match", |b| {
        b.iter(|| classifier.classify(black_box(&long)))
    });
}

fn bench_import(c: &mut Criterion) {
    let rows: Vec<Vec<String>> = (0..1_000)
        .map(|i| vec![format!("Order {i} delayed, business impact"), format!("Customer {i}")])
        .collect();
    let table = Table::new(vec!["Brief Issue".to_string(), "Customer".to_string()], rows);

    c.bench_function("import_1000_rows", |b| {
        b.iter(|| {
            let mut session = Session::new(TrackerConfig::new()).unwrap();
            session
                .import(&table, &ImportProfile::Minimal, ImportSelection::All)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_classify, bench_import);
criterion_main!(benches);
