use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use time::{Date, Duration, Month};

use roster::{
    core::{
        query::{self, PageRequest},
        store::PersonStore,
    },
    export::export_people,
    filter::PersonFilter,
    person::PersonDraft,
    types::Gender,
};

fn draft(i: u32) -> PersonDraft {
    let base = Date::from_calendar_date(1970, Month::January, 1).expect("date");
    PersonDraft {
        first_name: format!("N{i}"),
        last_name: "Bench".to_string(),
        gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
        date_of_birth: base + Duration::days(i64::from(i % 15_000)),
        phone_number: "0912345678".to_string(),
        birth_place: String::new(),
        is_graduated: i % 3 == 0,
    }
}

fn filled(n: u32) -> PersonStore {
    let mut store = PersonStore::new();
    for i in 0..n {
        store.insert(draft(i));
    }
    store
}

fn bench_inserts(c: &mut Criterion) {
    c.bench_function("store_insert_5k", |b| {
        b.iter(|| filled(5_000));
    });
}

fn bench_filtered_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_query");
    let store = filled(10_000);
    let filter = PersonFilter::male().and(PersonFilter::born_before(2000));

    for page_index in [1usize, 50, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(page_index), &page_index, |b, &idx| {
            b.iter(|| query::query(&store, Some(&filter), PageRequest::new(20, idx)));
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let store = filled(2_000);
    c.bench_function("export_2k", |b| {
        b.iter(|| export_people(store.all()).expect("export"));
    });
}

criterion_group!(benches, bench_inserts, bench_filtered_query, bench_export);
criterion_main!(benches);
