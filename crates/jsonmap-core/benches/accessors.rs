use criterion::{criterion_group, criterion_main, Criterion};
use jsonmap_core::{BoxError, Document, DocumentType, SharedMap};
use std::hint::black_box;

const PAYLOAD: &str = r#"{
    "event": "Order Completed",
    "revenue": "129.99",
    "quantity": "3",
    "express": "true",
    "context": {"locale": "en-US", "timezone": "Europe/Berlin"},
    "products": [
        {"sku": "A-1", "price": 19.99},
        {"sku": "B-2", "price": 49.0},
        {"sku": "C-3", "price": 61.0}
    ]
}"#;

struct Product(Document);

impl DocumentType for Product {
    fn from_shared(map: SharedMap) -> Result<Self, BoxError> {
        Ok(Product(Document::view(&map)))
    }

    fn document(&self) -> &Document {
        &self.0
    }
}

fn bench_scalars(c: &mut Criterion) {
    let doc = Document::from_json_str(PAYLOAD).unwrap();
    c.bench_function("scalar_accessors", |b| {
        b.iter(|| {
            let revenue = doc.get_double(black_box("revenue"), 0.0);
            let quantity = doc.get_int(black_box("quantity"), 0);
            let express = doc.get_boolean(black_box("express"), false);
            black_box((revenue, quantity, express))
        })
    });
}

fn bench_nested(c: &mut Criterion) {
    c.bench_function("get_list_fresh", |b| {
        b.iter_batched(
            || Document::from_json_str(PAYLOAD).unwrap(),
            |doc| black_box(doc.get_list::<Product>("products").unwrap()),
            criterion::BatchSize::SmallInput,
        )
    });

    let doc = Document::from_json_str(PAYLOAD).unwrap();
    c.bench_function("get_document_memoized", |b| {
        b.iter(|| black_box(doc.get_document(black_box("context"))))
    });
}

criterion_group!(benches, bench_scalars, bench_nested);
criterion_main!(benches);
