use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use stocktrack_alerts::{derive_alerts, inventory_stats};
use stocktrack_core::ProductId;
use stocktrack_products::{Product, ProductDraft};

fn catalogue(count: i64) -> Vec<Product> {
    (0..count)
        .map(|i| {
            let draft = ProductDraft::new(format!("Product {i}"))
                .with_barcode(format!("779{i:010}"))
                .with_quantity(i % 20)
                .with_min_stock(10)
                .with_expiry_date(format!("2026-10-{:02}", 1 + i % 28))
                .with_price(100 + i % 50);
            Product::from_draft(ProductId::new(i + 1), draft)
        })
        .collect()
}

fn bench_alert_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("alert_derivation");
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();

    for size in [10i64, 100, 1_000, 10_000].iter() {
        let products = catalogue(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("derive_alerts", size), &products, |b, products| {
            b.iter(|| derive_alerts(black_box(products), today));
        });
        group.bench_with_input(BenchmarkId::new("inventory_stats", size), &products, |b, products| {
            b.iter(|| inventory_stats(black_box(products), today));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_alert_derivation);
criterion_main!(benches);
