//! 性能基准测试
//! 使用criterion测试存储操作与指标渲染

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use coinfolio::{
    domain::{Coin, WalletStore},
    metrics,
};

fn store_with_wallets(n: usize) -> WalletStore {
    let mut store = WalletStore::new();
    for i in 0..n {
        let name = format!("wallet-{i}");
        store.create(&name).unwrap();
        store
            .add_coin(&name, Coin::new("Bitcoin", "BTC", 1.0, 100.0))
            .unwrap();
    }
    store
}

fn bench_find_by_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_by_name");
    for size in [10usize, 100, 1000] {
        let store = store_with_wallets(size);
        let last = format!("wallet-{}", size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &last, |b, name| {
            b.iter(|| black_box(store.find_by_name(black_box(name)).unwrap()))
        });
    }
    group.finish();
}

fn bench_coin_updates(c: &mut Criterion) {
    c.bench_function("add_update_remove_coin", |b| {
        let mut store = store_with_wallets(100);
        b.iter(|| {
            store
                .add_coin("wallet-50", Coin::new("Ether", "ETH", 2.0, 3.0))
                .unwrap();
            store
                .update_coin("wallet-50", "ETH", Coin::new("Ether", "ETH", 4.0, 3.0))
                .unwrap();
            black_box(store.remove_coin("wallet-50", "ETH").unwrap())
        })
    });
}

fn bench_metrics_rendering(c: &mut Criterion) {
    c.bench_function("render_prometheus_metrics", |b| {
        b.iter(|| {
            metrics::count_ok("bench_endpoint");
            metrics::count_err("bench_endpoint");
            black_box(metrics::render_prometheus(100))
        })
    });
}

criterion_group!(
    benches,
    bench_find_by_name,
    bench_coin_updates,
    bench_metrics_rendering
);
criterion_main!(benches);
