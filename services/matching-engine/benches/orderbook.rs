//! Benchmarks for order book operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use matching_engine::Orderbook;
use rand::{rngs::StdRng, Rng, SeedableRng};
use types::prelude::*;

const SIZES: [u64; 4] = [10, 100, 500, 1000];

fn gtc(id: u64, side: Side, price: i32, qty: u32) -> Order {
    order(OrderType::GoodTillCancel, id, side, price, qty)
}

fn order(order_type: OrderType, id: u64, side: Side, price: i32, qty: u32) -> Order {
    Order::new(order_type, OrderId::new(id), side, Price::new(price), Quantity::new(qty))
}

/// `count` buy orders of 10 resting at one price
fn single_level_book(count: u64) -> Orderbook {
    let mut book = Orderbook::new();
    for id in 0..count {
        book.add_order(order(OrderType::GoodTillCancel, id, Side::Buy, 100, 10));
    }
    book
}

fn benchmark_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_order");

    group.bench_function("single", |b| {
        b.iter_batched(
            Orderbook::new,
            |mut book| black_box(book.add_order(gtc(1, Side::Buy, 100, 10))),
            BatchSize::SmallInput,
        );
    });

    for count in SIZES {
        group.bench_with_input(BenchmarkId::new("no_match", count), &count, |b, &count| {
            b.iter_batched(
                Orderbook::new,
                |mut book| {
                    for i in 0..count {
                        // Bids below 100, asks above: the book never crosses
                        let (side, price) = if i % 2 == 0 {
                            (Side::Buy, 99 - (i / 2) as i32)
                        } else {
                            (Side::Sell, 101 + (i / 2) as i32)
                        };
                        black_box(book.add_order(gtc(i + 1_000_000, side, price, 10)));
                    }
                    book
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("full_match", count), &count, |b, &count| {
            b.iter_batched(
                || single_level_book(count),
                |mut book| {
                    let qty = 10 * count as u32;
                    black_box(book.add_order(gtc(count + 1_000_000, Side::Sell, 100, qty)))
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("partial_match", count), &count, |b, &count| {
            b.iter_batched(
                || single_level_book(count),
                |mut book| {
                    let qty = 5 * count as u32;
                    black_box(book.add_order(gtc(count + 1_000_000, Side::Sell, 100, qty)))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("fill_and_kill_match", |b| {
        b.iter_batched(
            || {
                let mut book = Orderbook::new();
                book.add_order(order(OrderType::GoodTillCancel, 1, Side::Sell, 100, 10));
                book
            },
            |mut book| {
                black_box(book.add_order(order(OrderType::FillAndKill, 2, Side::Buy, 100, 5)))
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("fill_and_kill_no_match", |b| {
        let mut book = Orderbook::new();
        book.add_order(order(OrderType::GoodTillCancel, 1, Side::Sell, 101, 10));
        b.iter(|| black_box(book.add_order(order(OrderType::FillAndKill, 2, Side::Buy, 100, 5))));
    });

    group.finish();
}

fn benchmark_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancel_order");

    group.bench_function("unknown_id", |b| {
        let mut book = Orderbook::new();
        b.iter(|| black_box(book.cancel_order(OrderId::new(999_999))));
    });

    for count in SIZES {
        group.bench_with_input(BenchmarkId::new("all", count), &count, |b, &count| {
            b.iter_batched(
                || single_level_book(count),
                |mut book| {
                    book.cancel_orders((0..count).map(OrderId::new));
                    book
                },
                BatchSize::SmallInput,
            );
        });

        // Middle of a long FIFO queue: constant time with handle removal
        group.bench_with_input(BenchmarkId::new("middle_of_level", count), &count, |b, &count| {
            b.iter_batched(
                || single_level_book(count),
                |mut book| {
                    black_box(book.cancel_order(OrderId::new(count / 2)));
                    book
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_modify(c: &mut Criterion) {
    c.bench_function("modify_order", |b| {
        b.iter_batched(
            || single_level_book(1),
            |mut book| {
                black_box(book.modify_order(OrderModify::new(
                    OrderId::new(0),
                    Side::Buy,
                    Price::new(101),
                    Quantity::new(20),
                )))
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for count in SIZES {
        let mut book = Orderbook::new();
        for i in 0..count {
            let (side, price) = if i % 2 == 0 {
                (Side::Buy, 99 - (i / 2) as i32)
            } else {
                (Side::Sell, 101 + (i / 2) as i32)
            };
            book.add_order(order(OrderType::GoodTillCancel, i, side, price, 10));
        }

        group.bench_with_input(BenchmarkId::new("order_infos", count), &book, |b, book| {
            b.iter(|| black_box(book.order_infos()));
        });
        group.bench_with_input(BenchmarkId::new("depth_top5", count), &book, |b, book| {
            b.iter(|| black_box(book.depth(5)));
        });
        group.bench_with_input(BenchmarkId::new("size", count), &book, |b, book| {
            b.iter(|| black_box(book.size()));
        });
    }

    group.finish();
}

/// 60% add, 30% cancel, 10% snapshot
fn mixed_workload(rng: &mut StdRng, operations: u64) -> Orderbook {
    let mut book = Orderbook::new();
    let mut next_id = 0u64;
    let mut active: Vec<u64> = Vec::new();

    for _ in 0..operations {
        let op = rng.gen_range(1..=10);
        if op <= 6 {
            let side = if next_id % 2 == 0 { Side::Buy } else { Side::Sell };
            let price = rng.gen_range(95..=105);
            book.add_order(gtc(next_id, side, price, 10));
            active.push(next_id);
            next_id += 1;
        } else if op <= 9 && !active.is_empty() {
            let idx = rng.gen_range(0..active.len());
            book.cancel_order(OrderId::new(active.swap_remove(idx)));
        } else {
            black_box(book.order_infos());
        }
    }
    book
}

fn benchmark_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_workload");

    for operations in [100u64, 1000] {
        let id = BenchmarkId::from_parameter(operations);
        group.bench_with_input(id, &operations, |b, &operations| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| mixed_workload(&mut rng, operations));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_add,
    benchmark_cancel,
    benchmark_modify,
    benchmark_snapshot,
    benchmark_mixed
);
criterion_main!(benches);
