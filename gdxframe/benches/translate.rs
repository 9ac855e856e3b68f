//! Record translation and table classification benchmarks
//!
//! Run with: cargo bench -p gdxframe
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gdxframe::{
    symbol_from_table, Cell, NativeRecord, RecordTranslator, SpecialValues, SymbolKind, Table,
};
use gdxframe_core::constants::sentinel;

fn native_records(count: usize, specials: &SpecialValues) -> Vec<NativeRecord> {
    (0..count)
        .map(|i| {
            let mut values = [0.0, 0.0, 0.0, sentinel::POSITIVE_INFINITY, 1.0];
            values[0] = match i % 4 {
                0 => specials.codes()[0],
                1 => specials.codes()[4],
                _ => i as f64 * 0.5,
            };
            NativeRecord {
                labels: vec![format!("i{}", i % 97), format!("j{i}")],
                values,
            }
        })
        .collect()
}

fn parameter_table(count: usize) -> Table {
    let mut table = Table::new(["i", "j", "Value"]);
    for i in 0..count {
        table
            .push_row(vec![
                format!("i{}", i % 97).into(),
                format!("j{i}").into(),
                (i as f64).into(),
            ])
            .unwrap();
    }
    table
}

/// Benchmark native records to variable rows
fn bench_to_row(c: &mut Criterion) {
    let specials = SpecialValues::new();
    let translator = RecordTranslator::new(SymbolKind::Variable, 2, &specials);
    let mut group = c.benchmark_group("to_row");

    for size in [100, 1_000, 10_000] {
        let records = native_records(size, &specials);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter_batched(
                || records.clone(),
                |records| {
                    for record in records {
                        black_box(translator.to_row(record).unwrap());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark variable rows back to native records
fn bench_to_native(c: &mut Criterion) {
    let specials = SpecialValues::new();
    let translator = RecordTranslator::new(SymbolKind::Variable, 2, &specials);
    let mut group = c.benchmark_group("to_native");

    for size in [100, 1_000, 10_000] {
        let rows: Vec<Vec<Cell>> = native_records(size, &specials)
            .into_iter()
            .map(|record| translator.to_row(record).unwrap())
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                for row in rows {
                    black_box(translator.to_native(row).unwrap());
                }
            })
        });
    }

    group.finish();
}

/// Benchmark classifying and re-keying caller tables
fn bench_symbol_from_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("symbol_from_table");

    for size in [100, 1_000, 10_000] {
        let table = parameter_table(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter_batched(
                || table.clone(),
                |table| black_box(symbol_from_table("d".to_string(), table).unwrap()),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_to_row, bench_to_native, bench_symbol_from_table);
criterion_main!(benches);
