use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use erd_layout::config::LayoutConfig;
use erd_layout::ir::{Column, Relationship, Table};
use erd_layout::layout::{auto_layout, route_all};
use std::hint::black_box;

/// Synthetic star-of-chains schema: one hub table per chunk of eight, each
/// hub referenced by its members, hubs chained together.
fn synthetic_schema(tables: usize, config: &LayoutConfig) -> (Vec<Table>, Vec<Relationship>) {
    let make_columns = |table: &str, rows: usize| -> Vec<Column> {
        (0..rows)
            .map(|i| Column {
                id: format!("{table}.c{i}"),
                name: format!("c{i}"),
                data_type: "int".to_string(),
                is_primary: i == 0,
                is_foreign: i != 0,
                index: i,
            })
            .collect()
    };

    let mut out_tables = Vec::with_capacity(tables);
    let mut out_rels = Vec::new();
    for i in 0..tables {
        let id = format!("t{i}");
        out_tables.push(Table::new(id.clone(), make_columns(&id, 2 + i % 6), config));

        let hub = i - i % 8;
        if i % 8 != 0 {
            out_rels.push(Relationship {
                id: format!("fk_{i}_{hub}"),
                source_table_id: id.clone(),
                source_column_id: format!("t{i}.c1"),
                target_table_id: format!("t{hub}"),
                target_column_id: format!("t{hub}.c0"),
            });
        } else if i >= 8 {
            out_rels.push(Relationship {
                id: format!("fk_{i}_{}", hub - 8),
                source_table_id: id.clone(),
                source_column_id: format!("t{i}.c1"),
                target_table_id: format!("t{}", hub - 8),
                target_column_id: format!("t{}.c0", hub - 8),
            });
        }
    }
    (out_tables, out_rels)
}

fn bench_auto_layout(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("auto_layout");
    for size in [8usize, 32, 64] {
        let (tables, rels) = synthetic_schema(size, &config);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(auto_layout(black_box(&tables), black_box(&rels), &config)));
        });
    }
    group.finish();
}

fn bench_route_all(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("route_all");
    for size in [8usize, 32, 64] {
        let (tables, rels) = synthetic_schema(size, &config);
        let placed = auto_layout(&tables, &rels, &config);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(route_all(black_box(&placed), black_box(&rels), &config)));
        });
    }
    group.finish();
}

fn bench_single_edge(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let (tables, rels) = synthetic_schema(32, &config);
    let placed = auto_layout(&tables, &rels, &config);
    let rel = &rels[0];
    c.bench_function("route_edge", |b| {
        b.iter(|| {
            black_box(erd_layout::layout::route_edge(
                black_box(&placed),
                black_box(rel),
                &config,
            ))
        });
    });
}

criterion_group!(benches, bench_auto_layout, bench_route_all, bench_single_edge);
criterion_main!(benches);
