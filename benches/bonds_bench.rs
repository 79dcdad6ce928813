use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use protview::bonds::{infer_bonds_exhaustive, infer_bonds_grid};
use protview::structure::{parse_structure, Structure};

/// Helix-like trace of `count` atoms, 1.5 Å apart.
fn synthetic_structure(count: usize) -> Structure {
    let mut text = String::new();
    for i in 0..count {
        let t = i as f32 * 0.6;
        let (x, y, z) = (t.cos() * 2.3, t.sin() * 2.3, i as f32 * 0.25);
        let _ = writeln!(
            text,
            "ATOM  {:>5}  C   ALA A{:>4}    {x:>8.3}{y:>8.3}{z:>8.3}  1.00 10.00           C",
            i % 100_000,
            (i / 4) % 10_000
        );
    }
    parse_structure(&text)
}

fn bond_inference_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bond_inference");
    for count in [500, 2000, 8000] {
        let structure = synthetic_structure(count);
        group.bench_function(format!("grid_{count}_atoms"), |b| {
            b.iter(|| black_box(infer_bonds_grid(black_box(structure.atoms()), 3.0)));
        });
        if count <= 2000 {
            group.bench_function(format!("exhaustive_{count}_atoms"), |b| {
                b.iter(|| {
                    black_box(infer_bonds_exhaustive(black_box(structure.atoms()), 3.0))
                });
            });
        }
    }
    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    let structure = synthetic_structure(5000);
    let text: String = (0..structure.len())
        .filter_map(|i| structure.to_record_line(i))
        .map(|line| line + "\n")
        .collect();
    c.bench_function("parse_5000_atoms", |b| {
        b.iter(|| black_box(parse_structure(black_box(&text))));
    });
}

criterion_group!(benches, bond_inference_benchmark, parse_benchmark);
criterion_main!(benches);
