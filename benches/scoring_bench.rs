//! Benchmarks for the scoring engine. The pairwise spacing scan is O(n^2)
//! in the clickable-candidate count, so the interesting axis is inventory
//! size with a realistic share of clickable elements.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uxlens::{score, ComputedStyle, ElementSnapshot, Position, Size};

fn synthetic_inventory(n: usize) -> Vec<ElementSnapshot> {
    (0..n)
        .map(|i| {
            let clickable = i % 5 == 0;
            let style = ComputedStyle {
                color: format!("rgb({}, {}, {})", i % 255, (i * 7) % 255, (i * 13) % 255),
                background_color: "#ffffff".to_string(),
                font_size: if i % 11 == 0 { "9px" } else { "15px" }.to_string(),
                cursor: if clickable { "pointer" } else { "auto" }.to_string(),
                ..ComputedStyle::default()
            };
            ElementSnapshot::new(
                if clickable { "a" } else { "div" },
                &format!("element {}", i),
                Position {
                    x: (i % 40) as f64 * 25.0,
                    y: (i / 40) as f64 * 30.0,
                },
                Size {
                    width: 120.0,
                    height: 24.0,
                },
                style,
            )
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    for &n in &[100usize, 500, 2000] {
        let inventory = synthetic_inventory(n);
        c.bench_function(&format!("score_{}_elements", n), |b| {
            b.iter(|| score(black_box(&inventory)))
        });
    }
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
