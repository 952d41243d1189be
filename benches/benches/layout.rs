// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout and reconciliation benchmarks over generated family trees.
//!
//! Run with: cargo bench -p kinship_benches

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kinship_layout::{CollapseState, LayoutEngine, Person, Snapshot, Spouse};
use kinship_tree::{Diff, History, RenderFlags, TreeRenderer};
use kurbo::Size;

/// A tree `generations` deep where family sizes cycle through 1, 2 and 3
/// children and every other person is married.
fn family(generations: usize) -> Person {
    fn grow(path: &str, depth: usize, generations: usize, counter: &mut usize) -> Person {
        *counter += 1;
        let n = *counter;
        let mut person = Person::new(path, format!("Person {n}"))
            .with_birth_date(format!("{}-01-01", 1900 + depth * 25));
        if n % 2 == 0 {
            person = person.with_spouse(Spouse::new(format!("{path}s"), "Spouse"));
        }
        if depth + 1 < generations {
            let children = 1 + n % 3;
            for c in 0..children {
                let child = grow(&format!("{path}.{c}"), depth + 1, generations, counter);
                person.children.push(child);
            }
        }
        person
    }
    grow("r", 0, generations, &mut 0)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/expanded");
    let engine = LayoutEngine::default();
    for generations in [4, 7, 10] {
        let snapshot = Snapshot::new(family(generations)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(generations),
            &snapshot,
            |b, snapshot| b.iter(|| black_box(engine.layout(snapshot, |_| false))),
        );
    }
    group.finish();

    let mut group = c.benchmark_group("layout/default_collapse");
    let snapshot = Snapshot::new(family(10)).unwrap();
    group.bench_function("observe+layout", |b| {
        b.iter(|| {
            let mut collapse = CollapseState::new(3);
            collapse.observe(snapshot.root());
            black_box(engine.layout(&snapshot, |id| collapse.is_collapsed(id.as_str())))
        });
    });
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let engine = LayoutEngine::default();
    let snapshot = Snapshot::new(family(10)).unwrap();
    let full = engine.layout(&snapshot, |_| false);
    // Collapse every child of the root: most of the tree exits.
    let shallow = engine.layout(&snapshot, |id| id.as_str().matches('.').count() == 1);
    c.bench_function("diff/collapse_generation_1", |b| {
        b.iter(|| black_box(Diff::between(&full, &shallow)));
    });
}

fn bench_render(c: &mut Criterion) {
    let tree = family(8);
    c.bench_function("renderer/render+settle", |b| {
        b.iter(|| {
            let mut renderer = TreeRenderer::default();
            renderer.resize(Size::new(1280.0, 800.0));
            renderer
                .render(tree.clone(), RenderFlags::default(), History::empty())
                .unwrap();
            renderer.focus("r.0.0.0.0.0.0.0");
            renderer.tick(Duration::from_secs(1));
            renderer.tick(Duration::from_secs(1));
            black_box(renderer.scene())
        });
    });
}

criterion_group!(benches, bench_layout, bench_diff, bench_render);
criterion_main!(benches);
