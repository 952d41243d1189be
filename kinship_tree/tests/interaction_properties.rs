// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: random interaction sequences over random trees.
//!
//! Whatever is toggled, focused, dragged, or zoomed, and however the clock
//! interleaves with it, the renderer's logical state must match its collapse
//! memory and the picture must converge to the logical state.

use std::collections::BTreeMap;

use core::time::Duration;

use kinship_layout::{CollapseState, Person};
use kinship_tree::{History, NodeFlags, RenderFlags, ToolbarAction, TreeRenderer};
use kurbo::{Point, Size};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Toggle(usize),
    Focus(usize),
    Tick(u64),
    Drag(f64, f64),
    Wheel(f64),
    Zoom(bool),
    Edit(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<usize>().prop_map(Op::Toggle),
        1 => any::<usize>().prop_map(Op::Focus),
        3 => (0_u64..800).prop_map(Op::Tick),
        1 => (-300.0..300.0, -300.0..300.0).prop_map(|(x, y)| Op::Drag(x, y)),
        1 => (-3.0..3.0).prop_map(Op::Wheel),
        1 => any::<bool>().prop_map(Op::Zoom),
        1 => any::<usize>().prop_map(Op::Edit),
    ]
}

fn parents_strategy() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(any::<usize>(), 1..30).prop_map(|raw| {
        raw.iter()
            .enumerate()
            .map(|(i, r)| if i == 0 { 0 } else { r % i })
            .collect()
    })
}

fn build(parents: &[usize], extra: usize) -> Person {
    fn node(i: usize, kids: &BTreeMap<usize, Vec<usize>>) -> Person {
        let mut person = Person::new(format!("p{i}"), format!("Person {i}"));
        for &k in kids.get(&i).into_iter().flatten() {
            person.children.push(node(k, kids));
        }
        person
    }
    let mut kids: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &p) in parents.iter().enumerate().skip(1) {
        kids.entry(p).or_default().push(i);
    }
    let mut root = node(0, &kids);
    for n in 0..extra {
        root.children.push(Person::new(format!("x{n}"), "Extra"));
    }
    root
}

/// Root plus every node whose ancestors are all expanded, in pre-order.
fn expected_visible(person: &Person, collapse: &CollapseState, out: &mut Vec<String>) {
    out.push(person.id.as_str().to_owned());
    if collapse.is_collapsed(person.id.as_str()) {
        return;
    }
    for child in &person.children {
        expected_visible(child, collapse, out);
    }
}

fn check(r: &TreeRenderer) -> Result<(), TestCaseError> {
    let snapshot = r.snapshot().unwrap();
    let mut expected = Vec::new();
    expected_visible(snapshot.root(), r.collapse_state(), &mut expected);
    let visible: Vec<String> = r.layout().ids().map(|id| id.as_str().to_owned()).collect();
    prop_assert_eq!(&visible, &expected);

    let scene = r.scene();
    let live: Vec<String> = scene
        .nodes
        .iter()
        .filter(|n| !n.flags.contains(NodeFlags::EXITING))
        .map(|n| n.id.as_str().to_owned())
        .collect();
    prop_assert_eq!(&live, &expected);
    for node in &scene.nodes {
        prop_assert!(node.position.is_finite());
        prop_assert!((0.0..=1.0).contains(&node.presence));
    }
    let scale = r.viewport().scale();
    prop_assert!((0.1 - 1e-12..=2.0 + 1e-12).contains(&scale), "scale {}", scale);
    Ok(())
}

proptest! {
    #[test]
    fn interactions_keep_layout_and_picture_consistent(
        parents in parents_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let n = parents.len();
        let mut extra = 0;
        let mut r = TreeRenderer::default();
        r.resize(Size::new(800.0, 600.0));
        r.render(build(&parents, extra), RenderFlags::default(), History::empty()).unwrap();
        check(&r)?;

        for op in &ops {
            match *op {
                Op::Toggle(i) => {
                    r.toggle(&format!("p{}", i % n));
                }
                Op::Focus(i) => {
                    let id = format!("p{}", i % n);
                    prop_assert!(r.focus(&id), "focus {} refused", id);
                    prop_assert!(r.layout().contains(&id), "{} not revealed", id);
                }
                Op::Tick(ms) => r.tick(Duration::from_millis(ms)),
                Op::Drag(dx, dy) => {
                    let from = Point::new(400.0, 300.0);
                    r.pointer_down(from);
                    r.pointer_move(Point::new(from.x + dx, from.y + dy));
                    r.pointer_up(Point::new(from.x + dx, from.y + dy));
                }
                Op::Wheel(delta) => {
                    r.wheel(delta, Point::new(200.0, 200.0));
                }
                Op::Zoom(zoom_in) => {
                    r.command(if zoom_in { ToolbarAction::ZoomIn } else { ToolbarAction::ZoomOut });
                }
                Op::Edit(k) => {
                    // Grow or shrink an unrelated set of leaves under the root.
                    extra = k % 4;
                    r.render(build(&parents, extra), RenderFlags::default(), History::empty())
                        .unwrap();
                }
            }
            check(&r)?;
        }

        r.tick(Duration::from_secs(5));
        r.tick(Duration::from_secs(5));
        prop_assert!(!r.is_animating());
        let scene = r.scene();
        prop_assert_eq!(scene.nodes.len(), r.layout().len());
        for node in &scene.nodes {
            prop_assert_eq!(Some(node.position), r.layout().position(node.id.as_str()));
            prop_assert_eq!(node.presence, 1.0);
        }
    }
}
