// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidy tree layout over the visible part of a person tree.
//!
//! ## Algorithm
//!
//! The visible tree (collapsed nodes count as leaves) is flattened in
//! pre-order. A bottom-up pass then places each node's children from left to
//! right: every subtree carries a *contour* (its leftmost and rightmost extent
//! at each level below its root, relative to the root), and each new sibling
//! subtree is shifted right just far enough that, at every shared level, its
//! left contour clears the accumulated right contour by the configured gap.
//! The parent sits at the mean of its children's positions. A final top-down
//! pass turns relative offsets into absolute coordinates with the root at
//! `x = 0`.
//!
//! Extents include the spouse slot: a couple occupies
//! `2 * spouse_offset + card_width`, a single person `card_width`.
//!
//! The result depends only on the tree shape, the spouse pairing, the
//! collapsed set, and the config; identical inputs give bit-identical
//! coordinates.

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::error::LayoutError;
use crate::person::{Person, PersonId};
use crate::snapshot::{PersonIndex, Snapshot};

/// Geometry constants for the layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Vertical distance between generations.
    pub row_height: f64,
    /// Width reserved for one person card (avatar plus label).
    pub card_width: f64,
    /// Horizontal offset of each card from the node center when a spouse is present.
    pub spouse_offset: f64,
    /// Minimum horizontal gap between the extents of two siblings.
    pub sibling_gap: f64,
    /// Minimum horizontal gap between the extents of two non-sibling nodes on the same row.
    pub cousin_gap: f64,
    /// Deepest generation shown when a node is first seen. Nodes at this
    /// depth that have children start collapsed, so with the default of 1
    /// the root and its children are visible.
    ///
    /// Consumed by [`CollapseState::new`](crate::CollapseState::new); the
    /// layout pass itself only reads the collapsed predicate.
    pub default_expanded_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 250.0,
            card_width: 100.0,
            spouse_offset: 55.0,
            sibling_gap: 240.0,
            cousin_gap: 580.0,
            default_expanded_depth: 1,
        }
    }
}

impl LayoutConfig {
    /// Half of the horizontal extent of a node.
    pub fn half_width(&self, has_spouse: bool) -> f64 {
        let half_card = self.card_width / 2.0;
        if has_spouse {
            self.spouse_offset + half_card
        } else {
            half_card
        }
    }
}

/// State of a node's expand/collapse control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
    /// The node has no children: no control is shown.
    Hidden,
    /// Children are visible; the control collapses them.
    Expanded,
    /// Children are hidden; the control reveals them.
    Collapsed,
}

impl Toggle {
    /// Returns `true` if a control should be drawn.
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// A positioned, visible node.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
    /// Identifier of the person.
    pub id: PersonId,
    /// Generation (root is 0).
    pub depth: usize,
    /// Center of the node unit in layout space.
    pub position: Point,
    /// Index of the parent in [`Layout::nodes`].
    pub parent: Option<usize>,
    /// Indices of the visible children, in sibling order.
    pub children: SmallVec<[usize; 4]>,
    /// Half of the horizontal extent (spouse slot included).
    pub half_width: f64,
    /// Whether the node is drawn as a couple.
    pub has_spouse: bool,
    /// Expand/collapse control state.
    pub toggle: Toggle,
}

impl LayoutNode {
    /// Horizontal extent `[x - half_width, x + half_width]` as `(min, max)`.
    pub fn extent(&self) -> (f64, f64) {
        (
            self.position.x - self.half_width,
            self.position.x + self.half_width,
        )
    }

    /// Returns `true` if the node neither shows nor hides children.
    pub fn is_leaf(&self) -> bool {
        self.toggle == Toggle::Hidden
    }
}

/// Output of a layout pass: visible nodes in pre-order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    nodes: Vec<LayoutNode>,
    by_id: HashMap<PersonId, usize>,
}

impl Layout {
    /// Visible nodes in pre-order; index 0 is the root.
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    /// Number of visible nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a visible node.
    pub fn get(&self, id: &str) -> Option<&LayoutNode> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    /// Pre-order index of a visible node.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Returns `true` if `id` is visible.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Position of a visible node.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.get(id).map(|n| n.position)
    }

    /// Parent of a visible node.
    pub fn parent_of(&self, id: &str) -> Option<&LayoutNode> {
        let node = self.get(id)?;
        node.parent.map(|p| &self.nodes[p])
    }

    /// Visible identifiers in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = &PersonId> + '_ {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Parent → child edges, one per non-root node, keyed by the child.
    pub fn edges(&self) -> impl Iterator<Item = (&LayoutNode, &LayoutNode)> + '_ {
        self.nodes
            .iter()
            .filter_map(|n| n.parent.map(|p| (&self.nodes[p], n)))
    }

    /// Bounding box of all node extents, one row high per generation.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.nodes.first()?;
        let init = Rect::new(
            first.extent().0,
            first.position.y,
            first.extent().1,
            first.position.y,
        );
        Some(self.nodes.iter().fold(init, |acc, n| {
            let (x0, x1) = n.extent();
            acc.union(Rect::new(x0, n.position.y, x1, n.position.y))
        }))
    }
}

struct Slot<'a> {
    person: &'a Person,
    depth: usize,
    parent: Option<usize>,
    children: SmallVec<[usize; 4]>,
    collapsed: bool,
}

/// Per-level `(left, right)` extents relative to a subtree root.
type Contour = Vec<(f64, f64)>;

/// Lays out person trees with a fixed [`LayoutConfig`].
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with `config`.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Validate `root` and lay out its visible part.
    ///
    /// Fails fast with [`LayoutError`] on duplicate or empty identifiers.
    pub fn layout_tree(
        &self,
        root: &Person,
        is_collapsed: impl Fn(&PersonId) -> bool,
    ) -> Result<Layout, LayoutError> {
        PersonIndex::build(root)?;
        Ok(self.place(root, is_collapsed))
    }

    /// Lay out an already validated snapshot.
    pub fn layout(&self, snapshot: &Snapshot, is_collapsed: impl Fn(&PersonId) -> bool) -> Layout {
        self.place(snapshot.root(), is_collapsed)
    }

    fn place(&self, root: &Person, is_collapsed: impl Fn(&PersonId) -> bool) -> Layout {
        let slots = flatten(root, &is_collapsed);
        let offsets = self.relative_offsets(&slots);

        let mut nodes: Vec<LayoutNode> = Vec::with_capacity(slots.len());
        let mut by_id = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            let x = match slot.parent {
                Some(p) => nodes[p].position.x + offsets[i],
                None => 0.0,
            };
            #[allow(
                clippy::cast_precision_loss,
                reason = "Generations stay far below 2^52."
            )]
            let y = slot.depth as f64 * self.config.row_height;
            let has_spouse = slot.person.spouse.is_some();
            let toggle = if !slot.person.has_children() {
                Toggle::Hidden
            } else if slot.collapsed {
                Toggle::Collapsed
            } else {
                Toggle::Expanded
            };
            by_id.insert(slot.person.id.clone(), i);
            nodes.push(LayoutNode {
                id: slot.person.id.clone(),
                depth: slot.depth,
                position: Point::new(x, y),
                parent: slot.parent,
                children: slot.children.clone(),
                half_width: self.config.half_width(has_spouse),
                has_spouse,
                toggle,
            });
        }

        tracing::debug!(visible = nodes.len(), "layout pass");
        Layout { nodes, by_id }
    }

    /// Bottom-up contour pass. Returns each node's x offset from its parent.
    fn relative_offsets(&self, slots: &[Slot<'_>]) -> Vec<f64> {
        let mut offsets = alloc::vec![0.0; slots.len()];
        let mut contours: Vec<Option<Contour>> = (0..slots.len()).map(|_| None).collect();

        // Children always follow their parent in pre-order, so walking
        // backwards visits every child before its parent.
        for idx in (0..slots.len()).rev() {
            let slot = &slots[idx];
            let half = self.config.half_width(slot.person.spouse.is_some());
            if slot.children.is_empty() {
                contours[idx] = Some(alloc::vec![(-half, half)]);
                continue;
            }

            let mut merged: Contour = Vec::new();
            let mut placed: SmallVec<[f64; 4]> = SmallVec::new();
            for &child in &slot.children {
                let contour = contours[child].take().unwrap_or_default();
                let shift = if merged.is_empty() {
                    0.0
                } else {
                    self.separation(&merged, &contour)
                };
                for (level, &(left, right)) in contour.iter().enumerate() {
                    match merged.get_mut(level) {
                        Some(row) => row.1 = right + shift,
                        None => merged.push((left + shift, right + shift)),
                    }
                }
                placed.push(shift);
            }

            #[allow(
                clippy::cast_precision_loss,
                reason = "Sibling counts stay far below 2^52."
            )]
            let center = placed.iter().sum::<f64>() / placed.len() as f64;
            for (&child, &x) in slot.children.iter().zip(&placed) {
                offsets[child] = x - center;
            }
            let mut contour = Vec::with_capacity(merged.len() + 1);
            contour.push((-half, half));
            contour.extend(merged.iter().map(|&(l, r)| (l - center, r - center)));
            contours[idx] = Some(contour);
        }
        offsets
    }

    /// Smallest shift placing `next` to the right of `placed` with the configured gaps.
    fn separation(&self, placed: &[(f64, f64)], next: &[(f64, f64)]) -> f64 {
        placed
            .iter()
            .zip(next)
            .enumerate()
            .map(|(level, (&(_, right), &(left, _)))| {
                let gap = if level == 0 {
                    self.config.sibling_gap
                } else {
                    self.config.cousin_gap
                };
                right + gap - left
            })
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

fn flatten<'a>(root: &'a Person, is_collapsed: &impl Fn(&PersonId) -> bool) -> Vec<Slot<'a>> {
    let mut slots: Vec<Slot<'a>> = Vec::new();
    let mut stack: Vec<(&'a Person, usize, Option<usize>)> = alloc::vec![(root, 0, None)];
    while let Some((person, depth, parent)) = stack.pop() {
        let idx = slots.len();
        if let Some(p) = parent {
            slots[p].children.push(idx);
        }
        let collapsed = person.has_children() && is_collapsed(&person.id);
        if !collapsed {
            for child in person.children.iter().rev() {
                stack.push((child, depth + 1, Some(idx)));
            }
        }
        slots.push(Slot {
            person,
            depth,
            parent,
            children: SmallVec::new(),
            collapsed,
        });
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Spouse;
    use alloc::vec;

    fn engine() -> LayoutEngine {
        LayoutEngine::default()
    }

    fn none(_: &PersonId) -> bool {
        false
    }

    #[test]
    fn single_root_sits_at_origin() {
        let layout = engine()
            .layout_tree(&Person::new("root", "Root"), none)
            .unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.position("root"), Some(Point::ZERO));
        assert_eq!(layout.root().unwrap().toggle, Toggle::Hidden);
    }

    #[test]
    fn two_siblings_are_centered_under_parent() {
        let tree = Person::new("root", "Root")
            .with_child(Person::new("a", "A"))
            .with_child(Person::new("b", "B"));
        let layout = engine().layout_tree(&tree, none).unwrap();
        assert_eq!(layout.position("root"), Some(Point::new(0.0, 0.0)));
        assert_eq!(layout.position("a"), Some(Point::new(-170.0, 250.0)));
        assert_eq!(layout.position("b"), Some(Point::new(170.0, 250.0)));
        assert_eq!(layout.root().unwrap().toggle, Toggle::Expanded);
    }

    #[test]
    fn cousins_are_spaced_wider_than_siblings() {
        let tree = Person::new("root", "Root")
            .with_child(Person::new("a", "A").with_child(Person::new("a1", "A1")))
            .with_child(Person::new("b", "B").with_child(Person::new("b1", "B1")));
        let layout = engine().layout_tree(&tree, none).unwrap();
        assert_eq!(layout.position("a"), Some(Point::new(-340.0, 250.0)));
        assert_eq!(layout.position("b"), Some(Point::new(340.0, 250.0)));
        assert_eq!(layout.position("a1"), Some(Point::new(-340.0, 500.0)));
        assert_eq!(layout.position("b1"), Some(Point::new(340.0, 500.0)));
    }

    #[test]
    fn spouse_slot_widens_the_unit() {
        let tree = Person::new("root", "Root")
            .with_child(Person::new("a", "A").with_spouse(Spouse::new("a-s", "S")))
            .with_child(Person::new("b", "B"));
        let layout = engine().layout_tree(&tree, none).unwrap();
        let a = layout.get("a").unwrap();
        let b = layout.get("b").unwrap();
        assert!(a.has_spouse);
        assert_eq!(a.half_width, 105.0);
        // 105 + 240 + 50 between centers.
        assert_eq!(b.position.x - a.position.x, 395.0);
        assert!(a.extent().1 + 240.0 <= b.extent().0 + 1e-9);
    }

    #[test]
    fn collapsed_node_is_a_leaf_for_spacing() {
        let tree = Person::new("root", "Root")
            .with_child(
                Person::new("a", "A")
                    .with_child(Person::new("a1", "A1"))
                    .with_child(Person::new("a2", "A2"))
                    .with_child(Person::new("a3", "A3")),
            )
            .with_child(Person::new("b", "B"));
        let collapsed = |id: &PersonId| id.as_str() == "a";
        let layout = engine().layout_tree(&tree, collapsed).unwrap();
        assert_eq!(layout.len(), 3);
        assert!(!layout.contains("a1"));
        assert_eq!(layout.get("a").unwrap().toggle, Toggle::Collapsed);
        assert_eq!(layout.position("a"), Some(Point::new(-170.0, 250.0)));
    }

    #[test]
    fn empty_children_are_not_collapsible() {
        let tree = Person::new("root", "Root").with_child(Person::new("a", "A"));
        let all = |_: &PersonId| true;
        let layout = engine().layout_tree(&tree, all).unwrap();
        // Root is collapsed; "a" is hidden.
        assert_eq!(layout.len(), 1);
        let leaf = Person::new("leaf", "Leaf");
        let layout = engine().layout_tree(&leaf, all).unwrap();
        assert_eq!(layout.root().unwrap().toggle, Toggle::Hidden);
    }

    #[test]
    fn parent_sits_at_mean_of_children() {
        let tree = Person::new("root", "Root").with_children([
            Person::new("a", "A"),
            Person::new("b", "B"),
            Person::new("c", "C").with_spouse(Spouse::new("c-s", "CS")),
        ]);
        let layout = engine().layout_tree(&tree, none).unwrap();
        let xs: Vec<f64> = ["a", "b", "c"]
            .iter()
            .map(|id| layout.position(id).unwrap().x)
            .collect();
        let mean = xs.iter().sum::<f64>() / 3.0;
        assert!((layout.position("root").unwrap().x - mean).abs() < 1e-9);
    }

    #[test]
    fn deep_subtrees_do_not_overlap() {
        // A wide left subtree next to a deep right one.
        let left = Person::new("l", "L").with_children(
            (0..4).map(|i| Person::new(alloc::format!("l{i}"), "x")),
        );
        let right = Person::new("r", "R").with_child(
            Person::new("r0", "R0").with_children(
                (0..3).map(|i| Person::new(alloc::format!("r0{i}"), "x")),
            ),
        );
        let tree = Person::new("root", "Root").with_child(left).with_child(right);
        let layout = engine().layout_tree(&tree, none).unwrap();

        let mut rows: HashMap<usize, Vec<(f64, f64)>> = HashMap::new();
        for n in layout.nodes() {
            rows.entry(n.depth).or_default().push(n.extent());
        }
        for extents in rows.values() {
            for w in extents.windows(2) {
                assert!(w[0].1 < w[1].0, "extents overlap: {w:?}");
            }
        }
    }

    #[test]
    fn edges_are_keyed_by_child() {
        let tree = Person::new("root", "Root")
            .with_child(Person::new("a", "A"))
            .with_child(Person::new("b", "B"));
        let layout = engine().layout_tree(&tree, none).unwrap();
        let edges: Vec<(&str, &str)> = layout
            .edges()
            .map(|(p, c)| (p.id.as_str(), c.id.as_str()))
            .collect();
        assert_eq!(edges, vec![("root", "a"), ("root", "b")]);
        assert_eq!(layout.parent_of("b").map(|n| n.id.as_str()), Some("root"));
        let bounds = layout.bounds().unwrap();
        assert_eq!(bounds, Rect::new(-220.0, 0.0, 220.0, 250.0));
    }

    #[test]
    fn layout_is_deterministic() {
        let tree = Person::new("root", "Root").with_children((0..5).map(|i| {
            Person::new(alloc::format!("c{i}"), "c")
                .with_children((0..i).map(move |j| Person::new(alloc::format!("c{i}-{j}"), "g")))
        }));
        let a = engine().layout_tree(&tree, none).unwrap();
        let b = engine().layout_tree(&tree, none).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_ids_fail_fast() {
        let tree = Person::new("root", "Root")
            .with_child(Person::new("a", "A"))
            .with_child(Person::new("a", "A again"));
        assert_eq!(
            engine().layout_tree(&tree, none),
            Err(LayoutError::DuplicateId { id: "a".into() })
        );
    }
}
