// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking against a built [`Scene`].
//!
//! Hits are resolved against what is drawn, not against the logical layout,
//! so a card that is mid-transition is hit where it currently appears.

use kinship_layout::PersonId;
use kurbo::{Point, Shape};

use crate::scene::{NodeFlags, NodeItem, Scene};
use crate::toolbar::ToolbarAction;

/// A hit on a node unit. Every variant carries the node's identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// The person's card body.
    Card(PersonId),
    /// The spouse card body.
    SpouseCard(PersonId),
    /// The expand/collapse control.
    Toggle(PersonId),
    /// The person's edit control.
    EditNode(PersonId),
    /// The person's delete control.
    DeleteNode(PersonId),
    /// The spouse's edit control.
    EditSpouse(PersonId),
    /// The spouse's delete control.
    DeleteSpouse(PersonId),
}

impl HitTarget {
    /// The node this hit belongs to.
    pub fn node(&self) -> &PersonId {
        match self {
            Self::Card(id)
            | Self::SpouseCard(id)
            | Self::Toggle(id)
            | Self::EditNode(id)
            | Self::DeleteNode(id)
            | Self::EditSpouse(id)
            | Self::DeleteSpouse(id) => id,
        }
    }
}

/// Anything on the canvas that takes a click.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Hit {
    /// A toolbar button.
    Toolbar(ToolbarAction),
    /// Part of a node unit.
    Node(HitTarget),
}

impl Scene {
    /// What is under the screen point `p`.
    ///
    /// The toolbar is above the diagram. Within the diagram, later (topmost)
    /// nodes win; within a node, edit controls beat the toggle, which beats
    /// the card bodies. Exiting nodes are never hit.
    pub fn hit(&self, p: Point) -> Option<Hit> {
        if let Some(action) = self.toolbar.hit(p) {
            return Some(Hit::Toolbar(action));
        }
        let world = self.transform.invert(p);
        self.nodes
            .iter()
            .rev()
            .filter(|n| !n.flags.contains(NodeFlags::EXITING))
            .find_map(|n| self.hit_node(n, world))
            .map(Hit::Node)
    }

    fn hit_node(&self, node: &NodeItem, p: Point) -> Option<HitTarget> {
        let id = || node.id.clone();
        if self.decorations.interactive {
            if node.person.shapes.edit.contains(p) {
                return Some(HitTarget::EditNode(id()));
            }
            if node.person.shapes.delete.contains(p) {
                return Some(HitTarget::DeleteNode(id()));
            }
            if let Some(spouse) = &node.spouse {
                if spouse.shapes.edit.contains(p) {
                    return Some(HitTarget::EditSpouse(id()));
                }
                if spouse.shapes.delete.contains(p) {
                    return Some(HitTarget::DeleteSpouse(id()));
                }
            }
        }
        if node.toggle.is_some_and(|t| t.contains(p)) {
            return Some(HitTarget::Toggle(id()));
        }
        if node.person.shapes.body_contains(p) {
            return Some(HitTarget::Card(id()));
        }
        node.spouse
            .as_ref()
            .filter(|s| s.shapes.body_contains(p))
            .map(|_| HitTarget::SpouseCard(id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RendererConfig;
    use crate::geometry::NodeShapes;
    use crate::scene::{Avatar, CardContent, CardItem, DecorationStyle};
    use crate::toolbar::Toolbar;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use kinship_view2d::ViewTransform;

    fn card(id: &str, shapes: crate::geometry::CardShapes) -> CardItem {
        CardItem {
            content: CardContent {
                id: id.into(),
                name: id.into(),
                year: String::new(),
                avatar: Avatar::Placeholder,
            },
            shapes,
        }
    }

    fn node(id: &str, at: Point, spouse: bool, flags: NodeFlags) -> NodeItem {
        let shapes = NodeShapes::new(at, spouse, &RendererConfig::default());
        NodeItem {
            id: id.into(),
            position: at,
            presence: 1.0,
            flags,
            couple_link: shapes.couple_link(),
            person: card(id, shapes.person),
            spouse: shapes.spouse.map(|s| card("spouse", s)),
            toggle: flags.contains(NodeFlags::BRANCH).then_some(shapes.toggle),
            hidden: 0,
        }
    }

    fn scene(nodes: Vec<NodeItem>, interactive: bool) -> Scene {
        Scene {
            transform: ViewTransform::IDENTITY,
            edges: Vec::new(),
            nodes,
            decorations: DecorationStyle {
                opacity: if interactive { 1.0 } else { 0.0 },
                interactive,
                edit_icon: None,
                delete_icon: None,
            },
            toolbar: Toolbar::default(),
        }
    }

    #[test]
    fn controls_beat_bodies() {
        let s = scene(
            vec![node("a", Point::ZERO, true, NodeFlags::BRANCH)],
            true,
        );
        assert_eq!(
            s.hit(Point::new(-81.0, -26.0)),
            Some(Hit::Node(HitTarget::EditNode("a".into())))
        );
        assert_eq!(
            s.hit(Point::new(81.0, -26.0)),
            Some(Hit::Node(HitTarget::DeleteSpouse("a".into())))
        );
        assert_eq!(
            s.hit(Point::new(0.0, 85.0)),
            Some(Hit::Node(HitTarget::Toggle("a".into())))
        );
        assert_eq!(
            s.hit(Point::new(-55.0, 0.0)),
            Some(Hit::Node(HitTarget::Card("a".into())))
        );
        assert_eq!(
            s.hit(Point::new(55.0, 0.0)),
            Some(Hit::Node(HitTarget::SpouseCard("a".into())))
        );
        assert_eq!(s.hit(Point::new(0.0, -100.0)), None);
    }

    #[test]
    fn decorations_only_take_input_in_edit_mode() {
        let s = scene(vec![node("a", Point::ZERO, false, NodeFlags::empty())], false);
        assert_eq!(
            s.hit(Point::new(-20.0, -18.0)),
            Some(Hit::Node(HitTarget::Card("a".into())))
        );
        // Leaves have no toggle.
        assert_eq!(s.hit(Point::new(0.0, 85.0)), None);
    }

    #[test]
    fn exiting_nodes_are_skipped_and_screen_space_is_inverted() {
        let mut s = scene(
            vec![
                node("a", Point::ZERO, false, NodeFlags::empty()),
                node("b", Point::ZERO, false, NodeFlags::EXITING),
            ],
            false,
        );
        s.transform = ViewTransform::new(kurbo::Vec2::new(400.0, 80.0), 0.5);
        assert_eq!(
            s.hit(Point::new(405.0, 85.0)),
            Some(Hit::Node(HitTarget::Card("a".into())))
        );
    }
}
