// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display list produced by the renderer for a host to draw.
//!
//! Node and edge items are in world space and should be drawn under
//! [`Scene::transform`]; the toolbar is in screen space. Edges come first so
//! they sit beneath the cards. Items are in tree pre-order, followed by
//! exiting items in the order they started leaving.

use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;
use kinship_layout::{PersonId, Toggle};
use kinship_view2d::ViewTransform;
use kurbo::{BezPath, Circle, Point};

use crate::geometry::CardShapes;
use crate::resources::{IconHandle, ImageHandle};
use crate::toolbar::Toolbar;

/// What to draw inside a card's avatar circle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Avatar {
    /// The resolved image.
    Image(ImageHandle),
    /// The reference was empty or did not resolve.
    Placeholder,
}

/// Display data for one card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardContent {
    /// Identifier of the person or spouse shown.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Four-digit birth year, or empty.
    pub year: String,
    /// Avatar image.
    pub avatar: Avatar,
}

/// A card with its shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct CardItem {
    /// What the card shows.
    pub content: CardContent,
    /// Where it is.
    pub shapes: CardShapes,
}

bitflags! {
    /// Per-node drawing state.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Drawn as a couple.
        const HAS_SPOUSE = 1 << 0;
        /// Has children (shown or hidden); drawn with an accent outline.
        const BRANCH = 1 << 1;
        /// Children are hidden; the control shows "+".
        const COLLAPSED = 1 << 2;
        /// Matches the edit target (in edit mode) or the focused node.
        const HIGHLIGHTED = 1 << 3;
        /// Leaving the scene.
        const EXITING = 1 << 4;
        /// A body click does something (edit mode, or a leaf).
        const CLICKABLE = 1 << 5;
    }
}

impl NodeFlags {
    /// Flags derived from a node's toggle state.
    pub fn from_toggle(toggle: Toggle) -> Self {
        match toggle {
            Toggle::Hidden => Self::empty(),
            Toggle::Expanded => Self::BRANCH,
            Toggle::Collapsed => Self::BRANCH | Self::COLLAPSED,
        }
    }
}

/// A drawn node unit.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeItem {
    /// Identifier of the person.
    pub id: PersonId,
    /// Current (possibly mid-transition) center in world space.
    pub position: Point,
    /// Presence in `[0, 1]`: grows from 0 when entering, shrinks to 0 when
    /// exiting. Scale avatar radii and label opacity by it.
    pub presence: f64,
    /// Drawing state.
    pub flags: NodeFlags,
    /// The person's card.
    pub person: CardItem,
    /// The spouse card.
    pub spouse: Option<CardItem>,
    /// Line between a couple's avatars.
    pub couple_link: Option<(Point, Point)>,
    /// Expand/collapse control, if the node has children.
    pub toggle: Option<Circle>,
    /// Number of children folded behind a collapsed toggle, for its badge.
    pub hidden: usize,
}

/// A drawn parent → child connector.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeItem {
    /// The child node; edges are keyed by it.
    pub target: PersonId,
    /// Elbow path in world space.
    pub path: BezPath,
}

/// How to draw the edit and delete controls on every card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecorationStyle {
    /// Shared opacity of all edit controls.
    pub opacity: f64,
    /// Whether the controls take input.
    pub interactive: bool,
    /// Glyph of the edit control.
    pub edit_icon: Option<IconHandle>,
    /// Glyph of the delete control.
    pub delete_icon: Option<IconHandle>,
}

/// Everything to draw for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// World → screen transform for nodes and edges.
    pub transform: ViewTransform,
    /// Connectors, drawn first.
    pub edges: Vec<EdgeItem>,
    /// Node units.
    pub nodes: Vec<NodeItem>,
    /// Edit control styling.
    pub decorations: DecorationStyle,
    /// Screen-space control bars.
    pub toolbar: Toolbar,
}

impl Scene {
    /// The item for node `id`, if drawn.
    pub fn node(&self, id: &str) -> Option<&NodeItem> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// The edge into `target`, if drawn.
    pub fn edge(&self, target: &str) -> Option<&EdgeItem> {
        self.edges.iter().find(|e| e.target.as_str() == target)
    }

    /// Identifiers of drawn nodes, in draw order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|n| n.id.as_str())
    }
}
