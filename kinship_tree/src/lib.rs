// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinship Tree: an interactive, animated family tree component.
//!
//! [`TreeRenderer`] turns successive person trees into a display list
//! ([`Scene`]) and turns input into [`TreeEvent`]s for the owner of the data.
//! Between renders it keeps:
//!
//! - **Collapse memory**: which nodes hide their children, per identifier.
//! - **Transitions**: nodes and edges are keyed by identifier; new ones grow
//!   out of their nearest visible ancestor, removed ones shrink into their
//!   parent, and kept ones glide to their new place ([`Diff`]).
//! - **Camera**: pan, wheel zoom, toolbar zoom commands, and a two-phase
//!   focus that first reveals a node and then centers on it.
//! - **Edit affordances**: per-card edit/delete controls that fade with edit
//!   mode, edit-target selection, and the toolbar.
//!
//! Icons and avatar images are injected through [`IconResolver`] and
//! [`AvatarResolver`]; the renderer itself never loads anything or reads a
//! clock. Time advances through [`TreeRenderer::tick`].
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kinship_layout::Person;
//! use kinship_tree::{History, RenderFlags, TreeRenderer};
//! use kurbo::Size;
//!
//! let tree = Person::new("root", "Ada")
//!     .with_child(Person::new("a", "Ben"))
//!     .with_child(Person::new("b", "Cleo").with_child(Person::new("b1", "Dov")));
//!
//! let mut renderer = TreeRenderer::default();
//! renderer.resize(Size::new(800.0, 600.0));
//! renderer
//!     .render(tree, RenderFlags::default(), History::empty())
//!     .unwrap();
//! let scene = renderer.scene();
//! assert_eq!(scene.node_ids().collect::<Vec<_>>(), ["root", "a", "b"]);
//!
//! // Focusing a hidden node reveals it, then centers it horizontally.
//! assert!(renderer.focus("b1"));
//! assert!(renderer.layout().contains("b1"));
//! for _ in 0..100 {
//!     renderer.tick(Duration::from_millis(16));
//! }
//! let b1 = renderer.layout().position("b1").unwrap();
//! assert!((renderer.viewport().world_to_screen(b1).x - 400.0).abs() < 1e-6);
//!
//! // A programmatic move is not a user interaction.
//! assert!(renderer.take_events().is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: `no_std` + `alloc` builds using `libm` for float math.

#![no_std]

extern crate alloc;

mod config;
mod decorations;
mod events;
mod flags;
mod focus;
mod geometry;
mod gesture;
mod hit;
mod overlay;
mod reconcile;
mod renderer;
mod resources;
mod scene;
mod stage;
mod toolbar;

pub use config::RendererConfig;
pub use decorations::EditDecorations;
pub use events::TreeEvent;
pub use flags::{History, RenderFlags};
pub use focus::{FocusPhase, FocusSequencer};
pub use geometry::{CardShapes, NodeShapes, elbow};
pub use gesture::{PointerMove, PointerTracker, Release};
pub use hit::{Hit, HitTarget};
pub use overlay::{Overlay, OverlayState};
pub use reconcile::{Changes, Diff};
pub use renderer::{RenderOutcome, TreeRenderer};
pub use resources::{
    AvatarResolver, IconHandle, IconName, IconResolver, IconSet, ImageHandle, NoAvatars, NoIcons,
};
pub use scene::{
    Avatar, CardContent, CardItem, DecorationStyle, EdgeItem, NodeFlags, NodeItem, Scene,
};
pub use toolbar::{Toolbar, ToolbarAction, ToolbarButton};
