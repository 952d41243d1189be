// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinship Layout: the family tree model and its deterministic placement.
//!
//! This crate has no notion of time, screens, or input. It provides:
//!
//! - **Records** ([`Person`], [`Spouse`], [`PersonId`]): an owned tree where
//!   each person owns its ordered children and may carry one spouse.
//! - **Snapshots** ([`Snapshot`], [`PersonIndex`]): a validated tree plus an
//!   identifier index used to resolve clicks, ancestors, and spouses.
//! - **Collapse memory** ([`CollapseState`]): which nodes hide their children,
//!   keyed by identifier so it survives snapshot replacement.
//! - **Layout** ([`LayoutEngine`], [`Layout`]): a tidy-tree placement of the
//!   visible nodes where a couple takes a wider slot than a single person.
//!
//! ## Minimal example
//!
//! ```rust
//! use kinship_layout::{CollapseState, LayoutEngine, Person, Snapshot, Toggle};
//! use kurbo::Point;
//!
//! let tree = Person::new("root", "Ada")
//!     .with_child(Person::new("a", "Ben"))
//!     .with_child(Person::new("b", "Cleo").with_child(Person::new("b1", "Dov")));
//! let snapshot = Snapshot::new(tree).unwrap();
//!
//! // By default only the root and its children are shown at first.
//! let mut collapse = CollapseState::default();
//! collapse.observe(snapshot.root());
//!
//! let layout = LayoutEngine::default().layout(&snapshot, |id| collapse.is_collapsed(id.as_str()));
//! assert_eq!(layout.position("root"), Some(Point::ZERO));
//! assert_eq!(layout.len(), 3);
//! assert_eq!(layout.get("b").unwrap().toggle, Toggle::Collapsed);
//!
//! // Expanding a node brings its children into the next layout.
//! let cleo = snapshot.person("b").unwrap();
//! collapse.toggle(cleo);
//! let layout = LayoutEngine::default().layout(&snapshot, |id| collapse.is_collapsed(id.as_str()));
//! assert!(layout.contains("b1"));
//! assert_eq!(layout.get("b").unwrap().toggle, Toggle::Expanded);
//! ```
//!
//! ## Placement rules
//!
//! - The root is at `x = 0`; generation `d` is at `y = d * row_height`.
//! - Sibling extents are separated by at least `sibling_gap`, non-sibling
//!   extents on the same row by at least `cousin_gap`.
//! - A parent is centered over the mean of its visible children.
//! - Collapsed nodes occupy the space of a leaf.
//!
//! See [`LayoutConfig`] for the default constants.

#![no_std]

extern crate alloc;

mod collapse;
mod error;
mod layout;
mod person;
mod snapshot;

pub use collapse::{CollapseState, HiddenChildren, ToggleOutcome};
pub use error::LayoutError;
pub use layout::{Layout, LayoutConfig, LayoutEngine, LayoutNode, Toggle};
pub use person::{
    AccessLevel, Document, DocumentKind, Person, PersonId, RelationshipStatus, Spouse,
};
pub use snapshot::{PersonIndex, Role, Snapshot};
