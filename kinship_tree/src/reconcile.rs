// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed enter/update/exit classification between two layouts.
//!
//! Nodes are keyed by person identifier. Edges are keyed by their target:
//! every non-root node has exactly one incoming edge.
//!
//! Classification always compares *logical* layouts, never what is on screen
//! mid-animation, so overlapping transitions settle consistently.

use alloc::vec::Vec;

use kinship_layout::{Layout, PersonId};

/// One side of a [`Diff`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Keys present now but not before, in the new layout's pre-order.
    pub entered: Vec<PersonId>,
    /// Keys present in both, in the new layout's pre-order.
    pub updated: Vec<PersonId>,
    /// Keys present before but not now, in the old layout's pre-order.
    pub exited: Vec<PersonId>,
}

impl Changes {
    /// Returns `true` if nothing entered or exited.
    pub fn is_stable(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Result of reconciling two layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diff {
    /// Node changes.
    pub nodes: Changes,
    /// Edge changes, keyed by target node.
    pub edges: Changes,
}

impl Diff {
    /// Classify the nodes and edges of `next` against `previous`.
    pub fn between(previous: &Layout, next: &Layout) -> Self {
        let mut diff = Self::default();
        for node in next.nodes() {
            let id = node.id.as_str();
            if previous.contains(id) {
                diff.nodes.updated.push(node.id.clone());
            } else {
                diff.nodes.entered.push(node.id.clone());
            }
            if node.parent.is_some() {
                // Keyed by target: a re-parented node keeps its edge.
                if previous.parent_of(id).is_some() {
                    diff.edges.updated.push(node.id.clone());
                } else {
                    diff.edges.entered.push(node.id.clone());
                }
            }
        }
        for node in previous.nodes() {
            if !next.contains(node.id.as_str()) {
                diff.nodes.exited.push(node.id.clone());
            }
            if node.parent.is_some() && next.parent_of(node.id.as_str()).is_none() {
                diff.edges.exited.push(node.id.clone());
            }
        }
        tracing::trace!(
            entered = diff.nodes.entered.len(),
            updated = diff.nodes.updated.len(),
            exited = diff.nodes.exited.len(),
            "reconciled layouts"
        );
        diff
    }

    /// Returns `true` if no node or edge entered or exited.
    pub fn is_stable(&self) -> bool {
        self.nodes.is_stable() && self.edges.is_stable()
    }
}
