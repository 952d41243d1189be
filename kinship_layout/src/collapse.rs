// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapse memory: which nodes currently hide their children.
//!
//! The state lives in a side table keyed by [`PersonId`] and owned by the
//! renderer. It is never stored on the person records themselves, so it
//! survives snapshot replacement: a node keeps its collapsed/expanded choice
//! for as long as its identifier stays in the tree.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::person::{Person, PersonId};

/// Identifiers of the children hidden behind a collapsed node, in sibling order.
pub type HiddenChildren = SmallVec<[PersonId; 4]>;

/// Result of [`CollapseState::toggle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToggleOutcome {
    /// The node's children are now hidden.
    Collapsed,
    /// The node's children are now shown.
    Expanded,
    /// The node has no children; nothing changed.
    Ignored,
}

#[derive(Clone, Debug, Default)]
struct Entry {
    collapsed: bool,
    hidden: HiddenChildren,
}

/// Per-identifier collapse memory.
///
/// Nodes seen for the first time (via [`CollapseState::observe`]) are collapsed
/// when they have children and sit at or below the configured default depth,
/// so nothing deeper than that depth is initially visible. Afterwards only
/// explicit operations change their state.
#[derive(Clone, Debug)]
pub struct CollapseState {
    entries: HashMap<PersonId, Entry>,
    default_expanded_depth: usize,
}

impl Default for CollapseState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CollapseState {
    /// Create an empty memory. Newly seen nodes at depth
    /// `default_expanded_depth` or deeper start collapsed.
    pub fn new(default_expanded_depth: usize) -> Self {
        Self {
            entries: HashMap::new(),
            default_expanded_depth,
        }
    }

    /// Deepest generation initially shown.
    pub fn default_expanded_depth(&self) -> usize {
        self.default_expanded_depth
    }

    /// Synchronize with a new snapshot.
    ///
    /// - Unknown nodes get their default state.
    /// - Known collapsed nodes refresh their hidden-children snapshot.
    /// - Entries for identifiers no longer in the tree are dropped.
    pub fn observe(&mut self, root: &Person) {
        let mut seen: hashbrown::HashSet<&str> = hashbrown::HashSet::new();
        let default_depth = self.default_expanded_depth;
        root.walk(|person, depth| {
            seen.insert(person.id.as_str());
            let entry = self
                .entries
                .entry(person.id.clone())
                .or_insert_with(|| Entry {
                    collapsed: depth >= default_depth && person.has_children(),
                    hidden: HiddenChildren::new(),
                });
            entry.hidden.clear();
            if entry.collapsed {
                entry
                    .hidden
                    .extend(person.children.iter().map(|c| c.id.clone()));
            }
        });
        self.entries.retain(|id, _| seen.contains(id.as_str()));
    }

    /// Returns `true` if `id` currently hides its children.
    pub fn is_collapsed(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(|e| e.collapsed)
    }

    /// Children hidden behind `id` as of the last snapshot or collapse.
    pub fn hidden_children(&self, id: &str) -> &[PersonId] {
        self.entries
            .get(id)
            .map(|e| e.hidden.as_slice())
            .unwrap_or(&[])
    }

    /// Hide the children of `person`. Returns `false` if nothing changed.
    pub fn collapse(&mut self, person: &Person) -> bool {
        if !person.has_children() {
            return false;
        }
        let entry = self.entries.entry(person.id.clone()).or_default();
        if entry.collapsed {
            return false;
        }
        entry.collapsed = true;
        entry.hidden = person.children.iter().map(|c| c.id.clone()).collect();
        true
    }

    /// Show the children of `id`, returning the previously hidden snapshot.
    pub fn expand(&mut self, id: &str) -> Option<HiddenChildren> {
        let entry = self.entries.get_mut(id)?;
        if !entry.collapsed {
            return None;
        }
        entry.collapsed = false;
        Some(core::mem::take(&mut entry.hidden))
    }

    /// Flip the state of `person`.
    pub fn toggle(&mut self, person: &Person) -> ToggleOutcome {
        if !person.has_children() {
            return ToggleOutcome::Ignored;
        }
        if self.expand(person.id.as_str()).is_some() {
            ToggleOutcome::Expanded
        } else if self.collapse(person) {
            ToggleOutcome::Collapsed
        } else {
            ToggleOutcome::Ignored
        }
    }

    /// Expand every identifier in `ids`. Returns how many were collapsed.
    pub fn expand_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a PersonId>) -> usize {
        ids.into_iter()
            .filter(|id| self.expand(id.as_str()).is_some())
            .count()
    }

    /// Number of remembered identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of collapsed nodes.
    pub fn collapsed_count(&self) -> usize {
        self.entries.values().filter(|e| e.collapsed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_generations() -> Person {
        Person::new("root", "Root")
            .with_child(Person::new("c1", "C1").with_child(Person::new("g1", "G1")))
            .with_child(Person::new("c2", "C2").with_child(Person::new("g2", "G2")))
    }

    #[test]
    fn first_observation_hides_generations_beyond_default_depth() {
        let tree = Person::new("root", "Root").with_child(
            Person::new("c", "C")
                .with_child(Person::new("g", "G").with_child(Person::new("gg", "GG"))),
        );
        let mut state = CollapseState::new(1);
        state.observe(&tree);
        assert!(!state.is_collapsed("root"));
        assert!(state.is_collapsed("c"), "depth 1 with children starts collapsed");
        assert!(state.is_collapsed("g"));
        assert_eq!(state.hidden_children("c"), &[PersonId::from("g")]);
        assert_eq!(state.hidden_children("g"), &[PersonId::from("gg")]);
        // Leaves are never collapsed.
        assert!(!state.is_collapsed("gg"));
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn toggle_round_trip() {
        let tree = three_generations();
        let mut state = CollapseState::new(1);
        state.observe(&tree);
        assert_eq!(state.toggle(&tree), ToggleOutcome::Collapsed);
        assert_eq!(
            state.hidden_children("root"),
            &[PersonId::from("c1"), PersonId::from("c2")]
        );
        assert_eq!(state.toggle(&tree), ToggleOutcome::Expanded);
        assert!(state.hidden_children("root").is_empty());
        assert_eq!(
            state.toggle(&Person::new("leaf", "Leaf")),
            ToggleOutcome::Ignored
        );
    }

    #[test]
    fn state_survives_unrelated_edits_and_prunes_removed_nodes() {
        let tree = three_generations();
        let mut state = CollapseState::new(5);
        state.observe(&tree);
        assert!(state.collapse(&tree.children[0]));

        // Add a sibling elsewhere and remove c2's child.
        let mut edited = tree.clone();
        edited.children[1].children.clear();
        edited.children.push(Person::new("c3", "C3"));
        state.observe(&edited);

        assert!(state.is_collapsed("c1"));
        // g2 is forgotten, c3 is new: root, c1, g1, c2, c3.
        assert_eq!(state.len(), 5);
        assert_eq!(state.collapsed_count(), 1);
    }

    #[test]
    fn hidden_snapshot_tracks_new_children_of_collapsed_node() {
        let tree = three_generations();
        let mut state = CollapseState::new(0);
        state.observe(&tree);
        assert!(state.is_collapsed("c1"));

        let mut edited = tree.clone();
        edited.children[0].children.push(Person::new("g1b", "G1b"));
        state.observe(&edited);
        assert_eq!(
            state.hidden_children("c1"),
            &[PersonId::from("g1"), PersonId::from("g1b")]
        );
    }

    #[test]
    fn expand_all_counts_changes() {
        let tree = three_generations();
        let mut state = CollapseState::new(1);
        state.observe(&tree);
        assert!(!state.is_collapsed("root"));
        let ids = [
            PersonId::from("c1"),
            PersonId::from("c2"),
            PersonId::from("root"),
        ];
        assert_eq!(state.expand_all(&ids), 2);
        assert_eq!(state.expand_all(&ids), 0);
    }
}
