// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs supplied by the owner alongside each tree snapshot.

use bitflags::bitflags;
use kinship_layout::PersonId;

/// UI state owned outside the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderFlags {
    /// Whether edit affordances are shown.
    pub edit_mode: bool,
    /// The node currently selected for editing.
    pub edit_target: Option<PersonId>,
    /// A node to reveal, center, and highlight.
    pub focused: Option<PersonId>,
    /// Whether the header overlay (menu) is open above the canvas.
    pub header_overlay_active: bool,
}

impl RenderFlags {
    /// Whether `id` is drawn highlighted.
    ///
    /// The edit target only counts in edit mode; the focused node always
    /// counts. A node matching both gets the same single highlight.
    pub fn is_highlighted(&self, id: &str) -> bool {
        let matches = |slot: &Option<PersonId>| slot.as_ref().is_some_and(|t| t.as_str() == id);
        (self.edit_mode && matches(&self.edit_target)) || matches(&self.focused)
    }
}

bitflags! {
    /// Undo/redo availability.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct History: u8 {
        /// An edit can be undone.
        const CAN_UNDO = 1 << 0;
        /// An undone edit can be redone.
        const CAN_REDO = 1 << 1;
    }
}

impl History {
    /// Build from two booleans.
    pub fn new(can_undo: bool, can_redo: bool) -> Self {
        let mut h = Self::empty();
        h.set(Self::CAN_UNDO, can_undo);
        h.set(Self::CAN_REDO, can_redo);
        h
    }
}
