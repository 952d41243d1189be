// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outbound notifications for the owner of the tree data.
//!
//! The renderer never mutates the family tree. Anything that should change
//! the data (or state the owner keeps, such as the edit target) is reported
//! as a [`TreeEvent`] and collected until the owner drains them with
//! [`TreeRenderer::take_events`](crate::TreeRenderer::take_events).

use kinship_layout::PersonId;

/// Something the owner of the tree data should react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEvent {
    /// A leaf node was clicked outside edit mode: open its detail view.
    NodeClicked(PersonId),
    /// The edit-mode switch was pressed.
    ToggleEditMode,
    /// Edit the person.
    EditNode(PersonId),
    /// Delete the person.
    DeleteNode(PersonId),
    /// Add a relative to the given person, or to nobody in particular.
    AddRelationship(Option<PersonId>),
    /// Edit the spouse of the given person.
    EditSpouse(PersonId),
    /// Delete the spouse of the given person.
    DeleteSpouse(PersonId),
    /// Change the edit target; `None` clears it.
    SetEditTarget(Option<PersonId>),
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// The user moved the camera; any transient focus highlight can be cleared.
    Interacted,
    /// Share the tree.
    Share,
    /// A canvas press dismissed the open header overlay.
    OverlayDismissed,
}
