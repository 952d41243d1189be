// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while indexing or laying out a snapshot.

use alloc::string::String;

use crate::person::PersonId;

/// A snapshot that cannot be laid out.
///
/// Layout keys everything (diffing, selection, focus) by identifier, so a
/// snapshot with colliding or empty identifiers is rejected up front rather
/// than rendered with overlapping nodes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The same identifier is used by two persons, two spouses, or a person and a spouse.
    #[error("duplicate person identifier `{id}`")]
    DuplicateId {
        /// The colliding identifier.
        id: PersonId,
    },
    /// A person or spouse has an empty identifier.
    #[error("person `{name}` has an empty identifier")]
    EmptyId {
        /// Display name of the offending record.
        name: String,
    },
}
