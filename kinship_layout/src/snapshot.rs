// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated snapshots with identifier lookup.

use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::LayoutError;
use crate::person::{Person, PersonId, Spouse};

/// Which record an identifier names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// A [`Person`] node of the tree.
    Person,
    /// The [`Spouse`] satellite of a person; its position is the person's.
    Spouse,
}

#[derive(Clone, Debug)]
struct Entry {
    role: Role,
    depth: usize,
    /// Owning person for spouses; parent person for persons.
    parent: Option<PersonId>,
    /// Child indices from the root to the person (or the spouse's owner).
    path: SmallVec<[u32; 8]>,
}

/// Identifier index over a person tree.
///
/// Building the index validates the snapshot: every identifier, spouses
/// included, must be non-empty and unique.
#[derive(Clone, Debug, Default)]
pub struct PersonIndex {
    entries: HashMap<PersonId, Entry>,
}

impl PersonIndex {
    /// Index `root` and all descendants.
    pub fn build(root: &Person) -> Result<Self, LayoutError> {
        let mut entries: HashMap<PersonId, Entry> = HashMap::new();
        let mut stack: Vec<(&Person, usize, Option<&PersonId>, SmallVec<[u32; 8]>)> =
            alloc::vec![(root, 0, None, SmallVec::new())];

        while let Some((person, depth, parent, path)) = stack.pop() {
            check_id(&person.id, &person.name, &entries)?;
            if let Some(spouse) = &person.spouse {
                if spouse.id == person.id {
                    return Err(LayoutError::DuplicateId {
                        id: spouse.id.clone(),
                    });
                }
                check_id(&spouse.id, &spouse.name, &entries)?;
                entries.insert(
                    spouse.id.clone(),
                    Entry {
                        role: Role::Spouse,
                        depth,
                        parent: Some(person.id.clone()),
                        path: path.clone(),
                    },
                );
            }
            for (i, child) in person.children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Sibling counts beyond u32::MAX are not representable on screen."
                )]
                child_path.push(i as u32);
                stack.push((child, depth + 1, Some(&person.id), child_path));
            }
            entries.insert(
                person.id.clone(),
                Entry {
                    role: Role::Person,
                    depth,
                    parent: parent.cloned(),
                    path,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Number of indexed identifiers (persons and spouses).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` names a person or spouse.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Role of `id`, if indexed.
    pub fn role(&self, id: &str) -> Option<Role> {
        self.entries.get(id).map(|e| e.role)
    }

    /// Generation of `id` (root is 0; a spouse shares its partner's depth).
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.entries.get(id).map(|e| e.depth)
    }

    /// Parent person of a person, or the owning person of a spouse.
    pub fn parent(&self, id: &str) -> Option<&PersonId> {
        self.entries.get(id).and_then(|e| e.parent.as_ref())
    }

    /// The tree node carrying `id`: the person itself, or the person a spouse belongs to.
    pub fn node_of<'a>(&'a self, id: &'a str) -> Option<&'a str> {
        let entry = self.entries.get(id)?;
        match entry.role {
            Role::Person => Some(id),
            Role::Spouse => entry.parent.as_ref().map(PersonId::as_str),
        }
    }

    /// Person ancestors of the tree node carrying `id`, nearest first.
    ///
    /// For a spouse this starts at the owning person's parent, matching the
    /// fact that a spouse is revealed together with its partner.
    pub fn ancestors(&self, id: &str) -> Vec<PersonId> {
        let mut out = Vec::new();
        let Some(node) = self.node_of(id) else {
            return out;
        };
        let mut current = self.parent(node);
        while let Some(p) = current {
            out.push(p.clone());
            current = self.parent(p.as_str());
        }
        out
    }

    /// Resolve `id` to its [`Person`] node within `root`.
    ///
    /// `root` must be the tree this index was built from.
    pub fn person<'a>(&self, root: &'a Person, id: &str) -> Option<&'a Person> {
        let entry = self.entries.get(id)?;
        if entry.role != Role::Person {
            return None;
        }
        follow(root, &entry.path)
    }

    /// Resolve `id` to its [`Spouse`] record within `root`.
    pub fn spouse<'a>(&self, root: &'a Person, id: &str) -> Option<&'a Spouse> {
        let entry = self.entries.get(id)?;
        if entry.role != Role::Spouse {
            return None;
        }
        follow(root, &entry.path)?.spouse.as_ref()
    }
}

fn check_id(
    id: &PersonId,
    name: &str,
    entries: &HashMap<PersonId, Entry>,
) -> Result<(), LayoutError> {
    if id.is_empty() {
        return Err(LayoutError::EmptyId { name: name.into() });
    }
    if entries.contains_key(id) {
        tracing::warn!(id = id.as_str(), "duplicate person identifier");
        return Err(LayoutError::DuplicateId { id: id.clone() });
    }
    Ok(())
}

fn follow<'a>(root: &'a Person, path: &[u32]) -> Option<&'a Person> {
    path.iter()
        .try_fold(root, |node, &i| node.children.get(i as usize))
}

/// An owned, validated person tree together with its [`PersonIndex`].
#[derive(Clone, Debug)]
pub struct Snapshot {
    root: Person,
    index: PersonIndex,
}

impl Snapshot {
    /// Validate and index `root`.
    pub fn new(root: Person) -> Result<Self, LayoutError> {
        let index = PersonIndex::build(&root)?;
        Ok(Self { root, index })
    }

    /// The root person.
    pub fn root(&self) -> &Person {
        &self.root
    }

    /// The identifier index.
    pub fn index(&self) -> &PersonIndex {
        &self.index
    }

    /// Look up a person node by identifier.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.index.person(&self.root, id)
    }

    /// Look up a spouse record by identifier.
    pub fn spouse(&self, id: &str) -> Option<&Spouse> {
        self.index.spouse(&self.root, id)
    }

    /// Returns `true` if `id` names a person or spouse in this snapshot.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }
}
