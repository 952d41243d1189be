// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Person records: the immutable tree snapshot consumed by layout and rendering.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

/// Identifier of a person or spouse.
///
/// Identifiers are unique across a whole snapshot (spouses included). They are
/// cheap to clone and hash as their string contents, so maps keyed by
/// `PersonId` can be queried with a plain `&str`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(Arc<str>);

impl PersonId {
    /// Create an identifier from a string.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self(Arc::from(""))
    }
}

impl fmt::Debug for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersonId({:?})", &*self.0)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// Connection status between the viewer and a relative.
///
/// Opaque to layout and rendering; carried for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelationshipStatus {
    /// Connected relative.
    Connected,
    /// A request was sent and is awaiting an answer.
    PendingSent,
    /// A request was received and is awaiting an answer.
    PendingReceived,
    /// Not connected.
    NotConnected,
}

/// Access level granted to a connected relative.
///
/// Only a tag: nothing in this workspace enforces it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    /// May view the tree.
    Viewer,
    /// May add memories and documents.
    Contributor,
    /// May edit the tree.
    Collaborator,
}

/// Kind of an attached document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Birth certificate.
    BirthCertificate,
    /// Marriage certificate.
    MarriageCertificate,
    /// Death certificate.
    DeathCertificate,
    /// Anything else.
    Other,
}

/// A document attached to a person or spouse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Document identifier (not part of the person id namespace).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Kind of document.
    pub kind: DocumentKind,
    /// Opaque location of the document contents.
    pub url: String,
    /// MIME type, e.g. `application/pdf`.
    pub mime_type: String,
}

/// The spouse paired with a [`Person`].
///
/// A spouse has the same display attributes as a person but never owns
/// children: the couple's descendants hang off the primary [`Person`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spouse {
    /// Unique identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Avatar reference, resolved by the renderer's avatar resolver.
    pub avatar: String,
    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: Option<String>,
    /// Death date, `YYYY-MM-DD`.
    pub death_date: Option<String>,
    /// Profession.
    pub profession: Option<String>,
    /// Birthplace.
    pub birth_place: Option<String>,
    /// Attached documents.
    pub documents: Vec<Document>,
}

impl Spouse {
    /// Create a spouse with an identifier and a display name.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Four-digit birth year, or `""` when unknown.
    pub fn birth_year(&self) -> &str {
        self.birth_date.as_deref().map(year_of).unwrap_or("")
    }
}

/// A person in the family tree, owning its ordered children.
///
/// Children order is sibling order (left to right on screen). An empty
/// `children` list means "no children"; such a person is never collapsible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Person {
    /// Unique identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Avatar reference, resolved by the renderer's avatar resolver.
    pub avatar: String,
    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: String,
    /// Death date, `YYYY-MM-DD`.
    pub death_date: Option<String>,
    /// Profession.
    pub profession: Option<String>,
    /// Birthplace.
    pub birth_place: Option<String>,
    /// Connection status tag.
    pub relationship_status: Option<RelationshipStatus>,
    /// Access level tag.
    pub access_level: Option<AccessLevel>,
    /// Attached documents.
    pub documents: Vec<Document>,
    /// Free-form stories.
    pub stories: Vec<String>,
    /// Optional spouse rendered beside this person.
    pub spouse: Option<Spouse>,
    /// Ordered children.
    pub children: Vec<Self>,
}

impl Person {
    /// Create a person with an identifier and a display name.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the birth date (builder).
    pub fn with_birth_date(mut self, date: impl Into<String>) -> Self {
        self.birth_date = date.into();
        self
    }

    /// Set the avatar reference (builder).
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Pair this person with a spouse (builder).
    pub fn with_spouse(mut self, spouse: Spouse) -> Self {
        self.spouse = Some(spouse);
        self
    }

    /// Append a child (builder).
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children (builder).
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns `true` if the person has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Four-digit birth year, or `""` when unknown.
    pub fn birth_year(&self) -> &str {
        year_of(&self.birth_date)
    }

    /// Visit this person and every descendant in pre-order (parents before
    /// children, siblings left to right).
    pub fn walk<'a>(&'a self, mut f: impl FnMut(&'a Self, usize)) {
        let mut stack: Vec<(&Self, usize)> = alloc::vec![(self, 0)];
        while let Some((person, depth)) = stack.pop() {
            f(person, depth);
            for child in person.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
}

fn year_of(date: &str) -> &str {
    date.get(..4).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn birth_year_takes_first_four_characters() {
        let p = Person::new("a", "Asha").with_birth_date("1932-04-11");
        assert_eq!(p.birth_year(), "1932");
        let short = Person::new("b", "Bo").with_birth_date("19");
        assert_eq!(short.birth_year(), "19");
        let none = Spouse::new("c", "Cy");
        assert_eq!(none.birth_year(), "");
    }

    #[test]
    fn walk_is_pre_order() {
        let tree = Person::new("root", "R")
            .with_child(Person::new("a", "A").with_child(Person::new("a1", "A1")))
            .with_child(Person::new("b", "B"));
        let mut seen = vec![];
        tree.walk(|p, depth| seen.push((p.id.as_str(), depth)));
        assert_eq!(seen, vec![("root", 0), ("a", 1), ("a1", 2), ("b", 1)]);
    }

    #[test]
    fn ids_compare_as_strings() {
        let id = PersonId::from("gen-1");
        let set: hashbrown::HashSet<PersonId> = [id.clone()].into_iter().collect();
        assert!(set.contains("gen-1"));
        assert_eq!(alloc::format!("{id}"), "gen-1");
        assert!(PersonId::default().is_empty());
    }
}
