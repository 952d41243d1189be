// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! On-screen node sprites and their transitions.
//!
//! A sprite is what is *visible* for a node key: its animated position, its
//! presence, and the content it shows. Sprites outlive their layout node
//! while they exit, and an exiting sprite whose key comes back is revived
//! from wherever it currently is.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;
use kinship_layout::{Layout, LayoutNode, PersonId, Snapshot, Toggle};
use kinship_view2d::Tween;
use kurbo::Point;

use crate::reconcile::Diff;
use crate::resources::AvatarResolver;
use crate::scene::{Avatar, CardContent};

/// What a sprite shows.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NodeContent {
    pub(crate) person: CardContent,
    pub(crate) spouse: Option<CardContent>,
    pub(crate) toggle: Toggle,
}

#[derive(Clone, Debug)]
pub(crate) struct NodeSprite {
    pub(crate) position: Tween<Point>,
    pub(crate) presence: Tween<f64>,
    /// Parent key, for drawing the incoming edge.
    pub(crate) parent: Option<PersonId>,
    pub(crate) exiting: bool,
    pub(crate) content: NodeContent,
}

impl NodeSprite {
    fn is_settled(&self) -> bool {
        self.position.is_complete() && self.presence.is_complete()
    }
}

/// All live and exiting sprites.
#[derive(Clone, Debug, Default)]
pub(crate) struct Stage {
    sprites: HashMap<PersonId, NodeSprite>,
    /// Exiting keys in the order they started leaving.
    exiting: Vec<PersonId>,
}

impl Stage {
    pub(crate) fn get(&self, id: &str) -> Option<&NodeSprite> {
        self.sprites.get(id)
    }

    pub(crate) fn visual_position(&self, id: &str) -> Option<Point> {
        self.sprites.get(id).map(|s| s.position.value())
    }

    pub(crate) fn exiting(&self) -> impl Iterator<Item = (&PersonId, &NodeSprite)> + '_ {
        self.exiting
            .iter()
            .filter_map(|id| self.sprites.get(id).map(|s| (id, s)))
    }

    pub(crate) fn len(&self) -> usize {
        self.sprites.len()
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.exiting.is_empty() && self.sprites.values().all(NodeSprite::is_settled)
    }

    /// Start the transitions for `diff` from `previous` to `next`.
    pub(crate) fn apply(
        &mut self,
        diff: &Diff,
        previous: &Layout,
        next: &Layout,
        snapshot: &Snapshot,
        avatars: &impl AvatarResolver,
        duration: Duration,
    ) {
        let fallback = next.root().map_or(Point::ZERO, |n| n.position);

        for id in &diff.nodes.entered {
            let Some(node) = next.get(id.as_str()) else {
                continue;
            };
            let content = content_of(snapshot, node, avatars);
            let parent = parent_id(next, node);
            if let Some(sprite) = self.sprites.get_mut(id.as_str()) {
                // Re-entering while still on its way out.
                sprite.position.retarget(node.position, duration);
                sprite.presence.retarget(1.0, duration);
                sprite.exiting = false;
                sprite.parent = parent;
                sprite.content = content;
                self.exiting.retain(|e| e != id);
                continue;
            }
            let origin = self.enter_origin(node, previous, next).unwrap_or(fallback);
            self.sprites.insert(
                id.clone(),
                NodeSprite {
                    position: Tween::new(origin, node.position, duration),
                    presence: Tween::new(0.0, 1.0, duration),
                    parent,
                    exiting: false,
                    content,
                },
            );
        }

        for id in &diff.nodes.updated {
            let Some(node) = next.get(id.as_str()) else {
                continue;
            };
            let content = content_of(snapshot, node, avatars);
            let parent = parent_id(next, node);
            match self.sprites.get_mut(id.as_str()) {
                Some(sprite) => {
                    if sprite.position.target() != node.position {
                        sprite.position.retarget(node.position, duration);
                    }
                    sprite.parent = parent;
                    sprite.content = content;
                }
                None => {
                    self.sprites.insert(
                        id.clone(),
                        NodeSprite {
                            position: Tween::settled(node.position),
                            presence: Tween::settled(1.0),
                            parent,
                            exiting: false,
                            content,
                        },
                    );
                }
            }
        }

        for id in &diff.nodes.exited {
            let Some(old) = previous.get(id.as_str()) else {
                continue;
            };
            // Toward the parent's new position, or its last one if it is leaving too.
            let target = previous
                .parent_of(id.as_str())
                .map_or(old.position, |p| {
                    next.position(p.id.as_str()).unwrap_or(p.position)
                });
            if let Some(sprite) = self.sprites.get_mut(id.as_str()) {
                sprite.position.retarget(target, duration);
                sprite.presence.retarget(0.0, duration);
                if !sprite.exiting {
                    sprite.exiting = true;
                    self.exiting.push(id.clone());
                }
            }
        }
    }

    /// Where an entering node starts: the current on-screen position of its
    /// nearest ancestor that is on stage and not leaving. Ancestors are
    /// entered first, so a parent revived mid-exit or entering alongside
    /// already has its sprite.
    fn enter_origin(&self, node: &LayoutNode, previous: &Layout, next: &Layout) -> Option<Point> {
        let mut current = node.parent;
        while let Some(index) = current {
            let ancestor = &next.nodes()[index];
            let key = ancestor.id.as_str();
            if let Some(sprite) = self.sprites.get(key).filter(|s| !s.exiting) {
                return Some(sprite.position.value());
            }
            if previous.contains(key) {
                return previous.position(key);
            }
            current = ancestor.parent;
        }
        None
    }

    /// Advance all transitions and drop sprites that finished exiting.
    pub(crate) fn tick(&mut self, dt: Duration) {
        for sprite in self.sprites.values_mut() {
            sprite.position.tick(dt);
            sprite.presence.tick(dt);
        }
        let sprites = &mut self.sprites;
        self.exiting.retain(|id| {
            let done = sprites.get(id.as_str()).is_none_or(NodeSprite::is_settled);
            if done {
                sprites.remove(id.as_str());
            }
            !done
        });
    }
}

fn parent_id(layout: &Layout, node: &LayoutNode) -> Option<PersonId> {
    node.parent.map(|p| layout.nodes()[p].id.clone())
}

fn content_of(snapshot: &Snapshot, node: &LayoutNode, avatars: &impl AvatarResolver) -> NodeContent {
    let person = snapshot.person(node.id.as_str()).map_or_else(
        || card(node.id.clone(), String::new(), String::new(), Avatar::Placeholder),
        |p| {
            card(
                p.id.clone(),
                p.name.clone(),
                p.birth_year().into(),
                avatar_of(avatars, &p.avatar),
            )
        },
    );
    let spouse = snapshot
        .person(node.id.as_str())
        .and_then(|p| p.spouse.as_ref())
        .map(|s| {
            card(
                s.id.clone(),
                s.name.clone(),
                s.birth_year().into(),
                avatar_of(avatars, &s.avatar),
            )
        });
    NodeContent {
        person,
        spouse,
        toggle: node.toggle,
    }
}

fn card(id: PersonId, name: String, year: String, avatar: Avatar) -> CardContent {
    CardContent {
        id,
        name,
        year,
        avatar,
    }
}

fn avatar_of(avatars: &impl AvatarResolver, reference: &str) -> Avatar {
    if reference.is_empty() {
        return Avatar::Placeholder;
    }
    match avatars.resolve_avatar(reference) {
        Some(handle) => Avatar::Image(handle),
        None => {
            tracing::debug!(reference, "avatar did not resolve; using placeholder");
            Avatar::Placeholder
        }
    }
}
