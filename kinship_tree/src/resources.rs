// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Injected resolvers for icons and avatar images.
//!
//! The renderer does not load anything itself. Hosts hand it resolvers that
//! map names and references to opaque handles of their own; anything that
//! does not resolve degrades to "no glyph" or a placeholder avatar.

use core::fmt;

/// Icons the renderer asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IconName {
    /// Undo button.
    Undo2,
    /// Redo button.
    Redo2,
    /// Add-relative button.
    Plus,
    /// Share button.
    Share2,
    /// Zoom-in button.
    ZoomIn,
    /// Zoom-out button.
    ZoomOut,
    /// Reset-zoom button.
    Locate,
    /// Edit-mode switch and per-node edit control.
    Pencil,
    /// Per-node delete control.
    Trash2,
}

impl IconName {
    /// Every icon, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Undo2,
        Self::Redo2,
        Self::Plus,
        Self::Share2,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::Locate,
        Self::Pencil,
        Self::Trash2,
    ];

    /// The icon's name in the host icon set.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undo2 => "Undo2",
            Self::Redo2 => "Redo2",
            Self::Plus => "Plus",
            Self::Share2 => "Share2",
            Self::ZoomIn => "ZoomIn",
            Self::ZoomOut => "ZoomOut",
            Self::Locate => "Locate",
            Self::Pencil => "Pencil",
            Self::Trash2 => "Trash2",
        }
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host handle for a resolved icon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconHandle(pub u32);

/// Host handle for a resolved avatar image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Maps icon names to host icons.
pub trait IconResolver {
    /// Resolve `name`, or `None` if the host has no such icon.
    fn resolve_icon(&self, name: IconName) -> Option<IconHandle>;
}

impl<F> IconResolver for F
where
    F: Fn(IconName) -> Option<IconHandle>,
{
    fn resolve_icon(&self, name: IconName) -> Option<IconHandle> {
        self(name)
    }
}

/// Maps avatar references to host images.
pub trait AvatarResolver {
    /// Resolve `reference`, or `None` if it cannot be loaded.
    fn resolve_avatar(&self, reference: &str) -> Option<ImageHandle>;
}

impl<F> AvatarResolver for F
where
    F: Fn(&str) -> Option<ImageHandle>,
{
    fn resolve_avatar(&self, reference: &str) -> Option<ImageHandle> {
        self(reference)
    }
}

/// A resolver with no icons.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoIcons;

impl IconResolver for NoIcons {
    fn resolve_icon(&self, _name: IconName) -> Option<IconHandle> {
        None
    }
}

/// A resolver that never loads avatars; every card gets the placeholder.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoAvatars;

impl AvatarResolver for NoAvatars {
    fn resolve_avatar(&self, _reference: &str) -> Option<ImageHandle> {
        None
    }
}

/// Icons resolved once, up front.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IconSet {
    handles: [Option<IconHandle>; 9],
}

impl IconSet {
    /// Resolve every [`IconName`], warning about the missing ones.
    pub fn resolve(resolver: &impl IconResolver) -> Self {
        let mut handles = [None; 9];
        for (slot, name) in handles.iter_mut().zip(IconName::ALL) {
            *slot = resolver.resolve_icon(name);
            if slot.is_none() {
                tracing::warn!(icon = name.as_str(), "icon not available; drawing no glyph");
            }
        }
        Self { handles }
    }

    /// The handle for `name`, if the host provided one.
    pub fn get(&self, name: IconName) -> Option<IconHandle> {
        self.handles[name as usize]
    }
}
