// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit-mode affordances: fade in and out without touching the layout.

use core::time::Duration;

use kinship_view2d::Tween;

/// Visibility of the per-node edit and delete controls.
#[derive(Clone, Debug)]
pub struct EditDecorations {
    enabled: bool,
    opacity: Tween<f64>,
}

impl EditDecorations {
    /// Start fully shown (`enabled`) or fully hidden.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            opacity: Tween::settled(if enabled { 1.0 } else { 0.0 }),
        }
    }

    /// Switch edit mode, fading over `duration`. Returns `true` if it changed.
    pub fn set_enabled(&mut self, enabled: bool, duration: Duration) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        self.opacity.retarget(if enabled { 1.0 } else { 0.0 }, duration);
        true
    }

    /// Whether edit mode is on. Controls only take input while it is.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    /// Returns `true` once the fade has finished.
    pub fn is_settled(&self) -> bool {
        self.opacity.is_complete()
    }

    /// Advance the fade.
    pub fn tick(&mut self, dt: Duration) {
        self.opacity.tick(dt);
    }
}
