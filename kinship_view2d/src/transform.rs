// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform-scale camera transform.

use kurbo::{Affine, Point, Vec2};

use crate::tween::Lerp;

/// Maps diagram (world) coordinates to screen coordinates:
/// `screen = world * scale + translation`.
///
/// Equivalent to `Affine::translate(translation) * Affine::scale(scale)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    /// Screen-space offset of the world origin.
    pub translation: Vec2,
    /// Uniform zoom factor.
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// No pan, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        scale: 1.0,
    };

    /// Create a transform.
    pub const fn new(translation: Vec2, scale: f64) -> Self {
        Self { translation, scale }
    }

    /// As a [`kurbo::Affine`].
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translation) * Affine::scale(self.scale)
    }

    /// World to screen.
    pub fn apply(self, world: Point) -> Point {
        (world.to_vec2() * self.scale + self.translation).to_point()
    }

    /// Screen to world. Returns the input unchanged for a degenerate scale.
    pub fn invert(self, screen: Point) -> Point {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return screen;
        }
        ((screen.to_vec2() - self.translation) / self.scale).to_point()
    }

    /// Translate by a screen-space delta.
    pub fn panned(self, delta: Vec2) -> Self {
        Self::new(self.translation + delta, self.scale)
    }

    /// Rescale to `scale`, keeping the world point under `anchor` (screen
    /// space) fixed.
    pub fn with_scale_about(self, scale: f64, anchor: Point) -> Self {
        let world = self.invert(anchor);
        Self::new(anchor.to_vec2() - world.to_vec2() * scale, scale)
    }

    /// Returns `true` if all components are finite.
    pub fn is_finite(self) -> bool {
        self.translation.is_finite() && self.scale.is_finite()
    }
}

impl Lerp for ViewTransform {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self::new(
            self.translation.lerp(to.translation, t),
            Lerp::lerp(self.scale, to.scale, t),
        )
    }
}
