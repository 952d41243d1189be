// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The camera: a sized viewport, its transform, and the motions that change it.
//!
//! Three sources write the transform:
//!
//! - **Gestures** (drag, wheel, pinch) write it directly while active.
//! - **Commands** (zoom in/out, reset) animate it over a short duration.
//! - **Programmatic moves** (centering on a point) animate it and lock out
//!   the other two until they settle.
//!
//! Commands and gestures count as user interaction; programmatic moves do
//! not. [`Viewport::tick`] reports which kind of motion settled so the owner
//! can react accordingly.

use core::time::Duration;

use kurbo::{Point, Size, Vec2};

use crate::transform::ViewTransform;
use crate::tween::Tween;

/// Camera limits and timings.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Factor applied by one zoom-in command (zoom-out divides by it).
    pub zoom_step: f64,
    /// Scale of the initial transform.
    pub initial_scale: f64,
    /// Screen-space y of the world origin in the initial transform.
    pub top_margin: f64,
    /// Where a focused point lands, as a fraction of the viewport size.
    pub focus_anchor: Vec2,
    /// Scale used when centering on a point.
    pub focus_scale: f64,
    /// Duration of zoom-in/zoom-out commands.
    pub command_duration: Duration,
    /// Duration of the reset command.
    pub reset_duration: Duration,
    /// Duration of programmatic centering.
    pub focus_duration: Duration,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 2.0,
            zoom_step: 1.2,
            initial_scale: 0.8,
            top_margin: 80.0,
            focus_anchor: Vec2::new(0.5, 0.25),
            focus_scale: 1.0,
            command_duration: Duration::from_millis(250),
            reset_duration: Duration::from_millis(500),
            focus_duration: Duration::from_millis(750),
        }
    }
}

impl ViewportConfig {
    /// Clamp `scale` into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Kind of an animated camera motion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    /// A discrete user command (zoom in/out, reset).
    Command,
    /// A programmatic move (centering); gestures are dropped while it runs.
    Programmatic,
}

impl Motion {
    /// Whether settling this motion counts as user interaction.
    pub fn is_user(self) -> bool {
        matches!(self, Self::Command)
    }
}

#[derive(Clone, Debug)]
struct Flight {
    tween: Tween<ViewTransform>,
    motion: Motion,
}

/// A sized camera over an unbounded world.
///
/// The viewport distinguishes the *visual* transform (what is on screen
/// right now, possibly mid-animation) from the *logical* transform (where
/// the camera is headed). Commands compose on the logical transform so
/// repeated commands accumulate exactly.
#[derive(Clone, Debug)]
pub struct Viewport {
    config: ViewportConfig,
    size: Size,
    visual: ViewTransform,
    logical: ViewTransform,
    flight: Option<Flight>,
    gesture: bool,
    placed: bool,
    /// The initial transform the camera was last placed at or reset to.
    home: ViewTransform,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    /// Create an unsized viewport.
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            size: Size::ZERO,
            visual: ViewTransform::IDENTITY,
            logical: ViewTransform::IDENTITY,
            flight: None,
            gesture: false,
            placed: false,
            home: ViewTransform::IDENTITY,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Current viewport size in screen pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns `true` if the viewport has a positive, finite area.
    pub fn has_area(&self) -> bool {
        self.size.width > 0.0
            && self.size.height > 0.0
            && self.size.width.is_finite()
            && self.size.height.is_finite()
    }

    /// Update the viewport size.
    ///
    /// The first positive size places the camera at the
    /// [initial transform](Self::initial_transform). A later resize
    /// re-centers it while the camera still rests there; once the user or a
    /// focus has moved it, the current transform is kept. Zero or non-finite
    /// sizes are recorded but leave the transform untouched. Returns
    /// [`Viewport::has_area`].
    pub fn set_size(&mut self, size: Size) -> bool {
        self.size = size;
        if !self.has_area() {
            tracing::debug!(width = size.width, height = size.height, "viewport has no area");
            return false;
        }
        if !self.placed || self.is_home() {
            self.placed = true;
            self.home = self.initial_transform();
            self.visual = self.home;
            self.logical = self.home;
        }
        true
    }

    /// Returns `true` once the camera has been placed by a positive size.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Root horizontally centered, `top_margin` from the top, at `initial_scale`.
    pub fn initial_transform(&self) -> ViewTransform {
        ViewTransform::new(
            Vec2::new(self.size.width / 2.0, self.config.top_margin),
            self.config.clamp_scale(self.config.initial_scale),
        )
    }

    /// What is on screen now.
    pub fn transform(&self) -> ViewTransform {
        self.visual
    }

    /// Where the camera is headed.
    pub fn logical_transform(&self) -> ViewTransform {
        self.logical
    }

    /// Current on-screen scale.
    pub fn scale(&self) -> f64 {
        self.visual.scale
    }

    /// The kind of motion in flight, if any.
    pub fn motion(&self) -> Option<Motion> {
        self.flight.as_ref().map(|f| f.motion)
    }

    /// Returns `true` while a programmatic move is in flight.
    pub fn is_programmatic(&self) -> bool {
        self.motion() == Some(Motion::Programmatic)
    }

    /// Returns `true` while a user gesture is active.
    pub fn is_gesturing(&self) -> bool {
        self.gesture
    }

    /// World to screen, using the visual transform.
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.visual.apply(world)
    }

    /// Screen to world, using the visual transform.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.visual.invert(screen)
    }

    /// Multiply the scale by `zoom_step`, about the viewport center.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(self.config.zoom_step)
    }

    /// Divide the scale by `zoom_step`, about the viewport center.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(1.0 / self.config.zoom_step)
    }

    /// Animate a zoom by `factor` about the viewport center.
    ///
    /// Ignored (returns `false`) while a programmatic move is in flight or
    /// the viewport has no area.
    pub fn zoom_by(&mut self, factor: f64) -> bool {
        if !self.accepts_commands() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let scale = self.config.clamp_scale(self.logical.scale * factor);
        let center = (self.size.to_vec2() / 2.0).to_point();
        let target = self.logical.with_scale_about(scale, center);
        self.fly(target, self.config.command_duration, Motion::Command);
        true
    }

    /// Animate back to the initial transform.
    pub fn reset(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let target = self.initial_transform();
        self.home = target;
        self.fly(target, self.config.reset_duration, Motion::Command);
        true
    }

    /// Transform that puts world point `at` on the focus anchor at `focus_scale`.
    pub fn focus_transform(&self, at: Point) -> ViewTransform {
        let s = self.config.clamp_scale(self.config.focus_scale);
        let anchor = Vec2::new(
            self.size.width * self.config.focus_anchor.x,
            self.size.height * self.config.focus_anchor.y,
        );
        ViewTransform::new(anchor - at.to_vec2() * s, s)
    }

    /// Programmatically move the camera so `at` lands on the focus anchor.
    ///
    /// Cancels any gesture or command. Returns `false` when the viewport has
    /// no area or `at` is not finite.
    pub fn center_on(&mut self, at: Point) -> bool {
        if !self.has_area() || !at.is_finite() {
            return false;
        }
        let target = self.focus_transform(at);
        self.animate_to(target, self.config.focus_duration);
        true
    }

    fn animate_to(&mut self, target: ViewTransform, duration: Duration) {
        self.gesture = false;
        self.fly(target, duration, Motion::Programmatic);
    }

    /// Start a user gesture.
    ///
    /// Dropped (returns `false`) while a programmatic move is in flight. A
    /// running command is cancelled where it stands.
    pub fn begin_gesture(&mut self) -> bool {
        if self.is_programmatic() || !self.placed {
            return false;
        }
        if self.flight.take().is_some() {
            self.logical = self.visual;
        }
        self.gesture = true;
        true
    }

    /// Pan by a screen-space delta during a gesture.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if !self.gesture || !delta.is_finite() {
            return false;
        }
        self.write(self.visual.panned(delta));
        true
    }

    /// Zoom by `factor` about the screen point `anchor` during a gesture.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) -> bool {
        if !self.gesture || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let scale = self.config.clamp_scale(self.visual.scale * factor);
        self.write(self.visual.with_scale_about(scale, anchor));
        true
    }

    /// End the gesture. Returns `true` if a gesture was active, meaning the
    /// user moved the camera.
    pub fn end_gesture(&mut self) -> bool {
        core::mem::take(&mut self.gesture)
    }

    /// Advance animations. Returns the motion that settled during this tick.
    pub fn tick(&mut self, dt: Duration) -> Option<Motion> {
        let flight = self.flight.as_mut()?;
        let done = flight.tween.tick(dt);
        self.visual = flight.tween.value();
        if !done {
            return None;
        }
        let motion = flight.motion;
        self.visual = self.logical;
        self.flight = None;
        tracing::trace!(?motion, scale = self.visual.scale, "camera settled");
        Some(motion)
    }

    fn is_home(&self) -> bool {
        self.placed && self.flight.is_none() && !self.gesture && self.logical == self.home
    }

    fn accepts_commands(&self) -> bool {
        self.placed && self.has_area() && !self.is_programmatic()
    }

    fn fly(&mut self, target: ViewTransform, duration: Duration, motion: Motion) {
        self.logical = target;
        self.flight = Some(Flight {
            tween: Tween::new(self.visual, target, duration),
            motion,
        });
    }

    fn write(&mut self, transform: ViewTransform) {
        if transform.is_finite() {
            self.visual = transform;
            self.logical = transform;
        }
    }
}
