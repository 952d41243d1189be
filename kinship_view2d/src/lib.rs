// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinship View2D: a camera for pannable, zoomable 2D diagrams.
//!
//! - [`ViewTransform`]: `screen = world * scale + translation`.
//! - [`Viewport`]: a sized camera with clamped zoom, animated discrete
//!   commands, programmatic centering, and gesture suppression while a
//!   programmatic move is in flight.
//! - [`Tween`] and the [`easing`] curves: time-driven interpolation shared
//!   with higher layers that animate their own content.
//!
//! Time is supplied by the caller through `tick(dt)`; nothing here reads a
//! clock.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kinship_view2d::{Motion, Viewport};
//! use kurbo::{Point, Size};
//!
//! let mut viewport = Viewport::default();
//! viewport.set_size(Size::new(800.0, 600.0));
//! assert_eq!(viewport.scale(), 0.8);
//!
//! viewport.zoom_in();
//! assert_eq!(viewport.tick(Duration::from_millis(250)), Some(Motion::Command));
//! assert!((viewport.scale() - 0.96).abs() < 1e-9);
//!
//! // Centering is programmatic: user gestures are dropped until it settles.
//! viewport.center_on(Point::new(0.0, 250.0));
//! assert!(!viewport.begin_gesture());
//! assert_eq!(viewport.tick(Duration::from_millis(750)), Some(Motion::Programmatic));
//! assert_eq!(viewport.world_to_screen(Point::new(0.0, 250.0)), Point::new(400.0, 150.0));
//! ```

#![no_std]

pub mod easing;
mod transform;
mod tween;
mod viewport;

pub use transform::ViewTransform;
pub use tween::{Lerp, Tween};
pub use viewport::{Motion, Viewport, ViewportConfig};
