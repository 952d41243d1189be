// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven interpolation between two values.

use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::easing::{EasingFn, ease_in_out_cubic};

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Interpolate from `self` (at `t = 0`) to `to` (at `t = 1`).
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self::lerp(self, to, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self::lerp(self, to, t)
    }
}

/// An eased transition from one value to another over a fixed duration.
///
/// Elapsed time accumulates as a [`Duration`], so many small ticks reach
/// completion exactly.
#[derive(Clone, Copy, Debug)]
pub struct Tween<T> {
    from: T,
    to: T,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl<T: Lerp> Tween<T> {
    /// Start a transition from `from` to `to`.
    ///
    /// A zero `duration` yields a tween that is already complete.
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing: ease_in_out_cubic,
        }
    }

    /// A completed tween resting at `value`.
    pub fn settled(value: T) -> Self {
        Self::new(value, value, Duration::ZERO)
    }

    /// Set the easing function (builder).
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt`. Returns `true` once complete.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.is_complete()
    }

    /// Whether the end value has been reached.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in `[0, 1]`, before easing.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    /// Current interpolated value.
    pub fn value(&self) -> T {
        if self.is_complete() {
            return self.to;
        }
        self.from.lerp(self.to, (self.easing)(self.progress()))
    }

    /// Start value.
    pub fn start(&self) -> T {
        self.from
    }

    /// End value.
    pub fn target(&self) -> T {
        self.to
    }

    /// Restart toward `to`, beginning from the current value.
    pub fn retarget(&mut self, to: T, duration: Duration) {
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    /// Jump straight to the end value.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }
}
