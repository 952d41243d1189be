// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Telling a click from a drag.
//!
//! A press remembers what was under the pointer. If the pointer then travels
//! further than the slop distance the press turns into a pan and will never
//! click; otherwise releasing it activates the pressed target, even if
//! something else has animated under the pointer in the meantime.

use kurbo::{Point, Vec2};

/// What a pointer move means.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerMove {
    /// Nothing to do (no press, or still within the slop).
    Idle,
    /// Pan by `delta`. `started` is set on the move that crossed the slop.
    Pan {
        /// Screen-space movement since the last pan step.
        delta: Vec2,
        /// Whether this is the first pan step of the press.
        started: bool,
    },
}

/// What a pointer release means.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Release<K> {
    /// Activate the target pressed on.
    Click(K),
    /// The press was a pan; it is over.
    PanEnd,
    /// Nothing (no press, or a press on empty space).
    Nothing,
}

#[derive(Clone, Debug)]
struct Press<K> {
    target: Option<K>,
    origin: Point,
    last: Point,
    panning: bool,
}

/// Single-pointer press tracking with a distance slop.
#[derive(Clone, Debug)]
pub struct PointerTracker<K> {
    press: Option<Press<K>>,
    slop: f64,
}

impl<K: Clone> PointerTracker<K> {
    /// Track presses, turning them into pans beyond `slop` screen pixels.
    pub fn new(slop: f64) -> Self {
        Self { press: None, slop }
    }

    /// Returns `true` while a press is held.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Returns `true` while the held press is panning.
    pub fn is_panning(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.panning)
    }

    /// Record a press at `at` over `target`. Replaces any held press.
    pub fn on_down(&mut self, target: Option<K>, at: Point) {
        self.press = Some(Press {
            target,
            origin: at,
            last: at,
            panning: false,
        });
    }

    /// Record pointer movement.
    pub fn on_move(&mut self, at: Point) -> PointerMove {
        let Some(press) = self.press.as_mut() else {
            return PointerMove::Idle;
        };
        if press.panning {
            let delta = at - press.last;
            press.last = at;
            return PointerMove::Pan {
                delta,
                started: false,
            };
        }
        if (at - press.origin).hypot2() <= self.slop * self.slop {
            return PointerMove::Idle;
        }
        press.panning = true;
        press.last = at;
        PointerMove::Pan {
            delta: at - press.origin,
            started: true,
        }
    }

    /// Record the release.
    pub fn on_up(&mut self, at: Point) -> Release<K> {
        let Some(press) = self.press.take() else {
            return Release::Nothing;
        };
        if press.panning {
            return Release::PanEnd;
        }
        if (at - press.origin).hypot2() > self.slop * self.slop {
            return Release::Nothing;
        }
        press.target.map_or(Release::Nothing, Release::Click)
    }

    /// Forget the held press without producing anything.
    pub fn cancel(&mut self) {
        self.press = None;
    }
}
