// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility of a transient overlay above the canvas.
//!
//! `Closed → Open → Closed`, driven only by [`Overlay::open`],
//! [`Overlay::close`], and [`Overlay::outside_interaction`].

/// Overlay visibility.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverlayState {
    /// Not shown.
    #[default]
    Closed,
    /// Shown; the next canvas press closes it.
    Open,
}

/// A transient overlay (for example the header menu).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlay {
    state: OverlayState,
}

impl Overlay {
    /// Current state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Returns `true` while open.
    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    /// Show the overlay.
    pub fn open(&mut self) {
        self.state = OverlayState::Open;
    }

    /// Hide the overlay.
    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
    }

    /// Apply an externally owned visibility flag.
    pub fn sync(&mut self, open: bool) {
        if open {
            self.open();
        } else {
            self.close();
        }
    }

    /// An interaction happened outside the overlay. Returns `true` if this
    /// dismissed it, in which case the interaction is consumed.
    pub fn outside_interaction(&mut self) -> bool {
        let was_open = self.is_open();
        self.close();
        was_open
    }
}
