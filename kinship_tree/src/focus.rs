// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase focus: reveal the target, then move the camera to it.
//!
//! The target's final position is only known once the reveal's layout has
//! been computed and its enter transitions have run, so focusing is a small
//! state machine:
//!
//! ```text
//! Idle --begin--> Revealing { remaining } --tick reaches 0--> Centering --finish--> Idle
//! ```
//!
//! The `Revealing → Centering` edge fires exactly once per focus request and
//! hands the target back to the caller, who then starts the camera move.
//! A new request at any point replaces the current one.

use core::time::Duration;

use kinship_layout::PersonId;

/// Where a focus request stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusPhase {
    /// No focus request in progress.
    #[default]
    Idle,
    /// Ancestors were expanded; waiting for the reveal transitions.
    Revealing {
        /// Node being focused.
        target: PersonId,
        /// Time left before the camera may move.
        remaining: Duration,
    },
    /// The camera is moving to the target.
    Centering {
        /// Node being focused.
        target: PersonId,
    },
}

/// Sequencer for [`FocusPhase`].
#[derive(Clone, Debug, Default)]
pub struct FocusSequencer {
    phase: FocusPhase,
}

impl FocusSequencer {
    /// Current phase.
    pub fn phase(&self) -> &FocusPhase {
        &self.phase
    }

    /// Returns `true` unless idle.
    pub fn is_active(&self) -> bool {
        self.phase != FocusPhase::Idle
    }

    /// The node being focused, if any.
    pub fn target(&self) -> Option<&PersonId> {
        match &self.phase {
            FocusPhase::Idle => None,
            FocusPhase::Revealing { target, .. } | FocusPhase::Centering { target } => Some(target),
        }
    }

    /// Start revealing `target`; the camera may move after `reveal`.
    pub fn begin(&mut self, target: PersonId, reveal: Duration) {
        tracing::debug!(target = target.as_str(), "focus: revealing");
        self.phase = FocusPhase::Revealing {
            target,
            remaining: reveal,
        };
    }

    /// Advance time. Returns the target when the reveal phase ends.
    pub fn tick(&mut self, dt: Duration) -> Option<PersonId> {
        let FocusPhase::Revealing { target, remaining } = &mut self.phase else {
            return None;
        };
        *remaining = remaining.saturating_sub(dt);
        if !remaining.is_zero() {
            return None;
        }
        let target = target.clone();
        tracing::debug!(target = target.as_str(), "focus: centering");
        self.phase = FocusPhase::Centering {
            target: target.clone(),
        };
        Some(target)
    }

    /// The camera move settled.
    pub fn finish(&mut self) {
        if matches!(self.phase, FocusPhase::Centering { .. }) {
            tracing::debug!("focus: done");
            self.phase = FocusPhase::Idle;
        }
    }

    /// Abandon the current request.
    pub fn cancel(&mut self) {
        self.phase = FocusPhase::Idle;
    }
}
