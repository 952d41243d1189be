// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space control bars.
//!
//! Two bars are laid out against the viewport edges:
//!
//! - The top bar (top right): undo, redo, and add (edit mode only), the
//!   edit-mode switch, and share. Hidden while the header overlay is open.
//! - The zoom bar (bottom right, vertical): zoom in, zoom out, reset.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::flags::History;
use crate::resources::{IconHandle, IconName, IconSet};

/// Side length of a square button.
const BUTTON: f64 = 36.0;
/// Distance of the bars from the viewport edges.
const INSET: f64 = 16.0;
/// Gap between buttons in the top bar.
const TOP_GAP: f64 = 8.0;
/// Gap between buttons in the zoom bar.
const ZOOM_GAP: f64 = 4.0;

/// A toolbar command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    /// Request undo.
    Undo,
    /// Request redo.
    Redo,
    /// Request adding a relative to the edit target.
    Add,
    /// Flip edit mode.
    ToggleEditMode,
    /// Share the tree.
    Share,
    /// Zoom in one step.
    ZoomIn,
    /// Zoom out one step.
    ZoomOut,
    /// Return to the initial camera.
    ZoomReset,
}

impl ToolbarAction {
    /// Icon drawn on the button.
    pub fn icon(self) -> IconName {
        match self {
            Self::Undo => IconName::Undo2,
            Self::Redo => IconName::Redo2,
            Self::Add => IconName::Plus,
            Self::ToggleEditMode => IconName::Pencil,
            Self::Share => IconName::Share2,
            Self::ZoomIn => IconName::ZoomIn,
            Self::ZoomOut => IconName::ZoomOut,
            Self::ZoomReset => IconName::Locate,
        }
    }
}

/// One laid-out button.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolbarButton {
    /// Command issued on activation.
    pub action: ToolbarAction,
    /// Screen-space bounds.
    pub rect: Rect,
    /// Glyph, or `None` to draw no glyph.
    pub icon: Option<IconHandle>,
    /// Disabled buttons are drawn dimmed and ignore input.
    pub enabled: bool,
    /// Toggle state (the edit-mode switch).
    pub active: bool,
}

/// Both control bars for the current viewport and flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toolbar {
    /// Top bar, left to right.
    pub top: Vec<ToolbarButton>,
    /// Zoom bar, top to bottom.
    pub zoom: Vec<ToolbarButton>,
}

impl Toolbar {
    /// Lay out the bars.
    pub fn build(
        size: Size,
        edit_mode: bool,
        history: History,
        header_overlay_open: bool,
        icons: &IconSet,
    ) -> Self {
        let button = |action: ToolbarAction, rect: Rect, enabled: bool| ToolbarButton {
            action,
            rect,
            icon: icons.get(action.icon()),
            enabled,
            active: action == ToolbarAction::ToggleEditMode && edit_mode,
        };

        let mut top = Vec::new();
        if !header_overlay_open {
            let mut actions: Vec<(ToolbarAction, bool)> = Vec::new();
            if edit_mode {
                actions.push((ToolbarAction::Undo, history.contains(History::CAN_UNDO)));
                actions.push((ToolbarAction::Redo, history.contains(History::CAN_REDO)));
                actions.push((ToolbarAction::Add, true));
            }
            actions.push((ToolbarAction::ToggleEditMode, true));
            actions.push((ToolbarAction::Share, true));

            // Right-aligned: the last button touches the inset.
            #[allow(
                clippy::cast_precision_loss,
                reason = "At most five buttons."
            )]
            let count = actions.len() as f64;
            let width = count * BUTTON + (count - 1.0) * TOP_GAP;
            let mut x = size.width - INSET - width;
            for (action, enabled) in actions {
                let rect = Rect::new(x, INSET, x + BUTTON, INSET + BUTTON);
                top.push(button(action, rect, enabled));
                x += BUTTON + TOP_GAP;
            }
        }

        let zoom_actions = [
            ToolbarAction::ZoomIn,
            ToolbarAction::ZoomOut,
            ToolbarAction::ZoomReset,
        ];
        let x1 = size.width - INSET;
        let mut y = size.height - INSET - 3.0 * BUTTON - 2.0 * ZOOM_GAP;
        let mut zoom = Vec::with_capacity(zoom_actions.len());
        for action in zoom_actions {
            zoom.push(button(action, Rect::new(x1 - BUTTON, y, x1, y + BUTTON), true));
            y += BUTTON + ZOOM_GAP;
        }

        Self { top, zoom }
    }

    /// All buttons, top bar first.
    pub fn buttons(&self) -> impl Iterator<Item = &ToolbarButton> + '_ {
        self.top.iter().chain(&self.zoom)
    }

    /// The button for `action`, if shown.
    pub fn button(&self, action: ToolbarAction) -> Option<&ToolbarButton> {
        self.buttons().find(|b| b.action == action)
    }

    /// The enabled button under the screen point `p`.
    pub fn hit(&self, p: Point) -> Option<ToolbarAction> {
        self.buttons()
            .find(|b| b.enabled && b.rect.contains(p))
            .map(|b| b.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn actions(buttons: &[ToolbarButton]) -> Vec<ToolbarAction> {
        buttons.iter().map(|b| b.action).collect()
    }

    const SIZE: Size = Size::new(800.0, 600.0);

    #[test]
    fn edit_mode_adds_history_and_add() {
        let icons = IconSet::default();
        let viewing = Toolbar::build(SIZE, false, History::all(), false, &icons);
        assert_eq!(
            actions(&viewing.top),
            vec![ToolbarAction::ToggleEditMode, ToolbarAction::Share]
        );
        let editing = Toolbar::build(SIZE, true, History::CAN_REDO, false, &icons);
        assert_eq!(
            actions(&editing.top),
            vec![
                ToolbarAction::Undo,
                ToolbarAction::Redo,
                ToolbarAction::Add,
                ToolbarAction::ToggleEditMode,
                ToolbarAction::Share
            ]
        );
        assert!(!editing.button(ToolbarAction::Undo).unwrap().enabled);
        assert!(editing.button(ToolbarAction::Redo).unwrap().enabled);
        assert!(editing.button(ToolbarAction::ToggleEditMode).unwrap().active);
        // The last button is flush with the right inset.
        assert_eq!(editing.top.last().unwrap().rect.x1, 784.0);
    }

    #[test]
    fn overlay_hides_the_top_bar_only() {
        let bar = Toolbar::build(SIZE, true, History::all(), true, &IconSet::default());
        assert!(bar.top.is_empty());
        assert_eq!(
            actions(&bar.zoom),
            vec![
                ToolbarAction::ZoomIn,
                ToolbarAction::ZoomOut,
                ToolbarAction::ZoomReset
            ]
        );
        assert_eq!(bar.zoom.last().unwrap().rect.y1, 584.0);
    }

    #[test]
    fn hits_skip_disabled_buttons() {
        let bar = Toolbar::build(SIZE, true, History::empty(), false, &IconSet::default());
        let undo = bar.button(ToolbarAction::Undo).unwrap().rect.center();
        assert_eq!(bar.hit(undo), None);
        let share = bar.button(ToolbarAction::Share).unwrap().rect.center();
        assert_eq!(bar.hit(share), Some(ToolbarAction::Share));
        assert_eq!(bar.hit(Point::new(400.0, 300.0)), None);
    }
}
