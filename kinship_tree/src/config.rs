// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer configuration.

use core::time::Duration;

use kinship_layout::LayoutConfig;
use kinship_view2d::ViewportConfig;

/// Timings and card geometry for [`TreeRenderer`](crate::TreeRenderer).
///
/// Card geometry is in world units relative to the card center.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererConfig {
    /// Duration of node/edge transitions and of the focus reveal phase.
    pub transition: Duration,
    /// Pointer travel (screen pixels) beyond which a press becomes a pan.
    pub click_slop: f64,
    /// Radius of a person card's avatar circle.
    pub card_radius: f64,
    /// Vertical offset of the expand/collapse control below the node center.
    pub toggle_offset: f64,
    /// Radius of the expand/collapse control.
    pub toggle_radius: f64,
    /// Radius of the edit and delete controls.
    pub decoration_radius: f64,
    /// Distance of the edit/delete controls from the card center along each axis.
    pub decoration_offset: f64,
    /// Vertical offset of the label box below the card center.
    pub label_offset: f64,
    /// Height of the label box (name and year).
    pub label_height: f64,
    /// Tree layout constants.
    pub layout: LayoutConfig,
    /// Camera limits and timings.
    pub viewport: ViewportConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            transition: Duration::from_millis(750),
            click_slop: 5.0,
            card_radius: 28.0,
            toggle_offset: 85.0,
            toggle_radius: 10.0,
            decoration_radius: 12.0,
            decoration_offset: 26.0,
            label_offset: 32.0,
            label_height: 50.0,
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}
