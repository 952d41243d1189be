// Copyright 2025 the Kinship Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-space shapes of a drawn node unit and its connectors.

use kurbo::{BezPath, Circle, Point, Rect, Shape, Vec2};

use crate::config::RendererConfig;

/// Shapes of one card (person or spouse).
#[derive(Clone, Debug, PartialEq)]
pub struct CardShapes {
    /// Avatar circle.
    pub avatar: Circle,
    /// Name and birth-year box under the avatar.
    pub label: Rect,
    /// Edit control (top left).
    pub edit: Circle,
    /// Delete control (top right).
    pub delete: Circle,
}

impl CardShapes {
    fn new(center: Point, config: &RendererConfig) -> Self {
        let half_label = config.layout.card_width / 2.0;
        let d = config.decoration_offset;
        Self {
            avatar: Circle::new(center, config.card_radius),
            label: Rect::new(
                center.x - half_label,
                center.y + config.label_offset,
                center.x + half_label,
                center.y + config.label_offset + config.label_height,
            ),
            edit: Circle::new(center + Vec2::new(-d, -d), config.decoration_radius),
            delete: Circle::new(center + Vec2::new(d, -d), config.decoration_radius),
        }
    }

    /// Whether `p` is on the card body (avatar or label).
    pub fn body_contains(&self, p: Point) -> bool {
        self.avatar.contains(p) || self.label.contains(p)
    }
}

/// Shapes of a node unit at a given center.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeShapes {
    /// The person's card.
    pub person: CardShapes,
    /// The spouse card, if the node is a couple.
    pub spouse: Option<CardShapes>,
    /// The expand/collapse control.
    pub toggle: Circle,
}

impl NodeShapes {
    /// Shapes for a node centered at `position`.
    ///
    /// A couple's cards sit `spouse_offset` either side of the center.
    pub fn new(position: Point, has_spouse: bool, config: &RendererConfig) -> Self {
        let offset = Vec2::new(config.layout.spouse_offset, 0.0);
        let (person, spouse) = if has_spouse {
            (
                CardShapes::new(position - offset, config),
                Some(CardShapes::new(position + offset, config)),
            )
        } else {
            (CardShapes::new(position, config), None)
        };
        Self {
            person,
            spouse,
            toggle: Circle::new(
                position + Vec2::new(0.0, config.toggle_offset),
                config.toggle_radius,
            ),
        }
    }

    /// The short line joining a couple's avatars, if any.
    pub fn couple_link(&self) -> Option<(Point, Point)> {
        let spouse = self.spouse.as_ref()?;
        let a = self.person.avatar;
        let b = spouse.avatar;
        Some((
            a.center + Vec2::new(a.radius, 0.0),
            b.center - Vec2::new(b.radius, 0.0),
        ))
    }
}

/// Elbow connector from a parent node at `source` to a child node at `target`.
///
/// Leaves the parent just below its toggle control, drops to the midpoint
/// between the rows, runs across, and ends at the top of the child's avatar.
pub fn elbow(source: Point, target: Point, config: &RendererConfig) -> BezPath {
    let start_y = source.y + config.toggle_offset + config.toggle_radius;
    let mid_y = (source.y + target.y) / 2.0;
    let end_y = target.y - config.card_radius;
    let mut path = BezPath::new();
    path.move_to((source.x, start_y));
    path.line_to((source.x, mid_y));
    path.line_to((target.x, mid_y));
    path.line_to((target.x, end_y));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn couple_cards_straddle_the_center() {
        let config = RendererConfig::default();
        let shapes = NodeShapes::new(Point::new(100.0, 250.0), true, &config);
        assert_eq!(shapes.person.avatar.center, Point::new(45.0, 250.0));
        let spouse = shapes.spouse.as_ref().unwrap();
        assert_eq!(spouse.avatar.center, Point::new(155.0, 250.0));
        assert_eq!(shapes.toggle.center, Point::new(100.0, 335.0));
        assert_eq!(shapes.person.edit.center, Point::new(19.0, 224.0));
        assert_eq!(shapes.person.delete.center, Point::new(71.0, 224.0));
        assert_eq!(
            shapes.couple_link(),
            Some((Point::new(73.0, 250.0), Point::new(127.0, 250.0)))
        );
    }

    #[test]
    fn label_is_part_of_the_card_body() {
        let config = RendererConfig::default();
        let shapes = NodeShapes::new(Point::ZERO, false, &config);
        assert!(shapes.person.body_contains(Point::new(0.0, 0.0)));
        assert!(shapes.person.body_contains(Point::new(-45.0, 60.0)));
        assert!(!shapes.person.body_contains(Point::new(0.0, -40.0)));
        assert!(shapes.spouse.is_none());
    }

    #[test]
    fn elbow_matches_row_geometry() {
        let config = RendererConfig::default();
        let path = elbow(Point::new(0.0, 0.0), Point::new(-170.0, 250.0), &config);
        let els: alloc::vec::Vec<PathEl> = path.elements().to_vec();
        assert_eq!(
            els,
            alloc::vec![
                PathEl::MoveTo(Point::new(0.0, 95.0)),
                PathEl::LineTo(Point::new(0.0, 125.0)),
                PathEl::LineTo(Point::new(-170.0, 125.0)),
                PathEl::LineTo(Point::new(-170.0, 222.0)),
            ]
        );
    }
}
