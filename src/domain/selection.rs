// SPDX-License-Identifier: MPL-2.0
//! Square selection rules.
//!
//! A selection is drawn by dragging from an anchor; the square grows from the
//! anchor toward the pointer. Every square produced here lies inside the
//! bounds it was clamped to.

use super::geometry::{Point, Rect};

/// An axis-aligned square in preview coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareSelection {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl SquareSelection {
    #[must_use]
    pub const fn new(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, size }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    /// Label shown next to the outline, e.g. `"150px"`.
    #[must_use]
    pub fn size_label(&self) -> String {
        format!("{}px", self.size.round())
    }

    /// Builds the square for a drag from `anchor` to `cursor`, clamped to `bounds`.
    ///
    /// The raw side is `min(|dx|, |dy|)` and the anchor is the corner the
    /// square grows away from. The side is capped at the shorter extent of
    /// `bounds`, then the corner is clamped so the square cannot leave
    /// `bounds`. When the corner is pushed back, the anchor stops being a
    /// corner but the side is kept.
    ///
    /// Returns `None` for a non-positive side, non-finite input or empty
    /// bounds; callers keep whatever square they had before.
    #[must_use]
    pub fn from_drag(anchor: Point, cursor: Point, bounds: Rect) -> Option<Self> {
        let finite = [anchor.x, anchor.y, cursor.x, cursor.y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return None;
        }

        let dx = cursor.x - anchor.x;
        let dy = cursor.y - anchor.y;
        let raw_size = dx.abs().min(dy.abs());
        if raw_size <= 0.0 {
            return None;
        }

        let x = if dx >= 0.0 { anchor.x } else { anchor.x - raw_size };
        let y = if dy >= 0.0 { anchor.y } else { anchor.y - raw_size };
        let size = raw_size.min(bounds.width).min(bounds.height);

        Some(Self {
            x: clamp_axis(x, bounds.x, bounds.right() - size),
            y: clamp_axis(y, bounds.y, bounds.bottom() - size),
            size,
        })
    }
}

/// `value` limited to `[min, max]`; `min` wins if the range is inverted.
pub(crate) fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    /// Drawn bounds of a 400×400 poster inside an 800×400 preview.
    fn poster_bounds() -> Rect {
        Rect::new(200.0, 0.0, 400.0, 400.0)
    }

    #[test]
    fn drag_down_right_grows_from_anchor() {
        let sq = SquareSelection::from_drag(
            Point::new(250.0, 50.0),
            Point::new(400.0, 150.0),
            poster_bounds(),
        )
        .expect("square");
        assert_eq!(sq, SquareSelection::new(250.0, 50.0, 100.0));
    }

    #[test]
    fn drag_up_left_keeps_anchor_as_bottom_right_corner() {
        let sq = SquareSelection::from_drag(
            Point::new(500.0, 300.0),
            Point::new(380.0, 100.0),
            poster_bounds(),
        )
        .expect("square");
        assert_eq!(sq, SquareSelection::new(380.0, 180.0, 120.0));
        assert_abs_diff_eq!(sq.x + sq.size, 500.0);
        assert_abs_diff_eq!(sq.y + sq.size, 300.0);
    }

    #[test]
    fn drag_left_past_bounds_keeps_side_and_slides_inside() {
        let sq = SquareSelection::from_drag(
            Point::new(250.0, 50.0),
            Point::new(100.0, 250.0),
            poster_bounds(),
        )
        .expect("square");
        assert_eq!(sq, SquareSelection::new(200.0, 50.0, 150.0));
    }

    #[test]
    fn drag_from_near_edge_does_not_collapse() {
        let sq = SquareSelection::from_drag(
            Point::new(205.0, 50.0),
            Point::new(100.0, 250.0),
            poster_bounds(),
        )
        .expect("square");
        assert_eq!(sq, SquareSelection::new(200.0, 50.0, 105.0));
    }

    #[test]
    fn side_is_capped_at_shorter_extent() {
        let sq = SquareSelection::from_drag(
            Point::new(300.0, 100.0),
            Point::new(1300.0, 1100.0),
            poster_bounds(),
        )
        .expect("square");
        assert_eq!(sq, SquareSelection::new(200.0, 0.0, 400.0));
    }

    #[test]
    fn anchor_in_letterbox_is_pulled_into_bounds() {
        let sq = SquareSelection::from_drag(
            Point::new(50.0, 100.0),
            Point::new(350.0, 300.0),
            poster_bounds(),
        )
        .expect("square");
        assert_eq!(sq, SquareSelection::new(200.0, 100.0, 200.0));
    }

    #[test]
    fn zero_sized_drags_produce_nothing() {
        let bounds = poster_bounds();
        let anchor = Point::new(300.0, 100.0);
        assert!(SquareSelection::from_drag(anchor, anchor, bounds).is_none());
        assert!(SquareSelection::from_drag(anchor, Point::new(300.0, 200.0), bounds).is_none());
    }

    #[test]
    fn non_finite_points_produce_nothing() {
        let bounds = poster_bounds();
        assert!(SquareSelection::from_drag(
            Point::new(f32::NAN, 0.0),
            Point::new(10.0, 10.0),
            bounds
        )
        .is_none());
        assert!(SquareSelection::from_drag(
            Point::new(300.0, 100.0),
            Point::new(f32::INFINITY, 200.0),
            bounds
        )
        .is_none());
    }

    #[test]
    fn empty_bounds_produce_nothing() {
        let sq = SquareSelection::from_drag(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Rect::new(0.0, 0.0, 0.0, 0.0),
        );
        assert!(sq.is_none());
    }

    #[test]
    fn squares_never_escape_bounds() {
        let bounds = Rect::new(137.5, 20.25, 301.0, 222.0);
        let coords = [-500.0_f32, -10.0, 0.0, 20.25, 99.0, 137.5, 250.0, 438.5, 700.0, 2000.0];

        for &ax in &coords {
            for &ay in &coords {
                for &cx in &coords {
                    for &cy in &coords {
                        let Some(sq) = SquareSelection::from_drag(
                            Point::new(ax, ay),
                            Point::new(cx, cy),
                            bounds,
                        ) else {
                            continue;
                        };
                        assert!(sq.size > 0.0);
                        assert!(
                            bounds.encloses(&sq.rect(), 1e-3),
                            "{sq:?} escaped {bounds:?} for ({ax},{ay})->({cx},{cy})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn size_label_rounds_to_whole_pixels() {
        assert_eq!(SquareSelection::new(0.0, 0.0, 150.0).size_label(), "150px");
        assert_eq!(SquareSelection::new(0.0, 0.0, 99.6).size_label(), "100px");
    }
}
