//! Circle-vs-rectangle collision classification
//!
//! Closest-point method: compare the distance from the circle center to the
//! rectangle center against the half extents on each axis. Distances are taken
//! from the rect's top-left corner so `dist_x == width / 2` holds exactly for a
//! center on an edge line, even with fractional layout coordinates. The result tells the
//! caller which velocity component to flip; no contact point or normal is needed
//! for axis-aligned bricks.

use glam::Vec2;

use super::rect::Rect;

/// Which part of a rectangle the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Top or bottom edge (center's x-projection falls within the rect)
    Vertical,
    /// Left or right edge (center's y-projection falls within the rect)
    Horizontal,
    /// A corner, within `radius` of the vertex
    Corner,
}

impl CollisionKind {
    /// Corners deflect like the top/bottom edges.
    #[inline]
    pub fn inverts_dy(self) -> bool {
        matches!(self, CollisionKind::Vertical | CollisionKind::Corner)
    }
}

/// Classify a collision between a rectangle and a circle.
///
/// Check order is fixed and decides ambiguous cases: vertical edge, then
/// horizontal edge, then corner. A center exactly above a rect corner
/// (`dist_x == width / 2`) is therefore `Vertical`, never `Corner`.
pub fn classify(rect: &Rect, center: Vec2, radius: f32) -> Option<CollisionKind> {
    let half = rect.half_size();
    let local = center - Vec2::new(rect.left, rect.top);
    let dist = (local - half).abs();

    if dist.x > half.x + radius || dist.y > half.y + radius {
        return None;
    }

    if dist.x <= half.x {
        return Some(CollisionKind::Vertical);
    }

    if dist.y <= half.y {
        return Some(CollisionKind::Horizontal);
    }

    let corner = dist - half;
    if corner.length_squared() <= radius * radius {
        Some(CollisionKind::Corner)
    } else {
        None
    }
}

/// Apply the deflection for a collision to a velocity
#[inline]
pub fn deflect(vel: Vec2, kind: CollisionKind) -> Vec2 {
    if kind.inverts_dy() {
        Vec2::new(vel.x, -vel.y)
    } else {
        Vec2::new(-vel.x, vel.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const R: f32 = 10.0;

    fn brick() -> Rect {
        // x: 100..200, y: 50..70
        Rect::new(100.0, 50.0, 100.0, 20.0)
    }

    #[test]
    fn test_edge_midpoints() {
        let b = brick();
        // Top and bottom: center is above/below, within the horizontal span
        assert_eq!(classify(&b, Vec2::new(150.0, 42.0), R), Some(CollisionKind::Vertical));
        assert_eq!(classify(&b, Vec2::new(150.0, 78.0), R), Some(CollisionKind::Vertical));
        // Left and right
        assert_eq!(classify(&b, Vec2::new(92.0, 60.0), R), Some(CollisionKind::Horizontal));
        assert_eq!(classify(&b, Vec2::new(208.0, 60.0), R), Some(CollisionKind::Horizontal));
    }

    #[test]
    fn test_four_corners() {
        let b = brick();
        // 5px out on each axis: sqrt(50) ~ 7.07 < 10
        for (x, y) in [(95.0, 45.0), (205.0, 45.0), (95.0, 75.0), (205.0, 75.0)] {
            assert_eq!(
                classify(&b, Vec2::new(x, y), R),
                Some(CollisionKind::Corner),
                "corner at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_corner_region_outside_radius() {
        let b = brick();
        // 8px out on both axes: inside the padded box, sqrt(128) ~ 11.3 > 10
        assert_eq!(classify(&b, Vec2::new(92.0, 42.0), R), None);
        assert_eq!(classify(&b, Vec2::new(208.0, 78.0), R), None);
    }

    #[test]
    fn test_clear_miss() {
        assert_eq!(classify(&brick(), Vec2::new(400.0, 300.0), R), None);
        // Just beyond the padded bounding box on one axis
        assert_eq!(classify(&brick(), Vec2::new(150.0, 39.9), R), None);
    }

    #[test]
    fn test_corner_tie_breaks_to_vertical() {
        // dist_x == width/2 exactly: the vertical check wins over the corner check
        let b = brick();
        assert_eq!(classify(&b, Vec2::new(100.0, 45.0), R), Some(CollisionKind::Vertical));
        assert_eq!(classify(&b, Vec2::new(200.0, 75.0), R), Some(CollisionKind::Vertical));
    }

    #[test]
    fn test_tie_break_with_fractional_layout() {
        // Page layout yields fractional edges; the center sits on the left edge line
        let b = Rect::new(102.7, 50.0, 50.7, 20.0);
        assert_eq!(classify(&b, Vec2::new(102.7, 45.0), R), Some(CollisionKind::Vertical));
        assert_eq!(classify(&b, Vec2::new(102.7, 60.0), R), Some(CollisionKind::Vertical));
        assert_eq!(classify(&b, Vec2::new(102.7, 75.0), R), Some(CollisionKind::Vertical));
    }

    #[test]
    fn test_center_inside_is_vertical() {
        assert_eq!(classify(&brick(), Vec2::new(150.0, 60.0), R), Some(CollisionKind::Vertical));
    }

    #[test]
    fn test_deflect() {
        let v = Vec2::new(4.0, -4.0);
        assert_eq!(deflect(v, CollisionKind::Vertical), Vec2::new(4.0, 4.0));
        assert_eq!(deflect(v, CollisionKind::Corner), Vec2::new(4.0, 4.0));
        assert_eq!(deflect(v, CollisionKind::Horizontal), Vec2::new(-4.0, -4.0));
    }

    proptest! {
        #[test]
        fn prop_classification_matches_projection(
            left in -200.0f32..200.0,
            top in -200.0f32..200.0,
            w in 1.0f32..150.0,
            h in 1.0f32..150.0,
            cx in -400.0f32..400.0,
            cy in -400.0f32..400.0,
            r in 1.0f32..30.0,
        ) {
            let rect = Rect::new(left, top, w, h);
            let c = Vec2::new(cx, cy);
            let dx = ((cx - left) - w / 2.0).abs();
            let dy = ((cy - top) - h / 2.0).abs();
            let in_box = dx <= w / 2.0 + r && dy <= h / 2.0 + r;

            match classify(&rect, c, r) {
                Some(CollisionKind::Vertical) => prop_assert!(in_box && dx <= w / 2.0),
                Some(CollisionKind::Horizontal) => {
                    prop_assert!(in_box && dx > w / 2.0 && dy <= h / 2.0)
                }
                Some(CollisionKind::Corner) => {
                    prop_assert!(in_box && dx > w / 2.0 && dy > h / 2.0)
                }
                None => prop_assert!(!in_box || (dx > w / 2.0 && dy > h / 2.0)),
            }
        }
    }
}
