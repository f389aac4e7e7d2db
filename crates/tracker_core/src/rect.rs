//! Center-origin viewport rectangle that indicators are clamped to.

use glam::Vec2;

/// A rectangle in local UI space, centered on the origin.
///
/// This mirrors the tracker root rect: indicator local positions live in this
/// space, and the off-screen clamp projects points back onto its boundary.
/// Zero-size rects are legal; downstream math must not divide by zero on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    half_extents: Vec2,
}

impl ViewportRect {
    /// Create a rect of the given full width and height, centered on the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec2::new(width.max(0.0) * 0.5, height.max(0.0) * 0.5),
        }
    }

    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Half width / half height, i.e. the distance from center to each edge.
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    pub fn x_min(&self) -> f32 {
        -self.half_extents.x
    }

    pub fn x_max(&self) -> f32 {
        self.half_extents.x
    }

    pub fn y_min(&self) -> f32 {
        -self.half_extents.y
    }

    pub fn y_max(&self) -> f32 {
        self.half_extents.y
    }

    /// True when the point lies inside the rect (bounds inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x_min()
            && point.x <= self.x_max()
            && point.y >= self.y_min()
            && point.y <= self.y_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_bounds() {
        let r = ViewportRect::from_size(200.0, 100.0);
        assert_eq!(r.x_min(), -100.0);
        assert_eq!(r.x_max(), 100.0);
        assert_eq!(r.y_min(), -50.0);
        assert_eq!(r.y_max(), 50.0);
        assert_eq!(r.half_extents(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn rect_contains() {
        let r = ViewportRect::from_size(200.0, 100.0);
        assert!(r.contains(Vec2::new(50.0, 20.0)));
        assert!(r.contains(Vec2::new(100.0, 50.0)));
        assert!(!r.contains(Vec2::new(150.0, 0.0)));
        assert!(!r.contains(Vec2::new(0.0, -51.0)));
    }

    #[test]
    fn zero_size_rect_contains_nothing_but_origin() {
        let r = ViewportRect::from_size(0.0, 0.0);
        assert!(r.contains(Vec2::ZERO));
        assert!(!r.contains(Vec2::new(0.1, 0.0)));
    }

    #[test]
    fn negative_size_is_clamped() {
        let r = ViewportRect::from_size(-10.0, -10.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
    }
}
