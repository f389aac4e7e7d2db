//! Projection-and-clamp geometry engine.
//!
//! Converts a 3D world position into a local UI position inside a
//! [`ViewportRect`], detects the off-screen state, and clamps off-screen
//! points back onto the rect boundary along the direction from center.

use glam::{Vec2, Vec3};

use crate::rect::ViewportRect;

/// World-to-screen projection capability, supplied by the rendering host.
///
/// Returns screen pixels in x/y (origin bottom-left) and the view-space depth
/// along camera forward in z (negative behind the camera).
pub trait Projector {
    fn world_to_screen_point(&self, world: Vec3) -> Vec3;
}

/// Screen-point to rect-local conversion capability, supplied by the UI host.
///
/// Fails silently: `None` when the screen point cannot be mapped.
pub trait RectConverter {
    fn screen_to_local(&self, screen: Vec3) -> Option<Vec2>;
}

/// Default converter for a tracker rect centered on the screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSpace {
    pub screen_size: Vec2,
}

impl ScreenSpace {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            screen_size: Vec2::new(width, height),
        }
    }
}

impl RectConverter for ScreenSpace {
    fn screen_to_local(&self, screen: Vec3) -> Option<Vec2> {
        if !screen.x.is_finite() || !screen.y.is_finite() {
            return None;
        }
        Some(Vec2::new(screen.x, screen.y) - self.screen_size * 0.5)
    }
}

/// Result of one projection pass for a single tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Final local position inside (or on the boundary of) the viewport rect.
    pub local: Vec2,
    /// Direction from viewport center to the projected point, in radians,
    /// offset so that straight up is zero rotation.
    pub angle: f32,
    /// True when the unclamped point fell outside the rect bounds.
    pub offscreen: bool,
}

/// Project a world position and clamp it to the viewport rect.
///
/// Targets behind the camera (negative depth) have their screen point negated,
/// mirroring them through the screen plane instead of discarding them. The
/// angle is computed before the offset is applied. Returns `None` when the
/// rect conversion fails.
pub fn project_and_clamp(
    world: Vec3,
    projector: &dyn Projector,
    converter: &dyn RectConverter,
    rect: ViewportRect,
    offset: Vec2,
    rounded: bool,
) -> Option<ProjectedPoint> {
    let mut screen = projector.world_to_screen_point(world);
    if screen.z < 0.0 {
        screen = -screen;
    }

    let mut local = converter.screen_to_local(screen)?;
    let angle = local.y.atan2(local.x) - 90.0_f32.to_radians();
    local += offset;

    let mut offscreen = false;
    if !rect.contains(local) {
        local = clamp_to_edge(angle, rect);
        offscreen = true;
    }

    if rounded {
        let radius = rect.width().min(rect.height()) * 0.5;
        local = local.clamp_length_max(radius);
    }

    Some(ProjectedPoint {
        local,
        angle,
        offscreen,
    })
}

/// Intersect the ray from rect center at `angle` with the rect boundary.
///
/// Two-step clamp: place the point on the top or bottom edge by the sign of
/// cos(angle), then reclamp to the left or right edge when the resulting x
/// overshoots the half width. Covers all four octant cases.
fn clamp_to_edge(angle: f32, rect: ViewportRect) -> Vec2 {
    let cos = angle.cos();
    let sin = -angle.sin();
    let bound = rect.half_extents();

    // Slope undefined for a ray along the vertical axis; the intersection is
    // the top or bottom edge at x = 0.
    if sin.abs() <= f32::EPSILON {
        return Vec2::new(0.0, bound.y.copysign(cos));
    }

    let m = cos / sin;
    let mut point = if cos > 0.0 {
        Vec2::new(bound.y / m, bound.y)
    } else {
        Vec2::new(-bound.y / m, -bound.y)
    };
    if point.x > bound.x {
        point = Vec2::new(bound.x, bound.x * m);
    } else if point.x < -bound.x {
        point = Vec2::new(-bound.x, -bound.x * m);
    }
    point
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Projector that returns a fixed screen point, depth included.
    struct FixedScreen(Vec3);

    impl Projector for FixedScreen {
        fn world_to_screen_point(&self, _world: Vec3) -> Vec3 {
            self.0
        }
    }

    /// Converter that treats screen x/y as already rect-local.
    struct PassThrough;

    impl RectConverter for PassThrough {
        fn screen_to_local(&self, screen: Vec3) -> Option<Vec2> {
            Some(Vec2::new(screen.x, screen.y))
        }
    }

    fn run(local: Vec2, rect: ViewportRect, offset: Vec2, rounded: bool) -> ProjectedPoint {
        let projector = FixedScreen(Vec3::new(local.x, local.y, 1.0));
        project_and_clamp(Vec3::ZERO, &projector, &PassThrough, rect, offset, rounded)
            .expect("conversion cannot fail in tests")
    }

    #[test]
    fn onscreen_point_passes_through() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let p = run(Vec2::new(50.0, 20.0), rect, Vec2::ZERO, false);
        assert!(!p.offscreen);
        assert_eq!(p.local, Vec2::new(50.0, 20.0));
    }

    #[test]
    fn onscreen_point_gets_offset() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let p = run(Vec2::new(50.0, 20.0), rect, Vec2::new(5.0, -3.0), false);
        assert!(!p.offscreen);
        assert_eq!(p.local, Vec2::new(55.0, 17.0));
    }

    #[test]
    fn right_overshoot_clamps_to_right_edge() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let p = run(Vec2::new(150.0, 0.0), rect, Vec2::ZERO, false);
        assert!(p.offscreen);
        assert!((p.local.x - 100.0).abs() < 1e-2, "x = {}", p.local.x);
        assert!(p.local.y.abs() < 1e-2, "y = {}", p.local.y);
        assert!((p.angle + 90.0_f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn left_overshoot_clamps_to_left_edge() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let p = run(Vec2::new(-300.0, 10.0), rect, Vec2::ZERO, false);
        assert!(p.offscreen);
        assert!((p.local.x + 100.0).abs() < 1e-2);
        // y follows the ray slope: y/x = 10 / -300 at x = -100.
        assert!((p.local.y - 100.0 / 30.0).abs() < 1e-2);
    }

    #[test]
    fn diagonal_overshoot_clamps_to_top_edge() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let p = run(Vec2::new(200.0, 200.0), rect, Vec2::ZERO, false);
        assert!(p.offscreen);
        assert!((p.local.y - 50.0).abs() < 1e-3);
        assert!((p.local.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn clamped_point_lies_on_boundary_in_all_octants() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let half = rect.half_extents();
        for i in 0..16 {
            let theta = i as f32 / 16.0 * std::f32::consts::TAU;
            let far = Vec2::new(theta.cos(), theta.sin()) * 500.0;
            let p = run(far, rect, Vec2::ZERO, false);
            assert!(p.offscreen, "ray {i} should be off-screen");
            let on_x_edge = (p.local.x.abs() - half.x).abs() < 1e-2;
            let on_y_edge = (p.local.y.abs() - half.y).abs() < 1e-2;
            assert!(on_x_edge || on_y_edge, "ray {i} landed at {:?}", p.local);
            assert!(p.local.x.abs() <= half.x + 1e-2);
            assert!(p.local.y.abs() <= half.y + 1e-2);
        }
    }

    #[test]
    fn straight_up_and_down_hit_horizontal_edges() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let up = run(Vec2::new(0.0, 300.0), rect, Vec2::ZERO, false);
        assert!(up.offscreen);
        assert!((up.local.x).abs() < 1e-3);
        assert!((up.local.y - 50.0).abs() < 1e-3);

        let down = run(Vec2::new(0.0, -300.0), rect, Vec2::ZERO, false);
        assert!(down.offscreen);
        assert!((down.local.x).abs() < 1e-3);
        assert!((down.local.y + 50.0).abs() < 1e-3);
    }

    #[test]
    fn angle_is_computed_before_offset() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        // Point straight up; a huge x offset pushes it off-screen, but the
        // clamp direction must still be the pre-offset one.
        let p = run(Vec2::new(0.0, 10.0), rect, Vec2::new(500.0, 0.0), false);
        assert!(p.offscreen);
        assert!((p.angle).abs() < 1e-4);
        assert!(p.local.x.abs() < 1e-3);
        assert!((p.local.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn behind_camera_point_is_mirrored_through_screen_plane() {
        // Pins the negate-on-negative-depth heuristic: a target behind the
        // camera reads as its mirror image in front of it.
        let rect = ViewportRect::from_size(200.0, 100.0);
        let ahead = FixedScreen(Vec3::new(60.0, 30.0, 5.0));
        let behind = FixedScreen(Vec3::new(60.0, 30.0, -5.0));

        let a = project_and_clamp(Vec3::ZERO, &ahead, &PassThrough, rect, Vec2::ZERO, false)
            .expect("conversion cannot fail");
        let b = project_and_clamp(Vec3::ZERO, &behind, &PassThrough, rect, Vec2::ZERO, false)
            .expect("conversion cannot fail");

        assert!(!a.offscreen);
        assert_eq!(a.local, Vec2::new(60.0, 30.0));
        assert!(!b.offscreen);
        assert_eq!(b.local, Vec2::new(-60.0, -30.0));
    }

    #[test]
    fn rounded_clamps_to_inscribed_circle() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        let p = run(Vec2::new(150.0, 0.0), rect, Vec2::ZERO, true);
        assert!(p.offscreen);
        // min(200, 100) / 2 = 50.
        assert!((p.local.length() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn rounded_is_idempotent_on_the_circle() {
        let rect = ViewportRect::from_size(200.0, 100.0);
        // (30, 40) has length exactly 50, already on the inscribed circle.
        let p = run(Vec2::new(30.0, 40.0), rect, Vec2::ZERO, true);
        assert!(!p.offscreen);
        assert!((p.local - Vec2::new(30.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn zero_size_rect_stays_finite() {
        let rect = ViewportRect::from_size(0.0, 0.0);
        let p = run(Vec2::new(10.0, 3.0), rect, Vec2::ZERO, true);
        assert!(p.offscreen);
        assert!(p.local.x.is_finite() && p.local.y.is_finite());
        assert!(p.local.length() < 1e-3);
    }

    #[test]
    fn failed_conversion_returns_none() {
        struct Refusing;
        impl RectConverter for Refusing {
            fn screen_to_local(&self, _screen: Vec3) -> Option<Vec2> {
                None
            }
        }
        let rect = ViewportRect::from_size(200.0, 100.0);
        let projector = FixedScreen(Vec3::new(0.0, 0.0, 1.0));
        let result =
            project_and_clamp(Vec3::ZERO, &projector, &Refusing, rect, Vec2::ZERO, false);
        assert!(result.is_none());
    }

    #[test]
    fn screen_space_centers_on_screen() {
        let space = ScreenSpace::new(1280.0, 720.0);
        let local = space
            .screen_to_local(Vec3::new(640.0, 360.0, 1.0))
            .expect("finite point converts");
        assert_eq!(local, Vec2::ZERO);
        assert!(space
            .screen_to_local(Vec3::new(f32::NAN, 0.0, 1.0))
            .is_none());
    }
}
