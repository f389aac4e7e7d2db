//! Perspective camera providing the world-to-screen projection capability.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::project::Projector;
use crate::transform::Transform;

/// Perspective camera with configurable FOV and clipping planes.
///
/// Screen points are in pixels with the origin at the bottom-left of the
/// viewport; the z component is the view-space depth along camera forward
/// (negative when the point is behind the camera).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Camera transform (position and rotation).
    pub transform: Transform,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Viewport size in pixels.
    viewport_size: Vec2,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            fov_degrees: 70.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            viewport_size: Vec2::new(1280.0, 720.0),
        }
    }
}

impl PerspectiveCamera {
    /// Create a new camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    /// Update viewport size and aspect ratio (call on window resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_size = Vec2::new(width as f32, height.max(1) as f32);
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Get camera forward direction.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Point the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        self.transform.look_at(target, Vec3::Y);
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        let target = eye + self.transform.forward();
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Projector for PerspectiveCamera {
    fn world_to_screen_point(&self, world: Vec3) -> Vec3 {
        let view = self.view_matrix() * Vec4::new(world.x, world.y, world.z, 1.0);
        // View-space depth along camera forward; negative behind the camera.
        let depth = -view.z;

        let clip = self.projection_matrix() * view;
        let w = if clip.w.abs() < 1e-8 {
            1e-8f32.copysign(clip.w)
        } else {
            clip.w
        };

        let ndc_x = clip.x / w;
        let ndc_y = clip.y / w;
        Vec3::new(
            (ndc_x * 0.5 + 0.5) * self.viewport_size.x,
            (ndc_y * 0.5 + 0.5) * self.viewport_size.y,
            depth,
        )
    }
}
