//! Core math for screen-space target trackers.
//!
//! This crate provides the pure, host-independent pieces:
//! - Transform component for camera and target entities
//! - Viewport rectangle and screen-to-local conversion
//! - The projection-and-clamp geometry engine
//! - Distance-driven transparency (fade) evaluation

pub mod camera;
pub mod fade;
pub mod project;
pub mod rect;
pub mod transform;

pub use camera::*;
pub use fade::*;
pub use project::*;
pub use rect::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
