//! Screen tracker registry: indicator widgets that follow 3D world targets,
//! clamped to the viewport edge when the target goes off-screen.
//!
//! Targets are hecs entities carrying a [`tracker_core::Transform`]; widgets
//! are instantiated through a [`WidgetFactory`] so the registry stays
//! independent of any concrete rendering host.

pub mod config;
pub mod controller;
pub mod error;
pub mod tracker;
pub mod widget;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use tracker::*;
pub use widget::*;
