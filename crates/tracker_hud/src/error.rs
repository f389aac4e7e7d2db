//! Error taxonomy for tracker creation.

use thiserror::Error;

/// Failures raised by [`crate::TrackersController::create_tracker`].
///
/// Operations on unknown tracker ids are no-ops (or return `Option`), never
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The target entity is dead or has no transform component.
    #[error("tracker target entity is missing or has no transform")]
    InvalidTarget,
    /// The widget factory has no visual template configured.
    #[error("no tracker widget template is configured")]
    InvalidTemplate,
}
