//! The tracker registry: owns all live trackers and drives the per-frame pass.

use std::collections::HashMap;

use glam::Vec2;
use hecs::{Entity, World};

use tracker_core::{
    evaluate_alpha, project_and_clamp, FadeCurve, Projector, ScreenSpace, Transform, ViewportRect,
};

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::tracker::{ScreenTracker, TrackerId};
use crate::widget::WidgetFactory;

/// Bitset controlling which trackers are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderMode(u8);

impl RenderMode {
    pub const NONE: Self = Self(0);
    pub const ON_SCREEN: Self = Self(1);
    pub const OFF_SCREEN: Self = Self(1 << 1);
    pub const BOTH: Self = Self(1 | 1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Visibility policy: off-screen trackers need the OFF_SCREEN bit,
    /// on-screen trackers the ON_SCREEN bit.
    pub fn shows(self, offscreen: bool) -> bool {
        if offscreen {
            self.contains(Self::OFF_SCREEN)
        } else {
            self.contains(Self::ON_SCREEN)
        }
    }
}

impl std::ops::BitOr for RenderMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for RenderMode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Owns the collection of active trackers and their widgets, and runs the
/// per-frame projection and fade pass.
///
/// Single-threaded by contract: creation, removal and updates are expected to
/// come from the one logical thread that drives the frame loop, with
/// [`Self::update_trackers`] invoked once per frame after target transforms
/// have settled.
pub struct TrackersController {
    /// Rect the indicators are clamped to, in local UI space.
    pub rect: ViewportRect,
    /// Screen-to-local conversion for that rect.
    pub space: ScreenSpace,
    /// Indicator offset, applied after projection.
    pub offset: Vec2,
    /// Clamp to the inscribed circle instead of the rect edge.
    pub rounded: bool,
    /// Rotate indicators to point toward their target.
    pub rotate: bool,
    pub render_mode: RenderMode,
    /// Reference entity for the distance fade; `None` disables fading.
    pub fade_reference: Option<Entity>,
    pub distance_start: f32,
    pub distance_end: f32,
    pub fade_curve: FadeCurve,
    factory: Box<dyn WidgetFactory>,
    trackers: HashMap<TrackerId, ScreenTracker>,
}

impl TrackersController {
    pub fn new(factory: Box<dyn WidgetFactory>, rect: ViewportRect, space: ScreenSpace) -> Self {
        Self {
            rect,
            space,
            offset: Vec2::ZERO,
            rounded: false,
            rotate: true,
            render_mode: RenderMode::BOTH,
            fade_reference: None,
            distance_start: 0.0,
            distance_end: 50.0,
            fade_curve: FadeCurve::linear(),
            factory,
            trackers: HashMap::new(),
        }
    }

    /// Build a controller from persistent settings.
    pub fn from_config(
        factory: Box<dyn WidgetFactory>,
        rect: ViewportRect,
        space: ScreenSpace,
        config: &TrackerConfig,
    ) -> Self {
        let mut controller = Self::new(factory, rect, space);
        controller.offset = config.offset();
        controller.rounded = config.rounded;
        controller.rotate = config.rotate;
        controller.render_mode = config.render_mode();
        controller.distance_start = config.distance_start;
        controller.distance_end = config.distance_end;
        controller.fade_curve = config.fade_curve();
        controller
    }

    pub fn count(&self) -> usize {
        self.trackers.len()
    }

    pub fn contains_tracker(&self, id: TrackerId) -> bool {
        self.trackers.contains_key(&id)
    }

    pub fn get_tracker(&self, id: TrackerId) -> Option<&ScreenTracker> {
        self.trackers.get(&id)
    }

    pub fn get_tracker_mut(&mut self, id: TrackerId) -> Option<&mut ScreenTracker> {
        self.trackers.get_mut(&id)
    }

    /// Snapshot of the live trackers. Iteration order is unspecified.
    pub fn active_trackers(&self) -> Vec<&ScreenTracker> {
        self.trackers.values().collect()
    }

    /// Register a tracker following `target` under `id`.
    ///
    /// A colliding id destroys the previous tracker first, last-writer-wins.
    /// The new widget is reset to an identity local transform and positioned
    /// by an immediate projection pass before it can be observed.
    pub fn create_tracker(
        &mut self,
        world: &World,
        projector: &dyn Projector,
        target: Entity,
        id: TrackerId,
    ) -> Result<TrackerId, TrackerError> {
        if world.get::<&Transform>(target).is_err() {
            return Err(TrackerError::InvalidTarget);
        }
        let mut widget = self
            .factory
            .instantiate()
            .ok_or(TrackerError::InvalidTemplate)?;
        widget.reset();

        if let Some(old) = self.trackers.remove(&id) {
            log::debug!("Tracker {id} replaced, destroying previous widget");
            self.factory.destroy(old.into_widget());
        }

        let mut tracker = ScreenTracker::new(id, target, widget);
        self.update_tracker(world, projector, &mut tracker);
        self.trackers.insert(id, tracker);
        log::debug!("Created tracker {id} for target {target:?}");
        Ok(id)
    }

    /// Unregister `id` and destroy its widget. No-op when absent.
    pub fn remove_tracker(&mut self, id: TrackerId) {
        if let Some(tracker) = self.trackers.remove(&id) {
            self.factory.destroy(tracker.into_widget());
            log::debug!("Removed tracker {id}");
        }
    }

    /// Remove and destroy all trackers. No-op when empty.
    pub fn clear(&mut self) {
        if self.trackers.is_empty() {
            return;
        }
        // Snapshot first; the map is never mutated while being iterated.
        let snapshot: Vec<ScreenTracker> = self.trackers.drain().map(|(_, t)| t).collect();
        log::debug!("Clearing {} trackers", snapshot.len());
        for tracker in snapshot {
            self.factory.destroy(tracker.into_widget());
        }
    }

    /// Per-frame pass: project every live tracker, apply position, rotation,
    /// visibility and icon alpha. Trackers whose target lost its transform
    /// are skipped for the frame, not removed.
    pub fn update_trackers(&mut self, world: &World, projector: &dyn Projector) {
        // Detach the map so the settings fields stay borrowable.
        let mut trackers = std::mem::take(&mut self.trackers);
        for tracker in trackers.values_mut() {
            self.update_tracker(world, projector, tracker);
        }
        self.trackers = trackers;
    }

    fn update_tracker(&self, world: &World, projector: &dyn Projector, tracker: &mut ScreenTracker) {
        let Ok(target_pos) = world
            .get::<&Transform>(tracker.target())
            .map(|t| t.position)
        else {
            return;
        };
        let Some(projected) = project_and_clamp(
            target_pos,
            projector,
            &self.space,
            self.rect,
            self.offset,
            self.rounded,
        ) else {
            return;
        };

        let rotate = self.rotate;
        let visible = self.render_mode.shows(projected.offscreen);
        let widget = tracker.widget_mut();
        if rotate {
            widget.set_local_rotation(projected.angle);
        }
        widget.set_local_position(projected.local);
        widget.set_visible(visible);

        if let Some(reference) = self.fade_reference {
            if let Ok(reference_pos) = world.get::<&Transform>(reference).map(|t| t.position) {
                let alpha = evaluate_alpha(
                    target_pos,
                    reference_pos,
                    self.distance_start,
                    self.distance_end,
                    &self.fade_curve,
                );
                widget.set_icon_alpha(alpha);
            }
        }
    }
}
