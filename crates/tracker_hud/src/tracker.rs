//! The tracker entity: one registry entry binding an id to a target.

use hecs::Entity;

use crate::widget::TrackerWidget;

/// Unique tracker key within one controller.
pub type TrackerId = u32;

/// One live indicator: an id, the target entity it follows, and the widget
/// that draws it. Owned exclusively by the controller that created it.
pub struct ScreenTracker {
    id: TrackerId,
    target: Entity,
    widget: Box<dyn TrackerWidget>,
}

impl ScreenTracker {
    pub(crate) fn new(id: TrackerId, target: Entity, widget: Box<dyn TrackerWidget>) -> Self {
        Self { id, target, widget }
    }

    pub fn id(&self) -> TrackerId {
        self.id
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    /// Retarget the tracker at a different entity.
    pub fn set_target(&mut self, target: Entity) {
        self.target = target;
    }

    pub fn widget(&self) -> &dyn TrackerWidget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn TrackerWidget {
        self.widget.as_mut()
    }

    pub(crate) fn into_widget(self) -> Box<dyn TrackerWidget> {
        self.widget
    }
}
