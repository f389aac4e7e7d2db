//! Widget capability traits decoupling the registry from the rendering host.

use glam::Vec2;

/// Visual state sink for one tracker indicator.
///
/// The registry only writes local position, rotation, visibility, icon alpha
/// and label text; how those are drawn is the host's business. Hosts without
/// an icon or label simply make the matching setter a no-op.
pub trait TrackerWidget {
    fn set_local_position(&mut self, position: Vec2);
    fn set_local_rotation(&mut self, radians: f32);
    fn set_visible(&mut self, visible: bool);
    /// Alpha channel of the icon, if one is bound. No-op otherwise.
    fn set_icon_alpha(&mut self, alpha: f32);
    /// Text of the label, if one is bound. No-op otherwise.
    fn set_label(&mut self, text: &str);

    /// Reset to identity local transform, visible and fully opaque.
    fn reset(&mut self) {
        self.set_local_position(Vec2::ZERO);
        self.set_local_rotation(0.0);
        self.set_visible(true);
        self.set_icon_alpha(1.0);
    }
}

/// Instantiates and destroys tracker widgets.
///
/// Keeps widget lifecycle out of the registry so it can be tested without a
/// real rendering host.
pub trait WidgetFactory {
    /// Instantiate a fresh widget from the configured template, or `None`
    /// when no template is configured.
    fn instantiate(&mut self) -> Option<Box<dyn TrackerWidget>>;

    /// Destroy a widget previously produced by [`Self::instantiate`].
    fn destroy(&mut self, widget: Box<dyn TrackerWidget>);
}
