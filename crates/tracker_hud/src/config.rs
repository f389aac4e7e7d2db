//! Controller configuration. Loaded from trackers.ron at startup.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracker_core::{FadeCurve, Keyframe};

use crate::controller::RenderMode;

/// Persistent tracker settings. Loaded from `trackers.ron` in the current
/// directory; missing or invalid files fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Indicator offset in rect-local units, applied after projection.
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    /// Clamp indicators to the inscribed circle instead of the rect edge.
    #[serde(default)]
    pub rounded: bool,
    /// Rotate indicators to point toward off-screen targets.
    #[serde(default = "default_true")]
    pub rotate: bool,
    /// Show indicators while their target is on-screen.
    #[serde(default = "default_true")]
    pub show_on_screen: bool,
    /// Show indicators while their target is off-screen.
    #[serde(default = "default_true")]
    pub show_off_screen: bool,
    /// Distance from the fade reference at which fading begins.
    #[serde(default)]
    pub distance_start: f32,
    /// Distance at which the fade curve input saturates at 1.
    #[serde(default = "default_distance_end")]
    pub distance_end: f32,
    /// Fade curve keyframes as (t, value) pairs over normalized distance.
    #[serde(default = "default_fade_keys")]
    pub fade_keys: Vec<(f32, f32)>,
}

fn default_true() -> bool {
    true
}
fn default_distance_end() -> f32 {
    50.0
}
fn default_fade_keys() -> Vec<(f32, f32)> {
    vec![(0.0, 0.0), (1.0, 1.0)]
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            rounded: false,
            rotate: true,
            show_on_screen: true,
            show_off_screen: true,
            distance_start: 0.0,
            distance_end: default_distance_end(),
            fade_keys: default_fade_keys(),
        }
    }
}

impl TrackerConfig {
    /// Load config from `trackers.ron`. If the file is missing or invalid,
    /// returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `trackers.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    pub fn render_mode(&self) -> RenderMode {
        let mut mode = RenderMode::NONE;
        if self.show_on_screen {
            mode |= RenderMode::ON_SCREEN;
        }
        if self.show_off_screen {
            mode |= RenderMode::OFF_SCREEN;
        }
        mode
    }

    pub fn fade_curve(&self) -> FadeCurve {
        FadeCurve::from_keys(
            self.fade_keys
                .iter()
                .map(|&(t, value)| Keyframe::new(t, value))
                .collect(),
        )
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("trackers.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_round_trip() {
        let mut config = TrackerConfig::default();
        config.offset_x = 4.0;
        config.rounded = true;
        config.show_on_screen = false;
        config.fade_keys = vec![(0.0, 1.0), (1.0, 0.2)];

        let text = ron::ser::to_string(&config).expect("config serializes");
        let back: TrackerConfig = ron::from_str(&text).expect("config deserializes");
        assert_eq!(back.offset(), Vec2::new(4.0, 0.0));
        assert!(back.rounded);
        assert_eq!(back.render_mode(), RenderMode::OFF_SCREEN);
        assert_eq!(back.fade_keys, vec![(0.0, 1.0), (1.0, 0.2)]);
    }

    #[test]
    fn partial_ron_uses_field_defaults() {
        let config: TrackerConfig = ron::from_str("(rounded: true)").expect("partial config");
        assert!(config.rounded);
        assert!(config.rotate);
        assert_eq!(config.distance_end, 50.0);
        assert_eq!(config.render_mode(), RenderMode::BOTH);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("tracker_config_garbage.ron");
        std::fs::write(&path, "this is not ron {{{").expect("temp file writes");
        let config = TrackerConfig::load_from(&path);
        assert_eq!(config.distance_end, 50.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = TrackerConfig::load_from(Path::new("/nonexistent/trackers.ron"));
        assert!(config.rotate);
        assert_eq!(config.offset(), Vec2::ZERO);
    }

    #[test]
    fn fade_curve_from_keys() {
        let mut config = TrackerConfig::default();
        config.fade_keys = vec![(0.0, 0.0), (0.5, 1.0), (1.0, 1.0)];
        let curve = config.fade_curve();
        assert!((curve.evaluate(0.25) - 0.5).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 1.0).abs() < 1e-6);
    }
}
