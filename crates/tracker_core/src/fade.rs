//! Distance-driven transparency for tracker indicators.

use glam::Vec3;

/// One point of a [`FadeCurve`]: curve value at normalized distance `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub t: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(t: f32, value: f32) -> Self {
        Self { t, value }
    }
}

/// Piecewise-linear response curve sampled over normalized distance.
///
/// Domain and range are conceptually [0, 1], though values may overshoot.
/// Evaluation clamps to the first/last keyframe outside the keyed range; an
/// empty curve evaluates to 1.0 (fully opaque).
#[derive(Debug, Clone, PartialEq)]
pub struct FadeCurve {
    keys: Vec<Keyframe>,
}

impl Default for FadeCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl FadeCurve {
    /// Identity ramp: 0 at t=0, 1 at t=1.
    pub fn linear() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)],
        }
    }

    /// Flat curve returning `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// Build a curve from arbitrary keyframes. Keys are sorted by `t`.
    pub fn from_keys(mut keys: Vec<Keyframe>) -> Self {
        let sorted = keys.windows(2).all(|pair| pair[0].t <= pair[1].t);
        if !sorted {
            log::warn!("Fade curve keyframes out of order, sorting by t");
            keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        }
        Self { keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Sample the curve at `t` with linear interpolation between keyframes.
    pub fn evaluate(&self, t: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 1.0;
        };
        if t <= first.t {
            return first.value;
        }
        let last = self.keys[self.keys.len() - 1];
        if t >= last.t {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = b.t - a.t;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let frac = (t - a.t) / span;
                return a.value + (b.value - a.value) * frac;
            }
        }
        last.value
    }
}

/// Map the distance between `target` and `reference` to an alpha value.
///
/// The distance is normalized against the [start, end] range and passed
/// through `curve`. A zero-length range acts as a step: 0 below the threshold,
/// 1 at or above it.
pub fn evaluate_alpha(
    target: Vec3,
    reference: Vec3,
    start_distance: f32,
    end_distance: f32,
    curve: &FadeCurve,
) -> f32 {
    let distance = target.distance(reference);
    let range = end_distance - start_distance;
    let t = if range.abs() <= f32::EPSILON {
        if distance >= start_distance {
            1.0
        } else {
            0.0
        }
    } else {
        ((distance - start_distance) / range).clamp(0.0, 1.0)
    };
    curve.evaluate(t)
}
