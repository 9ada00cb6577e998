use std::f64::consts::TAU;

use crate::animation::ease::Ease;
use crate::foundation::error::{FoldmarkError, FoldmarkResult};

/// Number of shapes in the mark.
pub const SHAPE_COUNT: usize = 3;

/// One of the three stacked shapes; 0 is painted on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ShapeIndex(usize);

impl ShapeIndex {
    /// Indices in natural order.
    pub const ALL: [ShapeIndex; SHAPE_COUNT] = [ShapeIndex(0), ShapeIndex(1), ShapeIndex(2)];
    /// Paint order: last shape first so shape 0 ends up on top.
    pub const BACK_TO_FRONT: [ShapeIndex; SHAPE_COUNT] =
        [ShapeIndex(2), ShapeIndex(1), ShapeIndex(0)];

    /// `None` unless `i < SHAPE_COUNT`.
    pub fn new(i: usize) -> Option<Self> {
        (i < SHAPE_COUNT).then_some(Self(i))
    }

    /// The raw index.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Durations of the loop phases, as fractions of one period.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Length of one shape's spin, in either direction.
    pub spin_dur: f64,
    /// Hold before the first shape starts morphing.
    pub hold_rect: f64,
    /// Hold with all shapes fully circular.
    pub hold_circ: f64,
    /// Curve applied to each spin.
    pub ease: Ease,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            spin_dur: 0.14,
            hold_rect: 0.06,
            hold_circ: 0.08,
            ease: Ease::InOutQuad,
        }
    }
}

impl TimelineConfig {
    /// Every value finite and non-negative, spins non-empty, and the final
    /// reverse spin finishing within one period.
    pub fn validate(&self) -> FoldmarkResult<()> {
        let vals = [self.spin_dur, self.hold_rect, self.hold_circ];
        if vals.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(FoldmarkError::config(
                "timeline durations must be finite and >= 0",
            ));
        }
        if self.spin_dur == 0.0 {
            return Err(FoldmarkError::config("timeline.spin_dur must be > 0"));
        }
        let end = self.hold_rect + 2.0 * SHAPE_COUNT as f64 * self.spin_dur + self.hold_circ;
        if end > 1.0 + 1e-9 {
            return Err(FoldmarkError::config(format!(
                "timeline does not fit in one period (ends at {end})"
            )));
        }
        Ok(())
    }
}

/// Where a shape is in its loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphPhase {
    /// Rectangle, waiting for its forward spin.
    HoldRect,
    /// Spinning from rectangle to circle.
    Forward,
    /// Circle.
    HoldCircle,
    /// Spinning from circle back to rectangle.
    Reverse,
    /// Rectangle again until the period wraps.
    Rest,
}

/// Morph amount and rotation of one shape at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Morph {
    /// 0 is the rectangle, 1 the circle.
    pub t: f64,
    /// Radians, within `[0, 2π]`.
    pub rotation: f64,
    /// Phase the instant falls in.
    pub phase: MorphPhase,
}

/// Phase boundaries derived once from a [`TimelineConfig`].
///
/// Shapes spin forward one after another starting with shape 0, hold as
/// circles together, then spin back in the opposite order.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    config: TimelineConfig,
    forward_start: [f64; SHAPE_COUNT],
    reverse_begin: f64,
    reverse_start: [f64; SHAPE_COUNT],
}

impl Default for Timeline {
    fn default() -> Self {
        Self::from_config(TimelineConfig::default())
    }
}

impl Timeline {
    /// Validate `config` and derive the boundaries.
    pub fn new(config: TimelineConfig) -> FoldmarkResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    pub(crate) fn from_config(config: TimelineConfig) -> Self {
        let n = SHAPE_COUNT as f64;
        let spin = config.spin_dur;
        let forward_start = std::array::from_fn(|i| config.hold_rect + i as f64 * spin);
        let reverse_begin = config.hold_rect + n * spin + config.hold_circ;
        let reverse_start =
            std::array::from_fn(|i| reverse_begin + (SHAPE_COUNT - 1 - i) as f64 * spin);
        Self {
            config,
            forward_start,
            reverse_begin,
            reverse_start,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// When each shape starts its forward spin.
    pub fn forward_start(&self) -> [f64; SHAPE_COUNT] {
        self.forward_start
    }

    /// When the first reverse spin (of the last shape) starts.
    pub fn reverse_begin(&self) -> f64 {
        self.reverse_begin
    }

    /// When each shape starts its reverse spin.
    pub fn reverse_start(&self) -> [f64; SHAPE_COUNT] {
        self.reverse_start
    }

    /// Interval of `p` during which every shape is a full circle.
    pub fn all_circle_window(&self) -> (f64, f64) {
        let last_fwd_end = self.forward_start[SHAPE_COUNT - 1] + self.config.spin_dur;
        (last_fwd_end, self.reverse_begin)
    }

    /// Morph state of `shape` at loop progress `p`.
    pub fn morph(&self, p: f64, shape: ShapeIndex) -> Morph {
        let spin = self.config.spin_dur;
        let fs = self.forward_start[shape.0];
        let fe = fs + spin;
        let rs = self.reverse_start[shape.0];
        let re = rs + spin;

        if p < fs {
            Morph::at_rest(0.0, MorphPhase::HoldRect)
        } else if p < fe {
            let raw = self.config.ease.apply((p - fs) / spin);
            Morph {
                t: raw,
                rotation: raw * TAU,
                phase: MorphPhase::Forward,
            }
        } else if p < rs {
            Morph::at_rest(1.0, MorphPhase::HoldCircle)
        } else if p < re {
            let raw = self.config.ease.apply((p - rs) / spin);
            Morph {
                t: 1.0 - raw,
                rotation: raw * TAU,
                phase: MorphPhase::Reverse,
            }
        } else {
            Morph::at_rest(0.0, MorphPhase::Rest)
        }
    }
}

impl Morph {
    fn at_rest(t: f64, phase: MorphPhase) -> Self {
        Self {
            t,
            rotation: 0.0,
            phase,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mark/timeline.rs"]
mod tests;
