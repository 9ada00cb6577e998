use kurbo::{RoundedRect, Shape};

use crate::foundation::core::{Affine, Point, Rgba8, Vec2};
use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::foundation::math::lerp;
use crate::mark::timeline::{MorphPhase, SHAPE_COUNT, ShapeIndex, Timeline, TimelineConfig};
use crate::render::surface::ShapeDraw;

const PATH_TOLERANCE: f64 = 0.1;

/// Direction in which the three shapes are spread apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetAxis {
    /// Stacked top to bottom.
    #[default]
    Vertical,
    /// Side by side.
    Horizontal,
}

/// Geometry, palette, and timing of the animated mark.
///
/// Lengths are given at `design_size` and scaled by `size / design_size`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MarkConfig {
    /// Logical edge length of the square canvas.
    pub size: f64,
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Edge length the other lengths are expressed at.
    pub design_size: f64,
    /// Rectangle half-width.
    pub rect_half_width: f64,
    /// Rectangle half-height.
    pub rect_half_height: f64,
    /// Rectangle corner radius.
    pub rect_corner_radius: f64,
    /// Circle radius; also its half-width, half-height, and corner radius.
    pub circle_radius: f64,
    /// Vertical squash applied once fully circular.
    pub circle_vertical_scale: f64,
    /// Per-shape offsets from center as rectangles.
    pub rect_offsets: [f64; SHAPE_COUNT],
    /// Per-shape offsets from center as circles.
    pub circle_offsets: [f64; SHAPE_COUNT],
    /// Axis the offsets apply to. Defaults to [`OffsetAxis::Vertical`], which
    /// matches the deployed animation: offsets move the center's y coordinate.
    pub offset_axis: OffsetAxis,
    /// Per-shape fill and outline colors.
    pub colors: [Rgba8; SHAPE_COUNT],
    /// Outline width as a fraction of `size`.
    pub line_width_factor: f64,
    /// Outline width lower bound.
    pub min_line_width: f64,
    /// Loop period in milliseconds.
    pub period_ms: f64,
    /// Phase durations within one period.
    pub timeline: TimelineConfig,
    /// Clear color; `None` clears to transparent.
    pub background: Option<Rgba8>,
}

impl Default for MarkConfig {
    fn default() -> Self {
        Self {
            size: 32.0,
            device_pixel_ratio: 1.0,
            design_size: 400.0,
            rect_half_width: 60.0,
            rect_half_height: 30.0,
            rect_corner_radius: 14.0,
            circle_radius: 60.0,
            circle_vertical_scale: 0.5,
            rect_offsets: [-36.0, 0.0, 36.0],
            circle_offsets: [-34.0, 0.0, 34.0],
            offset_axis: OffsetAxis::Vertical,
            colors: [
                Rgba8::opaque(0xE5, 0x39, 0x35),
                Rgba8::opaque(0xFF, 0x98, 0x00),
                Rgba8::opaque(0xFD, 0xD8, 0x35),
            ],
            line_width_factor: 0.0075,
            min_line_width: 1.0,
            period_ms: 6000.0,
            timeline: TimelineConfig::default(),
            background: None,
        }
    }
}

impl MarkConfig {
    /// Reject non-finite, non-positive, or negative values where they would
    /// produce a degenerate canvas or loop.
    pub fn validate(&self) -> FoldmarkResult<()> {
        let positive = [
            ("mark.size", self.size),
            ("mark.device_pixel_ratio", self.device_pixel_ratio),
            ("mark.design_size", self.design_size),
            ("mark.period_ms", self.period_ms),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(FoldmarkError::config(format!("{name} must be finite and > 0")));
            }
        }
        let non_negative = [
            ("mark.rect_half_width", self.rect_half_width),
            ("mark.rect_half_height", self.rect_half_height),
            ("mark.rect_corner_radius", self.rect_corner_radius),
            ("mark.circle_radius", self.circle_radius),
            ("mark.circle_vertical_scale", self.circle_vertical_scale),
            ("mark.line_width_factor", self.line_width_factor),
            ("mark.min_line_width", self.min_line_width),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(FoldmarkError::config(format!("{name} must be finite and >= 0")));
            }
        }
        let mut offsets = self.rect_offsets.iter().chain(&self.circle_offsets);
        if offsets.any(|v| !v.is_finite()) {
            return Err(FoldmarkError::config("mark offsets must be finite"));
        }
        self.timeline.validate()
    }

    /// Outline width in logical pixels.
    pub fn line_width(&self) -> f64 {
        self.min_line_width.max(self.size * self.line_width_factor)
    }
}

/// Geometry of one shape at one instant, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ShapeState {
    /// Which shape.
    pub index: ShapeIndex,
    /// Loop phase the shape is in.
    pub phase: MorphPhase,
    /// Morph amount: 0 rectangle, 1 circle.
    pub t: f64,
    /// Half of the unrotated width.
    pub half_width: f64,
    /// Half of the unrotated, unsquashed height.
    pub half_height: f64,
    /// Corner radius before clamping to the half extents.
    pub corner_radius: f64,
    /// Vertical squash about the shape center.
    pub vertical_scale: f64,
    /// Rotation about the shape center, radians.
    pub rotation: f64,
    /// Fill opacity; the outline is always opaque.
    pub fill_opacity: f64,
    /// Displacement of the center along the offset axis.
    pub offset: f64,
}

/// Maps loop progress to the geometry of each shape.
#[derive(Clone, Debug)]
pub struct ShapeMorphEngine {
    timeline: Timeline,
    size: f64,
    line_width: f64,
    rect: [f64; 3],
    circle_radius: f64,
    vertical_scale: f64,
    rect_offsets: [f64; SHAPE_COUNT],
    circle_offsets: [f64; SHAPE_COUNT],
    offset_axis: OffsetAxis,
    colors: [Rgba8; SHAPE_COUNT],
}

impl Default for ShapeMorphEngine {
    fn default() -> Self {
        Self::from_valid(&MarkConfig::default())
    }
}

impl ShapeMorphEngine {
    /// Validate `config` and scale its lengths to `config.size`.
    pub fn new(config: &MarkConfig) -> FoldmarkResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &MarkConfig) -> Self {
        let sc = config.size / config.design_size;
        Self {
            timeline: Timeline::from_config(config.timeline.clone()),
            size: config.size,
            line_width: config.line_width(),
            rect: [
                config.rect_half_width * sc,
                config.rect_half_height * sc,
                config.rect_corner_radius * sc,
            ],
            circle_radius: config.circle_radius * sc,
            vertical_scale: config.circle_vertical_scale,
            rect_offsets: config.rect_offsets.map(|v| v * sc),
            circle_offsets: config.circle_offsets.map(|v| v * sc),
            offset_axis: config.offset_axis,
            colors: config.colors,
        }
    }

    /// Phase boundaries in use.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Logical edge length of the canvas.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// State of `shape` at progress `p` in `[0, 1)`. Pure.
    pub fn shape_state(&self, p: f64, shape: ShapeIndex) -> ShapeState {
        let morph = self.timeline.morph(p, shape);
        let t = morph.t;
        let [hw, hh, r] = self.rect;
        let i = shape.get();
        ShapeState {
            index: shape,
            phase: morph.phase,
            t,
            half_width: lerp(hw, self.circle_radius, t),
            half_height: lerp(hh, self.circle_radius, t),
            corner_radius: lerp(r, self.circle_radius, t),
            vertical_scale: lerp(1.0, self.vertical_scale, t),
            rotation: morph.rotation,
            fill_opacity: t,
            offset: lerp(self.rect_offsets[i], self.circle_offsets[i], t),
        }
    }

    /// All three states at `p`, indexed by shape.
    pub fn states(&self, p: f64) -> [ShapeState; SHAPE_COUNT] {
        ShapeIndex::ALL.map(|i| self.shape_state(p, i))
    }

    /// Center of a shape displaced by `offset`.
    pub fn center(&self, offset: f64) -> Point {
        let c = self.size / 2.0;
        match self.offset_axis {
            OffsetAxis::Vertical => Point::new(c, c + offset),
            OffsetAxis::Horizontal => Point::new(c + offset, c),
        }
    }

    /// Paintable outline and placement for `state`.
    ///
    /// The path is the rounded rectangle with its radius clamped to the half
    /// extents; the transform rotates and squashes it about its own center.
    pub fn draw_for(&self, state: &ShapeState) -> ShapeDraw {
        let c = self.center(state.offset);
        let (hw, hh) = (state.half_width, state.half_height);
        let radius = state.corner_radius.min(hw).min(hh).max(0.0);
        let rect = RoundedRect::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh, radius);
        let to_center = Vec2::new(c.x, c.y);
        let transform = Affine::translate(to_center)
            * Affine::rotate(state.rotation)
            * Affine::scale_non_uniform(1.0, state.vertical_scale)
            * Affine::translate(-to_center);
        ShapeDraw {
            path: rect.to_path(PATH_TOLERANCE),
            transform,
            color: self.colors[state.index.get()],
            fill_opacity: state.fill_opacity as f32,
            line_width: self.line_width,
        }
    }

    /// Shapes to paint at `p`, back to front.
    pub fn frame(&self, p: f64) -> [ShapeDraw; SHAPE_COUNT] {
        ShapeIndex::BACK_TO_FRONT.map(|i| self.draw_for(&self.shape_state(p, i)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mark/engine.rs"]
mod tests;
