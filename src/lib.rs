//! Foldmark renders the Fold DB wordmark two ways: as responsive ASCII art and
//! as a small animated logo of three morphing shapes.
//!
//! # Pipelines
//!
//! 1. **ASCII**: `text + font size -> AsciiArt` by drawing on a [`GlyphSurface`] and
//!    thresholding brightness ([`Rasterizer`]). [`FitSolver`] picks the font size that fills a
//!    container and [`ResponsiveTextRenderer`] keeps a [`TextHost`] up to date across resizes.
//! 2. **Mark**: loop progress `p in [0, 1)` maps to per-shape geometry ([`ShapeMorphEngine`]);
//!    [`LoopAnimator`] turns frame timestamps into `p` and paints onto a [`ShapeCanvas`].
//!
//! Both pipelines are host-agnostic. Timers and frame callbacks go through [`Scheduler`];
//! [`ManualScheduler`] is a virtual clock for tests and headless rendering, and the CPU backends
//! ([`CpuGlyphSurface`], [`CpuShapeCanvas`]) rasterize with `vello_cpu`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing curves.
pub mod animation;
/// Text to ASCII art: rasterization, fitting, responsive rendering.
pub mod ascii;
/// JSON configuration covering both pipelines.
pub mod config;
mod foundation;
/// Host capabilities: scheduling and text display.
pub mod host;
/// The animated three-shape mark.
pub mod mark;
/// Drawing surfaces and their CPU and in-memory implementations.
pub mod render;

pub use crate::animation::ease::Ease;
pub use crate::ascii::art::AsciiArt;
pub use crate::ascii::fit::{FitConfig, FitSolver, available_cols};
pub use crate::ascii::raster::{AsciiConfig, MIN_FONT_SIZE, Rasterizer, rasterize};
pub use crate::ascii::responsive::{
    DEFAULT_TEXT, RenderOutcome, ResponsiveTextRenderer, SkipReason,
};
pub use crate::config::{FONT_ENV, FoldmarkConfig, font_path_from_env};
pub use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{FoldmarkError, FoldmarkResult};
pub use crate::host::scheduler::{FrameHandle, ManualScheduler, Scheduler, TimerHandle, Wakeup};
pub use crate::host::text::{ResizeSubscription, StaticTextHost, TextHost};
pub use crate::mark::animator::LoopAnimator;
pub use crate::mark::engine::{MarkConfig, OffsetAxis, ShapeMorphEngine, ShapeState};
pub use crate::mark::timeline::{
    Morph, MorphPhase, SHAPE_COUNT, ShapeIndex, Timeline, TimelineConfig,
};
pub use crate::render::cpu::{CpuGlyphSurface, CpuShapeCanvas, CpuShapeCanvasOpts};
pub use crate::render::memory::{BlockGlyphSurface, RecordingCanvas};
pub use crate::render::surface::{
    FontSpec, FontWeight, FrameRGBA, GlyphRaster, GlyphSurface, ShapeCanvas, ShapeDraw,
};
pub use crate::render::text::TextLayoutEngine;
