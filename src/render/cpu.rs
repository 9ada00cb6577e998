use crate::foundation::core::{Affine, BezPath, Point, Rgba8};
use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::render::surface::{FontSpec, FrameRGBA, GlyphRaster, GlyphSurface, ShapeCanvas, ShapeDraw};
use crate::render::text::TextLayoutEngine;

/// [`GlyphSurface`] backed by `parley` shaping and the `vello_cpu` rasterizer.
pub struct CpuGlyphSurface {
    engine: TextLayoutEngine,
    font: Option<FontSpec>,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuGlyphSurface {
    /// Surfaces start at 1x1; the rasterizer always resizes before drawing.
    pub fn new(engine: TextLayoutEngine) -> Self {
        Self {
            engine,
            font: None,
            width: 1,
            height: 1,
            ctx: vello_cpu::RenderContext::new(1, 1),
        }
    }

    /// Load the font file at `path` and build a surface around it.
    pub fn from_font_path(path: &std::path::Path) -> FoldmarkResult<Self> {
        Ok(Self::new(TextLayoutEngine::from_font_path(path)?))
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn current_font(&self) -> FoldmarkResult<FontSpec> {
        self.font.ok_or_else(|| {
            FoldmarkError::surface("no font selected (resizing resets the font)")
        })
    }
}

impl std::fmt::Debug for CpuGlyphSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuGlyphSurface")
            .field("engine", &self.engine)
            .field("font", &self.font)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl GlyphSurface for CpuGlyphSurface {
    fn set_font(&mut self, font: &FontSpec) -> FoldmarkResult<()> {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(FoldmarkError::validation(
                "font size must be finite and > 0",
            ));
        }
        tracing::trace!(font = %font.css(), "font selected");
        self.font = Some(*font);
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> FoldmarkResult<f64> {
        let font = self.current_font()?;
        self.engine
            .measure(text, font.size_px as f32, font.weight)
    }

    fn resize(&mut self, width: u32, height: u32) -> FoldmarkResult<()> {
        let (w, h) = surface_dims(width, height)?;
        self.width = w;
        self.height = h;
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.font = None;
        Ok(())
    }

    fn fill(&mut self, color: Rgba8) -> FoldmarkResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Rgba8) -> FoldmarkResult<()> {
        let font = self.current_font()?;
        if text.is_empty() {
            return Ok(());
        }
        let layout = self
            .engine
            .layout_line(text, font.size_px as f32, font.weight, color)?;

        // Parley positions glyphs with the first line's top at y = 0.
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(color_to_cpu(brush));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(self.engine.font_data())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn read_red(&mut self) -> FoldmarkResult<GlyphRaster> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        let red: Vec<u8> = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[0])
            .collect();
        GlyphRaster::new(u32::from(self.width), u32::from(self.height), red)
    }
}

/// Options for [`CpuShapeCanvas`].
#[derive(Clone, Copy, Debug)]
pub struct CpuShapeCanvasOpts {
    /// Logical (CSS pixel) edge length of the square canvas.
    pub size: f64,
    /// Backing-store pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Clear color; `None` clears to transparent.
    pub background: Option<Rgba8>,
}

impl Default for CpuShapeCanvasOpts {
    fn default() -> Self {
        Self {
            size: 32.0,
            device_pixel_ratio: 1.0,
            background: None,
        }
    }
}

/// [`ShapeCanvas`] rendering into a square `vello_cpu` pixmap.
///
/// Drawing commands accumulate until [`snapshot`](CpuShapeCanvas::snapshot)
/// rasterizes them; [`clear`](ShapeCanvas::clear) drops them.
pub struct CpuShapeCanvas {
    opts: CpuShapeCanvasOpts,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuShapeCanvas {
    /// Backing size is `ceil(size * device_pixel_ratio)` pixels per side.
    pub fn new(opts: CpuShapeCanvasOpts) -> FoldmarkResult<Self> {
        if !opts.device_pixel_ratio.is_finite() || opts.device_pixel_ratio <= 0.0 {
            return Err(FoldmarkError::validation(
                "device_pixel_ratio must be finite and > 0",
            ));
        }
        if !opts.size.is_finite() || opts.size <= 0.0 {
            return Err(FoldmarkError::validation("canvas size must be finite and > 0"));
        }
        let px = (opts.size * opts.device_pixel_ratio).ceil();
        let (w, h) = surface_dims(px as u32, px as u32)?;
        let mut canvas = Self {
            opts,
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
        };
        canvas.clear()?;
        Ok(canvas)
    }

    /// Backing-store size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Rasterize everything drawn since the last clear.
    pub fn snapshot(&mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn device_transform(&self) -> Affine {
        Affine::scale(self.opts.device_pixel_ratio)
    }
}

impl ShapeCanvas for CpuShapeCanvas {
    fn clear(&mut self) -> FoldmarkResult<()> {
        self.ctx.reset();
        if let Some(bg) = self.opts.background {
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint(color_to_cpu(bg));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        Ok(())
    }

    fn draw_shape(&mut self, shape: &ShapeDraw) -> FoldmarkResult<()> {
        if !shape.line_width.is_finite() || shape.line_width < 0.0 {
            return Err(FoldmarkError::validation(
                "line width must be finite and >= 0",
            ));
        }

        let tr = self.device_transform() * shape.transform;
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(tr));
        let path = bezpath_to_cpu(&shape.path);
        let color = color_to_cpu(shape.color);

        let opacity = shape.fill_opacity.clamp(0.0, 1.0);
        if opacity > 0.0 {
            self.ctx.set_paint(color);
            if opacity < 1.0 {
                self.ctx.push_opacity_layer(opacity);
            }
            self.ctx.fill_path(&path);
            if opacity < 1.0 {
                self.ctx.pop_layer();
            }
        }

        self.ctx.set_paint(color);
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(shape.line_width));
        self.ctx.stroke_path(&path);
        Ok(())
    }
}

fn surface_dims(width: u32, height: u32) -> FoldmarkResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(FoldmarkError::surface(format!(
            "surface must be at least 1x1, got {width}x{height}"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| FoldmarkError::surface("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FoldmarkError::surface("surface height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
