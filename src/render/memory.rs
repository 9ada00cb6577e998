//! In-memory surfaces with exactly predictable output, for tests and hosts
//! that only need geometry.

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::render::surface::{FontSpec, GlyphRaster, GlyphSurface, ShapeCanvas, ShapeDraw};

/// A [`GlyphSurface`] that draws every non-whitespace character as a solid
/// rectangle filling its monospace cell.
///
/// A cell is `size * advance_ratio` wide; its ink spans
/// `[size * ink_top_ratio, size * ink_bottom_ratio)` below the text origin.
/// Like a real canvas, resizing clears the selected font.
#[derive(Clone, Debug)]
pub struct BlockGlyphSurface {
    /// Cell advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Top of the ink box as a fraction of the font size.
    pub ink_top_ratio: f64,
    /// Bottom of the ink box as a fraction of the font size.
    pub ink_bottom_ratio: f64,
    font: Option<FontSpec>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    resizes: usize,
}

impl Default for BlockGlyphSurface {
    fn default() -> Self {
        Self::new(0.6, 0.1, 0.9)
    }
}

impl BlockGlyphSurface {
    /// Surface with the given cell geometry, sized 300x150 like a fresh canvas.
    pub fn new(advance_ratio: f64, ink_top_ratio: f64, ink_bottom_ratio: f64) -> Self {
        Self {
            advance_ratio,
            ink_top_ratio,
            ink_bottom_ratio,
            font: None,
            width: 300,
            height: 150,
            pixels: vec![0; 300 * 150],
            resizes: 0,
        }
    }

    /// How many times the surface has been resized.
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    fn current_font(&self) -> FoldmarkResult<FontSpec> {
        self.font.ok_or_else(|| {
            FoldmarkError::surface("no font selected (resizing resets the font)")
        })
    }

    fn fill_px_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, level: u8) {
        let clamp_x = |v: f64| v.round().clamp(0.0, f64::from(self.width)) as u32;
        let clamp_y = |v: f64| v.round().clamp(0.0, f64::from(self.height)) as u32;
        let (x0, x1) = (clamp_x(x0), clamp_x(x1));
        let (y0, y1) = (clamp_y(y0), clamp_y(y1));
        for y in y0..y1 {
            let row = (y * self.width) as usize;
            for x in x0..x1 {
                self.pixels[row + x as usize] = level;
            }
        }
    }
}

impl GlyphSurface for BlockGlyphSurface {
    fn set_font(&mut self, font: &FontSpec) -> FoldmarkResult<()> {
        self.font = Some(*font);
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> FoldmarkResult<f64> {
        let font = self.current_font()?;
        Ok(text.chars().count() as f64 * font.size_px * self.advance_ratio)
    }

    fn resize(&mut self, width: u32, height: u32) -> FoldmarkResult<()> {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize];
        self.font = None;
        self.resizes += 1;
        Ok(())
    }

    fn fill(&mut self, color: Rgba8) -> FoldmarkResult<()> {
        self.pixels.fill(color.r);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Rgba8) -> FoldmarkResult<()> {
        let font = self.current_font()?;
        let adv = font.size_px * self.advance_ratio;
        let top = origin.y + font.size_px * self.ink_top_ratio;
        let bottom = origin.y + font.size_px * self.ink_bottom_ratio;
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let x0 = origin.x + i as f64 * adv;
            self.fill_px_rect(x0, top, x0 + adv, bottom, color.r);
        }
        Ok(())
    }

    fn read_red(&mut self) -> FoldmarkResult<GlyphRaster> {
        GlyphRaster::new(self.width, self.height, self.pixels.clone())
    }
}

/// A [`ShapeCanvas`] that keeps every call for later inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    clears: usize,
    draws: usize,
    current: Vec<ShapeDraw>,
}

impl RecordingCanvas {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `clear` calls so far.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Number of `draw_shape` calls so far.
    pub fn draw_count(&self) -> usize {
        self.draws
    }

    /// Shapes drawn since the last clear, in paint order.
    pub fn current_frame(&self) -> &[ShapeDraw] {
        &self.current
    }
}

impl ShapeCanvas for RecordingCanvas {
    fn clear(&mut self) -> FoldmarkResult<()> {
        self.clears += 1;
        self.current.clear();
        Ok(())
    }

    fn draw_shape(&mut self, shape: &ShapeDraw) -> FoldmarkResult<()> {
        self.draws += 1;
        self.current.push(shape.clone());
        Ok(())
    }
}
