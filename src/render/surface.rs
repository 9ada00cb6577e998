use crate::foundation::core::{Affine, BezPath, Point, Rgba8};
use crate::foundation::error::{FoldmarkError, FoldmarkResult};

/// Font weight requested from a [`GlyphSurface`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight (400).
    Regular,
    /// Bold weight (700).
    #[default]
    Bold,
}

/// A monospaced font request: weight plus pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size_px: f64,
    /// Requested weight.
    pub weight: FontWeight,
}

impl FontSpec {
    /// Bold monospace at `size_px`, the font used for glyph rasterization.
    pub fn bold_monospace(size_px: f64) -> Self {
        Self {
            size_px,
            weight: FontWeight::Bold,
        }
    }

    /// CSS shorthand for this font, e.g. `bold 48px monospace`.
    pub fn css(&self) -> String {
        let weight = match self.weight {
            FontWeight::Regular => "normal",
            FontWeight::Bold => "bold",
        };
        format!("{weight} {}px monospace", self.size_px)
    }
}

/// One-channel brightness samples read back from a [`GlyphSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRaster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major brightness, `width * height` samples.
    pub data: Vec<u8>,
}

impl GlyphRaster {
    /// Build a raster, checking that `data` holds exactly `width * height` samples.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> FoldmarkResult<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FoldmarkError::surface(format!(
                "raster holds {} samples, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Samples of row `y`; empty when out of range.
    pub fn row(&self, y: u32) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }
}

/// Off-screen raster surface used to turn text into brightness samples.
///
/// The contract mirrors a 2D canvas: [`resize`](GlyphSurface::resize) discards
/// all drawing state including the current font, so callers reapply the font
/// after every resize.
pub trait GlyphSurface {
    /// Select the font used by subsequent measure/draw calls.
    fn set_font(&mut self, font: &FontSpec) -> FoldmarkResult<()>;

    /// Rendered advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> FoldmarkResult<f64>;

    /// Resize to `width x height` pixels and reset drawing state.
    fn resize(&mut self, width: u32, height: u32) -> FoldmarkResult<()>;

    /// Fill the whole surface with `color`.
    fn fill(&mut self, color: Rgba8) -> FoldmarkResult<()>;

    /// Draw `text` with its top edge at `origin` (top baseline).
    fn fill_text(&mut self, text: &str, origin: Point, color: Rgba8) -> FoldmarkResult<()>;

    /// Read back the red channel of every pixel.
    fn read_red(&mut self) -> FoldmarkResult<GlyphRaster>;
}

/// A single mark shape ready to paint: closed outline plus placement.
#[derive(Clone, Debug)]
pub struct ShapeDraw {
    /// Closed outline in logical (CSS pixel) coordinates, before `transform`.
    pub path: BezPath,
    /// Rotation/scale about the shape center.
    pub transform: Affine,
    /// Fill and stroke color.
    pub color: Rgba8,
    /// Fill opacity in `[0, 1]`; zero means stroke only.
    pub fill_opacity: f32,
    /// Outline width in logical pixels, always stroked at full opacity.
    pub line_width: f64,
}

/// Drawable surface for the animated mark.
pub trait ShapeCanvas {
    /// Clear to the canvas background.
    fn clear(&mut self) -> FoldmarkResult<()>;

    /// Paint one shape on top of everything drawn since the last clear.
    fn draw_shape(&mut self, shape: &ShapeDraw) -> FoldmarkResult<()>;
}

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha in place; no-op if already straight.
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
