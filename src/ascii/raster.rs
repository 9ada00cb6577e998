use crate::ascii::art::AsciiArt;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::render::surface::{FontSpec, GlyphRaster, GlyphSurface};

/// Smallest font size the rasterizer is specified for.
///
/// Sizes below this are out of contract: they are passed through to the
/// surface unchanged, and the output is whatever the surface produces.
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Brightness-to-character mapping and raster sizing.
///
/// The defaults were tuned by eye for bold monospace at typical DPI.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AsciiConfig {
    /// Samples strictly brighter than this become `ink_char`.
    pub ink_threshold: u8,
    /// Samples strictly brighter than this (and not ink) become `mid_char`.
    pub mid_threshold: u8,
    /// Character for the brightest bucket.
    pub ink_char: char,
    /// Character for the middle bucket.
    pub mid_char: char,
    /// Character for dark samples; also the character trimmed away.
    pub blank_char: char,
    /// Sample every `row_step`-th pixel row to undo the tall monospace cell.
    pub row_step: u32,
    /// Raster height as a multiple of the font size.
    pub height_factor: f64,
    /// Extra raster width added to the measured text width.
    pub width_margin_px: u32,
    /// Horizontal text origin.
    pub origin_x_px: f64,
    /// Vertical text origin as a multiple of the font size (floored).
    pub baseline_factor: f64,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            ink_threshold: 170,
            mid_threshold: 60,
            ink_char: '#',
            mid_char: ':',
            blank_char: ' ',
            row_step: 2,
            height_factor: 1.3,
            width_margin_px: 4,
            origin_x_px: 2.0,
            baseline_factor: 0.1,
        }
    }
}

impl AsciiConfig {
    /// Reject settings that cannot produce a meaningful raster.
    pub fn validate(&self) -> FoldmarkResult<()> {
        if self.mid_threshold >= self.ink_threshold {
            return Err(FoldmarkError::config(
                "ascii.mid_threshold must be below ascii.ink_threshold",
            ));
        }
        if self.row_step == 0 {
            return Err(FoldmarkError::config("ascii.row_step must be >= 1"));
        }
        if !self.height_factor.is_finite() || self.height_factor <= 0.0 {
            return Err(FoldmarkError::config(
                "ascii.height_factor must be finite and > 0",
            ));
        }
        if !self.origin_x_px.is_finite() || !self.baseline_factor.is_finite() {
            return Err(FoldmarkError::config("ascii text origin must be finite"));
        }
        if self.ink_char == self.blank_char || self.mid_char == self.blank_char {
            return Err(FoldmarkError::config(
                "ascii.blank_char must differ from the ink and mid characters",
            ));
        }
        Ok(())
    }

    /// Character for one brightness sample.
    pub fn char_for(&self, brightness: u8) -> char {
        if brightness > self.ink_threshold {
            self.ink_char
        } else if brightness > self.mid_threshold {
            self.mid_char
        } else {
            self.blank_char
        }
    }
}

/// Converts text into [`AsciiArt`] by drawing it on a [`GlyphSurface`] and
/// thresholding the pixels.
#[derive(Clone, Debug, Default)]
pub struct Rasterizer {
    config: AsciiConfig,
}

impl Rasterizer {
    /// Build a rasterizer; fails if `config` does not validate.
    pub fn new(config: AsciiConfig) -> FoldmarkResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &AsciiConfig {
        &self.config
    }

    /// Render `text` at `font_size` and map the result to characters.
    ///
    /// Deterministic for a deterministic surface. Empty text yields an empty
    /// art. See [`MIN_FONT_SIZE`] for the supported size range.
    #[tracing::instrument(skip(self, surface), fields(rows, cols))]
    pub fn rasterize(
        &self,
        surface: &mut dyn GlyphSurface,
        text: &str,
        font_size: f64,
    ) -> FoldmarkResult<AsciiArt> {
        if !font_size.is_finite() {
            return Err(FoldmarkError::validation("font size must be finite"));
        }

        let height =
            pixel_extent((font_size * self.config.height_factor).max(1.0)).ok_or_else(|| {
                FoldmarkError::validation(format!(
                    "font size {font_size} is too large to rasterize"
                ))
            })?;

        let font = FontSpec::bold_monospace(font_size);
        surface.set_font(&font)?;
        let measured = surface.measure_text(text)?;
        if !measured.is_finite() {
            return Err(FoldmarkError::surface(format!(
                "measured text width must be finite, got {measured}"
            )));
        }

        let width = pixel_extent(measured.max(0.0))
            .and_then(|w| w.checked_add(self.config.width_margin_px))
            .ok_or_else(|| FoldmarkError::surface("text too wide to rasterize"))?;
        surface.resize(width, height)?;

        surface.fill(Rgba8::BLACK)?;
        // resize dropped the font along with the rest of the drawing state
        surface.set_font(&font)?;
        let origin = Point::new(
            self.config.origin_x_px,
            (font_size * self.config.baseline_factor).floor(),
        );
        surface.fill_text(text, origin, Rgba8::WHITE)?;

        let raster = surface.read_red()?;
        let art = self.map_raster(&raster);
        tracing::Span::current()
            .record("rows", art.height() as u64)
            .record("cols", art.width() as u64);
        Ok(art)
    }

    /// Threshold a raster into trimmed art, sampling every `row_step`-th row.
    pub fn map_raster(&self, raster: &GlyphRaster) -> AsciiArt {
        let step = self.config.row_step.max(1) as usize;
        let rows = (0..raster.height)
            .step_by(step)
            .map(|y| {
                raster
                    .row(y)
                    .iter()
                    .map(|&b| self.config.char_for(b))
                    .collect::<Vec<char>>()
            })
            .collect();
        AsciiArt::from_raw_rows(rows, self.config.blank_char)
    }
}

/// Whole pixels covering `v`, if that count fits in a `u32`.
fn pixel_extent(v: f64) -> Option<u32> {
    let px = v.ceil();
    (0.0..=f64::from(u32::MAX))
        .contains(&px)
        .then_some(px as u32)
}

/// [`Rasterizer::rasterize`] with the default configuration.
pub fn rasterize(
    surface: &mut dyn GlyphSurface,
    text: &str,
    font_size: f64,
) -> FoldmarkResult<AsciiArt> {
    Rasterizer::default().rasterize(surface, text, font_size)
}

#[cfg(test)]
#[path = "../../tests/unit/ascii/raster.rs"]
mod tests;
