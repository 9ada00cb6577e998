use crate::ascii::raster::Rasterizer;
use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::render::surface::GlyphSurface;

/// Settings for fitting ASCII art to a container width.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Calibration string rasterized to learn columns-per-font-size.
    pub reference_text: String,
    /// Font size the calibration string is rasterized at.
    pub reference_size: f64,
    /// Smallest solved size.
    pub min_size: f64,
    /// Largest solved size.
    pub max_size: f64,
    /// Quiet period after the last resize before re-rendering.
    pub debounce_ms: f64,
    /// Glyph the host measures to learn its character width.
    pub char_probe: String,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            reference_text: "FOLD DB".to_string(),
            reference_size: 48.0,
            min_size: 10.0,
            max_size: 64.0,
            debounce_ms: 150.0,
            char_probe: "M".to_string(),
        }
    }
}

impl FitConfig {
    /// Reject non-finite or inverted bounds.
    pub fn validate(&self) -> FoldmarkResult<()> {
        let finite = [
            self.reference_size,
            self.min_size,
            self.max_size,
            self.debounce_ms,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(FoldmarkError::config("fit values must be finite"));
        }
        if self.reference_size <= 0.0 {
            return Err(FoldmarkError::config("fit.reference_size must be > 0"));
        }
        if self.min_size > self.max_size {
            return Err(FoldmarkError::config(
                "fit.min_size must not exceed fit.max_size",
            ));
        }
        if self.debounce_ms < 0.0 {
            return Err(FoldmarkError::config("fit.debounce_ms must be >= 0"));
        }
        if self.char_probe.is_empty() {
            return Err(FoldmarkError::config("fit.char_probe must be non-empty"));
        }
        Ok(())
    }
}

/// Picks the font size at which rasterized art fills a container.
///
/// One scaling step, no iteration: the calibration string's column count at
/// the reference size is scaled linearly to the available columns.
#[derive(Clone, Debug, Default)]
pub struct FitSolver {
    config: FitConfig,
    rasterizer: Rasterizer,
}

impl FitSolver {
    /// Build a solver measuring with `rasterizer`.
    pub fn new(config: FitConfig, rasterizer: Rasterizer) -> FoldmarkResult<Self> {
        config.validate()?;
        Ok(Self { config, rasterizer })
    }

    /// Active configuration.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// The rasterizer used for calibration.
    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Solve the font size for a container `container_width_px` wide whose
    /// text uses characters `char_width_px` wide.
    ///
    /// Always within `[min_size, max_size]`, except that a calibration
    /// string rasterizing to nothing returns the reference size unchanged.
    #[tracing::instrument(skip(self, surface))]
    pub fn solve_font_size(
        &self,
        surface: &mut dyn GlyphSurface,
        container_width_px: f64,
        char_width_px: f64,
    ) -> FoldmarkResult<f64> {
        let cols = available_cols(container_width_px, char_width_px)?;
        let ref_cols = self.reference_max_cols(surface)?;
        let size = self.scale_font_size(cols, ref_cols);
        tracing::debug!(cols, ref_cols, size, "solved font size");
        Ok(size)
    }

    /// Longest row of the calibration string at the reference size.
    pub fn reference_max_cols(&self, surface: &mut dyn GlyphSurface) -> FoldmarkResult<usize> {
        let art = self.rasterizer.rasterize(
            surface,
            &self.config.reference_text,
            self.config.reference_size,
        )?;
        Ok(art.width())
    }

    /// The scaling step on its own: `floor(ref_size * cols / ref_cols)`,
    /// clamped. Monotonic in `available_cols`.
    pub fn scale_font_size(&self, available_cols: u64, ref_max_cols: usize) -> f64 {
        if ref_max_cols == 0 {
            return self.config.reference_size;
        }
        let scaled =
            (self.config.reference_size * (available_cols as f64 / ref_max_cols as f64)).floor();
        scaled.clamp(self.config.min_size, self.config.max_size)
    }
}

/// Whole characters of width `char_width_px` that fit in `container_width_px`.
pub fn available_cols(container_width_px: f64, char_width_px: f64) -> FoldmarkResult<u64> {
    if !char_width_px.is_finite() || char_width_px <= 0.0 {
        return Err(FoldmarkError::validation(format!(
            "char width must be finite and > 0, got {char_width_px}"
        )));
    }
    if !container_width_px.is_finite() || container_width_px < 0.0 {
        return Err(FoldmarkError::validation(format!(
            "container width must be finite and >= 0, got {container_width_px}"
        )));
    }
    Ok((container_width_px / char_width_px).floor() as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/ascii/fit.rs"]
mod tests;
