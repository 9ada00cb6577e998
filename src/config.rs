use std::path::{Path, PathBuf};

use crate::ascii::fit::FitConfig;
use crate::ascii::raster::AsciiConfig;
use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::mark::engine::MarkConfig;

/// Environment variable naming the font file for the CPU glyph surface.
pub const FONT_ENV: &str = "FOLDMARK_FONT";

/// Settings for both pipelines; missing sections and fields take defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FoldmarkConfig {
    /// Rasterizer settings.
    pub ascii: AsciiConfig,
    /// Font-size fitting settings.
    pub fit: FitConfig,
    /// Animated mark settings.
    pub mark: MarkConfig,
}

impl FoldmarkConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> FoldmarkResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| FoldmarkError::config(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a JSON file.
    pub fn from_path(path: &Path) -> FoldmarkResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FoldmarkError::config(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Validate every section.
    pub fn validate(&self) -> FoldmarkResult<()> {
        self.ascii.validate()?;
        self.fit.validate()?;
        self.mark.validate()
    }
}

/// Font path from [`FONT_ENV`], if set and non-empty.
pub fn font_path_from_env() -> Option<PathBuf> {
    std::env::var_os(FONT_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
