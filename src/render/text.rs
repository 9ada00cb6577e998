use crate::foundation::core::Rgba8;
use crate::foundation::error::{FoldmarkError, FoldmarkResult};
use crate::render::surface::FontWeight;

/// Builds Parley layouts against a single font face loaded from bytes.
///
/// The face is registered once at construction; every layout uses its family
/// name as the font stack so no system font lookup is involved.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl TextLayoutEngine {
    /// Register `font_bytes` and prepare fresh Parley contexts.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> FoldmarkResult<Self> {
        if font_bytes.is_empty() {
            return Err(FoldmarkError::surface("font bytes are empty"));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FoldmarkError::surface("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FoldmarkError::surface("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Read a font file and register it.
    pub fn from_font_path(path: &std::path::Path) -> FoldmarkResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            FoldmarkError::surface(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_font_bytes(bytes)
    }

    /// Family name detected in the registered font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Glyph source for `vello_cpu` glyph runs.
    pub fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape a single unwrapped line of `text`.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        weight: FontWeight,
        brush: Rgba8,
    ) -> FoldmarkResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FoldmarkError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let weight = match weight {
            FontWeight::Regular => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` laid out on one line.
    pub fn measure(&mut self, text: &str, size_px: f32, weight: FontWeight) -> FoldmarkResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, size_px, weight, Rgba8::WHITE)?;
        let mut w = 0.0f64;
        for line in layout.lines() {
            w = w.max(f64::from(line.metrics().advance));
        }
        Ok(w)
    }
}
