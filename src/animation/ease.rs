/// Easing curves mapping linear progress in `[0, 1]` to eased progress.
///
/// The mark timeline uses [`Ease::InOutQuad`]. [`Ease::Linear`] is kept for
/// inspecting raw phase progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    Linear,
    /// `2x²` below the midpoint, `1 - (2 - 2x)² / 2` above it.
    #[default]
    InOutQuad,
}

impl Ease {
    /// Apply the curve. Inputs are clamped into `[0, 1]`; NaN maps to 0.
    pub fn apply(self, x: f64) -> f64 {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        match self {
            Self::Linear => x,
            Self::InOutQuad if x < 0.5 => 2.0 * x * x,
            Self::InOutQuad => 1.0 - (2.0 - 2.0 * x).powi(2) / 2.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
