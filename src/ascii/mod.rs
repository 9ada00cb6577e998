/// Trimmed rows of ASCII art.
pub mod art;
/// Font-size fitting.
pub mod fit;
/// Text to art via brightness thresholds.
pub mod raster;
/// Debounced re-rendering into a text host.
pub mod responsive;
