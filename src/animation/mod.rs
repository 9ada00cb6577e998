/// Easing curves applied to spin progress.
pub mod ease;
