/// Frame and timer callbacks.
pub mod scheduler;
/// Display target for ASCII art.
pub mod text;
