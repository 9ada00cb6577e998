/// Frame loop driving the mark.
pub mod animator;
/// Per-shape geometry.
pub mod engine;
/// Phase boundaries of one loop.
pub mod timeline;
