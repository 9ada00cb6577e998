/// `vello_cpu` backed surfaces.
pub mod cpu;
/// Deterministic in-memory surfaces.
pub mod memory;
/// Surface traits and pixel types.
pub mod surface;
/// Font loading and line layout with `parley`.
pub mod text;
