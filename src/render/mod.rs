//! Drawing surfaces.

/// Frame readback type.
pub mod backend;
/// `vello_cpu` raster surface.
pub mod cpu;
/// Drawing surface contract and the recording surface.
pub mod surface;
