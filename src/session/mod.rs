//! Animation context construction and the frame driver.

/// Immutable per-title animation data.
pub mod context;
/// Clocked frame loop.
pub mod driver;
