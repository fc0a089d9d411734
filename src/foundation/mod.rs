/// Shared value types (points, frame indices, colors, canvas size).
pub mod core;
/// Crate-wide error taxonomy.
pub mod error;
pub(crate) mod math;
