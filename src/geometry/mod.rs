//! Closed-form and sampled geometry for outline segments.

/// Interpolation, de Casteljau splitting and segment lengths.
pub mod primitives;
