//! Time curves and the per-frame glyph scheduler.

/// Easing curves.
pub mod ease;
/// Per-glyph progress and partial path emission.
pub mod schedule;
