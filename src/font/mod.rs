//! Font loading and glyph outline extraction.
//!
//! This is the only IO boundary of the crate: [`load::load_font`] reads or fetches the font bytes,
//! everything after it is synchronous and pure.

/// Glyph lookup, kerning, measurement and pixel-space outlines.
pub mod layout;
/// Font sources and the loading boundary.
pub mod load;
