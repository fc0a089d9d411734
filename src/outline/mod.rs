//! Glyph outline data and its measured step tables.

/// Outline commands, glyph outlines and raw outline validation.
pub mod command;
/// Path preprocessing into cumulative-length steps.
pub mod steps;
