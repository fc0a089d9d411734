//! Encoding sinks.
//!
//! Sinks consume rendered frames in output order and are fed by
//! [`crate::AnimationDriver::render_range`].

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Numbered PNG file sequence.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
