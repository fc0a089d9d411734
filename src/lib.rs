//! titlestroke renders a title as an animated hand-drawn stroke.
//!
//! Glyph outlines from a vector font are traced progressively onto a drawing surface. Each
//! glyph starts a fixed delay after the previous one and follows an ease-out curve, so the
//! stroke appears to accelerate and then settle.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `FontSource -> FontData` ([`load_font`], the only IO boundary)
//! 2. **Build**: `FontData + TitleConfig -> AnimationContext` (measure, size the surface,
//!    extract outlines, build per-glyph [`StepTable`]s once)
//! 3. **Drive**: [`AnimationDriver::tick`] clears the surface and asks the scheduler to stroke
//!    the revealed part of every glyph for the current timestamp
//! 4. **Encode** (optional): stream frames to PNG files or to the system `ffmpeg` binary
//!
//! Progress is a pure function of elapsed time and glyph index; no per-glyph state survives
//! between frames, so any timestamp can be rendered directly.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Easing and per-frame scheduling.
pub mod animation;
/// Title settings.
pub mod config;
/// Frame sinks.
pub mod encode;
/// Font loading and outline extraction.
pub mod font;
/// Segment splitting and length primitives.
pub mod geometry;
/// Outline commands and step tables.
pub mod outline;
/// Drawing surfaces.
pub mod render;
/// Animation context and driver.
pub mod session;

pub use crate::animation::ease::{DEFAULT_EASING_EXPONENT, Ease};
pub use crate::animation::schedule::{FrameReport, GlyphRef, GlyphTiming, draw_frame, draw_glyph};
pub use crate::config::TitleConfig;
pub use crate::encode::ffmpeg::{FfmpegSink, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::font::layout::{FontMetrics, TextBounds};
pub use crate::font::load::{FontData, FontSource, load_font};
pub use crate::foundation::core::{BezPath, Canvas, Fps, FrameIndex, Point, Rgba8, Vec2};
pub use crate::foundation::error::{TitleError, TitleResult};
pub use crate::outline::command::{GlyphOutline, OutlineCommand, OutlineDump, RawCommand};
pub use crate::outline::steps::{Step, StepCursor, StepTable};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::surface::{DrawSurface, RecordingSurface, StrokeStyle, SurfaceOp};
pub use crate::session::context::{AnimationContext, build_animation_context};
pub use crate::session::driver::{AnimationDriver, DriverState, FrameClock, RenderStats};
