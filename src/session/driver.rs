//! Frame loop.
//!
//! The driver is the only owner of mutable animation state: the start timestamp, set on the
//! first frame after the startup delay, and the lifecycle state. Timestamps are seconds on the
//! output timeline; [`FrameClock`] generates them at a fixed frame rate.

use crate::animation::schedule::FrameReport;
use crate::config::TitleConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::font::load::{FontSource, load_font};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{TitleError, TitleResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::render::surface::DrawSurface;
use crate::session::context::{AnimationContext, build_animation_context};

/// Driver lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverState {
    /// Context ready, startup delay not yet elapsed.
    Idle,
    /// Frames are being scheduled; `start` is the timestamp of the first animated frame.
    Running {
        /// Animation clock origin.
        start: f64,
    },
    /// Every glyph is fully drawn; further frames are identical.
    Complete {
        /// Animation clock origin.
        start: f64,
    },
}

/// Fixed-rate timestamp source standing in for a display refresh callback.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    fps: Fps,
    next: u64,
    end: u64,
}

impl FrameClock {
    /// Clock producing `frames` timestamps starting at 0.
    pub fn new(fps: Fps, frames: u64) -> Self {
        Self {
            fps,
            next: 0,
            end: frames,
        }
    }

    /// Clock covering `secs` of output.
    pub fn for_duration(fps: Fps, secs: f64) -> Self {
        Self::new(fps, fps.secs_to_frames_ceil(secs))
    }
}

impl Iterator for FrameClock {
    type Item = (FrameIndex, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let idx = self.next;
        self.next += 1;
        Some((FrameIndex(idx), self.fps.frames_to_secs(idx)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.end.saturating_sub(self.next)).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

/// Summary of a [`AnimationDriver::render_range`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Frames rasterized from scratch.
    pub rendered: u64,
    /// Frames repeated from the cached completed frame.
    pub reused: u64,
}

/// Owns the animation clock and drives the scheduler once per frame.
#[derive(Debug)]
pub struct AnimationDriver {
    context: AnimationContext,
    state: DriverState,
}

impl AnimationDriver {
    /// Driver over a ready context.
    pub fn new(context: AnimationContext) -> Self {
        Self {
            context,
            state: DriverState::Idle,
        }
    }

    /// Load the configured font and build the context.
    ///
    /// This is the only suspend point: nothing is drawn until it succeeds.
    #[tracing::instrument(skip_all, fields(font = %source))]
    pub fn bootstrap(source: &FontSource, cfg: &TitleConfig) -> TitleResult<Self> {
        tracing::debug!("loading font");
        let font = load_font(source)?;
        let context = build_animation_context(&font, cfg)?;
        Ok(Self::new(context))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Animation data.
    pub fn context(&self) -> &AnimationContext {
        &self.context
    }

    /// Forget the clock so the animation replays from the startup delay.
    pub fn reset(&mut self) {
        self.state = DriverState::Idle;
    }

    /// Elapsed animation time at output timestamp `timestamp`, `None` during the startup delay.
    pub fn elapsed_at(&self, timestamp: f64) -> Option<f64> {
        match self.state {
            DriverState::Running { start } | DriverState::Complete { start } => {
                Some((timestamp - start).max(0.0))
            }
            DriverState::Idle => None,
        }
    }

    /// Produce one frame: clear, then draw every glyph for `timestamp`.
    ///
    /// The first call at or after the startup delay starts the clock, so elapsed time is 0 on
    /// the first animated frame.
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        timestamp: f64,
        surface: &mut S,
    ) -> TitleResult<FrameReport> {
        if !timestamp.is_finite() {
            return Err(TitleError::validation(format!(
                "frame timestamp must be finite (got {timestamp})"
            )));
        }
        surface.clear()?;
        if self.state == DriverState::Idle && timestamp >= self.context.startup_delay() {
            self.state = DriverState::Running { start: timestamp };
            tracing::debug!(start = timestamp, "animation clock started");
        }
        let Some(elapsed) = self.elapsed_at(timestamp) else {
            return Ok(FrameReport::default());
        };

        let report = self.context.draw_at(surface, elapsed)?;
        if let DriverState::Running { start } = self.state
            && report.complete
        {
            self.state = DriverState::Complete { start };
            tracing::debug!(elapsed, "all glyphs drawn");
        }
        Ok(report)
    }

    /// Render the frame at output timestamp `timestamp` without touching the driver clock.
    ///
    /// The clock origin is the first frame at the context's frame rate that falls at or after
    /// the startup delay, so frame timestamps render exactly what [`Self::render_range`]
    /// produces for a [`FrameClock`] at that rate.
    pub fn render_at(&self, timestamp: f64, surface: &mut CpuSurface) -> TitleResult<FrameRGBA> {
        if !timestamp.is_finite() {
            return Err(TitleError::validation(format!(
                "frame timestamp must be finite (got {timestamp})"
            )));
        }
        surface.clear()?;
        if timestamp >= self.context.startup_delay() {
            let elapsed = (timestamp - self.context.clock_start()).max(0.0);
            self.context.draw_at(surface, elapsed)?;
        }
        Ok(surface.read_frame())
    }

    /// Render every timestamp of `clock` into `sink`.
    ///
    /// Once the animation is complete the last frame is repeated instead of redrawn; the
    /// output is identical either way.
    #[tracing::instrument(skip_all)]
    pub fn render_range(
        &mut self,
        clock: FrameClock,
        surface: &mut CpuSurface,
        sink: &mut dyn FrameSink,
    ) -> TitleResult<RenderStats> {
        let canvas = surface.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: clock.fps,
        })?;

        let mut stats = RenderStats::default();
        let mut completed: Option<FrameRGBA> = None;
        for (idx, timestamp) in clock {
            if let Some(frame) = completed.as_ref() {
                sink.push_frame(idx, frame)?;
                stats.reused += 1;
            } else {
                self.tick(timestamp, surface)?;
                let frame = surface.read_frame();
                sink.push_frame(idx, &frame)?;
                stats.rendered += 1;
                if matches!(self.state, DriverState::Complete { .. }) {
                    completed = Some(frame);
                }
            }
            stats.frames += 1;
        }
        sink.end()?;
        tracing::info!(
            frames = stats.frames,
            rendered = stats.rendered,
            reused = stats.reused,
            "render finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
