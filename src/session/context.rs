use kurbo::Rect;

use crate::animation::schedule::{FrameReport, GlyphRef, GlyphTiming, draw_frame};
use crate::config::TitleConfig;
use crate::font::load::FontData;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{TitleError, TitleResult};
use crate::outline::command::GlyphOutline;
use crate::outline::steps::StepTable;
use crate::render::surface::{DrawSurface, StrokeStyle};

/// Everything the scheduler needs, built once after bootstrap and read-only afterwards.
#[derive(Clone, Debug)]
pub struct AnimationContext {
    canvas: Canvas,
    outlines: Vec<GlyphOutline>,
    steps: Vec<StepTable>,
    timing: GlyphTiming,
    style: StrokeStyle,
    background: Rgba8,
    startup_delay: f64,
    fps: Fps,
}

/// Measure the text, size the surface, extract outlines and build step tables.
#[tracing::instrument(skip(font, cfg), fields(text = %cfg.text, font_size = cfg.font_size))]
pub fn build_animation_context(font: &FontData, cfg: &TitleConfig) -> TitleResult<AnimationContext> {
    cfg.validate()?;
    let bounds = font.measure(&cfg.text, cfg.font_size)?;
    let canvas = Canvas {
        width: to_px(bounds.width.ceil() + 2.0 * cfg.padding)?,
        height: to_px(bounds.height + 2.0 * cfg.padding)?,
    };
    tracing::debug!(
        baseline = bounds.baseline,
        width = bounds.width,
        height = bounds.height,
        "measured title"
    );
    let outlines = font.glyph_outlines(
        &cfg.text,
        cfg.padding,
        bounds.baseline + cfg.padding,
        cfg.font_size,
    )?;
    AnimationContext::new(canvas, outlines, cfg)
}

impl AnimationContext {
    /// Build from already positioned outlines.
    pub fn new(canvas: Canvas, outlines: Vec<GlyphOutline>, cfg: &TitleConfig) -> TitleResult<Self> {
        cfg.validate()?;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(TitleError::validation(format!(
                "canvas must be non-empty (got {}x{})",
                canvas.width, canvas.height
            )));
        }
        let steps: Vec<StepTable> = outlines.iter().map(StepTable::build).collect();
        for (i, table) in steps.iter().enumerate() {
            tracing::debug!(
                glyph = i,
                steps = table.steps.len(),
                total_length = table.total_length,
                "preprocessed glyph"
            );
        }
        tracing::info!(
            glyphs = outlines.len(),
            width = canvas.width,
            height = canvas.height,
            "animation context ready"
        );
        Ok(Self {
            canvas,
            outlines,
            steps,
            timing: cfg.timing(),
            style: cfg.stroke(),
            background: cfg.background,
            startup_delay: cfg.startup_delay,
            fps: cfg.fps,
        })
    }

    /// Build from outlines, deriving the canvas from their bounds when `canvas` is `None`.
    pub fn from_outlines(
        outlines: Vec<GlyphOutline>,
        canvas: Option<Canvas>,
        cfg: &TitleConfig,
    ) -> TitleResult<Self> {
        let canvas = match canvas {
            Some(c) => c,
            None => {
                let bounds = outlines
                    .iter()
                    .filter_map(GlyphOutline::bounds)
                    .reduce(|a, b| a.union(b))
                    .ok_or_else(|| {
                        TitleError::validation("outlines have no points to size the canvas from")
                    })?;
                canvas_around(bounds, cfg.padding)?
            }
        };
        Self::new(canvas, outlines, cfg)
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Grow the canvas to even dimensions (required by yuv420p encoders).
    pub fn pad_to_even(&mut self) {
        self.canvas.width += self.canvas.width % 2;
        self.canvas.height += self.canvas.height % 2;
    }

    /// Outlines in string order.
    pub fn outlines(&self) -> &[GlyphOutline] {
        &self.outlines
    }

    /// Step tables, parallel to [`AnimationContext::outlines`].
    pub fn step_tables(&self) -> &[StepTable] {
        &self.steps
    }

    /// Number of glyphs.
    pub fn glyph_count(&self) -> usize {
        self.outlines.len()
    }

    /// Glyph timing.
    pub fn timing(&self) -> &GlyphTiming {
        &self.timing
    }

    /// Stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Surface clear color.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Blank time before the frame loop starts.
    pub fn startup_delay(&self) -> f64 {
        self.startup_delay
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Timestamp of the first frame at or after the startup delay, where elapsed time is 0.
    pub fn clock_start(&self) -> f64 {
        self.fps
            .frames_to_secs(self.fps.first_frame_at_or_after(self.startup_delay))
    }

    /// Elapsed animation time after which every glyph is fully drawn.
    pub fn completion_time(&self) -> f64 {
        self.timing.completion_time(self.glyph_count())
    }

    /// Output time covering the startup delay, the full animation and `hold` seconds.
    pub fn total_duration(&self, hold: f64) -> f64 {
        self.startup_delay + self.completion_time() + hold.max(0.0)
    }

    /// Outline/step pairs in string order.
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphRef<'_>> {
        self.outlines
            .iter()
            .zip(&self.steps)
            .map(|(outline, steps)| GlyphRef { outline, steps })
    }

    /// Stroke every glyph at `elapsed` seconds after the animation start.
    ///
    /// Stateless: any elapsed value can be drawn in any order. Does not clear the surface.
    pub fn draw_at<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        elapsed: f64,
    ) -> TitleResult<FrameReport> {
        draw_frame(surface, self.glyphs(), &self.timing, &self.style, elapsed)
    }
}

fn canvas_around(bounds: Rect, padding: f64) -> TitleResult<Canvas> {
    Ok(Canvas {
        width: to_px((bounds.x1.max(0.0) + padding).ceil())?,
        height: to_px((bounds.y1.max(0.0) + padding).ceil())?,
    })
}

fn to_px(v: f64) -> TitleResult<u32> {
    let v = v.ceil();
    if v.is_finite() && v >= 1.0 && v <= f64::from(u32::MAX) {
        Ok(v as u32)
    } else {
        Err(TitleError::validation(format!(
            "canvas dimension {v} is out of range"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/context.rs"]
mod tests;
