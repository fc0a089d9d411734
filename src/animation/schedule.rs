//! Per-frame glyph scheduling.
//!
//! Nothing is cached between frames: progress is a pure function of the elapsed time and the
//! glyph index, and each glyph's partial path is replayed from its first command every frame.

use kurbo::Point;

use crate::animation::ease::Ease;
use crate::foundation::error::{TitleError, TitleResult};
use crate::geometry::primitives::{bezier_split, lerp_point, quadratic_split};
use crate::outline::command::{GlyphOutline, OutlineCommand};
use crate::outline::steps::StepTable;
use crate::render::surface::{DrawSurface, StrokeStyle};

/// Stagger, duration and easing shared by every glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphTiming {
    /// Delay between the starts of consecutive glyphs, in seconds.
    pub stagger_delay: f64,
    /// Time one glyph takes to draw completely, in seconds.
    pub draw_duration: f64,
    /// Curve applied to the normalized progress.
    pub ease: Ease,
}

impl GlyphTiming {
    /// Validate timing values.
    pub fn validate(&self) -> TitleResult<()> {
        if !(self.draw_duration.is_finite() && self.draw_duration > 0.0) {
            return Err(TitleError::validation(format!(
                "draw duration must be > 0 seconds (got {})",
                self.draw_duration
            )));
        }
        if !(self.stagger_delay.is_finite() && self.stagger_delay >= 0.0) {
            return Err(TitleError::validation(format!(
                "stagger delay must be >= 0 seconds (got {})",
                self.stagger_delay
            )));
        }
        self.ease.validate()
    }

    /// Start time of glyph `glyph` relative to the animation start.
    pub fn glyph_start(&self, glyph: usize) -> f64 {
        glyph as f64 * self.stagger_delay
    }

    /// Glyph-local elapsed time, never negative.
    pub fn local_elapsed(&self, glyph: usize, elapsed: f64) -> f64 {
        (elapsed - self.glyph_start(glyph)).max(0.0)
    }

    /// Linear progress in `[0, 1]` before easing.
    pub fn raw_progress(&self, glyph: usize, elapsed: f64) -> f64 {
        (self.local_elapsed(glyph, elapsed) / self.draw_duration).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, glyph: usize, elapsed: f64) -> f64 {
        self.ease.apply(self.raw_progress(glyph, elapsed))
    }

    /// Elapsed time at which the last of `glyph_count` glyphs is fully drawn.
    pub fn completion_time(&self, glyph_count: usize) -> f64 {
        self.glyph_start(glyph_count.saturating_sub(1)) + self.draw_duration
    }
}

/// Per-frame summary returned by [`draw_frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Glyphs that had a non-empty partial path stroked.
    pub drawn: usize,
    /// Glyphs that were skipped (no steps, or nothing revealed yet).
    pub skipped: usize,
    /// Every drawable glyph has reached full progress.
    pub complete: bool,
}

/// A glyph outline paired with its precomputed step table.
#[derive(Clone, Copy, Debug)]
pub struct GlyphRef<'a> {
    /// Outline commands.
    pub outline: &'a GlyphOutline,
    /// Steps built from `outline`.
    pub steps: &'a StepTable,
}

/// Draw every glyph at `elapsed` seconds after the animation start.
///
/// The surface is not cleared here; the driver owns clearing.
pub fn draw_frame<'a, S: DrawSurface + ?Sized>(
    surface: &mut S,
    glyphs: impl IntoIterator<Item = GlyphRef<'a>>,
    timing: &GlyphTiming,
    style: &StrokeStyle,
    elapsed: f64,
) -> TitleResult<FrameReport> {
    let mut report = FrameReport {
        complete: true,
        ..FrameReport::default()
    };
    for (i, glyph) in glyphs.into_iter().enumerate() {
        if glyph.steps.is_empty() {
            report.skipped += 1;
            continue;
        }
        if timing.raw_progress(i, elapsed) < 1.0 {
            report.complete = false;
        }
        let target = timing.progress(i, elapsed) * f64::from(glyph.steps.total_length);
        if draw_glyph(surface, glyph, target, style)? {
            report.drawn += 1;
        } else {
            report.skipped += 1;
        }
    }
    Ok(report)
}

/// Stroke the first `target_length` pixels of one glyph.
///
/// Returns `false` without touching the surface when nothing is revealed.
pub fn draw_glyph<S: DrawSurface + ?Sized>(
    surface: &mut S,
    glyph: GlyphRef<'_>,
    target_length: f64,
    style: &StrokeStyle,
) -> TitleResult<bool> {
    if target_length.is_nan() || target_length <= 0.0 {
        return Ok(false);
    }
    let Some(cursor) = glyph.steps.locate(target_length) else {
        return Ok(false);
    };
    let commands = glyph
        .outline
        .commands
        .get(..=cursor.command_index)
        .ok_or_else(|| {
            TitleError::render(format!(
                "step references command {} but the outline has {} commands",
                cursor.command_index,
                glyph.outline.commands.len()
            ))
        })?;
    let Some((active, replayed)) = commands.split_last() else {
        return Ok(false);
    };

    surface.begin_path();
    let last = replayed.iter().fold(Point::ZERO, |last, cmd| {
        emit_full(surface, *cmd);
        cmd.end_point().unwrap_or(last)
    });
    emit_partial(surface, last, *active, cursor.t);
    surface.stroke(style)?;
    Ok(true)
}

fn emit_full<S: DrawSurface + ?Sized>(surface: &mut S, cmd: OutlineCommand) {
    match cmd {
        OutlineCommand::MoveTo(p) => surface.move_to(p),
        OutlineCommand::LineTo(p) => surface.line_to(p),
        OutlineCommand::QuadTo(c, p) => surface.quad_to(c, p),
        OutlineCommand::CurveTo(c0, c1, p) => surface.curve_to(c0, c1, p),
        OutlineCommand::ClosePath => {}
    }
}

fn emit_partial<S: DrawSurface + ?Sized>(
    surface: &mut S,
    last: Point,
    cmd: OutlineCommand,
    t: f64,
) {
    match cmd {
        OutlineCommand::LineTo(p) => {
            if t >= 1.0 {
                surface.line_to(p);
            } else if t > 0.0 {
                surface.line_to(lerp_point(last, p, t));
            }
        }
        OutlineCommand::QuadTo(c, p) => {
            let (c, p) = quadratic_split(last, c, p, t);
            surface.quad_to(c, p);
        }
        OutlineCommand::CurveTo(c0, c1, p) => {
            let (c0, c1, p) = bezier_split(last, c0, c1, p, t);
            surface.curve_to(c0, c1, p);
        }
        // Steps are only built from drawable commands.
        OutlineCommand::MoveTo(_) | OutlineCommand::ClosePath => emit_full(surface, cmd),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
