//! Path preprocessing.
//!
//! Every drawable command (line, quadratic, cubic) of a glyph becomes a [`Step`] carrying its
//! whole-pixel length and the length of everything drawn before it. The table is built once per
//! glyph; per-frame lookups map a drawn length back to a command and an intra-command parameter.

use kurbo::Point;

use crate::foundation::math::ceil_len;
use crate::geometry::primitives::{bezier_length, line_length, quadratic_length};
use crate::outline::command::{GlyphOutline, OutlineCommand};

/// A measured, drawable unit of a glyph outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Step {
    /// Index into the glyph's command list.
    pub command_index: usize,
    /// Total length of all steps before this one.
    pub offset: u32,
    /// Rounded-up segment length, always `> 0`.
    pub length: u32,
}

impl Step {
    /// Offset just past this step.
    pub fn end(&self) -> u32 {
        self.offset.saturating_add(self.length)
    }
}

/// Position of a drawn length inside a [`StepTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepCursor {
    /// Index of the active step in [`StepTable::steps`].
    pub step: usize,
    /// Command index of the active step.
    pub command_index: usize,
    /// Parameter within the active command, in `[0, 1]`.
    pub t: f64,
}

/// Ordered steps of one glyph plus its total length.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StepTable {
    /// Steps in drawing order with non-decreasing offsets.
    pub steps: Vec<Step>,
    /// Sum of all step lengths.
    pub total_length: u32,
}

impl StepTable {
    /// Measure every drawable command of `outline`.
    ///
    /// `MoveTo` only moves the cursor, `ClosePath` is ignored, and segments that round to a zero
    /// length still move the cursor without producing a step.
    pub fn build(outline: &GlyphOutline) -> Self {
        let (_, table) = outline.commands.iter().enumerate().fold(
            (Point::ZERO, Self::default()),
            |(last, mut table), (index, cmd)| {
                let length = match *cmd {
                    OutlineCommand::MoveTo(p) => return (p, table),
                    OutlineCommand::ClosePath => return (last, table),
                    OutlineCommand::LineTo(p) => line_length(last, p),
                    OutlineCommand::QuadTo(c, p) => quadratic_length(last, c, p),
                    OutlineCommand::CurveTo(c0, c1, p) => bezier_length(last, c0, c1, p),
                };
                let length = ceil_len(length);
                if length > 0 {
                    table.steps.push(Step {
                        command_index: index,
                        offset: table.total_length,
                        length,
                    });
                    table.total_length = table.total_length.saturating_add(length);
                }
                (cmd.end_point().unwrap_or(last), table)
            },
        );
        table
    }

    /// Return `true` when the glyph has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Locate the step containing drawn length `target`.
    ///
    /// The active step is the first whose end is at or beyond `target`; lengths past the end of
    /// the glyph clamp to the last step with `t = 1`. Returns `None` for empty tables.
    pub fn locate(&self, target: f64) -> Option<StepCursor> {
        let last = self.steps.len().checked_sub(1)?;
        let idx = self
            .steps
            .partition_point(|s| target > f64::from(s.end()))
            .min(last);
        let step = self.steps.get(idx)?;
        let local = (target - f64::from(step.offset)).clamp(0.0, f64::from(step.length));
        Some(StepCursor {
            step: idx,
            command_index: step.command_index,
            t: local / f64::from(step.length),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/steps.rs"]
mod tests;
