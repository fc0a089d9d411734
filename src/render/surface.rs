use kurbo::Point;

use crate::foundation::core::Rgba8;
use crate::foundation::error::TitleResult;

/// Fixed stroke style applied to every glyph path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Line width in pixels.
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::WHITE,
            width: 2.0,
        }
    }
}

/// 2D stroke-only drawing surface.
///
/// Paths are accumulated between [`DrawSurface::begin_path`] and [`DrawSurface::stroke`].
/// A segment command issued on an empty path first moves to the segment's first point (the
/// end point of a line, the first control point of a curve), like an HTML canvas does.
pub trait DrawSurface {
    /// Clear the whole surface.
    fn clear(&mut self) -> TitleResult<()>;
    /// Discard any accumulated path and start a new one.
    fn begin_path(&mut self);
    /// Start a new contour.
    fn move_to(&mut self, p: Point);
    /// Straight segment.
    fn line_to(&mut self, p: Point);
    /// Quadratic Bezier segment.
    fn quad_to(&mut self, c: Point, p: Point);
    /// Cubic Bezier segment.
    fn curve_to(&mut self, c0: Point, c1: Point, p: Point);
    /// Stroke the accumulated path.
    fn stroke(&mut self, style: &StrokeStyle) -> TitleResult<()>;
}

/// A single recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// [`DrawSurface::clear`].
    Clear,
    /// [`DrawSurface::begin_path`].
    BeginPath,
    /// [`DrawSurface::move_to`].
    MoveTo(Point),
    /// [`DrawSurface::line_to`].
    LineTo(Point),
    /// [`DrawSurface::quad_to`].
    QuadTo(Point, Point),
    /// [`DrawSurface::curve_to`].
    CurveTo(Point, Point, Point),
    /// [`DrawSurface::stroke`].
    Stroke(StrokeStyle),
}

/// Surface that records calls instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls since creation or the last [`RecordingSurface::take`].
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of recorded strokes.
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Stroke(_)))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) -> TitleResult<()> {
        self.ops.push(SurfaceOp::Clear);
        Ok(())
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(SurfaceOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(SurfaceOp::LineTo(p));
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.ops.push(SurfaceOp::QuadTo(c, p));
    }

    fn curve_to(&mut self, c0: Point, c1: Point, p: Point) {
        self.ops.push(SurfaceOp::CurveTo(c0, c1, p));
    }

    fn stroke(&mut self, style: &StrokeStyle) -> TitleResult<()> {
        self.ops.push(SurfaceOp::Stroke(*style));
        Ok(())
    }
}
