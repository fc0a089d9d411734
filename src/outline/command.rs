use kurbo::{BezPath, PathEl, Point, Rect, Shape as _};

use crate::foundation::core::Canvas;
use crate::foundation::error::{TitleError, TitleResult};

/// One drawing command of a glyph outline, in drawing-surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineCommand {
    /// Start a new contour.
    MoveTo(Point),
    /// Straight segment to the point.
    LineTo(Point),
    /// Quadratic Bezier `(control, end)`.
    QuadTo(Point, Point),
    /// Cubic Bezier `(control0, control1, end)`.
    CurveTo(Point, Point, Point),
    /// Close the current contour.
    ClosePath,
}

impl OutlineCommand {
    /// End point of the command, `None` for [`OutlineCommand::ClosePath`].
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::QuadTo(_, p) | Self::CurveTo(_, _, p) => {
                Some(p)
            }
            Self::ClosePath => None,
        }
    }

    fn to_path_el(self) -> PathEl {
        match self {
            Self::MoveTo(p) => PathEl::MoveTo(p),
            Self::LineTo(p) => PathEl::LineTo(p),
            Self::QuadTo(c, p) => PathEl::QuadTo(c, p),
            Self::CurveTo(c0, c1, p) => PathEl::CurveTo(c0, c1, p),
            Self::ClosePath => PathEl::ClosePath,
        }
    }
}

impl From<PathEl> for OutlineCommand {
    fn from(el: PathEl) -> Self {
        match el {
            PathEl::MoveTo(p) => Self::MoveTo(p),
            PathEl::LineTo(p) => Self::LineTo(p),
            PathEl::QuadTo(c, p) => Self::QuadTo(c, p),
            PathEl::CurveTo(c0, c1, p) => Self::CurveTo(c0, c1, p),
            PathEl::ClosePath => Self::ClosePath,
        }
    }
}

/// Ordered outline commands for one character.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphOutline {
    /// Commands in drawing order.
    pub commands: Vec<OutlineCommand>,
}

impl GlyphOutline {
    /// Wrap an ordered command list.
    pub fn new(commands: Vec<OutlineCommand>) -> Self {
        Self { commands }
    }

    /// Convert from a `kurbo` path.
    pub fn from_bez_path(path: &BezPath) -> Self {
        Self::new(path.elements().iter().copied().map(Into::into).collect())
    }

    /// Convert to a `kurbo` path.
    pub fn to_bez_path(&self) -> BezPath {
        BezPath::from_vec(self.commands.iter().map(|c| c.to_path_el()).collect())
    }

    /// Return `true` when there are no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Geometric bounding box, `None` for outlines without points.
    pub fn bounds(&self) -> Option<Rect> {
        if self.commands.iter().all(|c| c.end_point().is_none()) {
            return None;
        }
        Some(self.to_bez_path().bounding_box())
    }

    /// Validate and convert raw (opentype-style) commands of glyph `glyph`.
    pub fn from_raw(glyph: usize, raw: &[RawCommand]) -> TitleResult<Self> {
        raw.iter()
            .enumerate()
            .map(|(i, cmd)| cmd.to_command(glyph, i))
            .collect::<TitleResult<Vec<_>>>()
            .map(Self::new)
    }
}

/// Loosely typed outline command, as exported by JavaScript font libraries.
///
/// `type` is one of `M`, `L`, `Q`, `C`, `Z`; coordinates are optional so that malformed input
/// can be reported instead of rejected by the deserializer.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawCommand {
    /// Command letter.
    #[serde(rename = "type")]
    pub kind: String,
    /// End point x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// End point y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// First control point x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    /// First control point y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    /// Second control point x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    /// Second control point y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
}

impl RawCommand {
    fn to_command(&self, glyph: usize, index: usize) -> TitleResult<OutlineCommand> {
        let point = |x: Option<f64>, y: Option<f64>, what: &str| -> TitleResult<Point> {
            match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(Point::new(x, y)),
                _ => Err(TitleError::outline(format!(
                    "glyph {glyph} command {index} ('{}'): missing or non-finite {what}",
                    self.kind
                ))),
            }
        };

        match self.kind.as_str() {
            "M" => Ok(OutlineCommand::MoveTo(point(self.x, self.y, "end point")?)),
            "L" => Ok(OutlineCommand::LineTo(point(self.x, self.y, "end point")?)),
            "Q" => Ok(OutlineCommand::QuadTo(
                point(self.x1, self.y1, "control point")?,
                point(self.x, self.y, "end point")?,
            )),
            "C" => Ok(OutlineCommand::CurveTo(
                point(self.x1, self.y1, "first control point")?,
                point(self.x2, self.y2, "second control point")?,
                point(self.x, self.y, "end point")?,
            )),
            "Z" => Ok(OutlineCommand::ClosePath),
            other => Err(TitleError::outline(format!(
                "glyph {glyph} command {index}: unknown command type '{other}'"
            ))),
        }
    }
}

impl From<OutlineCommand> for RawCommand {
    fn from(cmd: OutlineCommand) -> Self {
        let kind = |k: &str| k.to_owned();
        match cmd {
            OutlineCommand::MoveTo(p) => Self {
                kind: kind("M"),
                x: Some(p.x),
                y: Some(p.y),
                ..Self::default()
            },
            OutlineCommand::LineTo(p) => Self {
                kind: kind("L"),
                x: Some(p.x),
                y: Some(p.y),
                ..Self::default()
            },
            OutlineCommand::QuadTo(c, p) => Self {
                kind: kind("Q"),
                x: Some(p.x),
                y: Some(p.y),
                x1: Some(c.x),
                y1: Some(c.y),
                ..Self::default()
            },
            OutlineCommand::CurveTo(c0, c1, p) => Self {
                kind: kind("C"),
                x: Some(p.x),
                y: Some(p.y),
                x1: Some(c0.x),
                y1: Some(c0.y),
                x2: Some(c1.x),
                y2: Some(c1.y),
            },
            OutlineCommand::ClosePath => Self {
                kind: kind("Z"),
                ..Self::default()
            },
        }
    }
}

/// Serialized set of per-glyph outlines, e.g. dumped from a browser font library.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct OutlineDump {
    /// Surface size; derived from the outline bounds when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Canvas>,
    /// One raw command list per glyph, in string order.
    pub glyphs: Vec<Vec<RawCommand>>,
}

impl OutlineDump {
    /// Parse JSON text.
    pub fn from_json(json: &str) -> TitleResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TitleError::outline(format!("invalid outline JSON: {e}")))
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> TitleResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read outline file '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Build a dump from already validated outlines.
    pub fn from_outlines(canvas: Option<Canvas>, outlines: &[GlyphOutline]) -> Self {
        Self {
            canvas,
            glyphs: outlines
                .iter()
                .map(|o| o.commands.iter().copied().map(RawCommand::from).collect())
                .collect(),
        }
    }

    /// Validate every glyph, failing on the first malformed command.
    pub fn to_outlines(&self) -> TitleResult<Vec<GlyphOutline>> {
        self.glyphs
            .iter()
            .enumerate()
            .map(|(i, raw)| GlyphOutline::from_raw(i, raw))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/command.rs"]
mod tests;
