//! Title animation settings.
//!
//! Every field has a default, so a config file only needs the values it changes.

use std::path::Path;

use crate::animation::ease::Ease;
use crate::animation::schedule::GlyphTiming;
use crate::font::load::FontSource;
use crate::foundation::core::{Fps, Rgba8};
use crate::foundation::error::{TitleError, TitleResult};
use crate::render::surface::StrokeStyle;

/// Text rendered when none is configured.
pub const DEFAULT_TEXT: &str = "SOLIPSISTIC.NET";
/// Font fetched when none is configured.
pub const DEFAULT_FONT_URL: &str = "https://solipsistic.net/Fonts/ZenDots.ttf";

/// Complete set of title animation settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleConfig {
    /// Title text, drawn left to right.
    pub text: String,
    /// Font file path or URL.
    pub font: FontSource,
    /// Font size in pixels.
    pub font_size: f64,
    /// Stroke width in pixels, applied to every glyph.
    pub stroke_width: f64,
    /// Stroke color.
    pub stroke_color: Rgba8,
    /// Surface clear color.
    pub background: Rgba8,
    /// Seconds one glyph takes to draw.
    pub draw_duration: f64,
    /// Progress curve.
    pub easing: Ease,
    /// Seconds between the starts of consecutive glyphs.
    pub stagger_delay: f64,
    /// Seconds of blank output before the first animated frame.
    pub startup_delay: f64,
    /// Empty border around the text, in pixels.
    pub padding: f64,
    /// Output frame rate.
    pub fps: Fps,
    /// Seconds the finished title is held at the end of a rendered range.
    pub hold: f64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            font: FontSource::Url(DEFAULT_FONT_URL.to_owned()),
            font_size: 80.0,
            stroke_width: 2.0,
            stroke_color: Rgba8::WHITE,
            background: Rgba8::TRANSPARENT,
            draw_duration: 2.0,
            easing: Ease::default(),
            stagger_delay: 0.075,
            startup_delay: 0.5,
            padding: 2.0,
            fps: Fps { num: 60, den: 1 },
            hold: 1.0,
        }
    }
}

impl TitleConfig {
    /// Load a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> TitleResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse JSON text.
    pub fn from_json(json: &str) -> TitleResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TitleError::validation(format!("invalid config JSON: {e}")))
    }

    /// Check every value the animation depends on.
    pub fn validate(&self) -> TitleResult<()> {
        if self.text.is_empty() {
            return Err(TitleError::validation("text must not be empty"));
        }
        positive("font_size", self.font_size)?;
        positive("stroke_width", self.stroke_width)?;
        non_negative("startup_delay", self.startup_delay)?;
        non_negative("padding", self.padding)?;
        non_negative("hold", self.hold)?;
        Fps::new(self.fps.num, self.fps.den)?;
        self.timing().validate()
    }

    /// Per-glyph timing derived from this config.
    pub fn timing(&self) -> GlyphTiming {
        GlyphTiming {
            stagger_delay: self.stagger_delay,
            draw_duration: self.draw_duration,
            ease: self.easing,
        }
    }

    /// Stroke style derived from this config.
    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color,
            width: self.stroke_width,
        }
    }
}

fn positive(name: &str, v: f64) -> TitleResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(TitleError::validation(format!("{name} must be > 0 (got {v})")))
    }
}

fn non_negative(name: &str, v: f64) -> TitleResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(TitleError::validation(format!(
            "{name} must be >= 0 (got {v})"
        )))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
