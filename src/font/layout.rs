use kurbo::Point;
use ttf_parser::gpos::{PairAdjustment, PositioningSubtable};
use ttf_parser::{GlyphId, Tag};

use crate::foundation::error::{TitleError, TitleResult};
use crate::font::load::FontData;
use crate::outline::command::{GlyphOutline, OutlineCommand};

/// Vertical metrics and advance-width extent of a line of text, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextBounds {
    /// Distance from the top edge to the baseline, rounded.
    pub baseline: f64,
    /// Sum of advances and kerning adjustments.
    pub width: f64,
    /// `ascender - descender`, rounded up.
    pub height: f64,
}

/// Font-level metrics in design units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FontMetrics {
    /// Design units per em.
    pub units_per_em: u16,
    /// Typographic ascender.
    pub ascender: i16,
    /// Typographic descender (usually negative).
    pub descender: i16,
}

impl FontData {
    /// Units-per-em, ascender and descender.
    pub fn metrics(&self) -> TitleResult<FontMetrics> {
        let face = self.face()?;
        Ok(FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
        })
    }

    /// Map each character to a glyph; unmapped characters use `.notdef` (glyph 0).
    pub fn string_to_glyphs(&self, text: &str) -> TitleResult<Vec<GlyphId>> {
        let face = self.face()?;
        Ok(text
            .chars()
            .map(|c| face.glyph_index(c).unwrap_or(GlyphId(0)))
            .collect())
    }

    /// Horizontal kerning adjustment between two glyphs, in design units.
    ///
    /// Pair adjustments of the GPOS `kern` feature win when the font has them; otherwise the
    /// legacy `kern` table (horizontal, non-variable subtables) is read. 0 when neither applies.
    pub fn kerning_value(&self, left: GlyphId, right: GlyphId) -> TitleResult<i16> {
        let face = self.face()?;
        Ok(kerning(&face, left, right))
    }

    /// Measure `text` set at `font_size` pixels.
    pub fn measure(&self, text: &str, font_size: f64) -> TitleResult<TextBounds> {
        let face = self.face()?;
        let scale = scale_for(&face, font_size)?;
        let glyphs = self.string_to_glyphs(text)?;
        let width = advances(&face, &glyphs, scale).last().copied().unwrap_or(0.0);
        let ascender = f64::from(face.ascender()) * scale;
        let descender = f64::from(face.descender()) * scale;
        Ok(TextBounds {
            baseline: ascender.round(),
            width,
            height: (ascender - descender).ceil(),
        })
    }

    /// Pixel-space outlines of every character of `text`, starting at pen position `(x, y)`.
    ///
    /// The y axis points down. Contours that end away from their start point get an explicit
    /// closing line so the closing edge is measured and drawn like any other segment.
    pub fn glyph_outlines(
        &self,
        text: &str,
        x: f64,
        y: f64,
        font_size: f64,
    ) -> TitleResult<Vec<GlyphOutline>> {
        let face = self.face()?;
        let scale = scale_for(&face, font_size)?;
        let glyphs = self.string_to_glyphs(text)?;
        let pens = std::iter::once(0.0).chain(advances(&face, &glyphs, scale));

        Ok(glyphs
            .iter()
            .zip(pens)
            .map(|(&id, pen)| {
                let mut builder = OutlineCollector::new(Point::new(x + pen, y), scale);
                // Glyphs without outlines (spaces) yield an empty command list.
                let _ = face.outline_glyph(id, &mut builder);
                builder.finish()
            })
            .collect())
    }
}

fn scale_for(face: &ttf_parser::Face<'_>, font_size: f64) -> TitleResult<f64> {
    if !(font_size.is_finite() && font_size > 0.0) {
        return Err(TitleError::validation(format!(
            "font size must be > 0 (got {font_size})"
        )));
    }
    match face.units_per_em() {
        0 => Err(TitleError::font_load("font reports zero units per em")),
        upem => Ok(font_size / f64::from(upem)),
    }
}

fn kerning(face: &ttf_parser::Face<'_>, left: GlyphId, right: GlyphId) -> i16 {
    gpos_kerning(face, left, right).unwrap_or_else(|| legacy_kerning(face, left, right))
}

/// `None` when the font has no GPOS `kern` feature for the default language.
fn gpos_kerning(face: &ttf_parser::Face<'_>, left: GlyphId, right: GlyphId) -> Option<i16> {
    let gpos = face.tables().gpos?;
    let script = gpos
        .scripts
        .find(Tag::from_bytes(b"DFLT"))
        .or_else(|| gpos.scripts.find(Tag::from_bytes(b"latn")))
        .or_else(|| gpos.scripts.get(0))?;
    let feature = script
        .default_language?
        .feature_indices
        .into_iter()
        .filter_map(|i| gpos.features.get(i))
        .find(|f| f.tag == Tag::from_bytes(b"kern"))?;

    let value = feature
        .lookup_indices
        .into_iter()
        .filter_map(|i| gpos.lookups.get(i))
        .flat_map(|lookup| lookup.subtables.into_iter::<PositioningSubtable>())
        .find_map(|subtable| match subtable {
            PositioningSubtable::Pair(pair) => pair_kerning(&pair, left, right),
            _ => None,
        });
    Some(value.unwrap_or(0))
}

// A class-based subtable that covers `left` decides the pair, even with a zero value; a
// glyph-pair subtable only decides when it lists `right`.
fn pair_kerning(pair: &PairAdjustment<'_>, left: GlyphId, right: GlyphId) -> Option<i16> {
    let covered = pair.coverage().get(left)?;
    match pair {
        PairAdjustment::Format1 { sets, .. } => {
            let (first, _) = sets.get(covered)?.get(right)?;
            Some(first.x_advance)
        }
        PairAdjustment::Format2 {
            classes, matrix, ..
        } => Some(
            matrix
                .get((classes.0.get(left), classes.1.get(right)))
                .map_or(0, |(first, _)| first.x_advance),
        ),
    }
}

fn legacy_kerning(face: &ttf_parser::Face<'_>, left: GlyphId, right: GlyphId) -> i16 {
    let Some(kern) = face.tables().kern else {
        return 0;
    };
    kern.subtables
        .into_iter()
        .filter(|st| st.horizontal && !st.variable)
        .find_map(|st| st.glyphs_kerning(left, right))
        .unwrap_or(0)
}

/// Running pen position after each glyph: advance plus kerning against the next glyph.
fn advances(face: &ttf_parser::Face<'_>, glyphs: &[GlyphId], scale: f64) -> Vec<f64> {
    glyphs
        .iter()
        .enumerate()
        .scan(0.0, |pen, (i, &id)| {
            *pen += f64::from(face.glyph_hor_advance(id).unwrap_or(0)) * scale;
            if let Some(&next) = glyphs.get(i + 1) {
                *pen += f64::from(kerning(face, id, next)) * scale;
            }
            Some(*pen)
        })
        .collect()
}

struct OutlineCollector {
    origin: Point,
    scale: f64,
    commands: Vec<OutlineCommand>,
    contour_start: Option<Point>,
    current: Point,
}

impl OutlineCollector {
    fn new(origin: Point, scale: f64) -> Self {
        Self {
            origin,
            scale,
            commands: Vec::new(),
            contour_start: None,
            current: origin,
        }
    }

    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.origin.x + f64::from(x) * self.scale,
            self.origin.y - f64::from(y) * self.scale,
        )
    }

    fn finish(self) -> GlyphOutline {
        GlyphOutline::new(self.commands)
    }
}

impl ttf_parser::OutlineBuilder for OutlineCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.commands.push(OutlineCommand::MoveTo(p));
        self.contour_start = Some(p);
        self.current = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.commands.push(OutlineCommand::LineTo(p));
        self.current = p;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p = self.map(x, y);
        self.commands
            .push(OutlineCommand::QuadTo(self.map(x1, y1), p));
        self.current = p;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p = self.map(x, y);
        self.commands.push(OutlineCommand::CurveTo(
            self.map(x1, y1),
            self.map(x2, y2),
            p,
        ));
        self.current = p;
    }

    fn close(&mut self) {
        if let Some(start) = self.contour_start.take()
            && start != self.current
        {
            self.commands.push(OutlineCommand::LineTo(start));
            self.current = start;
        }
        self.commands.push(OutlineCommand::ClosePath);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/font/layout.rs"]
mod tests;
