use kurbo::Point;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{TitleError, TitleResult};
use crate::render::backend::FrameRGBA;
use crate::render::surface::{DrawSurface, StrokeStyle};

/// CPU raster drawing surface powered by `vello_cpu`.
///
/// A frame is: [`DrawSurface::clear`], any number of stroked paths, then
/// [`CpuSurface::read_frame`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Rgba8,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    path: vello_cpu::kurbo::BezPath,
}

impl CpuSurface {
    /// Create a surface of `canvas` size, cleared to `background` on every frame.
    pub fn new(canvas: Canvas, background: Rgba8) -> TitleResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| TitleError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| TitleError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(TitleError::render(format!(
                "surface must be non-empty (got {width}x{height})"
            )));
        }
        Ok(Self {
            width,
            height,
            background,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            path: vello_cpu::kurbo::BezPath::new(),
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Rasterize everything stroked since the last clear and read back premultiplied RGBA8.
    pub fn read_frame(&mut self) -> FrameRGBA {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl DrawSurface for CpuSurface {
    fn clear(&mut self) -> TitleResult<()> {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.path = vello_cpu::kurbo::BezPath::new();
        if self.background.a > 0 {
            self.ctx.set_paint(color_to_cpu(self.background));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path = vello_cpu::kurbo::BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(point_to_cpu(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ensure_started(p);
        self.path.line_to(point_to_cpu(p));
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.ensure_started(c);
        self.path.quad_to(point_to_cpu(c), point_to_cpu(p));
    }

    fn curve_to(&mut self, c0: Point, c1: Point, p: Point) {
        self.ensure_started(c0);
        self.path
            .curve_to(point_to_cpu(c0), point_to_cpu(c1), point_to_cpu(p));
    }

    fn stroke(&mut self, style: &StrokeStyle) -> TitleResult<()> {
        if !(style.width.is_finite() && style.width > 0.0) {
            return Err(TitleError::render(format!(
                "stroke width must be > 0 (got {})",
                style.width
            )));
        }
        if self.path.elements().is_empty() {
            return Ok(());
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(style.color));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(style.width)
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        self.ctx.stroke_path(&self.path);
        Ok(())
    }
}

impl CpuSurface {
    // kurbo paths must start with a move; on an empty path the segment's first point is one.
    fn ensure_started(&mut self, first: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(point_to_cpu(first));
        }
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
