use crate::foundation::core::{Affine, CanvasSize, Point, Projection, Rgb};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::canvas::{Canvas, Primitive};
use crate::render::frame::FrameRGBA;

/// Raster settings for [`CpuCanvas`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CpuCanvasOpts {
    /// Colour `clear` fills the target with (straight RGBA8).
    pub clear_rgba: [u8; 4],
    /// Edge length of the square drawn for each point, in pixels.
    pub point_size_px: f64,
    /// Stroke width for line primitives, in pixels.
    pub line_width_px: f64,
}

impl Default for CpuCanvasOpts {
    fn default() -> Self {
        Self {
            clear_rgba: [0, 0, 0, 255],
            point_size_px: 1.0,
            line_width_px: 1.0,
        }
    }
}

/// [`Canvas`] rasterised on the CPU with `vello_cpu`.
///
/// Vertices are projected to pixel space as they are emitted; each primitive is turned into a
/// single path when it ends. `flush` resolves the frame, available through [`CpuCanvas::frame`].
pub struct CpuCanvas {
    size: CanvasSize,
    opts: CpuCanvasOpts,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    to_pixels: Affine,
    color: Rgb,
    open: Option<OpenPrimitive>,
    frame: Option<FrameRGBA>,
}

struct OpenPrimitive {
    kind: Primitive,
    color: Rgb,
    vertices: Vec<Point>,
}

impl CpuCanvas {
    pub fn new(size: CanvasSize, opts: CpuCanvasOpts) -> SketchResult<Self> {
        let (w, h) = size.as_u16()?;
        if !(opts.point_size_px > 0.0) || !(opts.line_width_px > 0.0) {
            return Err(SketchError::validation(
                "point size and line width must be positive",
            ));
        }
        Ok(Self {
            size,
            opts,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            to_pixels: Projection::UNIT.to_pixel_affine(size),
            color: Rgb::WHITE,
            open: None,
            frame: None,
        })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Last flushed frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    pub fn take_frame(&mut self) -> Option<FrameRGBA> {
        self.frame.take()
    }

    fn draw(&mut self, prim: OpenPrimitive) {
        let OpenPrimitive {
            kind,
            color,
            vertices,
        } = prim;
        let [r, g, b] = color.to_rgb8();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, 255));

        match kind {
            Primitive::Points => {
                if vertices.is_empty() {
                    return;
                }
                let path = points_path(&vertices, self.opts.point_size_px);
                self.ctx.fill_path(&path);
            }
            Primitive::LineStrip | Primitive::LineLoop => {
                if vertices.len() < 2 {
                    return;
                }
                let path = polyline_path(&vertices, kind == Primitive::LineLoop);
                self.ctx
                    .set_stroke(vello_cpu::kurbo::Stroke::new(self.opts.line_width_px));
                self.ctx.stroke_path(&path);
            }
            Primitive::Polygon => {
                if vertices.len() < 3 {
                    return;
                }
                let path = polyline_path(&vertices, true);
                self.ctx.fill_path(&path);
            }
        }
    }
}

impl Canvas for CpuCanvas {
    fn clear(&mut self) {
        let [r, g, b, a] = self.opts.clear_rgba;
        self.open = None;
        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.size.width),
            f64::from(self.size.height),
        ));
    }

    fn set_projection(&mut self, projection: Projection) {
        if let Err(e) = projection.validate() {
            tracing::warn!("ignoring projection: {e}");
            return;
        }
        self.to_pixels = projection.to_pixel_affine(self.size);
    }

    fn begin_primitive(&mut self, kind: Primitive) {
        if let Some(prev) = self.open.take() {
            tracing::warn!(kind = ?prev.kind, "primitive begun before previous one ended");
            self.draw(prev);
        }
        self.open = Some(OpenPrimitive {
            kind,
            color: self.color,
            vertices: Vec::new(),
        });
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
        if let Some(p) = self.open.as_mut() {
            p.color = color;
        }
    }

    fn emit_vertex(&mut self, p: Point) {
        let px = self.to_pixels * p;
        if let Some(open) = self.open.as_mut() {
            open.vertices.push(px);
        }
    }

    fn end_primitive(&mut self) {
        if let Some(prim) = self.open.take() {
            self.draw(prim);
        }
    }

    fn flush(&mut self) -> SketchResult<()> {
        if let Some(prim) = self.open.take() {
            self.draw(prim);
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let data = self.pixmap.data_as_u8_slice().to_vec();
        let expected = (self.size.width as usize) * (self.size.height as usize) * 4;
        if data.len() != expected {
            return Err(SketchError::render("pixmap buffer size mismatch"));
        }
        self.frame = Some(FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data,
            premultiplied: true,
        });
        Ok(())
    }
}

fn cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn polyline_path(vertices: &[Point], closed: bool) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut it = vertices.iter();
    if let Some(first) = it.next() {
        out.move_to(cpu_point(*first));
    }
    for v in it {
        out.line_to(cpu_point(*v));
    }
    if closed {
        out.close_path();
    }
    out
}

fn points_path(vertices: &[Point], size_px: f64) -> vello_cpu::kurbo::BezPath {
    let h = size_px * 0.5;
    let mut out = vello_cpu::kurbo::BezPath::new();
    for v in vertices {
        out.move_to((v.x - h, v.y - h));
        out.line_to((v.x + h, v.y - h));
        out.line_to((v.x + h, v.y + h));
        out.line_to((v.x - h, v.y + h));
        out.close_path();
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
