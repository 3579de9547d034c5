use crate::foundation::core::{Point, Projection, Rgb};
use crate::foundation::error::SketchResult;

/// How the vertices between `begin_primitive` and `end_primitive` are assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Primitive {
    /// Each vertex is an isolated point.
    Points,
    /// Consecutive vertices joined by segments, left open.
    LineStrip,
    /// Like `LineStrip`, with a closing segment back to the first vertex.
    LineLoop,
    /// Filled convex polygon through all vertices.
    Polygon,
}

/// Immediate-mode drawing target driven by the scene engine once per frame.
///
/// Call order within a frame: `clear`, `set_projection`, any number of
/// `begin_primitive` / `set_color` / `emit_vertex` / `end_primitive` groups, then `flush`.
pub trait Canvas {
    /// Reset the target to the clear colour.
    fn clear(&mut self);

    /// World rectangle mapped onto the full target for subsequent primitives.
    fn set_projection(&mut self, projection: Projection);

    fn begin_primitive(&mut self, kind: Primitive);

    /// Colour for the current primitive (and later ones until changed).
    fn set_color(&mut self, color: Rgb);

    fn emit_vertex(&mut self, p: Point);

    fn end_primitive(&mut self);

    /// Finish the frame.
    fn flush(&mut self) -> SketchResult<()>;
}

/// One recorded [`Canvas`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCmd {
    Clear,
    SetProjection(Projection),
    Begin(Primitive),
    SetColor(Rgb),
    Vertex(Point),
    End,
    Flush,
}

/// Canvas that records every call, for inspecting geometry without rasterising.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    cmds: Vec<CanvasCmd>,
}

/// A closed-off primitive reconstructed from a recording.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPrimitive {
    pub kind: Primitive,
    pub color: Option<Rgb>,
    pub vertices: Vec<Point>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[CanvasCmd] {
        &self.cmds
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.cmds.clear();
    }

    /// Primitives recorded since the most recent `clear`, in submission order.
    pub fn primitives(&self) -> Vec<RecordedPrimitive> {
        let start = self
            .cmds
            .iter()
            .rposition(|c| *c == CanvasCmd::Clear)
            .map_or(0, |i| i + 1);

        let mut out = Vec::new();
        let mut color = None;
        let mut open: Option<RecordedPrimitive> = None;
        for cmd in &self.cmds[start..] {
            match cmd {
                CanvasCmd::SetColor(c) => {
                    color = Some(*c);
                    if let Some(p) = open.as_mut() {
                        p.color = Some(*c);
                    }
                }
                CanvasCmd::Begin(kind) => {
                    open = Some(RecordedPrimitive {
                        kind: *kind,
                        color,
                        vertices: Vec::new(),
                    });
                }
                CanvasCmd::Vertex(v) => {
                    if let Some(p) = open.as_mut() {
                        p.vertices.push(*v);
                    }
                }
                CanvasCmd::End => out.extend(open.take()),
                CanvasCmd::Clear | CanvasCmd::SetProjection(_) | CanvasCmd::Flush => {}
            }
        }
        out
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.cmds.push(CanvasCmd::Clear);
    }

    fn set_projection(&mut self, projection: Projection) {
        self.cmds.push(CanvasCmd::SetProjection(projection));
    }

    fn begin_primitive(&mut self, kind: Primitive) {
        self.cmds.push(CanvasCmd::Begin(kind));
    }

    fn set_color(&mut self, color: Rgb) {
        self.cmds.push(CanvasCmd::SetColor(color));
    }

    fn emit_vertex(&mut self, p: Point) {
        self.cmds.push(CanvasCmd::Vertex(p));
    }

    fn end_primitive(&mut self) {
        self.cmds.push(CanvasCmd::End);
    }

    fn flush(&mut self) -> SketchResult<()> {
        self.cmds.push(CanvasCmd::Flush);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
