//! Tinkerbell map point cloud that grows every frame and cycles through four display modes.

use crate::foundation::core::{Point, Projection, Rgb};
use crate::input::keys::KeyEvent;
use crate::model::store::Mutation;
use crate::render::canvas::{Canvas, Primitive};
use crate::scene::Scene;

/// Point count above which the cloud restarts in the next mode.
pub const POINT_CAP: u32 = 100_000;
const GROWTH: f64 = 1.02;

/// Display mode of the map. Lines and alternate coordinates are pure functions of the mode.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum MapMode {
    /// Points at `(x, y)`.
    #[default]
    Points,
    /// Line strip through `(x, y)`.
    Lines,
    /// Line strip through `(y_prev, y)`.
    AltLines,
    /// Points at `(y_prev, y)`.
    AltPoints,
}

impl MapMode {
    pub const ALL: [Self; 4] = [Self::Points, Self::Lines, Self::AltLines, Self::AltPoints];

    pub fn index(self) -> u8 {
        match self {
            Self::Points => 0,
            Self::Lines => 1,
            Self::AltLines => 2,
            Self::AltPoints => 3,
        }
    }

    pub fn from_index(i: u8) -> Option<Self> {
        Self::ALL.get(usize::from(i)).copied()
    }

    /// Next mode, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(usize::from(self.index()) + 1) % Self::ALL.len()]
    }

    pub fn line_mode_enabled(self) -> bool {
        matches!(self, Self::Lines | Self::AltLines)
    }

    pub fn alt_coords_enabled(self) -> bool {
        matches!(self, Self::AltLines | Self::AltPoints)
    }

    pub fn primitive(self) -> Primitive {
        if self.line_mode_enabled() {
            Primitive::LineStrip
        } else {
            Primitive::Points
        }
    }
}

/// Parameters of the map scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MapParams {
    /// Number of map iterations drawn this frame, always >= 1.
    pub point_count: u32,
    pub mode: MapMode,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            point_count: 1,
            mode: MapMode::Points,
        }
    }
}

impl MapParams {
    /// One frame of growth. Returns `true` when the cap was crossed and the mode advanced.
    pub fn advance(&mut self) -> bool {
        let wrapped = self.point_count > POINT_CAP;
        if wrapped {
            self.point_count = 1;
            self.mode = self.mode.next();
        } else {
            self.point_count += 1;
        }
        self.point_count = grow(self.point_count);
        wrapped
    }
}

fn grow(p: u32) -> u32 {
    (f64::from(p) * GROWTH).floor() as u32 + 1
}

/// Point count following `p` after one frame.
pub fn next_point_count(p: u32) -> u32 {
    let mut params = MapParams {
        point_count: p,
        mode: MapMode::Points,
    };
    params.advance();
    params.point_count
}

/// Map coefficients and seed point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TinkerbellCoeffs {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub seed: (f64, f64),
}

impl Default for TinkerbellCoeffs {
    fn default() -> Self {
        Self {
            a: 0.9,
            b: -0.6013,
            c: 2.0,
            d: 0.5,
            seed: (-0.72, -0.64),
        }
    }
}

/// One application of the map: the state before and after.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapStep {
    pub prev: Point,
    pub next: Point,
}

impl MapStep {
    /// Where this step lands on the canvas in `mode`.
    pub fn vertex(&self, mode: MapMode) -> Point {
        let y = (self.next.y + 0.5) / 1.1;
        if mode.alt_coords_enabled() {
            Point::new((self.prev.y + 0.5) / 1.1, y)
        } else {
            Point::new(self.next.x + 0.4, y)
        }
    }
}

/// Unbounded trajectory of the map starting at the seed.
#[derive(Clone, Debug)]
pub struct TinkerbellMap {
    k: TinkerbellCoeffs,
    x: f64,
    y: f64,
}

impl TinkerbellMap {
    pub fn new(k: TinkerbellCoeffs) -> Self {
        Self {
            k,
            x: k.seed.0,
            y: k.seed.1,
        }
    }
}

impl Iterator for TinkerbellMap {
    type Item = MapStep;

    fn next(&mut self) -> Option<MapStep> {
        let TinkerbellCoeffs { a, b, c, d, .. } = self.k;
        let (x, y) = (self.x, self.y);
        let nx = x * x - y * y + a * x + b * y;
        let ny = 2.0 * x * y + c * x + d * y;
        self.x = nx;
        self.y = ny;
        Some(MapStep {
            prev: Point::new(x, y),
            next: Point::new(nx, ny),
        })
    }
}

/// Vertices for a frame, regenerated from the seed: depends only on `count` and `mode`.
pub fn map_vertices(
    k: TinkerbellCoeffs,
    count: u32,
    mode: MapMode,
) -> impl Iterator<Item = Point> {
    TinkerbellMap::new(k)
        .take(count as usize)
        .map(move |s| s.vertex(mode))
}

/// Tinkerbell map scene.
#[derive(Clone, Copy, Debug, Default)]
pub struct TinkerbellScene {
    pub coeffs: TinkerbellCoeffs,
}

impl Scene for TinkerbellScene {
    type Params = MapParams;

    fn name(&self) -> &'static str {
        "tinkerbell"
    }

    fn initial_params(&self) -> MapParams {
        MapParams::default()
    }

    fn projection(&self) -> Projection {
        Projection::UNIT
    }

    fn advance(&mut self, p: &mut MapParams) {
        if p.advance() {
            tracing::debug!(mode = p.mode.index(), "tinkerbell mode advanced");
        }
    }

    fn render(&self, p: &MapParams, canvas: &mut dyn Canvas) {
        canvas.begin_primitive(p.mode.primitive());
        canvas.set_color(Rgb::WHITE);
        for v in map_vertices(self.coeffs, p.point_count, p.mode) {
            canvas.emit_vertex(v);
        }
        canvas.end_primitive();
    }

    fn key_mutation(_event: KeyEvent) -> Option<Mutation<MapParams>> {
        None
    }

    fn status_lines(&self, p: &MapParams) -> Vec<String> {
        vec![format!("Tinkerbell map (Points: {})", p.point_count)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tinkerbell.rs"]
mod tests;
