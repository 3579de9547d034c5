//! Regular polygon approximation of a circle with togglable layers.

use std::f64::consts::TAU;

use crate::foundation::core::{Point, Projection, Rgb};
use crate::input::keys::{KeyCode, KeyEvent};
use crate::model::store::Mutation;
use crate::render::canvas::{Canvas, Primitive};
use crate::scene::Scene;

pub const MIN_SIDES: u32 = 3;
pub const MAX_SIDES: u32 = 128;

// Keeps `radius` strictly positive and finite under repeated halving/doubling.
const MIN_RADIUS: f64 = 1e-9;
const MAX_RADIUS: f64 = 1e9;

/// Parameters of the circle scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleParams {
    /// Polygon side count, in `[MIN_SIDES, MAX_SIDES]`.
    pub sides: u32,
    /// Circumradius in world units.
    pub radius: f64,
    pub fill: bool,
    pub edge: bool,
    pub background: bool,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            sides: 3,
            radius: 1.0,
            fill: true,
            edge: false,
            background: false,
        }
    }
}

/// Edits bound to keys in the circle scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CircleAction {
    DecrementSides,
    IncrementSides,
    ShrinkRadius,
    GrowRadius,
    ToggleFill,
    ToggleEdge,
    ToggleBackground,
}

impl CircleAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        Some(match key {
            KeyCode::Q => Self::DecrementSides,
            KeyCode::W => Self::IncrementSides,
            KeyCode::A => Self::ShrinkRadius,
            KeyCode::S => Self::GrowRadius,
            KeyCode::F => Self::ToggleFill,
            KeyCode::E => Self::ToggleEdge,
            KeyCode::B => Self::ToggleBackground,
            KeyCode::Other(_) => return None,
        })
    }

    /// Apply against the current values. `shift` switches radius steps from 1.1x to 2x.
    pub fn apply(self, shift: bool, p: &mut CircleParams) {
        let step = if shift { 2.0 } else { 1.1 };
        match self {
            Self::DecrementSides => p.sides = p.sides.saturating_sub(1).max(MIN_SIDES),
            Self::IncrementSides => p.sides = p.sides.saturating_add(1).min(MAX_SIDES),
            Self::ShrinkRadius => p.radius = (p.radius / step).clamp(MIN_RADIUS, MAX_RADIUS),
            Self::GrowRadius => p.radius = (p.radius * step).clamp(MIN_RADIUS, MAX_RADIUS),
            Self::ToggleFill => p.fill = !p.fill,
            Self::ToggleEdge => p.edge = !p.edge,
            Self::ToggleBackground => p.background = !p.background,
        }
    }

    pub fn into_mutation(self, shift: bool) -> Mutation<CircleParams> {
        Box::new(move |p| self.apply(shift, p))
    }
}

/// Vertices of a regular `sides`-gon of circumradius `radius` centred at the origin,
/// starting on the positive x axis and turning counter-clockwise.
pub fn polygon_vertices(sides: u32, radius: f64) -> impl Iterator<Item = Point> {
    (0..sides).map(move |i| {
        let theta = TAU * (f64::from(i) / f64::from(sides));
        Point::new(radius * theta.cos(), radius * theta.sin())
    })
}

pub fn draw_polygon(
    canvas: &mut dyn Canvas,
    sides: u32,
    radius: f64,
    color: Rgb,
    primitive: Primitive,
) {
    canvas.begin_primitive(primitive);
    canvas.set_color(color);
    for v in polygon_vertices(sides, radius) {
        canvas.emit_vertex(v);
    }
    canvas.end_primitive();
}

/// Circle scene: background disc, filled polygon and polygon outline, back to front.
#[derive(Clone, Copy, Debug, Default)]
pub struct CircleScene;

impl CircleScene {
    pub const PROJECTION: Projection = Projection {
        left: -1.1,
        right: 1.1,
        bottom: -1.1,
        top: 1.1,
    };
}

impl Scene for CircleScene {
    type Params = CircleParams;

    fn name(&self) -> &'static str {
        "circle"
    }

    fn initial_params(&self) -> CircleParams {
        CircleParams::default()
    }

    fn projection(&self) -> Projection {
        Self::PROJECTION
    }

    fn render(&self, p: &CircleParams, canvas: &mut dyn Canvas) {
        if p.background {
            draw_polygon(canvas, MAX_SIDES, p.radius, Rgb::WHITE, Primitive::Polygon);
        }
        if p.fill {
            draw_polygon(canvas, p.sides, p.radius, Rgb::YELLOW, Primitive::Polygon);
        }
        if p.edge {
            draw_polygon(canvas, p.sides, p.radius, Rgb::RED, Primitive::LineLoop);
        }
    }

    fn key_mutation(event: KeyEvent) -> Option<Mutation<CircleParams>> {
        CircleAction::from_key(event.key).map(|a| a.into_mutation(event.shift))
    }

    fn status_lines(&self, p: &CircleParams) -> Vec<String> {
        vec![
            format!("[q|w] Sides =      {}", p.sides),
            format!("[a|s] Radius =     {:.3}", p.radius),
            format!("[f]   Fill shape = {}", p.fill),
            format!("[e]   Edge shape = {}", p.edge),
            format!("[b]   Background = {}", p.background),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/circle.rs"]
mod tests;
