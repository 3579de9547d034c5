//! polysketch is a fixed-rate 2D rendering sandbox.
//!
//! A [`Scene`] owns a parameter set that only changes at frame boundaries. Key presses arrive on
//! an input thread and are queued as mutations through an [`InputRouter`]; the [`SceneEngine`]
//! applies them, advances the scene and emits geometry into a [`Canvas`]. A live session is
//! driven by [`run_session`], which rasterises on the CPU and streams frames into a
//! [`FrameSink`].
//!
//! Two scenes ship with the crate:
//!
//! - [`CircleScene`]: a regular polygon approximating a circle, with keys for sides, radius and
//!   the fill/edge/background layers
//! - [`TinkerbellScene`]: a growing trace of the Tinkerbell attractor that cycles through four
//!   drawing modes
#![forbid(unsafe_code)]

mod clock;
mod config;
mod encode;
mod foundation;
mod input;
mod model;
mod render;
mod scene;
mod session;

pub use crate::foundation::core::{
    Affine, BezPath, CanvasSize, Fps, FrameIndex, Point, Projection, Rect, Rgb, Vec2,
};
pub use crate::foundation::error::{SketchError, SketchResult};

pub use crate::clock::{ClockHandle, ClockStats, FrameClock, FrameTick, Pacing};
pub use crate::config::{SceneKind, SketchConfig};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{
    DiscardSink, FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png,
};
pub use crate::input::keys::{KeyCode, KeyEvent};
pub use crate::input::router::{InputRouter, InputStats, read_keys, spawn_key_reader};
pub use crate::model::store::{Mutation, Mutator, ParamStore};
pub use crate::render::canvas::{
    Canvas, CanvasCmd, Primitive, RecordedPrimitive, RecordingCanvas,
};
pub use crate::render::cpu::{CpuCanvas, CpuCanvasOpts};
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::Scene;
pub use crate::scene::circle::{
    CircleAction, CircleParams, CircleScene, MAX_SIDES, MIN_SIDES, polygon_vertices,
};
pub use crate::scene::engine::{FrameReport, SceneEngine};
pub use crate::scene::tinkerbell::{
    MapMode, MapParams, MapStep, POINT_CAP, TinkerbellCoeffs, TinkerbellMap, TinkerbellScene,
    map_vertices, next_point_count,
};
pub use crate::session::live::{
    SessionOpts, SessionReport, SessionStats, render_frame_at, run_session,
};
