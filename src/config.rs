//! JSON session configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::Pacing;
use crate::foundation::core::{CanvasSize, Fps};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::cpu::CpuCanvasOpts;

/// Which scene a session runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Regular polygon approximating a circle.
    Circle,
    /// Growing Tinkerbell attractor trace.
    Tinkerbell,
}

impl SceneKind {
    pub fn default_size(self) -> (u32, u32) {
        match self {
            Self::Circle => (500, 500),
            Self::Tinkerbell => (1280, 720),
        }
    }
}

/// Fully resolved session settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SketchConfig {
    pub scene: SceneKind,
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    /// Stop after this many frames; `None` runs until stopped.
    pub frames: Option<u64>,
    /// Pace frames to the wall clock instead of rendering back to back.
    pub realtime: bool,
    pub clear_rgba: [u8; 4],
    pub point_size_px: f64,
    pub line_width_px: f64,
    /// Frames between status log lines; 0 disables them.
    pub status_every: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDef {
    scene: SceneKind,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    fps: Option<Fps>,
    #[serde(default)]
    frames: Option<u64>,
    #[serde(default)]
    realtime: Option<bool>,
    #[serde(default)]
    clear_rgba: Option<[u8; 4]>,
    #[serde(default)]
    point_size_px: Option<f64>,
    #[serde(default)]
    line_width_px: Option<f64>,
    #[serde(default)]
    status_every: Option<u64>,
}

impl SketchConfig {
    /// Defaults for `scene`: its native window size at 60 fps, black clear, 1px strokes.
    pub fn for_scene(scene: SceneKind) -> Self {
        let (width, height) = scene.default_size();
        Self {
            scene,
            width,
            height,
            fps: Fps::default(),
            frames: None,
            realtime: true,
            clear_rgba: [0, 0, 0, 255],
            point_size_px: 1.0,
            line_width_px: 1.0,
            status_every: 60,
        }
    }

    /// Parse from a JSON reader; omitted fields take the scene's defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> SketchResult<Self> {
        let def: ConfigDef = serde_json::from_reader(r)
            .map_err(|e| SketchError::config(format!("parse config JSON: {e}")))?;
        Ok(Self::from_def(def))
    }

    pub fn from_json_str(s: &str) -> SketchResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SketchError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    fn from_def(def: ConfigDef) -> Self {
        let base = Self::for_scene(def.scene);
        Self {
            scene: def.scene,
            width: def.width.unwrap_or(base.width),
            height: def.height.unwrap_or(base.height),
            fps: def.fps.unwrap_or(base.fps),
            frames: def.frames.or(base.frames),
            realtime: def.realtime.unwrap_or(base.realtime),
            clear_rgba: def.clear_rgba.unwrap_or(base.clear_rgba),
            point_size_px: def.point_size_px.unwrap_or(base.point_size_px),
            line_width_px: def.line_width_px.unwrap_or(base.line_width_px),
            status_every: def.status_every.unwrap_or(base.status_every),
        }
    }

    pub fn validate(&self) -> SketchResult<()> {
        self.canvas_size()?.as_u16()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if !(self.point_size_px.is_finite() && self.point_size_px > 0.0) {
            return Err(SketchError::validation("point_size_px must be > 0"));
        }
        if !(self.line_width_px.is_finite() && self.line_width_px > 0.0) {
            return Err(SketchError::validation("line_width_px must be > 0"));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> SketchResult<CanvasSize> {
        CanvasSize::new(self.width, self.height)
    }

    pub fn pacing(&self) -> Pacing {
        if self.realtime {
            Pacing::RealTime
        } else {
            Pacing::Unthrottled
        }
    }

    pub fn canvas_opts(&self) -> CpuCanvasOpts {
        CpuCanvasOpts {
            clear_rgba: self.clear_rgba,
            point_size_px: self.point_size_px,
            line_width_px: self.line_width_px,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
