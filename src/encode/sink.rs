use std::path::{Path, PathBuf};

use crate::foundation::core::{CanvasSize, Fps, FrameIndex};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::FrameRGBA;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub size: CanvasSize,
    /// Nominal frame rate of the session.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing `FrameIndex` values
/// between one `begin` and the matching `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SketchResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SketchResult<()>;
}

/// Keeps every frame in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SketchResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Drops frames; used for live runs where only logs and timing matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink {
    pushed: u64,
}

impl DiscardSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pushed(&self) -> u64 {
        self.pushed
    }
}

impl FrameSink for DiscardSink {
    fn begin(&mut self, _cfg: SinkConfig) -> SketchResult<()> {
        self.pushed = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> SketchResult<()> {
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        Ok(())
    }
}

/// Writes each frame as `frame_NNNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    every: u64,
    written: Vec<PathBuf>,
    last_idx: Option<FrameIndex>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            every: 1,
            written: Vec::new(),
            last_idx: None,
        }
    }

    /// Only write frames whose index is a multiple of `n` (clamped to at least 1).
    pub fn every_nth(mut self, n: u64) -> Self {
        self.every = n.max(1);
        self
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> SketchResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SketchError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written.clear();
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SketchResult<()> {
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(SketchError::encode(
                "png sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);
        if idx.0 % self.every != 0 {
            return Ok(());
        }
        let path = self.frame_path(idx);
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence written"
        );
        Ok(())
    }
}

/// Write a single frame to `path` as PNG (straight alpha).
pub fn write_png(path: &Path, frame: &FrameRGBA) -> SketchResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(SketchError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            SketchError::encode(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| SketchError::encode(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
