use crate::clock::{ClockHandle, FrameClock, Pacing};
use crate::config::SketchConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::cpu::CpuCanvas;
use crate::render::frame::FrameRGBA;
use crate::scene::Scene;
use crate::scene::engine::SceneEngine;

/// Options for [`run_session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOpts {
    pub fps: Fps,
    pub pacing: Pacing,
    /// Stop after this many frames; `None` runs until the stop handle fires.
    pub frame_limit: Option<u64>,
    /// Frames between status log lines; 0 disables them.
    pub status_every: u64,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            pacing: Pacing::RealTime,
            frame_limit: None,
            status_every: 60,
        }
    }
}

impl SessionOpts {
    pub fn from_config(cfg: &SketchConfig) -> Self {
        Self {
            fps: cfg.fps,
            pacing: cfg.pacing(),
            frame_limit: cfg.frames,
            status_every: cfg.status_every,
        }
    }
}

/// Live session statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames rendered and handed to the sink.
    pub frames_rendered: u64,
    /// Clock deadlines skipped because a frame overran.
    pub frames_dropped: u64,
    /// Mutations applied, including the final drain at teardown.
    pub mutations_applied: u64,
}

/// Outcome of a finished session.
#[derive(Debug)]
pub struct SessionReport<P> {
    pub stats: SessionStats,
    /// Parameters after the final drain.
    pub params: P,
}

/// Drive `engine` at the configured rate until `stop` fires or the frame limit is reached.
///
/// Each tick renders one frame on `canvas` and pushes it to `sink`. On exit the sink is
/// finalised, then queued mutations are applied one last time without rendering and the
/// parameter store is released; mutators still held by an input thread become inert.
#[tracing::instrument(skip_all, fields(scene = engine.scene().name()))]
pub fn run_session<S: Scene>(
    mut engine: SceneEngine<S>,
    canvas: &mut CpuCanvas,
    sink: &mut dyn FrameSink,
    opts: SessionOpts,
    stop: ClockHandle,
) -> SketchResult<SessionReport<S::Params>> {
    let cfg = SinkConfig {
        size: canvas.size(),
        fps: opts.fps,
    };
    sink.begin(cfg)?;
    tracing::info!(
        width = cfg.size.width,
        height = cfg.size.height,
        fps = opts.fps.as_f64(),
        pacing = ?opts.pacing,
        "session started"
    );

    let mut clock = FrameClock::new(opts.fps, opts.pacing)
        .with_frame_limit(opts.frame_limit)
        .with_handle(stop);
    let run = clock.run(|tick| {
        let report = engine.frame(canvas)?;
        let frame = canvas
            .take_frame()
            .ok_or_else(|| SketchError::render("canvas produced no frame"))?;
        sink.push_frame(report.index, &frame)?;
        if opts.status_every > 0 && tick.index.0 % opts.status_every == 0 {
            log_status(&engine, report.index);
        }
        Ok(())
    });

    // Finalise the sink even when the loop failed, but report the loop error first.
    let ended = sink.end();
    let rendered = engine.next_frame().0;
    let applied_live = engine.mutations_applied();
    let (params, drained) = engine.shutdown();
    let clock_stats = run?;
    ended?;

    let stats = SessionStats {
        frames_rendered: rendered,
        frames_dropped: clock_stats.dropped,
        mutations_applied: applied_live + drained as u64,
    };
    tracing::info!(
        frames = stats.frames_rendered,
        dropped = stats.frames_dropped,
        mutations = stats.mutations_applied,
        elapsed_ms = clock_stats.elapsed.as_secs_f64() * 1000.0,
        "session finished"
    );
    Ok(SessionReport { stats, params })
}

fn log_status<S: Scene>(engine: &SceneEngine<S>, frame: FrameIndex) {
    for line in engine.status_lines() {
        tracing::debug!(frame = frame.0, "{line}");
    }
}

/// Render frame `target` of a fresh engine without pacing.
///
/// Frames before `target` only run their boundary (mutations, then `advance`), so the result
/// equals the frame a live session would show at that index.
pub fn render_frame_at<S: Scene>(
    engine: &mut SceneEngine<S>,
    canvas: &mut CpuCanvas,
    target: FrameIndex,
) -> SketchResult<FrameRGBA> {
    if engine.next_frame() > target {
        return Err(SketchError::validation(format!(
            "frame {} already passed (engine is at {})",
            target.0,
            engine.next_frame().0
        )));
    }
    while engine.next_frame() < target {
        engine.step();
    }
    engine.frame(canvas)?;
    canvas
        .take_frame()
        .ok_or_else(|| SketchError::render("canvas produced no frame"))
}

#[cfg(test)]
#[path = "../../tests/unit/session/live.rs"]
mod tests;
