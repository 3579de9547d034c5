//! Fixed-rate frame clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::SketchResult;

/// How ticks are spaced in wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Sleep until each frame's deadline; skip deadlines that were missed entirely.
    #[default]
    RealTime,
    /// Tick back to back as fast as the callback returns (offline rendering, tests).
    Unthrottled,
}

/// Shared stop flag for a running [`FrameClock`]. Cheap to clone and send across threads.
#[derive(Clone, Debug, Default)]
pub struct ClockHandle {
    stop: Arc<AtomicBool>,
}

impl ClockHandle {
    /// Ask the clock to stop before its next tick. The tick in flight, if any, completes.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

/// One invocation of the frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTick {
    pub index: FrameIndex,
    /// Time since the clock started.
    pub elapsed: Duration,
}

/// Totals reported when a clock run ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockStats {
    pub ticks: u64,
    /// Deadlines skipped because the previous frame overran.
    pub dropped: u64,
    pub elapsed: Duration,
}

/// Invokes a callback at a nominal fixed rate until stopped or a frame limit is hit.
///
/// The callback runs on the thread that called [`FrameClock::run`], one tick at a time, so it is
/// never re-entered. Timing is best effort: late frames push the schedule back rather than
/// bursting to catch up.
#[derive(Debug)]
pub struct FrameClock {
    fps: Fps,
    pacing: Pacing,
    frame_limit: Option<u64>,
    handle: ClockHandle,
}

impl FrameClock {
    pub fn new(fps: Fps, pacing: Pacing) -> Self {
        Self {
            fps,
            pacing,
            frame_limit: None,
            handle: ClockHandle::default(),
        }
    }

    /// Stop after `limit` ticks (`None` runs until stopped).
    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Share an existing stop flag, e.g. one already handed to the input thread.
    pub fn with_handle(mut self, handle: ClockHandle) -> Self {
        self.handle = handle;
        self
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn handle(&self) -> ClockHandle {
        self.handle.clone()
    }

    /// Drive `on_tick` until the handle is stopped, the frame limit is reached, or the callback
    /// fails. A callback error stops the clock and is returned.
    pub fn run<F>(&mut self, mut on_tick: F) -> SketchResult<ClockStats>
    where
        F: FnMut(FrameTick) -> SketchResult<()>,
    {
        let period = self.fps.frame_period();
        let start = Instant::now();
        let mut deadline = start;
        let mut stats = ClockStats::default();

        loop {
            if self.handle.is_stopped() {
                break;
            }
            if self.frame_limit.is_some_and(|n| stats.ticks >= n) {
                break;
            }

            if self.pacing == Pacing::RealTime {
                let now = Instant::now();
                if now < deadline {
                    std::thread::sleep(deadline - now);
                    if self.handle.is_stopped() {
                        break;
                    }
                } else {
                    let late = now - deadline;
                    if late >= period {
                        let missed = (late.as_nanos() / period.as_nanos().max(1)) as u64;
                        stats.dropped += missed;
                        deadline = now;
                        tracing::warn!(
                            frame = stats.ticks,
                            missed,
                            late_ms = late.as_secs_f64() * 1000.0,
                            "frame clock fell behind"
                        );
                    }
                }
            }

            let tick = FrameTick {
                index: FrameIndex(stats.ticks),
                elapsed: start.elapsed(),
            };
            if let Err(e) = on_tick(tick) {
                self.handle.stop();
                return Err(e);
            }
            stats.ticks += 1;
            deadline += period;
        }

        stats.elapsed = start.elapsed();
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../tests/unit/clock.rs"]
mod tests;
