use crate::foundation::core::FrameIndex;
use crate::foundation::error::SketchResult;
use crate::input::router::InputRouter;
use crate::model::store::{Mutator, ParamStore};
use crate::render::canvas::Canvas;
use crate::scene::Scene;

/// What one engine frame did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Index of the frame just produced.
    pub index: FrameIndex,
    /// Mutations applied at this frame's boundary.
    pub mutations_applied: usize,
}

/// Owns a scene and its parameter store; produces one frame per call.
///
/// Per frame, in order: drain pending mutations, advance the scene, then emit geometry.
/// All writes to the parameters happen inside [`SceneEngine::frame`] / [`SceneEngine::step`],
/// on whichever thread owns the engine.
pub struct SceneEngine<S: Scene> {
    scene: S,
    store: ParamStore<S::Params>,
    next_frame: FrameIndex,
    mutations_applied: u64,
}

impl<S: Scene> SceneEngine<S> {
    pub fn new(scene: S) -> Self {
        let store = ParamStore::new(scene.initial_params());
        Self {
            scene,
            store,
            next_frame: FrameIndex(0),
            mutations_applied: 0,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Parameters as of the last frame boundary.
    pub fn params(&self) -> &S::Params {
        self.store.get()
    }

    /// Index the next call to `frame` or `step` will produce.
    pub fn next_frame(&self) -> FrameIndex {
        self.next_frame
    }

    /// Total mutations applied over the engine's lifetime.
    pub fn mutations_applied(&self) -> u64 {
        self.mutations_applied
    }

    pub fn mutator(&self) -> Mutator<S::Params> {
        self.store.mutator()
    }

    /// Key router feeding this engine's queue; hand it to the input thread.
    pub fn input_router(&self) -> InputRouter<S> {
        InputRouter::new(self.store.mutator())
    }

    fn boundary(&mut self) -> FrameReport {
        let applied = self.store.apply_pending();
        self.mutations_applied += applied as u64;
        self.scene.advance(self.store.params_mut());

        let index = self.next_frame;
        self.next_frame = index.next();
        FrameReport {
            index,
            mutations_applied: applied,
        }
    }

    /// Run the frame boundary and advance without drawing.
    pub fn step(&mut self) -> FrameReport {
        self.boundary()
    }

    /// Produce one frame on `canvas`.
    pub fn frame(&mut self, canvas: &mut dyn Canvas) -> SketchResult<FrameReport> {
        let report = self.boundary();
        if report.mutations_applied > 0 {
            tracing::trace!(
                frame = report.index.0,
                applied = report.mutations_applied,
                "applied pending mutations"
            );
        }

        canvas.clear();
        canvas.set_projection(self.scene.projection());
        self.scene.render(self.store.get(), canvas);
        canvas.flush()?;
        Ok(report)
    }

    pub fn status_lines(&self) -> Vec<String> {
        self.scene.status_lines(self.store.get())
    }

    /// Tear down: apply whatever is still queued, then release the store.
    ///
    /// Returns the final parameters and how many mutations this last drain applied. Mutators
    /// held elsewhere become inert.
    pub fn shutdown(mut self) -> (S::Params, usize) {
        let applied = self.store.apply_pending();
        self.mutations_applied += applied as u64;
        tracing::debug!(
            scene = self.scene.name(),
            applied,
            total = self.mutations_applied,
            "scene engine shut down"
        );
        (self.store.into_inner(), applied)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/engine.rs"]
mod tests;
