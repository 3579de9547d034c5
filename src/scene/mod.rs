//! Scenes and the engine that drives them once per frame.

pub(crate) mod circle;
pub(crate) mod engine;
pub(crate) mod tinkerbell;

use crate::foundation::core::Projection;
use crate::input::keys::KeyEvent;
use crate::model::store::Mutation;
use crate::render::canvas::Canvas;

/// A drawable scene: a parameter set, optional autonomous state, and the geometry it emits.
///
/// The engine calls, per frame and strictly in this order: pending mutations are applied,
/// [`Scene::advance`], then [`Scene::render`].
pub trait Scene: Send {
    /// User-adjustable values owned by the engine's parameter store.
    type Params: Send + 'static;

    fn name(&self) -> &'static str;

    /// Values the parameter store starts with.
    fn initial_params(&self) -> Self::Params;

    /// World rectangle the scene draws into.
    fn projection(&self) -> Projection;

    /// Advance autonomous state by one frame. Runs after pending mutations are applied.
    fn advance(&mut self, _params: &mut Self::Params) {}

    /// Emit the geometry for the current frame. `clear`, projection and `flush` are handled by
    /// the engine.
    fn render(&self, params: &Self::Params, canvas: &mut dyn Canvas);

    /// Mutation bound to a key press, if the scene reacts to that key.
    fn key_mutation(event: KeyEvent) -> Option<Mutation<Self::Params>>
    where
        Self: Sized;

    /// Human-readable status, one entry per line.
    fn status_lines(&self, params: &Self::Params) -> Vec<String>;
}
