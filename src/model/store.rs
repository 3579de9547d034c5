//! Parameter store with a deferred mutation queue.
//!
//! Any thread may enqueue mutations through a [`Mutator`]; only the owner of the
//! [`ParamStore`] (the render context) applies them, at the frame boundary. Reads from the
//! render path therefore never observe a half-applied change.

use std::sync::mpsc;

/// A deferred, self-contained change to a parameter set.
pub type Mutation<P> = Box<dyn FnOnce(&mut P) + Send + 'static>;

/// Current values of a scene's user-adjustable parameters plus the queue of pending changes.
pub struct ParamStore<P> {
    params: P,
    tx: mpsc::Sender<Mutation<P>>,
    rx: mpsc::Receiver<Mutation<P>>,
}

impl<P> ParamStore<P> {
    /// Create a store holding `params` with an empty queue.
    pub fn new(params: P) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { params, tx, rx }
    }

    /// Values as of the last frame boundary.
    pub fn get(&self) -> &P {
        &self.params
    }

    /// Handle for enqueueing mutations from other execution contexts.
    pub fn mutator(&self) -> Mutator<P> {
        Mutator {
            tx: self.tx.clone(),
        }
    }

    /// Apply every queued mutation in FIFO order, each one exactly once.
    ///
    /// Must only be called at the frame boundary. Returns the number applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(mutation) = self.rx.try_recv() {
            mutation(&mut self.params);
            applied += 1;
        }
        applied
    }

    /// Mutable access for autonomous per-frame state advanced by the render context.
    pub(crate) fn params_mut(&mut self) -> &mut P {
        &mut self.params
    }

    /// Consume the store, returning the final values. Pending mutations are dropped unapplied.
    pub fn into_inner(self) -> P {
        self.params
    }
}

/// Cloneable, thread-safe producer side of a [`ParamStore`] queue.
pub struct Mutator<P> {
    tx: mpsc::Sender<Mutation<P>>,
}

impl<P> Clone for Mutator<P> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<P> std::fmt::Debug for Mutator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutator").finish_non_exhaustive()
    }
}

impl<P: 'static> Mutator<P> {
    /// Queue `f` for the next frame boundary.
    ///
    /// Returns `false` once the owning store has been torn down; the mutation is discarded.
    pub fn enqueue(&self, f: impl FnOnce(&mut P) + Send + 'static) -> bool {
        self.enqueue_boxed(Box::new(f))
    }

    /// Queue an already boxed mutation.
    pub fn enqueue_boxed(&self, mutation: Mutation<P>) -> bool {
        self.tx.send(mutation).is_ok()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/store.rs"]
mod tests;
