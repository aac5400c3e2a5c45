//! Scoped guards that keep store/recall and reset balanced.

use super::{depth, is_registered, reset, store, unwind_to, CurrentFrame};
use std::marker::PhantomData;
use tracing::debug;

/// Stores a fresh frame on creation and recalls it when dropped.
///
/// The recall runs on every exit path, including unwinding. Frames stored
/// inside the scope and never recalled are recalled as well, so the frame
/// that was current before [`enter`](Self::enter) is always restored.
#[must_use = "the stored frame is recalled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct StoreGuard {
    depth: usize,
    _thread_bound: PhantomData<*const ()>,
}

impl StoreGuard {
    /// Stores the current frame and starts an empty one.
    pub fn enter() -> Self {
        store();
        Self {
            depth: depth(),
            _thread_bound: PhantomData,
        }
    }

    /// Handle to the frame this guard started.
    pub fn frame(&self) -> CurrentFrame {
        CurrentFrame::new()
    }
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        let popped = unwind_to(self.depth - 1);
        if popped > 1 {
            debug!(
                leaked = popped - 1,
                "Recalled error context frames left stored inside a nested scope"
            );
        }
    }
}

/// Marks a top-level operation; dropping it resets the thread's context.
#[must_use = "the context is reset as soon as the guard is dropped"]
#[derive(Debug)]
pub struct OperationGuard {
    _thread_bound: PhantomData<*const ()>,
}

impl OperationGuard {
    /// Begins a top-level operation.
    pub fn begin() -> Self {
        Self {
            _thread_bound: PhantomData,
        }
    }

    /// Handle to the current frame.
    pub fn frame(&self) -> CurrentFrame {
        CurrentFrame::new()
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        if is_registered() {
            reset();
        }
    }
}

/// Runs `f` with a fresh frame, restoring the enclosing frame afterwards.
pub fn nested<R>(f: impl FnOnce(CurrentFrame) -> R) -> R {
    let guard = StoreGuard::enter();
    f(guard.frame())
}

/// Runs `f` as a top-level operation and resets the context afterwards,
/// whether `f` returns or unwinds.
pub fn operation<R>(f: impl FnOnce(CurrentFrame) -> R) -> R {
    let guard = OperationGuard::begin();
    f(guard.frame())
}
