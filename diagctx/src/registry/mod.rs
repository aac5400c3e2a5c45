//! Thread-scoped registry of error contexts.
//!
//! Every thread owns at most one [`ErrorContext`]. It is created the first time
//! the thread touches the registry and forgotten again by [`reset`]. Threads
//! never see each other's contexts, so no locking is involved.
//!
//! ```
//! use diagctx::registry;
//!
//! registry::current()
//!     .resource("UserMapper.xml")
//!     .object("UserMapper.selectById");
//!
//! registry::store().activity("setting parameters");
//! registry::recall();
//!
//! assert!(registry::render().contains("The error may involve UserMapper.selectById"));
//! registry::reset();
//! ```

mod future;
mod guard;

pub use future::{ContextFuture, ContextFutureExt};
pub use guard::{nested, operation, OperationGuard, StoreGuard};

use crate::context::{Cause, ErrorContext, Frame};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, trace};

thread_local! {
    static REGISTRY: RefCell<Option<ErrorContext>> = const { RefCell::new(None) };
}

/// Runs `f` against this thread's context, creating it if needed.
///
/// Registry events are emitted only after the borrow ends, so subscribers
/// may read the context from inside `event()`.
///
/// # Panics
///
/// Panics if called re-entrantly from inside another `with_context` or
/// `with_current` closure on the same thread.
pub fn with_context<R>(f: impl FnOnce(&mut ErrorContext) -> R) -> R {
    let (result, created) = REGISTRY.with(|slot| {
        let mut slot = slot.borrow_mut();
        let created = slot.is_none();
        let ctx = slot.get_or_insert_with(ErrorContext::new);
        (f(ctx), created)
    });
    if created {
        trace!("Created error context for thread");
    }
    result
}

/// Runs `f` against this thread's current frame, creating it if needed.
pub fn with_current<R>(f: impl FnOnce(&mut Frame) -> R) -> R {
    with_context(|ctx| f(ctx.current_mut()))
}

/// Returns a handle to this thread's current frame, creating it if needed.
pub fn current() -> CurrentFrame {
    with_context(|_| ());
    CurrentFrame::new()
}

/// Returns true if this thread currently has a context.
pub fn is_registered() -> bool {
    REGISTRY.with(|slot| slot.borrow().is_some())
}

/// Forgets this thread's context and returns it.
pub fn remove() -> Option<ErrorContext> {
    REGISTRY.with(|slot| slot.borrow_mut().take())
}

/// Installs `ctx` as this thread's context, returning the previous one.
pub(crate) fn replace(ctx: Option<ErrorContext>) -> Option<ErrorContext> {
    REGISTRY.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), ctx))
}

/// Recalls down to `depth` without creating a context and without panicking
/// when the registry is unavailable. Used from `Drop`.
pub(crate) fn unwind_to(depth: usize) -> usize {
    REGISTRY
        .try_with(|slot| {
            let Ok(mut slot) = slot.try_borrow_mut() else {
                return 0;
            };
            let Some(ctx) = slot.as_mut() else {
                return 0;
            };
            let mut popped = 0;
            while ctx.depth() > depth {
                ctx.recall();
                popped += 1;
            }
            popped
        })
        .unwrap_or(0)
}

/// Suspends the current frame and starts an empty one.
pub fn store() -> CurrentFrame {
    let depth = with_context(|ctx| {
        ctx.store();
        ctx.depth()
    });
    trace!(depth, "Stored error context");
    CurrentFrame::new()
}

/// Resumes the frame suspended by the last [`store`]. A no-op if nothing
/// is stored.
pub fn recall() -> CurrentFrame {
    let (popped, depth) = with_context(|ctx| {
        let before = ctx.depth();
        ctx.recall();
        (ctx.depth() < before, ctx.depth())
    });
    if popped {
        trace!(depth, "Recalled error context");
    } else {
        debug!("Recall with no stored error context; keeping current frame");
    }
    CurrentFrame::new()
}

/// Clears the current frame and forgets this thread's context, so the next
/// access starts from scratch.
pub fn reset() -> CurrentFrame {
    if let Some(mut ctx) = remove() {
        ctx.reset();
        trace!("Reset error context");
    }
    CurrentFrame::new()
}

/// Renders this thread's current frame.
pub fn render() -> String {
    with_context(|ctx| ctx.render())
}

/// Returns a copy of this thread's current frame.
pub fn snapshot() -> Frame {
    with_context(|ctx| ctx.current().clone())
}

/// Number of frames suspended on this thread.
pub fn depth() -> usize {
    with_context(|ctx| ctx.depth())
}

/// Handle to the calling thread's current frame.
///
/// Setters write through to whichever frame is current at the time of the
/// call and return the handle, so calls chain:
///
/// ```
/// use diagctx::registry;
///
/// registry::current()
///     .message("Error querying database")
///     .resource("UserMapper.xml");
/// # registry::reset();
/// ```
///
/// The handle is neither `Send` nor `Sync`; it always refers to the thread
/// that created it.
#[derive(Clone, Copy)]
pub struct CurrentFrame {
    _thread_bound: PhantomData<*const ()>,
}

impl CurrentFrame {
    const fn new() -> Self {
        Self {
            _thread_bound: PhantomData,
        }
    }

    /// Sets the resource on the current frame.
    pub fn resource(self, resource: impl Into<String>) -> Self {
        with_current(|frame| {
            frame.resource(resource);
        });
        self
    }

    /// Sets the activity on the current frame.
    pub fn activity(self, activity: impl Into<String>) -> Self {
        with_current(|frame| {
            frame.activity(activity);
        });
        self
    }

    /// Sets the object on the current frame.
    pub fn object(self, object: impl Into<String>) -> Self {
        with_current(|frame| {
            frame.object(object);
        });
        self
    }

    /// Sets the message on the current frame.
    pub fn message(self, message: impl Into<String>) -> Self {
        with_current(|frame| {
            frame.message(message);
        });
        self
    }

    /// Sets the statement text on the current frame.
    pub fn sql(self, sql: impl Into<String>) -> Self {
        with_current(|frame| {
            frame.sql(sql);
        });
        self
    }

    /// Sets the cause on the current frame.
    pub fn cause(self, cause: impl Into<Cause>) -> Self {
        with_current(|frame| {
            frame.cause(cause);
        });
        self
    }

    /// See [`store`].
    pub fn store(self) -> Self {
        store()
    }

    /// See [`recall`].
    pub fn recall(self) -> Self {
        recall()
    }

    /// See [`reset`].
    pub fn reset(self) -> Self {
        reset()
    }

    /// Renders the current frame.
    #[must_use]
    pub fn render(self) -> String {
        render()
    }

    /// Returns a copy of the current frame.
    #[must_use]
    pub fn snapshot(self) -> Frame {
        snapshot()
    }
}

impl fmt::Debug for CurrentFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrentFrame")
            .field("depth", &depth())
            .field("frame", &snapshot())
            .finish()
    }
}

impl fmt::Display for CurrentFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LINE_SEPARATOR;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_current_creates_lazily() {
        reset();
        assert!(!is_registered());

        let _ = current();
        assert!(is_registered());
        assert!(snapshot().is_empty());
        reset();
    }

    #[test]
    fn test_chained_setters_hit_current_frame() {
        reset();
        current()
            .message("Error querying database")
            .resource("UserMapper.xml");

        assert_eq!(
            render(),
            format!(
                "{LINE_SEPARATOR}### Error querying database\
                 {LINE_SEPARATOR}### The error may exist in UserMapper.xml"
            )
        );
        reset();
    }

    #[test]
    fn test_store_then_recall_reflects_outer_only() {
        reset();
        current().object("UserMapper.selectById");
        store().activity("setting parameters");
        assert_eq!(depth(), 1);

        let text = recall().render();
        assert_eq!(
            text,
            format!("{LINE_SEPARATOR}### The error may involve UserMapper.selectById")
        );
        assert_eq!(snapshot().get_activity(), None);
        reset();
    }

    #[test]
    fn test_recall_without_store_is_noop() {
        reset();
        current().message("outer");
        recall();
        assert_eq!(snapshot().get_message(), Some("outer"));
        assert_eq!(depth(), 0);
        reset();
    }

    #[test]
    fn test_reset_clears_and_forgets() {
        reset();
        current().message("stale").store().activity("inner");
        reset();

        assert!(!is_registered());
        assert_eq!(current().render(), "");
        assert_eq!(depth(), 0);
        reset();
    }

    #[test]
    fn test_reset_without_context_does_not_create_one() {
        reset();
        reset();
        assert!(!is_registered());
    }

    #[test]
    fn test_unwind_to_pops_leaked_frames() {
        reset();
        store().store().store();
        assert_eq!(unwind_to(1), 2);
        assert_eq!(depth(), 1);
        assert_eq!(unwind_to(5), 0);
        reset();
        assert_eq!(unwind_to(0), 0);
        assert!(!is_registered());
    }

    #[test]
    fn test_display_and_debug() {
        reset();
        let handle = current().activity("committing");
        assert_eq!(
            handle.to_string(),
            format!("{LINE_SEPARATOR}### The error occurred while committing")
        );
        assert!(format!("{handle:?}").contains("depth: 0"));
        reset();
    }
}
