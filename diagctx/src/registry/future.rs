//! Error contexts that follow a future instead of a thread.

use super::replace;
use crate::context::ErrorContext;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A future that carries its own [`ErrorContext`].
///
/// While the inner future is polled, its context is installed as the polling
/// thread's context; afterwards the thread's own context is put back. Fields
/// set by the task therefore survive across polls and worker threads, and
/// never show up in the thread that happened to poll it.
pub struct ContextFuture<F> {
    inner: Pin<Box<F>>,
    context: Option<ErrorContext>,
}

impl<F: Future> ContextFuture<F> {
    /// Wraps `inner`; its context is created on first access.
    pub fn new(inner: F) -> Self {
        Self {
            inner: Box::pin(inner),
            context: None,
        }
    }

    /// Wraps `inner` with an existing context.
    pub fn with_context(inner: F, context: ErrorContext) -> Self {
        Self {
            inner: Box::pin(inner),
            context: Some(context),
        }
    }

    /// The context carried between polls, if the task has one.
    pub fn context(&self) -> Option<&ErrorContext> {
        self.context.as_ref()
    }
}

struct Installed<'a> {
    slot: &'a mut Option<ErrorContext>,
    host: Option<ErrorContext>,
}

impl Drop for Installed<'_> {
    fn drop(&mut self) {
        *self.slot = replace(self.host.take());
    }
}

impl<F: Future> Future for ContextFuture<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let host = replace(this.context.take());
        let _installed = Installed {
            slot: &mut this.context,
            host,
        };
        this.inner.as_mut().poll(cx)
    }
}

/// Extension methods for running futures in their own error context.
pub trait ContextFutureExt: Future + Sized {
    /// Runs the future with a fresh error context.
    fn in_error_context(self) -> ContextFuture<Self> {
        ContextFuture::new(self)
    }

    /// Runs the future with the given error context.
    fn with_error_context(self, context: ErrorContext) -> ContextFuture<Self> {
        ContextFuture::with_context(self, context)
    }
}

impl<F: Future> ContextFutureExt for F {}
