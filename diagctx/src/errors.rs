//! Error types for the error context.
//!
//! The context operations themselves never fail. These types cover the strict
//! variants of its operations and the failure report that embeds a rendered
//! context.

use crate::context::Cause;
use crate::registry;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by strict context operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A recall was requested with no frame stored.
    #[error("Recall without a matching store")]
    NothingStored,
}

/// A failure report whose text is the rendered error context.
#[derive(Debug, Error)]
#[error("{context}")]
pub struct ReportedError {
    /// The summary message given when the failure was wrapped.
    pub message: String,
    /// The rendered context of the frame that was current at wrap time.
    pub context: String,
    #[source]
    source: Option<Arc<dyn Error + Send + Sync + 'static>>,
}

impl ReportedError {
    /// Creates a report from parts.
    #[must_use]
    pub fn new(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: context.into(),
            source: None,
        }
    }

    /// The original error, if one was captured.
    #[must_use]
    pub fn original(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("message".to_string(), serde_json::json!(self.message));
        map.insert("context".to_string(), serde_json::json!(self.context));
        if let Some(ref source) = self.source {
            map.insert("source".to_string(), serde_json::json!(source.to_string()));
        }
        map
    }
}

/// Wraps a failure into a report built from the calling thread's context.
///
/// The message and cause are recorded on the current frame first, so the
/// report carries every field accumulated so far.
pub fn wrap_error<E>(message: impl Into<String>, error: E) -> ReportedError
where
    E: Error + Send + Sync + 'static,
{
    wrap_cause(message, Cause::new(error))
}

/// Like [`wrap_error`], for causes that are not a concrete error type.
pub fn wrap_cause(message: impl Into<String>, cause: impl Into<Cause>) -> ReportedError {
    let message = message.into();
    let cause = cause.into();
    let source = cause.shared();
    let context = registry::current()
        .message(message.as_str())
        .cause(cause)
        .render();
    ReportedError {
        message,
        context,
        source,
    }
}
