//! Structured logging of error contexts.
//!
//! Rendering produces text for humans; this module exposes the same fields as
//! key/value attributes for tracing backends.

use crate::context::{normalize_sql, Frame};
use crate::registry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes describing a frame for structured logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameAttributes {
    /// Summary message.
    pub message: Option<String>,
    /// Resource involved.
    pub resource: Option<String>,
    /// Target object.
    pub object: Option<String>,
    /// Activity in progress.
    pub activity: Option<String>,
    /// Normalized statement text.
    pub sql: Option<String>,
    /// Cause description.
    pub cause: Option<String>,
    /// Number of suspended frames below this one.
    pub depth: usize,
}

impl FrameAttributes {
    /// Captures the present fields of a frame.
    #[must_use]
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            message: frame.get_message().map(String::from),
            resource: frame.get_resource().map(String::from),
            object: frame.get_object().map(String::from),
            activity: frame.get_activity().map(String::from),
            sql: frame.get_sql().map(normalize_sql),
            cause: frame.get_cause().map(|c| c.describe()),
            depth: 0,
        }
    }

    /// Sets the stack depth.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Converts to OpenTelemetry attributes.
    #[must_use]
    pub fn to_otel_attributes(&self) -> HashMap<String, String> {
        let mut attrs = HashMap::new();

        if let Some(ref v) = self.message {
            attrs.insert("error_context.message".to_string(), v.clone());
        }
        if let Some(ref v) = self.resource {
            attrs.insert("error_context.resource".to_string(), v.clone());
        }
        if let Some(ref v) = self.object {
            attrs.insert("error_context.object".to_string(), v.clone());
        }
        if let Some(ref v) = self.activity {
            attrs.insert("error_context.activity".to_string(), v.clone());
        }
        if let Some(ref v) = self.sql {
            attrs.insert("error_context.sql".to_string(), v.clone());
        }
        if let Some(ref v) = self.cause {
            attrs.insert("error_context.cause".to_string(), v.clone());
        }
        attrs.insert("error_context.depth".to_string(), self.depth.to_string());

        attrs
    }
}

/// Emits one error event carrying the frame's fields.
pub fn log_frame(frame: &Frame) {
    log_attributes(&FrameAttributes::from_frame(frame));
}

/// Emits one error event for the calling thread's current frame.
pub fn log_current() {
    let attrs = registry::with_context(|ctx| {
        FrameAttributes::from_frame(ctx.current()).with_depth(ctx.depth())
    });
    log_attributes(&attrs);
}

fn log_attributes(attrs: &FrameAttributes) {
    tracing::error!(
        error_context.message = attrs.message.as_deref(),
        error_context.resource = attrs.resource.as_deref(),
        error_context.object = attrs.object.as_deref(),
        error_context.activity = attrs.activity.as_deref(),
        error_context.sql = attrs.sql.as_deref(),
        error_context.cause = attrs.cause.as_deref(),
        error_context.depth = attrs.depth,
        "Error context captured"
    );
}
