//! A single frame of diagnostic fields.

use super::Cause;
use crate::config::RenderConfig;
use std::collections::HashMap;
use std::fmt::{self, Write as _};

/// Diagnostic fields describing one operation in progress.
///
/// Every field is optional. Setters overwrite (the last call wins) and return
/// `&mut Self` so several fields can be set in one expression.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    resource: Option<String>,
    activity: Option<String>,
    object: Option<String>,
    message: Option<String>,
    sql: Option<String>,
    cause: Option<Cause>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource involved, e.g. a mapping file path.
    pub fn resource(&mut self, resource: impl Into<String>) -> &mut Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets the activity in progress.
    pub fn activity(&mut self, activity: impl Into<String>) -> &mut Self {
        self.activity = Some(activity.into());
        self
    }

    /// Sets the target object or statement id.
    pub fn object(&mut self, object: impl Into<String>) -> &mut Self {
        self.object = Some(object.into());
        self
    }

    /// Sets the summary message.
    pub fn message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the statement text, as written before normalization.
    pub fn sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.sql = Some(sql.into());
        self
    }

    /// Sets the captured failure.
    pub fn cause(&mut self, cause: impl Into<Cause>) -> &mut Self {
        self.cause = Some(cause.into());
        self
    }

    /// Sets or clears the resource.
    pub fn set_resource(&mut self, resource: Option<String>) -> &mut Self {
        self.resource = resource;
        self
    }

    /// Sets or clears the activity.
    pub fn set_activity(&mut self, activity: Option<String>) -> &mut Self {
        self.activity = activity;
        self
    }

    /// Sets or clears the object.
    pub fn set_object(&mut self, object: Option<String>) -> &mut Self {
        self.object = object;
        self
    }

    /// Sets or clears the message.
    pub fn set_message(&mut self, message: Option<String>) -> &mut Self {
        self.message = message;
        self
    }

    /// Sets or clears the statement text.
    pub fn set_sql(&mut self, sql: Option<String>) -> &mut Self {
        self.sql = sql;
        self
    }

    /// Sets or clears the cause.
    pub fn set_cause(&mut self, cause: Option<Cause>) -> &mut Self {
        self.cause = cause;
        self
    }

    /// Returns the resource, if set.
    #[must_use]
    pub fn get_resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the activity, if set.
    #[must_use]
    pub fn get_activity(&self) -> Option<&str> {
        self.activity.as_deref()
    }

    /// Returns the object, if set.
    #[must_use]
    pub fn get_object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    /// Returns the message, if set.
    #[must_use]
    pub fn get_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the raw statement text, if set.
    #[must_use]
    pub fn get_sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Returns the cause, if set.
    #[must_use]
    pub fn get_cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Sets every field to absent.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource.is_none()
            && self.activity.is_none()
            && self.object.is_none()
            && self.message.is_none()
            && self.sql.is_none()
            && self.cause.is_none()
    }

    /// Renders the frame with the default configuration.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&RenderConfig::default())
    }

    /// Renders the frame as a multi-line description.
    ///
    /// Sections appear in a fixed order (message, resource, object, activity,
    /// sql, cause), each preceded by the configured line separator. Absent or
    /// empty fields contribute nothing, so an empty frame renders as `""`.
    /// Emptiness of the statement is judged before normalization, and of the
    /// cause by its description.
    #[must_use]
    pub fn render_with(&self, config: &RenderConfig) -> String {
        let mut out = String::new();
        let sep = config.line_separator.as_str();

        if let Some(message) = present(self.message.as_deref()) {
            let _ = write!(out, "{sep}### {message}");
        }
        if let Some(resource) = present(self.resource.as_deref()) {
            let _ = write!(out, "{sep}### The error may exist in {resource}");
        }
        if let Some(object) = present(self.object.as_deref()) {
            let _ = write!(out, "{sep}### The error may involve {object}");
        }
        if let Some(activity) = present(self.activity.as_deref()) {
            let _ = write!(out, "{sep}### The error occurred while {activity}");
        }
        if let Some(sql) = present(self.sql.as_deref()) {
            if config.normalize_sql {
                let _ = write!(out, "{sep}### SQL: {}", normalize_sql(sql));
            } else {
                let _ = write!(out, "{sep}### SQL: {sql}");
            }
        }
        if let Some(cause) = &self.cause {
            let cause = cause.describe();
            if !cause.is_empty() {
                let _ = write!(out, "{sep}### Cause: {cause}");
            }
        }

        out
    }

    /// Converts the present fields to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        if let Some(ref v) = self.message {
            map.insert("message".to_string(), serde_json::json!(v));
        }
        if let Some(ref v) = self.resource {
            map.insert("resource".to_string(), serde_json::json!(v));
        }
        if let Some(ref v) = self.object {
            map.insert("object".to_string(), serde_json::json!(v));
        }
        if let Some(ref v) = self.activity {
            map.insert("activity".to_string(), serde_json::json!(v));
        }
        if let Some(ref v) = self.sql {
            map.insert("sql".to_string(), serde_json::json!(normalize_sql(v)));
        }
        if let Some(ref cause) = self.cause {
            map.insert("cause".to_string(), serde_json::json!(cause.describe()));
        }

        map
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Collapses a statement onto one line: every newline, carriage return and
/// tab becomes a single space, then surrounding whitespace is trimmed.
#[must_use]
pub fn normalize_sql(sql: &str) -> String {
    sql.replace(['\n', '\r', '\t'], " ").trim().to_string()
}
