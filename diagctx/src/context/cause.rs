//! Captured failures attached to a frame.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// A failure captured while an operation was in progress.
///
/// The context never classifies or rethrows a cause. It only needs the
/// descriptive text, so the type name and message are captured when the
/// cause is attached. The original error is kept for callers that want to
/// walk its `source()` chain.
#[derive(Debug, Clone)]
pub struct Cause {
    kind: Option<String>,
    message: String,
    error: Option<SharedError>,
}

impl Cause {
    /// Captures an error value, recording its type name and message.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind: Some(std::any::type_name::<E>().to_string()),
            message: error.to_string(),
            error: Some(Arc::new(error)),
        }
    }

    /// Captures an already shared error. The concrete type is unknown here,
    /// so only the message is described.
    pub fn from_shared(error: SharedError) -> Self {
        Self {
            kind: None,
            message: error.to_string(),
            error: Some(error),
        }
    }

    /// Creates a cause that carries only text.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            message: message.into(),
            error: None,
        }
    }

    /// Type name of the captured error, when known.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Message of the captured error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original error, if one was captured.
    #[must_use]
    pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.error.as_deref()
    }

    pub(crate) fn shared(&self) -> Option<SharedError> {
        self.error.clone()
    }

    /// Descriptive string used when rendering: `"<type>: <message>"`, or the
    /// bare message when the type is unknown.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.kind {
            Some(kind) => format!("{kind}: {}", self.message),
            None => self.message.clone(),
        }
    }

    /// Descriptions of this cause followed by every `source()` below it.
    #[must_use]
    pub fn chain(&self) -> Vec<String> {
        let mut descriptions = vec![self.describe()];
        let mut next = self.error.as_deref().and_then(|err| err.source());
        while let Some(err) = next {
            descriptions.push(err.to_string());
            next = err.source();
        }
        descriptions
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<anyhow::Error> for Cause {
    fn from(error: anyhow::Error) -> Self {
        let boxed: Box<dyn Error + Send + Sync + 'static> = error.into();
        Self::from_shared(Arc::from(boxed))
    }
}

impl From<SharedError> for Cause {
    fn from(error: SharedError) -> Self {
        Self::from_shared(error)
    }
}

impl From<String> for Cause {
    fn from(message: String) -> Self {
        Self::from_message(message)
    }
}

impl From<&str> for Cause {
    fn from(message: &str) -> Self {
        Self::from_message(message)
    }
}
