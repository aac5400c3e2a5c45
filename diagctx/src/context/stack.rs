//! Explicit stack of frames for nested operations.

use super::Frame;
use crate::config::RenderConfig;
use crate::errors::ContextError;

/// A stack of diagnostic frames.
///
/// The last frame is the current one; every frame below it was suspended by a
/// [`store`](Self::store) that has not yet been matched by a
/// [`recall`](Self::recall). There is always a current frame.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    frames: Vec<Frame>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorContext {
    /// Creates a context with one empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    /// Returns the current frame.
    #[must_use]
    pub fn current(&self) -> &Frame {
        let last = self.frames.len() - 1;
        &self.frames[last]
    }

    /// Returns the current frame for mutation.
    pub fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Number of suspended frames below the current one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Suspended frames, outermost first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames[..self.depth()]
    }

    /// Suspends the current frame and starts an empty one.
    pub fn store(&mut self) -> &mut Frame {
        self.frames.push(Frame::new());
        self.current_mut()
    }

    /// Discards the current frame and resumes the one suspended by the last
    /// [`store`](Self::store).
    ///
    /// With nothing stored this is a no-op and the current frame is returned
    /// unchanged.
    pub fn recall(&mut self) -> &mut Frame {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
        self.current_mut()
    }

    /// Like [`recall`](Self::recall), but reports an unmatched call.
    pub fn try_recall(&mut self) -> Result<&mut Frame, ContextError> {
        if self.frames.len() > 1 {
            Ok(self.recall())
        } else {
            Err(ContextError::NothingStored)
        }
    }

    /// Clears every field and drops all suspended frames.
    pub fn reset(&mut self) -> &mut Frame {
        self.frames.truncate(1);
        self.frames[0].clear();
        self.current_mut()
    }

    /// Renders the current frame with the default configuration.
    #[must_use]
    pub fn render(&self) -> String {
        self.current().render()
    }

    /// Renders the current frame.
    #[must_use]
    pub fn render_with(&self, config: &RenderConfig) -> String {
        self.current().render_with(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = ErrorContext::new();
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.current().is_empty());
        assert!(ctx.frames().is_empty());
    }

    #[test]
    fn test_store_starts_clean_frame() {
        let mut ctx = ErrorContext::new();
        ctx.current_mut().object("UserMapper.selectById");

        let inner = ctx.store();
        assert!(inner.is_empty());
        inner.activity("setting parameters");

        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.frames()[0].get_object(), Some("UserMapper.selectById"));
        assert_eq!(ctx.current().get_object(), None);
    }

    #[test]
    fn test_recall_restores_outer_frame() {
        let mut ctx = ErrorContext::new();
        ctx.current_mut().object("UserMapper.selectById");
        ctx.store().activity("setting parameters");

        let outer = ctx.recall();
        assert_eq!(outer.get_object(), Some("UserMapper.selectById"));
        assert_eq!(outer.get_activity(), None);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_recall_without_store_is_noop() {
        let mut ctx = ErrorContext::new();
        ctx.current_mut().message("outer");

        let frame = ctx.recall();
        assert_eq!(frame.get_message(), Some("outer"));
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_try_recall_reports_underflow() {
        let mut ctx = ErrorContext::new();
        assert!(matches!(ctx.try_recall(), Err(ContextError::NothingStored)));

        ctx.store();
        assert!(ctx.try_recall().is_ok());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_reset_clears_all_levels() {
        let mut ctx = ErrorContext::new();
        ctx.current_mut().message("outer");
        ctx.store().message("inner");

        let frame = ctx.reset();
        assert!(frame.is_empty());
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.render(), "");
    }
}
