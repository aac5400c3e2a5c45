//! Diagnostic frames and the stack that nests them.
//!
//! This module provides:
//! - Captured failures attached to a frame
//! - Frames holding the fields of one operation and rendering them
//! - An explicit stack of frames for nested operations

mod cause;
#[cfg(test)]
mod context_tests;
mod frame;
mod stack;

pub use cause::Cause;
pub use frame::{normalize_sql, Frame};
pub use stack::ErrorContext;
