//! # Diagctx
//!
//! A per-thread error context for data-access runtimes.
//!
//! While an operation runs, calling code records what it is doing: the
//! resource involved, the activity in progress, the target object, the
//! statement text and the captured failure. When something goes wrong the
//! accumulated fields are rendered into a fixed-order description:
//!
//! ```text
//! ### Error querying database
//! ### The error may exist in UserMapper.xml
//! ### The error may involve UserMapper.selectById
//! ### The error occurred while setting parameters
//! ### SQL: SELECT * FROM users WHERE id = ?
//! ### Cause: ...
//! ```
//!
//! - **Frames**: one set of diagnostic fields with chained setters
//! - **Nesting**: `store`/`recall` suspend and resume frames for inner operations
//! - **Thread scoping**: each thread has its own context, created lazily
//! - **Task scoping**: futures can carry a context across worker threads
//!
//! ## Quick Start
//!
//! ```rust
//! use diagctx::prelude::*;
//!
//! operation(|frame| {
//!     frame.resource("UserMapper.xml").object("UserMapper.selectById");
//!
//!     nested(|inner| {
//!         inner.activity("setting parameters");
//!     });
//!
//!     let report = wrap_cause("Error querying database", "no such column: nme");
//!     assert!(report.to_string().contains("### Cause: no such column: nme"));
//! });
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod errors;
pub mod observability;
pub mod registry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::RenderConfig;
    pub use crate::context::{Cause, ErrorContext, Frame};
    pub use crate::errors::{wrap_cause, wrap_error, ContextError, ReportedError};
    pub use crate::registry::{
        nested, operation, ContextFutureExt, CurrentFrame, OperationGuard, StoreGuard,
    };
}
