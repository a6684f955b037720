//! Logging facilities for TeamDesk.
//!
//! TeamDesk uses the `tracing` crate for instrumentation. Libraries in this
//! workspace never install a subscriber; the application (or a test) does:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("teamdesk=debug,teamdesk_core=info")
//!         .init();
//! }
//! ```
//!
//! The constants in [`targets`] can be used in filter directives to isolate a
//! subsystem.

/// Span names used throughout TeamDesk for tracing.
pub mod span_names {
    /// A modal dialog run, from show until close.
    pub const MODAL_DIALOG: &str = "teamdesk::modal_dialog";
    /// Shell startup and shutdown.
    pub const SHELL: &str = "teamdesk::shell";
}

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "teamdesk_core";
    /// Message bus target.
    pub const BUS: &str = "teamdesk_core::bus";
    /// Window gesture state machine target.
    pub const GESTURE: &str = "teamdesk::gesture";
    /// Dialog lifecycle target.
    pub const DIALOG: &str = "teamdesk::dialog";
    /// Application shell target.
    pub const SHELL: &str = "teamdesk::shell";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long an operation (such as a modal dialog) stays
/// active.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "teamdesk::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Debug-level event on the core target.
#[macro_export]
macro_rules! teamdesk_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "teamdesk_core", $($arg)*)
    };
}
