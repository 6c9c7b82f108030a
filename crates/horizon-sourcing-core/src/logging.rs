//! Logging and tracing facilities for Horizon Sourcing.
//!
//! Horizon Sourcing uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your
//! application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_sourcing=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every publication of a change-set is logged at `debug` level under
//! [`targets::PROVIDER`], and every batch applied to a view runs inside a
//! [`PerfSpan`].

/// Span names used throughout Horizon Sourcing for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Change-set publication span.
    pub const PUBLISH: &str = "horizon_sourcing::publish";
    /// Batch application span.
    pub const APPLY_BATCH: &str = "horizon_sourcing::apply_batch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_sourcing_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_sourcing_core::signal";
    /// Data providers and their mutations.
    pub const PROVIDER: &str = "horizon_sourcing::provider";
    /// Batch application against views.
    pub const ANIMATOR: &str = "horizon_sourcing::animator";
    /// Provider switching.
    pub const SWITCHER: &str = "horizon_sourcing::switcher";
    /// Configuration loading.
    pub const SETTINGS: &str = "horizon_sourcing::settings";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_sourcing::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` crate macros with a
/// consistent target.
#[macro_export]
macro_rules! sourcing_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! sourcing_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! sourcing_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! sourcing_error {
    ($($arg:tt)*) => {
        tracing::error!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
