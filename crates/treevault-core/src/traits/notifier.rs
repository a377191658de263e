//! User-facing notification sink.
//!
//! Operations report one transient message per outcome. The presentation
//! layer decides how to show it (toast, status line, stderr); the core only
//! hands over the resolved text.

/// Receives success and error messages produced by tree operations.
pub trait Notifier: Send + Sync + 'static {
    /// An operation completed; `message` is ready to display.
    fn success(&self, message: &str);

    /// An operation or drop gesture failed; `message` is ready to display.
    fn error(&self, message: &str);
}

/// Notifier that forwards messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "treevault::notify", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "treevault::notify", "{message}");
    }
}
