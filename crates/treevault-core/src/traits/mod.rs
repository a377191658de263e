//! Core traits defined in `treevault-core` and implemented by other crates.

pub mod notifier;

pub use notifier::{Notifier, TracingNotifier};
