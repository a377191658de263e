use treevault_core::traits::notifier::Notifier;

use crate::output;

/// Prints operation outcomes to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        output::print_success(message);
    }

    fn error(&self, message: &str) {
        output::print_error(message);
    }
}
