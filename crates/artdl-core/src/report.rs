//! Operator-facing progress reporting, injected into the fetcher.

use crate::error::error_chain;
use std::cell::RefCell;

/// Receives progress lines and swallowed failures from a download.
pub trait Reporter {
    fn report(&self, message: &str);
    fn report_failure(&self, message: &str, error: &dyn std::error::Error);
}

/// Default reporter: progress at info, failures at error with the full cause chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn report_failure(&self, message: &str, error: &dyn std::error::Error) {
        tracing::error!("{}: {}", message, error_chain(error));
    }
}

/// Keeps every line in memory. Handy for tests and for callers that want to
/// show the transcript themselves.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<String>>,
    failures: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn report_failure(&self, message: &str, error: &dyn std::error::Error) {
        self.failures
            .borrow_mut()
            .push(format!("{}: {}", message, error_chain(error)));
    }
}
