//! User-facing notices.
//!
//! Notices are informational only; nothing in the cleaning path depends on
//! whether one is shown.

use log::{info, warn};

/// Title hosts show alongside notices.
pub const NOTICE_TITLE: &str = "Ellipsis Cleaner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// Sink for notices, typically a host's toast area.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

impl<F> Notifier for F
where
    F: Fn(&str, Severity),
{
    fn notify(&self, message: &str, severity: Severity) {
        self(message, severity);
    }
}

/// Writes notices to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!("[{NOTICE_TITLE}] {message}"),
            Severity::Warning => warn!("[{NOTICE_TITLE}] {message}"),
        }
    }
}

/// Notice reported after a clean.
#[must_use]
pub fn removed_notice(count: usize) -> (String, Severity) {
    if count > 0 {
        (format!("Removed {count} dots."), Severity::Success)
    } else {
        ("No dots found (or protected).".to_string(), Severity::Info)
    }
}

/// Notice reported after a check.
#[must_use]
pub fn found_notice(count: usize) -> String {
    if count > 0 {
        format!("Found {count} dots.")
    } else {
        "No dots found.".to_string()
    }
}
