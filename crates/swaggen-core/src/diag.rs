//! Diagnostics boundary between the core and whatever records or prints
//! messages. The core never writes to stdout/stderr itself.

use std::cell::RefCell;
use std::fmt;

/// How a diagnostic affects the generation pass.
///
/// `Error` means a unit (operation, path item, document) was dropped,
/// `Warning` means the pass degraded gracefully (invented a name, skipped a
/// field), `Hint` is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        };
        write!(f, "{text}")
    }
}

/// Receiver for diagnostics emitted during a generation pass.
pub trait DiagnosticSink {
    fn report(&self, severity: Severity, message: String);
}

/// Sink that forwards to the `log` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, severity: Severity, message: String) {
        match severity {
            Severity::Error => log::error!("{message}"),
            Severity::Warning => log::warn!("{message}"),
            Severity::Hint => log::info!("{message}"),
        }
    }
}

/// Recording sink for tests and embedders that inspect diagnostics after the
/// pass. A pass is single-threaded and owns its sink, so `RefCell` suffices.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn has(&self, severity: Severity) -> bool {
        self.entries.borrow().iter().any(|(s, _)| *s == severity)
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, severity: Severity, message: String) {
        self.entries.borrow_mut().push((severity, message));
    }
}
