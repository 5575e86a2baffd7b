//! Injected diagnostics sink.
//!
//! The normalizer never touches process-wide logging state itself. It
//! reports through a [`Diagnostics`] implementation handed to it at
//! construction time and passed down the dispatcher and extractor calls.

use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Debug,
    Warn,
}

/// A recorded diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Logging collaborator used by the normalizer.
pub trait Diagnostics: Send + Sync {
    /// Report a recoverable problem.
    fn warn(&self, message: &str);

    /// Report detail useful when investigating a problem.
    fn debug(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogDiagnostics {
    target: Option<&'static str>,
}

impl LogDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log under a custom target instead of this module's path.
    pub fn with_target(target: &'static str) -> Self {
        Self {
            target: Some(target),
        }
    }
}

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        match self.target {
            Some(target) => log::warn!(target: target, "{}", message),
            None => log::warn!("{}", message),
        }
    }

    fn debug(&self, message: &str) {
        match self.target {
            Some(target) => log::debug!(target: target, "{}", message),
            None => log::debug!("{}", message),
        }
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn warn(&self, _message: &str) {}

    fn debug(&self, _message: &str) {}
}

/// Bounded in-memory diagnostics, oldest messages evicted first.
#[derive(Debug)]
pub struct MemoryDiagnostics {
    messages: Mutex<Vec<Diagnostic>>,
    max_messages: usize,
}

impl Default for MemoryDiagnostics {
    fn default() -> Self {
        Self::new(10000)
    }
}

impl MemoryDiagnostics {
    /// Create a collector keeping at most `max_messages`.
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::with_capacity(max_messages.min(1000))),
            max_messages,
        }
    }

    /// All stored messages
    pub fn messages(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Messages of one level, in arrival order.
    pub fn at_level(&self, level: DiagnosticLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|d| d.level == level)
            .map(|d| d.message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at_level(DiagnosticLevel::Warn)
    }

    pub fn debugs(&self) -> Vec<String> {
        self.at_level(DiagnosticLevel::Debug)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, level: DiagnosticLevel, message: &str) {
        let mut messages = self.lock();
        if messages.len() >= self.max_messages {
            messages.remove(0);
        }
        messages.push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }

    // A panic while holding the lock leaves the Vec intact.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, message: &str) {
        self.record(DiagnosticLevel::Warn, message);
    }

    fn debug(&self, message: &str) {
        self.record(DiagnosticLevel::Debug, message);
    }
}
