//! Diagnostic sink injected into the engine.
//!
//! Falling back to a default mode of inheritance is the only observable
//! side effect of scoring. It goes through this trait instead of a global
//! logger so tests can assert on it.

use std::sync::Mutex;

pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: &str);

    /// A disease had no inheritance-mode annotation and autosomal dominant was assumed.
    fn missing_inheritance_mode(&self, gene_id: &str) {
        self.warn(&format!(
            "No inheritance mode annotation found for geneId {gene_id}, reverting to default"
        ));
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn missing_inheritance_mode(&self, gene_id: &str) {
        tracing::warn!(
            gene_id = %gene_id,
            "No inheritance mode annotation found, reverting to autosomal dominant"
        );
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.to_vec())
            .unwrap_or_else(|poisoned| poisoned.into_inner().to_vec())
    }

    pub fn len(&self) -> usize {
        self.messages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn warn(&self, message: &str) {
        let mut messages = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push(message.to_string());
    }
}
