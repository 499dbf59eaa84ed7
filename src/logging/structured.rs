//! Structured logging utilities.
//!
//! Provides context-aware logging with doc_id and record_id included
//! in every log message.

use std::fmt;

/// Logging context for one updateinfo document operation.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub doc_id: String,
    pub record_id: Option<String>,
}

impl LogContext {
    pub fn new(doc_id: &str) -> Self {
        Self {
            doc_id: doc_id.to_string(),
            record_id: None,
        }
    }

    pub fn with_record(&self, record_id: &str) -> Self {
        Self {
            doc_id: self.doc_id.clone(),
            record_id: Some(record_id.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record_id {
            Some(rid) => write!(f, "[doc={}] [record={}]", self.doc_id, rid),
            None => write!(f, "[doc={}]", self.doc_id),
        }
    }
}
