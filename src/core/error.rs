use thiserror::Error;

/// Errors that can occur while editing, building or rendering an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// Raw input text could not be turned into a valid value.
    #[error("invalid input: {0}")]
    Input(String),

    /// A line-item index was outside the current item list.
    #[error("line index {index} out of range (invoice has {len} line items)")]
    LineIndex {
        /// The requested index.
        index: usize,
        /// Number of line items at the time of the request.
        len: usize,
    },

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document layout or PDF serialization failed.
    #[error("render error: {0}")]
    Render(String),
}

/// A single non-fatal finding about an invoice, with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the field (e.g. "buyer.name", "items[2].quantity").
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// Short rule identifier if applicable (e.g. "GSTIN-FORMAT").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a finding without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a finding tagged with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
