use crate::ast::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for deduce with source location tracking where available
#[derive(Debug, Clone)]
pub enum DeduceError {
    /// Malformed rule, fact or query line
    Parse(Box<ErrorDetails>),

    /// Well-formed input that does not describe a usable program
    Semantic(Box<ErrorDetails>),

    /// Rules force conflicting values onto the same symbol
    Contradiction {
        symbol: String,
        rule: Option<String>,
    },

    /// Engine error without specific source location
    Engine(String),

    /// Input exceeds one of the configured resource limits
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl DeduceError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a semantic error with source information
    pub fn semantic(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Semantic(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a semantic error with suggestion
    pub fn semantic_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Semantic(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    pub fn contradiction(symbol: impl Into<String>, rule: Option<String>) -> Self {
        Self::Contradiction {
            symbol: symbol.into(),
            rule,
        }
    }

    pub fn is_contradiction(&self) -> bool {
        matches!(self, DeduceError::Contradiction { .. })
    }
}

impl fmt::Display for DeduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeduceError::Parse(details) => {
                write!(f, "Parse error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " at {}:{}:{}",
                    details.source_id, details.span.line, details.span.col
                )
            }
            DeduceError::Semantic(details) => {
                write!(f, "Semantic error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " at {}:{}:{}",
                    details.source_id, details.span.line, details.span.col
                )
            }
            DeduceError::Contradiction { symbol, rule } => {
                write!(f, "Contradiction: rules force conflicting values onto {}", symbol)?;
                if let Some(rule) = rule {
                    write!(f, " (while applying '{}')", rule)?;
                }
                Ok(())
            }
            DeduceError::Engine(msg) => write!(f, "Engine error: {}", msg),
            DeduceError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => write!(
                f,
                "Resource limit exceeded: {} (limit: {}, actual: {}). {}",
                limit_name, limit_value, actual_value, suggestion
            ),
        }
    }
}

impl std::error::Error for DeduceError {}

impl From<std::fmt::Error> for DeduceError {
    fn from(err: std::fmt::Error) -> Self {
        DeduceError::Engine(format!("Format error: {}", err))
    }
}
