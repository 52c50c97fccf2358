//! Source location metadata
//!
//! `Span` tracks where a rule, fact line or query line came from so that
//! diagnostics can point back into the original text.

use serde::Serialize;

/// Span representing a location in source code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        let (line, col) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }
}
