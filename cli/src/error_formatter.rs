use ariadne::{Color, Label, Report, ReportKind, Source};
use deduce::DeduceError;

/// Format a DeduceError with fancy terminal output using Ariadne
pub fn format_error(error: &DeduceError) -> String {
    match error {
        DeduceError::Parse(details) | DeduceError::Semantic(details) => {
            let mut output = Vec::new();

            let error_type = match error {
                DeduceError::Parse(_) => "Parse error",
                _ => "Semantic error",
            };

            let message = format!(
                "{}: {} (at {}:{}:{})",
                error_type,
                details.message,
                details.source_id,
                details.span.line,
                details.span.col
            );

            let mut report =
                Report::build(ReportKind::Error, &details.source_id, details.span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((&details.source_id, details.span.start..details.span.end))
                            .with_message("")
                            .with_color(Color::Red),
                    );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        DeduceError::Contradiction { symbol, rule } => match rule {
            Some(rule) => format!(
                "Contradiction: rules force conflicting values onto {}\n  While applying: {}",
                symbol, rule
            ),
            None => format!("Contradiction: rules force conflicting values onto {}", symbol),
        },
        DeduceError::Engine(msg) => format!("Engine error: {}", msg),
        DeduceError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
    }
}
