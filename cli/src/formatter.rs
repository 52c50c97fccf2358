use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, Row, Table};
use deduce::{DependencyIndex, Program, QueryResult, Response, TraceKind, TraceRecord, TriState};
use std::path::PathBuf;

/// Result of evaluating one file in `deduce batch`
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: BatchOutcome,
}

pub enum BatchOutcome {
    Answered(Vec<QueryResult>),
    Failed(String),
}

enum LineType {
    Derived,
    Silent,
    Cycle,
    ClosedWorld,
    Settled,
}

impl LineType {
    fn format_line(&self, base_prefix: &str, content: &str) -> String {
        let symbol = match self {
            LineType::Derived => "├─>",
            LineType::Silent => "×",
            LineType::Cycle => "├─ ↺",
            LineType::ClosedWorld => "└─ ∅",
            LineType::Settled => "└─ =",
        };
        format!("{}{} {}\n", base_prefix, symbol, content)
    }
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_response(&self, response: &Response, raw: bool, explain: bool) -> String {
        if raw {
            return response
                .queries
                .iter()
                .map(|q| format!("{}={}\n", q.name, q.value))
                .collect();
        }

        let mut output = String::new();

        output.push_str(&self.format_results_table(&response.queries));
        output.push('\n');

        if explain {
            output.push('\n');
            output.push_str(&self.format_trace(&response.trace));
        }

        output
    }

    fn format_results_table(&self, results: &[QueryResult]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Query").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Left),
        ]));

        for result in results {
            table.add_row(Row::from(vec![
                Cell::new(&result.name),
                Cell::new(result.value.to_string()).fg(value_color(result.value)),
            ]));
        }

        table.to_string()
    }

    /// One line per trace record, indented by proof depth
    fn format_trace(&self, trace: &[TraceRecord]) -> String {
        let mut output = String::new();
        for record in trace {
            let indent = "│  ".repeat(record.depth);
            let line = match &record.kind {
                TraceKind::RuleApplied {
                    symbol,
                    rule,
                    premise,
                    verdict,
                } => {
                    if verdict.is_known() {
                        LineType::Derived.format_line(
                            &indent,
                            &format!(
                                "Since we know '{}' with a {} premise, {} is {}",
                                rule, premise, symbol, verdict
                            ),
                        )
                    } else {
                        LineType::Silent.format_line(
                            &indent,
                            &format!("{} says nothing about {} yet", rule, symbol),
                        )
                    }
                }
                TraceKind::CycleBroken { symbol, assumed } => LineType::Cycle.format_line(
                    &indent,
                    &format!("{} depends on itself, assuming {}", symbol, assumed),
                ),
                TraceKind::ClosedWorld { symbol } => LineType::ClosedWorld.format_line(
                    &indent,
                    &format!("nothing proves {}, so it is false", symbol),
                ),
                TraceKind::Settled { symbol, value } => {
                    LineType::Settled.format_line(&indent, &format!("{} is {}", symbol, value))
                }
            };
            output.push_str(&line);
        }
        output
    }

    pub fn format_program_inspection(&self, program: &Program, index: &DependencyIndex) -> String {
        let mut output = String::new();
        if let Some(source) = &program.source {
            output.push_str(&format!("Program: {}\n\n", source));
        }

        output.push_str(&format!("rules ({}):\n", program.rules.len()));
        for rule in &program.rules {
            output.push_str(&format!("  - {}\n", rule.display(&program.symbols)));
        }

        let facts: String = program.facts.iter().map(|&f| program.name(f)).collect();
        let queries: String = program.queries.iter().map(|&q| program.name(q)).collect();
        output.push_str(&format!("\nfacts: ={}\n", facts));
        output.push_str(&format!("queries: ?{}\n", queries));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec!["Symbol", "Role", "Produced by"]));
        for (id, name) in program.symbols.iter() {
            let role = if program.is_fact(id) {
                "fact"
            } else if program.is_query(id) {
                "query"
            } else {
                ""
            };
            let producers: Vec<String> = index
                .rules_producing(id)
                .iter()
                .map(|node| program.rules[node.rule].display(&program.symbols).to_string())
                .collect();
            table.add_row(Row::from(vec![
                name.to_string(),
                role.to_string(),
                producers.join("\n"),
            ]));
        }

        output.push('\n');
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    pub fn format_batch_summary(&self, entries: &[BatchEntry]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec!["File", "Result"]));

        for entry in entries {
            let result = match &entry.outcome {
                BatchOutcome::Answered(queries) => Cell::new(
                    queries
                        .iter()
                        .map(|q| format!("{}={}", q.name, q.value))
                        .collect::<Vec<_>>()
                        .join(" "),
                ),
                BatchOutcome::Failed(message) => Cell::new(message).fg(Color::Red),
            };
            table.add_row(Row::from(vec![
                Cell::new(entry.path.display().to_string()),
                result,
            ]));
        }

        let failed = entries
            .iter()
            .filter(|e| matches!(e.outcome, BatchOutcome::Failed(_)))
            .count();

        format!(
            "{}\n\n{} files, {} answered, {} failed\n",
            table,
            entries.len(),
            entries.len() - failed,
            failed
        )
    }
}

fn value_color(value: TriState) -> Color {
    match value {
        TriState::True => Color::Green,
        TriState::False => Color::Red,
        TriState::Unknown => Color::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deduce::Engine;

    fn response(code: &str) -> Response {
        let mut engine = Engine::from_source(code, "test.txt").unwrap();
        engine.evaluate().unwrap()
    }

    #[test]
    fn test_raw_output() {
        let formatter = Formatter::default();
        let output = formatter.format_response(&response("A => B\n=A\n?BC"), true, false);
        assert_eq!(output, "B=true\nC=undetermined\n");
    }

    #[test]
    fn test_table_output() {
        let formatter = Formatter::default();
        let output = formatter.format_response(&response("A => B\n=A\n?B"), false, false);
        assert!(output.contains("Query"));
        assert!(output.contains("B"));
        assert!(output.contains("true"));
        assert!(!output.contains("Since we know"));
    }

    #[test]
    fn test_explain_output() {
        let formatter = Formatter::default();
        let output = formatter.format_response(&response("A + B => C\n=AB\n?C"), false, true);
        assert!(output.contains("├─> Since we know 'A + B => C' with a true premise, C is true"));
        assert!(output.contains("└─ = C is true"));
    }

    #[test]
    fn test_explain_closed_world() {
        let formatter = Formatter::default();
        let output = formatter.format_response(&response("A + B => C\n=A\n?C"), false, true);
        assert!(output.contains("nothing proves B, so it is false"));
        assert!(output.contains("A + B => C says nothing about C yet"));
    }

    #[test]
    fn test_program_inspection() {
        let engine = Engine::from_source("A + B => C\nC <=> D\n=A\n?D", "test.txt").unwrap();
        let formatter = Formatter::default();
        let output = formatter.format_program_inspection(engine.program(), engine.index());

        assert!(output.starts_with("Program: test.txt\n"));
        assert!(output.contains("rules (2):\n  - A + B => C\n  - C <=> D\n"));
        assert!(output.contains("facts: =A\n"));
        assert!(output.contains("queries: ?D\n"));
        assert!(output.contains("query"));
    }

    #[test]
    fn test_batch_summary_counts() {
        let formatter = Formatter::default();
        let entries = vec![
            BatchEntry {
                path: PathBuf::from("a.txt"),
                outcome: BatchOutcome::Answered(response("A => B\n=A\n?B").queries),
            },
            BatchEntry {
                path: PathBuf::from("b.txt"),
                outcome: BatchOutcome::Failed("Contradiction".to_string()),
            },
        ];
        let output = formatter.format_batch_summary(&entries);
        assert!(output.contains("B=true"));
        assert!(output.ends_with("2 files, 1 answered, 1 failed\n"));
    }
}
