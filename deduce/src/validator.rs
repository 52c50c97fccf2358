use crate::ast::Span;
use crate::parser::{Declaration, ParsedProgram};
use crate::{DeduceError, DeduceResult, Program};
use std::collections::HashMap;
use std::sync::Arc;

/// Semantic validator that runs after parsing but before inference
///
/// The inference engine accepts any `Program` unconditionally; everything a
/// rule file can get wrong beyond syntax is rejected here.
#[derive(Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a parsed program and turn it into a `Program`
    pub fn validate(&self, parsed: ParsedProgram) -> DeduceResult<Program> {
        // Phase 1: Reject input without a single statement
        self.validate_not_empty(&parsed)?;

        // Phase 2: Each fact, query and rule may only be declared once
        self.validate_duplicates(&parsed)?;

        // Phase 3: A program needs something to reason with and about
        self.validate_required_sections(&parsed)?;

        let facts = parsed.facts.iter().map(|d| d.symbol).collect();
        let queries = parsed.queries.iter().map(|d| d.symbol).collect();

        Ok(Program {
            rules: parsed.rules,
            facts,
            queries,
            symbols: parsed.symbols,
            source: Some(parsed.source_id),
        })
    }

    /// Check a fact or query list given outside a rule file, such as `-f AB`
    ///
    /// Repeats are rejected the same way a repeated name on a `=` or `?` line
    /// is. The error points into the list itself.
    pub fn validate_symbol_list<S: AsRef<str>>(
        &self,
        names: &[S],
        kind: &str,
    ) -> DeduceResult<()> {
        let text: String = names.iter().map(|n| n.as_ref()).collect();
        let source_text: Arc<str> = Arc::from(text.as_str());

        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut offset = 0;
        for (position, name) in names.iter().map(|n| n.as_ref()).enumerate() {
            if let Some(first) = seen.get(name) {
                return Err(DeduceError::semantic_with_suggestion(
                    format!("Duplicate {}: '{}'", kind, name),
                    Span {
                        start: offset,
                        end: offset + name.len(),
                        line: 1,
                        col: offset + 1,
                    },
                    "<arguments>",
                    source_text,
                    format!(
                        "'{}' is already listed as {} number {}. Each {} can only be declared once.",
                        name,
                        kind,
                        first + 1,
                        kind
                    ),
                ));
            }
            seen.insert(name, position);
            offset += name.len();
        }
        Ok(())
    }

    fn validate_not_empty(&self, parsed: &ParsedProgram) -> DeduceResult<()> {
        if parsed.rules.is_empty() && parsed.facts.is_empty() && parsed.queries.is_empty() {
            return Err(DeduceError::semantic_with_suggestion(
                "Empty input",
                Span {
                    start: 0,
                    end: 0,
                    line: 1,
                    col: 1,
                },
                parsed.source_id.clone(),
                parsed.source_text.clone(),
                "Add rules such as 'A => B', a fact line such as '=A' and a query line such as '?B'",
            ));
        }
        Ok(())
    }

    fn validate_duplicates(&self, parsed: &ParsedProgram) -> DeduceResult<()> {
        self.validate_unique_declarations(parsed, &parsed.facts, "fact")?;
        self.validate_unique_declarations(parsed, &parsed.queries, "query")?;

        let mut rule_texts: HashMap<&str, Option<&Span>> = HashMap::new();
        for rule in &parsed.rules {
            if let Some(first_span) = rule_texts.get(rule.source.as_str()) {
                let suggestion = match first_span {
                    Some(span) => format!(
                        "Rule '{}' was already written on line {}. Remove the repeated line.",
                        rule.source, span.line
                    ),
                    None => format!("Rule '{}' appears more than once.", rule.source),
                };
                return Err(DeduceError::semantic_with_suggestion(
                    format!("Duplicate rule: '{}'", rule.source),
                    rule.span.clone().unwrap_or_default(),
                    parsed.source_id.clone(),
                    parsed.source_text.clone(),
                    suggestion,
                ));
            }
            rule_texts.insert(rule.source.as_str(), rule.span.as_ref());
        }

        Ok(())
    }

    fn validate_unique_declarations(
        &self,
        parsed: &ParsedProgram,
        declarations: &[Declaration],
        kind: &str,
    ) -> DeduceResult<()> {
        let mut seen: HashMap<_, &Span> = HashMap::new();
        for declaration in declarations {
            if let Some(first_span) = seen.get(&declaration.symbol) {
                let name = parsed.symbols.name(declaration.symbol);
                return Err(DeduceError::semantic_with_suggestion(
                    format!("Duplicate {}: '{}'", kind, name),
                    declaration.span.clone(),
                    parsed.source_id.clone(),
                    parsed.source_text.clone(),
                    format!(
                        "'{}' was already declared as a {} on line {}. Each {} can only be declared once.",
                        name, kind, first_span.line, kind
                    ),
                ));
            }
            seen.insert(declaration.symbol, &declaration.span);
        }
        Ok(())
    }

    fn validate_required_sections(&self, parsed: &ParsedProgram) -> DeduceResult<()> {
        let end = Span {
            start: parsed.source_text.len(),
            end: parsed.source_text.len(),
            line: parsed.source_text.lines().count().max(1),
            col: 1,
        };

        if parsed.rules.is_empty() {
            return Err(DeduceError::semantic_with_suggestion(
                "No rules provided in input",
                end,
                parsed.source_id.clone(),
                parsed.source_text.clone(),
                "Add at least one rule, for example 'A => B'",
            ));
        }

        if parsed.queries.is_empty() {
            return Err(DeduceError::semantic_with_suggestion(
                "No queries provided in input",
                end,
                parsed.source_id.clone(),
                parsed.source_text.clone(),
                "Add a query line, for example '?B'",
            ));
        }

        Ok(())
    }
}
