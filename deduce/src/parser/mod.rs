use crate::ast::Span;
use crate::error::DeduceError;
use crate::resource_limits::ResourceLimits;
use crate::semantic::{self, RuleKind, SymbolId, SymbolTable};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod expressions;
pub mod rules;
pub mod statements;

#[derive(Parser)]
#[grammar = "src/parser/deduce.pest"]
pub struct DeduceParser;

/// A symbol named on a fact or query line
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub symbol: SymbolId,
    pub span: Span,
}

/// Output of the parser, before validation
///
/// Facts and queries keep every occurrence (duplicates included) so the
/// validator can point at the offending line.
#[derive(Debug, Clone)]
pub struct ParsedProgram {
    pub symbols: SymbolTable,
    pub rules: Vec<semantic::Rule>,
    pub facts: Vec<Declaration>,
    pub queries: Vec<Declaration>,
    pub source_id: String,
    pub source_text: Arc<str>,
}

pub fn parse(
    content: &str,
    source_id: Option<String>,
    limits: &ResourceLimits,
) -> Result<ParsedProgram, DeduceError> {
    if content.len() > limits.max_file_size_bytes {
        return Err(DeduceError::ResourceLimitExceeded {
            limit_name: "max_file_size_bytes".to_string(),
            limit_value: format!(
                "{} bytes ({} MB)",
                limits.max_file_size_bytes,
                limits.max_file_size_bytes / (1024 * 1024)
            ),
            actual_value: format!(
                "{} bytes ({:.2} MB)",
                content.len(),
                content.len() as f64 / (1024.0 * 1024.0)
            ),
            suggestion: "Reduce file size or split the rule set".to_string(),
        });
    }

    check_nesting(content, limits)?;

    let source_id = source_id.unwrap_or_else(|| "<input>".to_string());
    let source_text: Arc<str> = Arc::from(content);

    let pairs = DeduceParser::parse(Rule::program, content).map_err(|e| {
        DeduceError::parse(
            e.variant.message().to_string(),
            pest_error_span(&e),
            source_id.clone(),
            source_text.clone(),
        )
    })?;

    let mut parsed = ParsedProgram {
        symbols: SymbolTable::new(),
        rules: Vec::new(),
        facts: Vec::new(),
        queries: Vec::new(),
        source_id,
        source_text,
    };

    for pair in pairs {
        if pair.as_rule() == Rule::program {
            for statement in pair.into_inner() {
                parse_statement(statement, &mut parsed, limits)?;
            }
        }
    }

    Ok(parsed)
}

fn parse_statement(
    pair: Pair<Rule>,
    parsed: &mut ParsedProgram,
    limits: &ResourceLimits,
) -> Result<(), DeduceError> {
    match pair.as_rule() {
        Rule::fact_statement => {
            let declared = statements::parse_symbol_declarations(pair, &mut parsed.symbols);
            parsed.facts.extend(declared);
        }
        Rule::query_statement => {
            let declared = statements::parse_symbol_declarations(pair, &mut parsed.symbols);
            parsed.queries.extend(declared);
        }
        Rule::rule_statement => {
            if parsed.rules.len() >= limits.max_rules {
                return Err(DeduceError::ResourceLimitExceeded {
                    limit_name: "max_rules".to_string(),
                    limit_value: limits.max_rules.to_string(),
                    actual_value: format!("more than {}", limits.max_rules),
                    suggestion: "Split the rule set into smaller programs".to_string(),
                });
            }
            let rule = rules::parse_rule_statement(pair, &mut parsed.symbols)?;
            check_depth(&rule, limits)?;
            parsed.rules.push(rule);
        }
        _ => {}
    }
    Ok(())
}

fn check_depth(rule: &semantic::Rule, limits: &ResourceLimits) -> Result<(), DeduceError> {
    let depth = match &rule.kind {
        RuleKind::Implication {
            premise,
            conclusion,
        } => premise.depth().max(conclusion.depth()),
        RuleKind::Equivalence { left, right } => left.depth().max(right.depth()),
    };
    if depth > limits.max_expression_depth {
        return Err(DeduceError::ResourceLimitExceeded {
            limit_name: "max_expression_depth".to_string(),
            limit_value: limits.max_expression_depth.to_string(),
            actual_value: depth.to_string(),
            suggestion: format!("Simplify nested expressions in '{}'", rule.source),
        });
    }
    Ok(())
}

/// Reject nesting deeper than the limit before the grammar recurses into it.
///
/// A symbol sits one level below its enclosing groups and negations; a
/// parenthesis directly after `!` adds no level of its own. The converted
/// tree is checked again per rule by `check_depth`.
fn check_nesting(content: &str, limits: &ResourceLimits) -> Result<(), DeduceError> {
    for (line_index, line) in content.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default();
        let mut enclosing: Vec<usize> = Vec::new();
        let mut current = 0usize;
        let mut negations = 0usize;
        let mut deepest = 0usize;

        for c in code.chars() {
            match c {
                '!' => negations += 1,
                '(' => {
                    enclosing.push(current);
                    current += negations.max(1);
                    negations = 0;
                }
                ')' => {
                    current = enclosing.pop().unwrap_or(0);
                    negations = 0;
                }
                c if c.is_ascii_uppercase() => {
                    deepest = deepest.max(current + negations + 1);
                    negations = 0;
                }
                c if c.is_whitespace() => {}
                _ => negations = 0,
            }
        }

        if deepest > limits.max_expression_depth {
            return Err(DeduceError::ResourceLimitExceeded {
                limit_name: "max_expression_depth".to_string(),
                limit_value: limits.max_expression_depth.to_string(),
                actual_value: deepest.to_string(),
                suggestion: format!("Simplify nested expressions on line {}", line_index + 1),
            });
        }
    }
    Ok(())
}

/// Parse a bare list of symbol names such as `ABC`
///
/// Used for fact and query overrides given outside a rule file.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, DeduceError> {
    let pairs = DeduceParser::parse(Rule::symbol_list, input).map_err(|e| {
        DeduceError::parse(
            format!("Invalid symbol list '{}': {}", input, e.variant.message()),
            pest_error_span(&e),
            "<arguments>",
            Arc::from(input),
        )
    })?;

    let mut names = Vec::new();
    for pair in pairs.flatten() {
        if pair.as_rule() == Rule::symbol {
            names.push(pair.as_str().to_string());
        }
    }
    Ok(names)
}

fn pest_error_span(e: &pest::error::Error<Rule>) -> Span {
    let (start, end) = match e.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => (line, col),
        pest::error::LineColLocation::Span((line, col), (_, _)) => (line, col),
    };
    Span {
        start,
        end,
        line,
        col,
    }
}
