use crate::ast::Span;
use crate::error::DeduceError;
use crate::parser::expressions::parse_expression;
use crate::parser::Rule;
use crate::semantic::{self, SymbolTable};
use pest::iterators::Pair;

pub(crate) fn parse_rule_statement(
    pair: Pair<Rule>,
    symbols: &mut SymbolTable,
) -> Result<semantic::Rule, DeduceError> {
    let span = Span::from_pest_span(pair.as_span());
    let source = pair.as_str().trim().to_string();

    let mut sides = Vec::with_capacity(2);
    let mut equivalence = false;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::expression => sides.push(parse_expression(inner_pair, symbols)?),
            Rule::equivalence => equivalence = true,
            Rule::implication => equivalence = false,
            _ => {}
        }
    }

    let right = sides.pop().ok_or_else(|| {
        DeduceError::Engine("Grammar error: rule_statement missing right side".to_string())
    })?;
    let left = sides.pop().ok_or_else(|| {
        DeduceError::Engine("Grammar error: rule_statement missing left side".to_string())
    })?;

    let rule = if equivalence {
        semantic::Rule::equivalence(left, right)
    } else {
        semantic::Rule::implication(left, right)
    };
    Ok(rule.with_source(source).with_span(span))
}
