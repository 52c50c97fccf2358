use crate::error::DeduceError;
use crate::parser::Rule;
use crate::semantic::{Expression, SymbolTable};
use pest::iterators::Pair;

/// Convert an `expression` pair (or any of its precedence levels)
///
/// Each level yields a flat n-ary node; a level holding a single operand
/// collapses to that operand.
pub(crate) fn parse_expression(
    pair: Pair<Rule>,
    symbols: &mut SymbolTable,
) -> Result<Expression, DeduceError> {
    match pair.as_rule() {
        Rule::expression => parse_level(pair, symbols, Expression::Or),
        Rule::xor_expression => parse_level(pair, symbols, Expression::Xor),
        Rule::and_expression => parse_level(pair, symbols, Expression::And),
        Rule::unary => parse_unary(pair, symbols),
        Rule::symbol => Ok(Expression::Ref(symbols.intern(pair.as_str()))),
        other => Err(DeduceError::Engine(format!(
            "Invalid expression: unexpected {:?} in '{}'",
            other,
            pair.as_str()
        ))),
    }
}

fn parse_level(
    pair: Pair<Rule>,
    symbols: &mut SymbolTable,
    build: fn(Vec<Expression>) -> Expression,
) -> Result<Expression, DeduceError> {
    let mut terms = pair
        .into_inner()
        .map(|inner| parse_expression(inner, symbols))
        .collect::<Result<Vec<_>, _>>()?;

    match terms.len() {
        0 => Err(DeduceError::Engine("Empty expression".to_string())),
        1 => Ok(terms.remove(0)),
        _ => Ok(build(terms)),
    }
}

fn parse_unary(pair: Pair<Rule>, symbols: &mut SymbolTable) -> Result<Expression, DeduceError> {
    let mut negations = 0;
    let mut operand = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::negation => negations += 1,
            _ => operand = Some(parse_expression(inner, symbols)?),
        }
    }

    let mut expr = operand
        .ok_or_else(|| DeduceError::Engine("Grammar error: unary missing operand".to_string()))?;
    for _ in 0..negations {
        expr = Expression::negate(expr);
    }
    Ok(expr)
}
