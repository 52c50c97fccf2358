use crate::ast::Span;
use crate::parser::{Declaration, Rule};
use crate::semantic::SymbolTable;
use pest::iterators::Pair;

/// Collect the symbols of a `=...` or `?...` line
pub(crate) fn parse_symbol_declarations(
    pair: Pair<Rule>,
    symbols: &mut SymbolTable,
) -> Vec<Declaration> {
    pair.into_inner()
        .filter(|inner| inner.as_rule() == Rule::symbol)
        .map(|inner| Declaration {
            symbol: symbols.intern(inner.as_str()),
            span: Span::from_pest_span(inner.as_span()),
        })
        .collect()
}
