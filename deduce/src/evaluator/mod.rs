//! Backward-chaining inference
//!
//! Evaluates a program by:
//! 1. Proving every declared query
//! 2. Proving every symbol still without a value (closed world for non-queries)
//! 3. Proving again every query that is still undetermined
//! 4. Building the response with the derivation trace

pub mod context;
pub mod expression;
pub mod operations;
pub mod propagation;
pub mod rules;

use crate::analysis::{build_index, DependencyIndex};
use crate::response::{QueryResult, Response};
use crate::{DeduceResult, Program, SymbolId, TriState};
use context::{ResolutionContext, Valuation};
use tracing::debug;

/// Runs the three resolution passes over a program
#[derive(Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a program against the given value cells
    ///
    /// Cells settled by a previous run are reused as is. On a contradiction
    /// the error is returned and no results are produced; the caller decides
    /// what to do with the partially written cells.
    pub fn evaluate(
        &self,
        program: &Program,
        index: &DependencyIndex,
        valuation: &mut Valuation,
    ) -> DeduceResult<Response> {
        let mut context = ResolutionContext::new(program, index, valuation);

        // Pass 1: Declared queries
        for &query in &program.queries {
            rules::prove(query, &mut context)?;
        }

        // Pass 2: Everything reachable from the rule set
        for symbol in program.symbols.ids() {
            if !context.valuation.is_settled(symbol) {
                rules::prove(symbol, &mut context)?;
            }
        }

        // Pass 3: Queries that pass 2 may have unblocked
        for &query in &program.queries {
            if !context.valuation.is_settled(query) {
                debug!(symbol = %program.name(query), "retrying undetermined query");
                rules::prove(query, &mut context)?;
            }
        }

        let mut response = Response::new(program.source.clone());
        response.queries = program
            .queries
            .iter()
            .map(|&q| query_result(program, &*context.valuation, q))
            .collect();
        response.facts = program
            .symbols
            .ids()
            .filter(|&s| context.valuation.is_settled(s))
            .map(|s| query_result(program, &*context.valuation, s))
            .collect();
        response.trace = context.trace;

        Ok(response)
    }
}

fn query_result(program: &Program, valuation: &Valuation, symbol: SymbolId) -> QueryResult {
    QueryResult {
        name: program.name(symbol).to_string(),
        value: valuation.get(symbol),
    }
}

/// Run a program from scratch and return its queries in declaration order
///
/// ```
/// use deduce::{backward_chaining, load_program, ResourceLimits, TriState};
///
/// let program = load_program("A => B\n=A\n?B\n", None, &ResourceLimits::default()).unwrap();
/// let results = backward_chaining(&program).unwrap();
/// assert_eq!(results[0].name, "B");
/// assert_eq!(results[0].value, TriState::True);
/// ```
pub fn backward_chaining(program: &Program) -> DeduceResult<Vec<QueryResult>> {
    let index = build_index(program);
    let mut valuation = Valuation::new(program);
    let response = Evaluator::new().evaluate(program, &index, &mut valuation)?;
    Ok(response.queries)
}

/// Value of a single symbol after proving it on its own
pub fn prove_symbol(
    program: &Program,
    index: &DependencyIndex,
    valuation: &mut Valuation,
    symbol: SymbolId,
) -> DeduceResult<TriState> {
    let mut context = ResolutionContext::new(program, index, valuation);
    rules::prove(symbol, &mut context)
}
