//! Expression evaluation
//!
//! Evaluates an expression tree to a three-valued result, proving every
//! leaf symbol on demand.

use super::context::ResolutionContext;
use super::operations;
use super::rules::prove;
use crate::{DeduceResult, Expression, TriState};

/// Evaluate an expression under Kleene semantics.
///
/// A symbol reference is the only place where evaluation recurses into proof
/// search. `And` stops at the first false term and `Or` at the first true
/// term; every other term is proved before the result is known.
pub fn evaluate_expression(
    expr: &Expression,
    context: &mut ResolutionContext,
) -> DeduceResult<TriState> {
    match expr {
        Expression::Ref(symbol) => prove(*symbol, context),

        Expression::Not(inner) => Ok(!evaluate_expression(inner, context)?),

        Expression::And(terms) => {
            let mut values = Vec::with_capacity(terms.len());
            for term in terms {
                let value = evaluate_expression(term, context)?;
                if value == TriState::False {
                    return Ok(TriState::False);
                }
                values.push(value);
            }
            Ok(operations::and(values))
        }

        Expression::Or(terms) => {
            let mut values = Vec::with_capacity(terms.len());
            for term in terms {
                let value = evaluate_expression(term, context)?;
                if value == TriState::True {
                    return Ok(TriState::True);
                }
                values.push(value);
            }
            Ok(operations::or(values))
        }

        Expression::Xor(terms) => {
            let mut values = Vec::with_capacity(terms.len());
            for term in terms {
                values.push(evaluate_expression(term, context)?);
            }
            Ok(operations::xor(values))
        }
    }
}
