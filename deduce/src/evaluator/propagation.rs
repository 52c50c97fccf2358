//! Reverse conclusion propagation
//!
//! A triggered rule forces its whole conclusion to a value. When the
//! conclusion is compound (`B ^ C`, `B | C`, `!(B + C)`) that does not in
//! general settle every symbol in it. This module works out what, if
//! anything, follows for one specific symbol.
//!
//! Sibling terms are only peeked at: their already-settled values are read,
//! no proof is started and nothing is cached. A rule therefore never
//! reasons about itself through a cycle.

use super::context::Valuation;
use super::operations::peek;
use crate::{DeduceError, DeduceResult, Expression, Program, SymbolId, TriState};

/// Value implied for `goal` by `conclusion` being forced to `result`.
///
/// Returns `Unknown` when nothing can be concluded and a contradiction when
/// the forced value is impossible given what is already settled (an AND
/// forced true with a term already known false).
///
/// When `goal` sits inside a compound term of an n-ary node, the value
/// derived for that term is pushed down into it recursively.
pub fn propagate(
    conclusion: &Expression,
    result: TriState,
    goal: SymbolId,
    program: &Program,
    valuation: &Valuation,
) -> DeduceResult<TriState> {
    if !result.is_known() {
        return Ok(TriState::Unknown);
    }

    match conclusion {
        Expression::Ref(symbol) => Ok(if *symbol == goal {
            result
        } else {
            TriState::Unknown
        }),

        Expression::Not(inner) => propagate(inner, !result, goal, program, valuation),

        Expression::And(terms) => {
            let Some((term, siblings)) = split_goal_term(terms, goal, valuation) else {
                return Ok(TriState::Unknown);
            };
            let forced = match result {
                TriState::True => {
                    if siblings.contains(&TriState::False) {
                        return Err(DeduceError::contradiction(program.name(goal), None));
                    }
                    TriState::True
                }
                _ => {
                    if siblings.iter().all(|v| *v == TriState::True) {
                        TriState::False
                    } else {
                        TriState::Unknown
                    }
                }
            };
            propagate(term, forced, goal, program, valuation)
        }

        Expression::Or(terms) => {
            let Some((term, siblings)) = split_goal_term(terms, goal, valuation) else {
                return Ok(TriState::Unknown);
            };
            let forced = match result {
                TriState::False => TriState::False,
                _ => {
                    if siblings.iter().all(|v| *v == TriState::False) {
                        TriState::True
                    } else {
                        TriState::Unknown
                    }
                }
            };
            propagate(term, forced, goal, program, valuation)
        }

        Expression::Xor(terms) => {
            let Some((term, siblings)) = split_goal_term(terms, goal, valuation) else {
                return Ok(TriState::Unknown);
            };
            let forced = xor_elimination(result, &siblings);
            propagate(term, forced, goal, program, valuation)
        }
    }
}

/// Elimination table for exclusive-or conclusions.
///
/// Not n-ary parity: one true sibling forces the goal
/// false under a true result regardless of how many other terms there are.
fn xor_elimination(result: TriState, siblings: &[TriState]) -> TriState {
    let true_count = siblings.iter().filter(|v| **v == TriState::True).count();
    let unknown = siblings.contains(&TriState::Unknown);

    match result {
        TriState::True => {
            if true_count == 0 && !unknown {
                TriState::True
            } else if true_count >= 1 {
                TriState::False
            } else {
                TriState::Unknown
            }
        }
        TriState::False => {
            if true_count == 1 {
                TriState::True
            } else if true_count == 0 && !unknown {
                TriState::False
            } else {
                TriState::Unknown
            }
        }
        TriState::Unknown => TriState::Unknown,
    }
}

/// First term containing `goal`, plus the peeked values of all other terms
fn split_goal_term<'e>(
    terms: &'e [Expression],
    goal: SymbolId,
    valuation: &Valuation,
) -> Option<(&'e Expression, Vec<TriState>)> {
    let position = terms.iter().position(|term| term.contains(goal))?;
    let siblings = terms
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != position)
        .map(|(_, term)| peek(term, valuation))
        .collect();
    Some((&terms[position], siblings))
}
