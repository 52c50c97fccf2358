//! Kleene operations over `TriState`
//!
//! Shared by the proving evaluator and by the non-proving peek used during
//! reverse propagation.

use super::context::Valuation;
use crate::{Expression, TriState};

/// False if any operand is false, else unknown if any is unknown, else true
pub fn and(values: impl IntoIterator<Item = TriState>) -> TriState {
    let mut result = TriState::True;
    for value in values {
        match value {
            TriState::False => return TriState::False,
            TriState::Unknown => result = TriState::Unknown,
            TriState::True => {}
        }
    }
    result
}

/// True if any operand is true, false only if all are false
pub fn or(values: impl IntoIterator<Item = TriState>) -> TriState {
    let mut result = TriState::False;
    for value in values {
        match value {
            TriState::True => return TriState::True,
            TriState::Unknown => result = TriState::Unknown,
            TriState::False => {}
        }
    }
    result
}

/// Odd parity of true operands, unknown as soon as any operand is
pub fn xor(values: impl IntoIterator<Item = TriState>) -> TriState {
    let mut parity = false;
    for value in values {
        match value.as_bool() {
            Some(b) => parity ^= b,
            None => return TriState::Unknown,
        }
    }
    TriState::from_bool(parity)
}

/// Evaluate over already-settled values only; never starts a proof
pub fn peek(expr: &Expression, valuation: &Valuation) -> TriState {
    match expr {
        Expression::Ref(symbol) => valuation.get(*symbol),
        Expression::Not(inner) => !peek(inner, valuation),
        Expression::And(terms) => and(terms.iter().map(|t| peek(t, valuation))),
        Expression::Or(terms) => or(terms.iter().map(|t| peek(t, valuation))),
        Expression::Xor(terms) => xor(terms.iter().map(|t| peek(t, valuation))),
    }
}
