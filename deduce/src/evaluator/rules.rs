//! Backward-chaining resolution
//!
//! `prove` settles one goal symbol by looking only at the rules that can
//! produce it, evaluating their premises and combining their verdicts.

use super::context::ResolutionContext;
use super::expression::evaluate_expression;
use super::propagation::propagate;
use crate::response::TraceKind;
use crate::{DeduceError, DeduceResult, Rule, RuleKind, SymbolId, TriState};
use tracing::{debug, trace};

/// What a single rule says about a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleOutcome {
    /// The rule fired and pins the goal to a value
    Verdict(TriState),
    /// The rule fired without pinning the goal, or may still fire
    Undetermined,
    /// The rule cannot fire: its premise is false
    Blocked,
}

/// Prove `goal`, caching the settled value on its cell.
///
/// - A settled cell is returned as is.
/// - A goal already on the proof path is a cycle: the result is `False` for a
///   non-query and `Unknown` for a query, and nothing is cached.
/// - Otherwise every producing rule is applied. Two rules disagreeing on a
///   determined value is a contradiction.
/// - An undetermined non-query falls back to the closed-world default
///   (`False`). A query stays undetermined unless it has producing rules and
///   none of them can fire, in which case it is `False` as well.
pub fn prove(goal: SymbolId, context: &mut ResolutionContext) -> DeduceResult<TriState> {
    let cached = context.valuation.get(goal);
    if cached.is_known() {
        return Ok(cached);
    }

    let is_query = context.is_query(goal);

    if context.is_on_path(goal) {
        let assumed = if is_query {
            TriState::Unknown
        } else {
            TriState::False
        };
        trace!(symbol = %context.program.name(goal), %assumed, "cycle broken");
        let symbol = context.name(goal);
        context.record(TraceKind::CycleBroken { symbol, assumed });
        return Ok(assumed);
    }

    debug!(symbol = %context.program.name(goal), depth = context.path.len(), "proving");
    context.path.push(goal);
    let resolved = resolve_goal(goal, is_query, context);
    context.path.pop();
    let value = resolved?;

    if value.is_known() {
        context.valuation.settle(goal, value);
    }
    debug!(symbol = %context.program.name(goal), %value, "settled");
    let symbol = context.name(goal);
    context.record(TraceKind::Settled { symbol, value });

    Ok(value)
}

fn resolve_goal(
    goal: SymbolId,
    is_query: bool,
    context: &mut ResolutionContext,
) -> DeduceResult<TriState> {
    let program = context.program;
    let producing: Vec<usize> = context
        .index
        .rules_producing(goal)
        .iter()
        .map(|node| node.rule)
        .collect();

    let mut verdicts: Vec<(TriState, &Rule)> = Vec::new();
    let mut undetermined = false;

    for &position in &producing {
        let rule = &program.rules[position];
        match apply_rule(rule, goal, context)? {
            RuleOutcome::Verdict(value) => {
                if verdicts.iter().any(|(other, _)| *other != value) {
                    debug!(symbol = %program.name(goal), rule = %rule.source, "contradiction");
                    return Err(DeduceError::contradiction(
                        program.name(goal),
                        Some(rule.source.clone()),
                    ));
                }
                verdicts.push((value, rule));
            }
            RuleOutcome::Undetermined => undetermined = true,
            RuleOutcome::Blocked => {}
        }
    }

    let computed = if verdicts.iter().any(|(v, _)| *v == TriState::True) {
        TriState::True
    } else if verdicts.iter().any(|(v, _)| *v == TriState::False) {
        TriState::False
    } else {
        TriState::Unknown
    };

    if computed.is_known() {
        return Ok(computed);
    }

    if !is_query {
        trace!(symbol = %program.name(goal), "closed world");
        let symbol = context.name(goal);
        context.record(TraceKind::ClosedWorld { symbol });
        return Ok(TriState::False);
    }

    if !producing.is_empty() && !undetermined {
        return Ok(TriState::False);
    }

    Ok(TriState::Unknown)
}

/// Apply one producing rule to `goal`
fn apply_rule(
    rule: &Rule,
    goal: SymbolId,
    context: &mut ResolutionContext,
) -> DeduceResult<RuleOutcome> {
    let (conclusion, trigger) = match &rule.kind {
        RuleKind::Implication {
            premise,
            conclusion,
        } => {
            let premise_value = evaluate_expression(premise, context)?;
            if premise_value == TriState::False {
                let symbol = context.name(goal);
                context.record(TraceKind::RuleApplied {
                    symbol,
                    rule: rule.source.clone(),
                    premise: premise_value,
                    verdict: TriState::Unknown,
                });
                return Ok(RuleOutcome::Blocked);
            }
            (conclusion, premise_value)
        }
        RuleKind::Equivalence { left, right } => {
            let (conclusion, other) = if left.contains(goal) {
                (left, right)
            } else {
                (right, left)
            };
            (conclusion, evaluate_expression(other, context)?)
        }
    };

    let verdict = propagate(conclusion, trigger, goal, context.program, &*context.valuation)
        .map_err(|e| match e {
            DeduceError::Contradiction { symbol, rule: None } => {
                DeduceError::contradiction(symbol, Some(rule.source.clone()))
            }
            other => other,
        })?;

    trace!(symbol = %context.program.name(goal), rule = %rule.source, %trigger, %verdict, "rule applied");
    let symbol = context.name(goal);
    context.record(TraceKind::RuleApplied {
        symbol,
        rule: rule.source.clone(),
        premise: trigger,
        verdict,
    });

    Ok(if verdict.is_known() {
        RuleOutcome::Verdict(verdict)
    } else {
        RuleOutcome::Undetermined
    })
}
