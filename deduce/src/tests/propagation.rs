use crate::evaluator::context::Valuation;
use crate::evaluator::propagation::propagate;
use crate::TriState::{False, True, Unknown};
use crate::{load_program, DeduceError, Expression, Program, ResourceLimits, RuleKind};

fn program(code: &str) -> Program {
    load_program(code, None, &ResourceLimits::default()).unwrap()
}

fn conclusion(program: &Program) -> &Expression {
    match &program.rules[0].kind {
        RuleKind::Implication { conclusion, .. } => conclusion,
        RuleKind::Equivalence { right, .. } => right,
    }
}

#[test]
fn test_direct_reference() {
    let program = program("A => B\n?B");
    let valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();
    let a = program.symbol("A").unwrap();

    assert_eq!(propagate(conclusion(&program), True, b, &program, &valuation).unwrap(), True);
    assert_eq!(propagate(conclusion(&program), False, b, &program, &valuation).unwrap(), False);
    assert_eq!(propagate(conclusion(&program), Unknown, b, &program, &valuation).unwrap(), Unknown);
    // Goal not in the conclusion
    assert_eq!(propagate(conclusion(&program), True, a, &program, &valuation).unwrap(), Unknown);
}

#[test]
fn test_negation_flips_the_result() {
    let program = program("A => !B\n?B");
    let valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();

    assert_eq!(propagate(conclusion(&program), True, b, &program, &valuation).unwrap(), False);
    assert_eq!(propagate(conclusion(&program), False, b, &program, &valuation).unwrap(), True);
}

#[test]
fn test_and_true_forces_every_term() {
    let program = program("A => B + C\n?B");
    let valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();

    assert_eq!(propagate(conclusion(&program), True, b, &program, &valuation).unwrap(), True);
}

#[test]
fn test_and_true_with_false_sibling_is_a_contradiction() {
    let program = program("A => B + C\n?B");
    let mut valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();
    valuation.settle(program.symbol("C").unwrap(), False);

    let result = propagate(conclusion(&program), True, b, &program, &valuation);
    match result {
        Err(DeduceError::Contradiction { symbol, rule }) => {
            assert_eq!(symbol, "B");
            assert_eq!(rule, None);
        }
        other => panic!("Expected contradiction, got {:?}", other),
    }
}

#[test]
fn test_and_false_needs_all_siblings_true() {
    let program = program("A => B + C + D\n?B");
    let mut valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();

    valuation.settle(program.symbol("C").unwrap(), True);
    assert_eq!(propagate(conclusion(&program), False, b, &program, &valuation).unwrap(), Unknown);

    valuation.settle(program.symbol("D").unwrap(), True);
    assert_eq!(propagate(conclusion(&program), False, b, &program, &valuation).unwrap(), False);
}

#[test]
fn test_or_false_forces_every_term_false() {
    let program = program("A => B | C\n?B");
    let valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();

    assert_eq!(propagate(conclusion(&program), False, b, &program, &valuation).unwrap(), False);
}

#[test]
fn test_or_true_needs_all_siblings_false() {
    let program = program("A => B | C\n?B");
    let mut valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();

    assert_eq!(propagate(conclusion(&program), True, b, &program, &valuation).unwrap(), Unknown);

    valuation.settle(program.symbol("C").unwrap(), False);
    assert_eq!(propagate(conclusion(&program), True, b, &program, &valuation).unwrap(), True);
}

#[test]
fn test_xor_with_true_sibling() {
    let program = program("A => B ^ C\n?C");
    let mut valuation = Valuation::new(&program);
    let c = program.symbol("C").unwrap();
    valuation.settle(program.symbol("B").unwrap(), True);

    assert_eq!(propagate(conclusion(&program), True, c, &program, &valuation).unwrap(), False);
    assert_eq!(propagate(conclusion(&program), False, c, &program, &valuation).unwrap(), True);
}

#[test]
fn test_xor_with_unknown_sibling() {
    let program = program("A => B ^ C\n?C");
    let valuation = Valuation::new(&program);
    let c = program.symbol("C").unwrap();

    assert_eq!(propagate(conclusion(&program), True, c, &program, &valuation).unwrap(), Unknown);
    assert_eq!(propagate(conclusion(&program), False, c, &program, &valuation).unwrap(), Unknown);
}

#[test]
fn test_goal_nested_in_compound_term() {
    let program = program("A => B + (C | D)\n?C");
    let mut valuation = Valuation::new(&program);
    let c = program.symbol("C").unwrap();

    // B + (C | D) true forces C | D true; D unknown leaves C open
    assert_eq!(propagate(conclusion(&program), True, c, &program, &valuation).unwrap(), Unknown);

    valuation.settle(program.symbol("D").unwrap(), False);
    assert_eq!(propagate(conclusion(&program), True, c, &program, &valuation).unwrap(), True);
}

#[test]
fn test_negated_compound() {
    let program = program("A => !(B | C)\n?B");
    let valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();

    // !(B | C) true means B | C false, so B is false
    assert_eq!(propagate(conclusion(&program), True, b, &program, &valuation).unwrap(), False);
}

#[test]
fn test_propagation_never_settles_cells() {
    let program = program("A => B + C\n?B");
    let valuation = Valuation::new(&program);
    let b = program.symbol("B").unwrap();

    propagate(conclusion(&program), True, b, &program, &valuation).unwrap();
    assert_eq!(valuation, Valuation::new(&program));
}
