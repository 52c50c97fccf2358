//! Dependency analysis between rules and symbols
//!
//! The index built here lets the resolver look only at the rules that can
//! produce a goal instead of scanning the whole rule set for every proof.

use crate::{Program, RuleKind, SymbolId};

/// A rule as seen by the index
#[derive(Debug, Clone, PartialEq)]
pub struct RuleNode {
    /// Position of the rule in `Program::rules`
    pub rule: usize,
    /// Symbols read by the rule (the left side of an equivalence)
    pub premise_symbols: Vec<SymbolId>,
    /// Symbols written by the rule (the right side of an equivalence)
    pub conclusion_symbols: Vec<SymbolId>,
}

/// Back-references from a symbol to the rules around it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolNode {
    pub produced_by: Vec<usize>,
    pub used_by: Vec<usize>,
}

/// Which rules produce and which rules use every symbol
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyIndex {
    rules: Vec<RuleNode>,
    symbols: Vec<SymbolNode>,
}

/// Build the dependency index for a program.
///
/// An implication produces the symbols of its conclusion and uses the
/// symbols of its premise. An equivalence can be triggered from either side,
/// so every symbol on either side is both produced and used by it.
///
/// # Examples
/// ```text
/// Rules:
///   0: A + B => C
///   1: C <=> D
///
/// produced_by: C -> [0, 1], D -> [1]
/// used_by:     A -> [0], B -> [0], C -> [1], D -> [1]
/// ```
pub fn build_index(program: &Program) -> DependencyIndex {
    let mut symbols = vec![SymbolNode::default(); program.symbols.len()];
    let mut rules = Vec::with_capacity(program.rules.len());

    for (position, rule) in program.rules.iter().enumerate() {
        let (premise_symbols, conclusion_symbols) = match &rule.kind {
            RuleKind::Implication {
                premise,
                conclusion,
            } => (premise.symbols(), conclusion.symbols()),
            RuleKind::Equivalence { left, right } => (left.symbols(), right.symbols()),
        };

        let bidirectional = matches!(rule.kind, RuleKind::Equivalence { .. });

        for symbol in &conclusion_symbols {
            link(&mut symbols[symbol.index()].produced_by, position);
            if bidirectional {
                link(&mut symbols[symbol.index()].used_by, position);
            }
        }
        for symbol in &premise_symbols {
            link(&mut symbols[symbol.index()].used_by, position);
            if bidirectional {
                link(&mut symbols[symbol.index()].produced_by, position);
            }
        }

        rules.push(RuleNode {
            rule: position,
            premise_symbols,
            conclusion_symbols,
        });
    }

    DependencyIndex { rules, symbols }
}

fn link(rules: &mut Vec<usize>, position: usize) {
    if !rules.contains(&position) {
        rules.push(position);
    }
}

impl DependencyIndex {
    /// Rules that can settle `symbol`, in program order
    pub fn rules_producing(&self, symbol: SymbolId) -> Vec<&RuleNode> {
        self.symbols
            .get(symbol.index())
            .map(|node| node.produced_by.iter().map(|&r| &self.rules[r]).collect())
            .unwrap_or_default()
    }

    /// Rules whose evaluation reads `symbol`, in program order
    pub fn rules_using(&self, symbol: SymbolId) -> Vec<&RuleNode> {
        self.symbols
            .get(symbol.index())
            .map(|node| node.used_by.iter().map(|&r| &self.rules[r]).collect())
            .unwrap_or_default()
    }

    pub fn symbol_node(&self, symbol: SymbolId) -> Option<&SymbolNode> {
        self.symbols.get(symbol.index())
    }

    pub fn rule_nodes(&self) -> &[RuleNode] {
        &self.rules
    }
}
