//! Resolution state for one program
//!
//! `Valuation` owns the value cell of every symbol. `ResolutionContext`
//! borrows it for the duration of a run together with the active proof path
//! and the derivation trace.

use crate::analysis::DependencyIndex;
use crate::response::{TraceKind, TraceRecord};
use crate::{Program, SymbolId, TriState};
use std::collections::HashSet;

/// One value cell per symbol, indexed by `SymbolId`
///
/// A cell only ever moves from `Unknown` to a settled value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    values: Vec<TriState>,
}

impl Valuation {
    /// Declared facts start true, everything else unknown
    pub fn new(program: &Program) -> Self {
        let mut values = vec![TriState::Unknown; program.symbols.len()];
        for fact in &program.facts {
            values[fact.index()] = TriState::True;
        }
        Self { values }
    }

    pub fn get(&self, symbol: SymbolId) -> TriState {
        self.values
            .get(symbol.index())
            .copied()
            .unwrap_or(TriState::Unknown)
    }

    pub(crate) fn settle(&mut self, symbol: SymbolId, value: TriState) {
        if symbol.index() >= self.values.len() {
            self.values.resize(symbol.index() + 1, TriState::Unknown);
        }
        self.values[symbol.index()] = value;
    }

    pub fn is_settled(&self, symbol: SymbolId) -> bool {
        self.get(symbol).is_known()
    }
}

/// Context for resolving goals in a program
///
/// Contains all state needed during one run:
/// - the program and its dependency index (read only)
/// - the value cells (written only by the resolver)
/// - the active proof path, used to break cycles
/// - the derivation trace
pub struct ResolutionContext<'a> {
    pub program: &'a Program,
    pub index: &'a DependencyIndex,
    pub valuation: &'a mut Valuation,

    /// Declared queries; these escape the closed-world default
    pub queries: HashSet<SymbolId>,

    /// Goals currently being proved, outermost first
    pub path: Vec<SymbolId>,

    pub trace: Vec<TraceRecord>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        program: &'a Program,
        index: &'a DependencyIndex,
        valuation: &'a mut Valuation,
    ) -> Self {
        Self {
            program,
            index,
            valuation,
            queries: program.queries.iter().copied().collect(),
            path: Vec::new(),
            trace: Vec::new(),
        }
    }

    pub fn is_query(&self, symbol: SymbolId) -> bool {
        self.queries.contains(&symbol)
    }

    pub fn is_on_path(&self, symbol: SymbolId) -> bool {
        self.path.contains(&symbol)
    }

    pub fn name(&self, symbol: SymbolId) -> String {
        self.program.name(symbol).to_string()
    }

    /// Record a trace entry at the current proof depth
    pub fn record(&mut self, kind: TraceKind) {
        self.trace.push(TraceRecord {
            depth: self.path.len(),
            kind,
        });
    }
}
