use crate::analysis::{build_index, DependencyIndex};
use crate::evaluator::context::Valuation;
use crate::evaluator::{prove_symbol, Evaluator};
use crate::{
    parse, DeduceError, DeduceResult, Program, ResourceLimits, Response, TriState, Validator,
};
use tracing::debug;

/// Parse and validate a rule file into a `Program`
pub fn load_program(
    code: &str,
    source_id: Option<String>,
    limits: &ResourceLimits,
) -> DeduceResult<Program> {
    let parsed = parse(code, source_id, limits)?;
    Validator::new().validate(parsed)
}

/// The inference engine.
///
/// Owns one program, its dependency index and its value cells. Cells persist
/// between calls, so a second `evaluate` reuses what the first one settled.
/// Changing facts or queries starts over from fresh cells.
pub struct Engine {
    program: Program,
    index: DependencyIndex,
    valuation: Valuation,
    evaluator: Evaluator,
    limits: ResourceLimits,
}

impl Engine {
    pub fn new(program: Program) -> Self {
        Self::with_limits(program, ResourceLimits::default())
    }

    pub fn with_limits(program: Program, limits: ResourceLimits) -> Self {
        let index = build_index(&program);
        let valuation = Valuation::new(&program);
        Self {
            program,
            index,
            valuation,
            evaluator: Evaluator::new(),
            limits,
        }
    }

    /// Load an engine straight from rule file contents
    pub fn from_source(code: &str, source_id: &str) -> DeduceResult<Self> {
        Self::from_source_with_limits(code, source_id, ResourceLimits::default())
    }

    pub fn from_source_with_limits(
        code: &str,
        source_id: &str,
        limits: ResourceLimits,
    ) -> DeduceResult<Self> {
        let program = load_program(code, Some(source_id.to_string()), &limits)?;
        Ok(Self::with_limits(program, limits))
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn index(&self) -> &DependencyIndex {
        &self.index
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Replace the initial facts, e.g. from `-f ABC` on the command line
    ///
    /// A name listed twice is rejected and leaves the engine untouched.
    pub fn set_facts<S: AsRef<str>>(&mut self, names: &[S]) -> DeduceResult<()> {
        Validator::new().validate_symbol_list(names, "fact")?;
        self.program.replace_facts(names);
        self.reset();
        Ok(())
    }

    pub fn set_queries<S: AsRef<str>>(&mut self, names: &[S]) -> DeduceResult<()> {
        Validator::new().validate_symbol_list(names, "query")?;
        self.program.replace_queries(names);
        self.reset();
        Ok(())
    }

    /// Run all three passes
    ///
    /// On a contradiction the cells are reset so the next call starts clean.
    pub fn evaluate(&mut self) -> DeduceResult<Response> {
        let result = self
            .evaluator
            .evaluate(&self.program, &self.index, &mut self.valuation);
        if let Err(e) = &result {
            debug!(error = %e, "evaluation aborted, resetting values");
            self.valuation = Valuation::new(&self.program);
        }
        result
    }

    /// Prove a single symbol by name
    pub fn prove(&mut self, name: &str) -> DeduceResult<TriState> {
        let symbol = self
            .program
            .symbol(name)
            .ok_or_else(|| DeduceError::Engine(format!("Unknown symbol '{}'", name)))?;
        let result = prove_symbol(&self.program, &self.index, &mut self.valuation, symbol);
        if result.is_err() {
            self.valuation = Valuation::new(&self.program);
        }
        result
    }

    /// Current value of a symbol, without proving anything
    pub fn value_of(&self, name: &str) -> Option<TriState> {
        self.program.symbol(name).map(|s| self.valuation.get(s))
    }

    fn reset(&mut self) {
        self.index = build_index(&self.program);
        self.valuation = Valuation::new(&self.program);
    }
}
