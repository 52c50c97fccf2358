//! # Deduce Engine
//!
//! **Backward chaining over propositional rules**
//!
//! Deduce reads a small rule language (rules over single-letter symbols,
//! an initial fact line and a query line) and answers every query with
//! `true`, `false` or `undetermined`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deduce::{DeduceResult, Engine};
//!
//! fn main() -> DeduceResult<()> {
//!     let mut engine = Engine::from_source(
//!         r#"
//! A + B => C     # both needed
//! C <=> D
//! =AB
//! ?D
//! "#,
//!         "example.txt",
//!     )?;
//!
//!     let response = engine.evaluate()?;
//!     for query in &response.queries {
//!         println!("{}", query);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Symbols
//! A symbol is a single uppercase letter. Each one owns a value cell that
//! starts undetermined (or true when listed on the fact line) and is settled
//! at most once per run.
//!
//! ### Rules
//! `P => C` forces the conclusion `C` when the premise `P` holds.
//! `L <=> R` works in both directions. Both sides are full expressions over
//! `!`, `+` (and), `|` (or) and `^` (xor).
//!
//! ### Resolution
//! Goals are proved on demand, following only the rules that can produce
//! them. Symbols nobody can prove are false (closed world); queries that
//! cannot be decided stay undetermined. Rules forcing opposite values onto a
//! symbol abort the run with a contradiction.

pub mod analysis;
pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod semantic;
pub mod validator;

pub use analysis::{build_index, DependencyIndex};
pub use ast::Span;
pub use engine::{load_program, Engine};
pub use error::DeduceError;
pub use evaluator::{backward_chaining, Evaluator};
pub use parser::{parse, parse_symbols};
pub use resource_limits::ResourceLimits;
pub use response::{QueryResult, Response, TraceKind, TraceRecord};
pub use semantic::*;
pub use validator::Validator;

/// Result type for deduce operations
pub type DeduceResult<T> = Result<T, DeduceError>;

#[cfg(test)]
mod tests;
