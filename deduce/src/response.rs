use crate::TriState;
use serde::Serialize;
use std::fmt;

/// A symbol with its value at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub name: String,
    pub value: TriState,
}

/// Response from evaluating a program
///
/// `queries` holds one entry per declared query in declaration order.
/// `facts` lists every symbol the run settled, in symbol order.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub queries: Vec<QueryResult>,
    pub facts: Vec<QueryResult>,
    pub trace: Vec<TraceRecord>,
}

/// A single step of a derivation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    /// Length of the proof path when the step happened
    pub depth: usize,
    #[serde(flatten)]
    pub kind: TraceKind,
}

/// The kind of step taken
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceKind {
    /// A producing rule was tried for `symbol`
    RuleApplied {
        symbol: String,
        /// The rule as written in source
        rule: String,
        /// Value of the premise (or the opposite side of an equivalence)
        premise: TriState,
        /// Value the rule implies for `symbol`
        verdict: TriState,
    },
    /// `symbol` was reached again while it was being proved
    CycleBroken { symbol: String, assumed: TriState },
    /// No rule decided `symbol`, so it defaults to false
    ClosedWorld { symbol: String },
    Settled { symbol: String, value: TriState },
}

impl Response {
    pub fn new(source: Option<String>) -> Self {
        Self {
            source,
            queries: Vec::new(),
            facts: Vec::new(),
            trace: Vec::new(),
        }
    }

    /// Value of a query by name
    pub fn query(&self, name: &str) -> Option<TriState> {
        self.queries
            .iter()
            .find(|q| q.name == name)
            .map(|q| q.value)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.name, self.value)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.depth);
        match &self.kind {
            TraceKind::RuleApplied {
                symbol,
                rule,
                premise,
                verdict,
            } => {
                if *verdict == TriState::Unknown {
                    write!(
                        f,
                        "{}'{}' tells nothing about {} (premise is {})",
                        indent, rule, symbol, premise
                    )
                } else {
                    write!(
                        f,
                        "{}Since the premise of '{}' is {}, {} is {}",
                        indent, rule, premise, symbol, verdict
                    )
                }
            }
            TraceKind::CycleBroken { symbol, assumed } => {
                write!(
                    f,
                    "{}{} depends on itself, assuming {}",
                    indent, symbol, assumed
                )
            }
            TraceKind::ClosedWorld { symbol } => {
                write!(f, "{}Nothing proves {}, so it is false", indent, symbol)
            }
            TraceKind::Settled { symbol, value } => {
                write!(f, "{}{} is {}", indent, symbol, value)
            }
        }
    }
}
