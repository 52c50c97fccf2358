use crate::ast::Span;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Handle into a program's symbol table
///
/// Expressions never own a symbol; they hold this index so that every
/// occurrence of a name shares the same value cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// One entry per distinct symbol name, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    names: Vec<String>,
    by_name: HashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, creating the entry on first sight
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = SymbolId(self.names.len());
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: SymbolId) -> &str {
        &self.names[id.0]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.names.len()).map(SymbolId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (SymbolId(i), name.as_str()))
    }
}

/// Kleene three-valued truth value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TriState {
    #[default]
    #[serde(rename = "undetermined")]
    Unknown,
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
}

impl TriState {
    pub fn from_bool(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, TriState::Unknown)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        TriState::from_bool(value)
    }
}

impl std::ops::Not for TriState {
    type Output = TriState;

    fn not(self) -> TriState {
        match self {
            TriState::True => TriState::False,
            TriState::False => TriState::True,
            TriState::Unknown => TriState::Unknown,
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriState::True => write!(f, "true"),
            TriState::False => write!(f, "false"),
            TriState::Unknown => write!(f, "undetermined"),
        }
    }
}

/// A propositional expression over symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Ref(SymbolId),
    Not(Box<Expression>),
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Xor(Vec<Expression>),
}

impl Expression {
    pub fn negate(inner: Expression) -> Self {
        Expression::Not(Box::new(inner))
    }

    /// Does `symbol` occur anywhere in this expression?
    pub fn contains(&self, symbol: SymbolId) -> bool {
        match self {
            Expression::Ref(id) => *id == symbol,
            Expression::Not(inner) => inner.contains(symbol),
            Expression::And(terms) | Expression::Or(terms) | Expression::Xor(terms) => {
                terms.iter().any(|term| term.contains(symbol))
            }
        }
    }

    /// Distinct symbols in order of first occurrence
    pub fn symbols(&self) -> Vec<SymbolId> {
        let mut found = Vec::new();
        self.collect_symbols(&mut found);
        found
    }

    fn collect_symbols(&self, found: &mut Vec<SymbolId>) {
        match self {
            Expression::Ref(id) => {
                if !found.contains(id) {
                    found.push(*id);
                }
            }
            Expression::Not(inner) => inner.collect_symbols(found),
            Expression::And(terms) | Expression::Or(terms) | Expression::Xor(terms) => {
                for term in terms {
                    term.collect_symbols(found);
                }
            }
        }
    }

    /// Nesting depth, a bare reference being depth 1
    pub fn depth(&self) -> usize {
        match self {
            Expression::Ref(_) => 1,
            Expression::Not(inner) => 1 + inner.depth(),
            Expression::And(terms) | Expression::Or(terms) | Expression::Xor(terms) => {
                1 + terms.iter().map(Expression::depth).max().unwrap_or(0)
            }
        }
    }

    /// Render with symbol names resolved through `symbols`
    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> ExpressionDisplay<'a> {
        ExpressionDisplay {
            expr: self,
            symbols,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Or(_) => 1,
            Expression::Xor(_) => 2,
            Expression::And(_) => 3,
            Expression::Not(_) => 4,
            Expression::Ref(_) => 5,
        }
    }
}

pub struct ExpressionDisplay<'a> {
    expr: &'a Expression,
    symbols: &'a SymbolTable,
}

impl ExpressionDisplay<'_> {
    fn write_terms(
        &self,
        f: &mut fmt::Formatter<'_>,
        terms: &[Expression],
        operator: &str,
    ) -> fmt::Result {
        let parent = self.expr.precedence();
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", operator)?;
            }
            self.write_child(f, term, term.precedence() <= parent)?;
        }
        Ok(())
    }

    fn write_child(
        &self,
        f: &mut fmt::Formatter<'_>,
        child: &Expression,
        parenthesize: bool,
    ) -> fmt::Result {
        let inner = child.display(self.symbols);
        if parenthesize {
            write!(f, "({})", inner)
        } else {
            write!(f, "{}", inner)
        }
    }
}

impl fmt::Display for ExpressionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expression::Ref(id) => write!(f, "{}", self.symbols.name(*id)),
            Expression::Not(inner) => {
                write!(f, "!")?;
                self.write_child(f, inner, inner.precedence() < 4)
            }
            Expression::And(terms) => self.write_terms(f, terms, "+"),
            Expression::Or(terms) => self.write_terms(f, terms, "|"),
            Expression::Xor(terms) => self.write_terms(f, terms, "^"),
        }
    }
}

/// The two rule shapes of the rule language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// `premise => conclusion`
    Implication {
        premise: Expression,
        conclusion: Expression,
    },
    /// `left <=> right`
    Equivalence { left: Expression, right: Expression },
}

/// A rule together with the text it was written as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub source: String,
    pub span: Option<Span>,
}

impl Rule {
    pub fn implication(premise: Expression, conclusion: Expression) -> Self {
        Self {
            kind: RuleKind::Implication {
                premise,
                conclusion,
            },
            source: String::new(),
            span: None,
        }
    }

    pub fn equivalence(left: Expression, right: Expression) -> Self {
        Self {
            kind: RuleKind::Equivalence { left, right },
            source: String::new(),
            span: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> RuleDisplay<'a> {
        RuleDisplay {
            rule: self,
            symbols,
        }
    }
}

pub struct RuleDisplay<'a> {
    rule: &'a Rule,
    symbols: &'a SymbolTable,
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule.kind {
            RuleKind::Implication {
                premise,
                conclusion,
            } => write!(
                f,
                "{} => {}",
                premise.display(self.symbols),
                conclusion.display(self.symbols)
            ),
            RuleKind::Equivalence { left, right } => write!(
                f,
                "{} <=> {}",
                left.display(self.symbols),
                right.display(self.symbols)
            ),
        }
    }
}

/// A validated rule set with its facts and queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub rules: Vec<Rule>,
    pub facts: BTreeSet<SymbolId>,
    pub queries: Vec<SymbolId>,
    pub symbols: SymbolTable,
    pub source: Option<String>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn symbol(&self, name: &str) -> Option<SymbolId> {
        self.symbols.lookup(name)
    }

    pub fn name(&self, id: SymbolId) -> &str {
        self.symbols.name(id)
    }

    pub fn is_query(&self, id: SymbolId) -> bool {
        self.queries.contains(&id)
    }

    pub fn is_fact(&self, id: SymbolId) -> bool {
        self.facts.contains(&id)
    }

    /// Replace the declared facts, interning names the rules never mention
    pub fn replace_facts<S: AsRef<str>>(&mut self, names: &[S]) {
        self.facts = names
            .iter()
            .map(|name| self.symbols.intern(name.as_ref()))
            .collect();
    }

    /// Replace the declared queries, interning names the rules never mention
    pub fn replace_queries<S: AsRef<str>>(&mut self, names: &[S]) {
        self.queries = names
            .iter()
            .map(|name| self.symbols.intern(name.as_ref()))
            .collect();
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule.display(&self.symbols))?;
        }

        write!(f, "=")?;
        for fact in &self.facts {
            write!(f, "{}", self.name(*fact))?;
        }
        writeln!(f)?;

        write!(f, "?")?;
        for query in &self.queries {
            write!(f, "{}", self.name(*query))?;
        }
        writeln!(f)
    }
}
