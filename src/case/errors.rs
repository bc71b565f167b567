use std::fmt::Display;

use miette::{Diagnostic, ErrReport};
use thiserror::Error;

use crate::value::Value;

pub type Result<T, E = CaseError> = std::result::Result<T, E>;

/// Outcome of a single clause attempt, or of one nested step inside it.
pub type MatchResult<T = ()> = std::result::Result<T, NoMatch>;

#[derive(Error, Debug, Clone)]
pub enum CaseError {
    #[error(transparent)]
    NoClauses(#[from] NoClauses),
    #[error(transparent)]
    NoMatch(#[from] NoMatch),
    #[error(transparent)]
    UnboundVariable(#[from] UnboundVariable),
    #[error(transparent)]
    InvalidPattern(#[from] InvalidPattern),
}

impl CaseError {
    pub fn into_err_report(self) -> ErrReport {
        self.into()
    }
}

impl Into<ErrReport> for CaseError {
    fn into(self) -> ErrReport {
        match self {
            CaseError::NoClauses(e) => ErrReport::from(e),
            CaseError::NoMatch(e) => ErrReport::from(e),
            CaseError::UnboundVariable(e) => ErrReport::from(e),
            CaseError::InvalidPattern(e) => ErrReport::from(e),
        }
    }
}

/// One destructuring step: the subject that was visited and the pattern
/// responsible for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFrame {
    pub subject: Value,
    pub pattern: String,
}

/// Subjects visited during a failed attempt, outermost first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace(pub Vec<TraceFrame>);

impl Trace {
    pub fn frames(&self) -> &[TraceFrame] {
        &self.0
    }

    pub fn innermost(&self) -> Option<&TraceFrame> {
        self.0.last()
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (depth, frame) in self.0.iter().enumerate() {
            if depth > 0 {
                writeln!(f)?;
            }
            write!(f, "{:indent$}{} ~ {}", "", frame.subject, frame.pattern, indent = depth * 2)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("no-clauses")]
#[diagnostic(
    code(case::no_clauses),
    help("[{}] Declare at least one clause before matching", self.dbg_line)
)]
pub struct NoClauses {
    pub dbg_line: String,
}

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("no-match: {message}")]
#[diagnostic(
    code(case::no_match),
    help("[{}] Rejected at:\n{}", self.dbg_line, self.trace)
)]
pub struct NoMatch {
    pub dbg_line: String,
    pub message: String,
    pub trace: Trace,
    // Index of the clause that produced this failure, set by the engine
    pub clause: Option<usize>,
}

impl NoMatch {
    pub fn in_clause(mut self, clause: usize) -> Self {
        self.clause = Some(clause);
        self
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("unbound-variable: {name}")]
#[diagnostic(
    code(case::unbound_variable),
    help("[{}] {:?} was not bound by the matched pattern", self.dbg_line, self.name)
)]
pub struct UnboundVariable {
    pub dbg_line: String,
    pub name: String,
}

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("invalid-pattern: {reason}")]
#[diagnostic(code(case::invalid_pattern), help("[{}] {}", self.dbg_line, self.reason))]
pub struct InvalidPattern {
    pub dbg_line: String,
    pub reason: String,
}
