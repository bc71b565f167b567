pub mod errors;

use std::{ops::Deref, sync::Arc};

use tracing::{debug, trace};

use crate::{
    builder::{PatternBuilder, Raw},
    context::Bindings,
    dbg_line,
    pattern::Pattern,
    value::Value,
};

use self::errors::{CaseError, InvalidPattern, MatchResult, NoClauses, Result};

pub type Action = Arc<dyn Fn(&Bindings) -> Result<Value> + Send + Sync>;

/// A pattern paired with an optional action.
#[derive(Clone)]
pub struct Clause {
    pattern: Pattern,
    action: Option<Action>,
}

impl Clause {
    pub fn new(pattern: Pattern, action: Option<Action>) -> Self {
        Clause { pattern, action }
    }

    /// Clause without an action, evaluating to `true` when it matches.
    pub fn of(pattern: Pattern) -> Self {
        Clause::new(pattern, None)
    }

    pub fn then<F>(pattern: Pattern, action: F) -> Self
    where
        F: Fn(&Bindings) -> Result<Value> + Send + Sync + 'static,
    {
        Clause::new(pattern, Some(Arc::new(action)))
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// One match attempt with a fresh context. Bindings never outlive it.
    pub fn attempt(&self, subject: &Value) -> MatchResult<Bindings> {
        self.pattern.test(subject)
    }

    pub fn run(&self, bindings: &Bindings) -> Result<Value> {
        match &self.action {
            Some(action) => action(bindings),
            None => Ok(Value::Boolean(true)),
        }
    }
}

impl std::fmt::Debug for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clause")
            .field("pattern", &self.pattern)
            .field("action", &self.has_action())
            .finish()
    }
}

/// First clause that matched a subject, with its bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub clause: usize,
    pub bindings: Bindings,
}

/// Ordered, non-empty set of clauses tried first-match-wins.
#[derive(Debug, Clone)]
pub struct Case {
    clauses: Vec<Clause>,
}

impl Case {
    pub fn new(clauses: Vec<Clause>) -> Result<Self> {
        if clauses.is_empty() {
            return Err(NoClauses {
                dbg_line: dbg_line!(),
            }
            .into());
        }

        Ok(Case { clauses })
    }

    /// Declares clauses through a [`CaseBuilder`].
    ///
    /// ```
    /// use matchmaker::{array, seq, Case, Value};
    ///
    /// let case = Case::build(|c| {
    ///     c.of_then(seq![1, c.var("x")?], |b| Ok(b.get("x")?.clone()))?;
    ///     c.of(c.wildcard())?;
    ///     Ok(())
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(case.match_value(&array![1, "one"]).unwrap(), Value::from("one"));
    /// assert_eq!(case.match_value(&array![2]).unwrap(), Value::Boolean(true));
    /// ```
    pub fn build<F>(declare: F) -> Result<Self>
    where
        F: FnOnce(&mut CaseBuilder) -> Result<()>,
    {
        let mut builder = CaseBuilder::default();
        declare(&mut builder)?;
        builder.finish()
    }

    /// Builds a standalone pattern that can be reused across cases.
    pub fn pattern<T, F>(declare: F) -> Result<Pattern>
    where
        T: Into<Raw>,
        F: FnOnce(&PatternBuilder) -> Result<T>,
    {
        let patterns = PatternBuilder;
        let raw = declare(&patterns)?;
        patterns.is(raw)
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    // never true for a constructed case
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Finds the first clause matching `subject` without running its action.
    ///
    /// When every clause fails, the failure of the last one is returned.
    pub fn find(&self, subject: &Value) -> Result<Matched> {
        let mut last_failure = None;

        for (index, clause) in self.clauses.iter().enumerate() {
            match clause.attempt(subject) {
                Ok(bindings) => {
                    debug!(clause = index, bindings = bindings.len(), "clause matched");
                    return Ok(Matched {
                        clause: index,
                        bindings,
                    });
                }
                Err(failure) => {
                    trace!(clause = index, reason = %failure.message, "clause did not match");
                    last_failure = Some(failure.in_clause(index));
                }
            }
        }

        debug!(%subject, clauses = self.clauses.len(), "no clause matched");
        match last_failure {
            Some(failure) => Err(CaseError::NoMatch(failure)),
            None => Err(NoClauses {
                dbg_line: dbg_line!(),
            }
            .into()),
        }
    }

    /// Matches `subject` and evaluates the action of the first matching
    /// clause, or returns `true` if that clause has no action.
    pub fn match_value(&self, subject: &Value) -> Result<Value> {
        let Matched { clause, bindings } = self.find(subject)?;
        self.clauses[clause].run(&bindings)
    }
}

/// Receives clause declarations inside [`Case::build`]. Dereferences to
/// [`PatternBuilder`], so pattern constructors are available directly.
#[derive(Debug, Default)]
pub struct CaseBuilder {
    patterns: PatternBuilder,
    clauses: Vec<Clause>,
}

impl Deref for CaseBuilder {
    type Target = PatternBuilder;

    fn deref(&self) -> &Self::Target {
        &self.patterns
    }
}

impl CaseBuilder {
    fn clause_pattern(&self, raw: Raw) -> Result<Pattern> {
        if let Raw::Tail(tail) = raw {
            return Err(InvalidPattern {
                dbg_line: dbg_line!(),
                reason: format!(
                    "tail pattern {tail} is only allowed in structural patterns, not as a clause"
                ),
            }
            .into());
        }

        self.patterns.is(raw)
    }

    pub fn of<T: Into<Raw>>(&mut self, raw: T) -> Result<&mut Self> {
        let pattern = self.clause_pattern(raw.into())?;
        self.clauses.push(Clause::of(pattern));
        Ok(self)
    }

    pub fn of_then<T, F>(&mut self, raw: T, action: F) -> Result<&mut Self>
    where
        T: Into<Raw>,
        F: Fn(&Bindings) -> Result<Value> + Send + Sync + 'static,
    {
        let pattern = self.clause_pattern(raw.into())?;
        self.clauses.push(Clause::then(pattern, action));
        Ok(self)
    }

    pub fn finish(self) -> Result<Case> {
        Case::new(self.clauses)
    }
}

/// Builds a case from `declare` and matches `subject` against it once.
pub fn case<F>(subject: &Value, declare: F) -> Result<Value>
where
    F: FnOnce(&mut CaseBuilder) -> Result<()>,
{
    Case::build(declare)?.match_value(subject)
}
