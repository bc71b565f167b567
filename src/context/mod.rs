mod bindings;
pub use bindings::Bindings;

use std::panic::Location;

use tracing::trace;

use crate::{
    case::errors::{MatchResult, NoMatch, Trace, TraceFrame},
    pattern::Pattern,
    value::Value,
};

/// State of one top-level match attempt.
///
/// `stack` holds the subjects currently being destructured, innermost last,
/// and `pattern_stack` the pattern responsible for each of them. Both start
/// with the original subject and its pattern and are only ever grown and
/// shrunk in pairs by [`MatchContext::nest`] and [`MatchContext::nest_with`].
pub struct MatchContext<'v> {
    stack: Vec<&'v Value>,
    pattern_stack: Vec<Option<Pattern>>,
    bindings: Bindings,
}

impl<'v> MatchContext<'v> {
    pub fn new(subject: &'v Value, pattern: &Pattern) -> Self {
        MatchContext {
            stack: vec![subject],
            pattern_stack: vec![Some(pattern.clone())],
            bindings: Bindings::default(),
        }
    }

    pub fn current(&self) -> &'v Value {
        self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    /// Binds `name` to `value`. Binding a name that is already bound only
    /// succeeds when both values are equal.
    #[track_caller]
    pub fn bind(&mut self, name: &str, value: Value) -> MatchResult {
        if let Some(bound) = self.bindings.try_get(name) {
            if *bound != value {
                return self.fail(format!(
                    "variable {name:?} is already bound to {bound}, cannot rebind it to {value}"
                ));
            }
            return Ok(());
        }

        trace!(variable = name, %value, "bound variable");
        self.bindings.insert(name, value);
        Ok(())
    }

    /// Aborts the attempt, snapshotting the current stacks as the trace.
    ///
    /// The failure's `dbg_line` is the location of the caller.
    #[track_caller]
    pub fn fail<T, M: Into<String>>(&self, message: M) -> MatchResult<T> {
        let caller = Location::caller();
        Err(NoMatch {
            dbg_line: format!("{}:{}", caller.file(), caller.line()),
            message: message.into(),
            trace: self.trace(),
            clause: None,
        })
    }

    pub fn trace(&self) -> Trace {
        Trace(
            self.stack
                .iter()
                .zip(&self.pattern_stack)
                .map(|(subject, pattern)| TraceFrame {
                    subject: (*subject).clone(),
                    pattern: match pattern {
                        Some(pattern) => pattern.to_string(),
                        None => "<custom>".to_string(),
                    },
                })
                .collect(),
        )
    }

    /// Matches `pattern` against `object` in a new frame.
    pub fn nest(&mut self, object: &'v Value, pattern: &Pattern) -> MatchResult {
        self.stack.push(object);
        self.pattern_stack.push(Some(pattern.clone()));
        let result = pattern.matches(self);
        self.pop();
        result
    }

    /// Runs custom matching logic with `object` as the current subject.
    pub fn nest_with<T, F>(&mut self, object: &'v Value, match_fn: F) -> MatchResult<T>
    where
        F: FnOnce(&mut Self) -> MatchResult<T>,
    {
        self.stack.push(object);
        self.pattern_stack.push(None);
        let result = match_fn(self);
        self.pop();
        result
    }

    fn pop(&mut self) {
        self.stack.pop();
        self.pattern_stack.pop();
    }
}
