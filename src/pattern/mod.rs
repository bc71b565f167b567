mod array;
mod map;
mod tail;
pub use self::{
    array::{ArrayPattern, Element},
    map::{MapKey, MapPattern},
    tail::{TailGuard, TailPattern},
};

use std::{fmt::Display, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    case::errors::{InvalidPattern, MatchResult},
    context::{Bindings, MatchContext},
    dbg_line,
    value::Value,
};

static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("variable name regex is valid")
});

pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Matching logic that needs the context, e.g. to nest into children of the
/// subject.
pub trait Destructure: Send + Sync {
    fn destructure<'v>(&self, subject: &'v Value, context: &mut MatchContext<'v>) -> MatchResult;

    // shown in diagnostics
    fn describe(&self) -> String;
}

#[derive(Clone)]
pub enum Matcher {
    Predicate(Predicate),
    Structural(Arc<dyn Destructure>),
    // Delegates to another pattern, used for aliasing and `bind`
    Nested(Pattern),
}

#[derive(Clone)]
struct PatternNode {
    matcher: Matcher,
    guard: Option<Predicate>,
    variable: Option<String>,
    label: String,
}

/// Immutable, cheaply clonable pattern node.
///
/// A pattern first runs its matcher, then its guard, then binds its variable,
/// all against the context's current subject.
#[derive(Clone)]
pub struct Pattern(Arc<PatternNode>);

pub(crate) fn normalize_variable(name: &str) -> Result<String, InvalidPattern> {
    if VARIABLE_NAME.is_match(name) {
        Ok(name.to_lowercase())
    } else {
        Err(InvalidPattern {
            dbg_line: dbg_line!(),
            reason: format!("{name:?} is not a valid variable name"),
        })
    }
}

impl Pattern {
    pub fn new<T: Into<String>>(matcher: Matcher, label: T) -> Self {
        Pattern(Arc::new(PatternNode {
            matcher,
            guard: None,
            variable: None,
            label: label.into(),
        }))
    }

    pub fn predicate<T, F>(label: T, predicate: F) -> Self
    where
        T: Into<String>,
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Pattern::new(Matcher::Predicate(Arc::new(predicate)), label)
    }

    pub fn structural<D: Destructure + 'static>(structure: D) -> Self {
        let label = structure.describe();
        Pattern::new(Matcher::Structural(Arc::new(structure)), label)
    }

    pub fn nested(inner: Pattern) -> Self {
        let label = inner.label().to_string();
        Pattern::new(Matcher::Nested(inner), label)
    }

    fn rebuild<F: FnOnce(&mut PatternNode)>(self, update: F) -> Self {
        let mut node = Arc::try_unwrap(self.0).unwrap_or_else(|node| (*node).clone());
        update(&mut node);
        Pattern(Arc::new(node))
    }

    /// Returns a copy of this pattern guarded by `guard`, replacing any
    /// previous guard.
    pub fn when<F>(self, guard: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rebuild(|node| node.guard = Some(Arc::new(guard)))
    }

    /// Returns a copy of this pattern that binds the subject to `variable`.
    pub fn named(self, variable: &str) -> Result<Self, InvalidPattern> {
        let variable = normalize_variable(variable)?;
        Ok(self.rebuild(|node| node.variable = Some(variable)))
    }

    pub fn labeled<T: Into<String>>(self, label: T) -> Self {
        let label = label.into();
        self.rebuild(|node| node.label = label)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.0.matcher
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn variable(&self) -> Option<&str> {
        self.0.variable.as_deref()
    }

    pub fn has_guard(&self) -> bool {
        self.0.guard.is_some()
    }

    /// Matches the context's current subject.
    pub fn matches<'v>(&self, context: &mut MatchContext<'v>) -> MatchResult {
        let subject = context.current();

        match &self.0.matcher {
            Matcher::Nested(inner) => inner.matches(context)?,
            Matcher::Predicate(predicate) => {
                if !predicate(subject) {
                    return context.fail("pattern did not match");
                }
            }
            Matcher::Structural(structure) => structure.destructure(subject, context)?,
        }

        if let Some(guard) = &self.0.guard {
            if !guard(subject) {
                return context.fail("guard rejected the subject");
            }
        }

        if let Some(variable) = &self.0.variable {
            context.bind(variable, subject.clone())?;
        }

        Ok(())
    }

    /// Runs a standalone attempt against `subject`.
    pub fn test(&self, subject: &Value) -> MatchResult<Bindings> {
        let mut context = MatchContext::new(subject, self);
        self.matches(&mut context)?;
        Ok(context.into_bindings())
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("label", &self.0.label)
            .field("variable", &self.0.variable)
            .field("guard", &self.has_guard())
            .finish()
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.label)?;
        if let Some(variable) = &self.0.variable {
            write!(f, " @ {variable}")?;
        }
        if self.has_guard() {
            write!(f, " if <guard>")?;
        }
        Ok(())
    }
}
