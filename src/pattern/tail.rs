use std::{fmt::Display, sync::Arc};

use crate::{case::errors::InvalidPattern, value::Value};

use super::{normalize_variable, Pattern};

pub type TailGuard = Arc<dyn Fn(&[Value]) -> bool + Send + Sync>;

/// Matches zero or more trailing elements of an array. Only valid as the
/// last element of an [`super::ArrayPattern`].
#[derive(Clone)]
pub struct TailPattern {
    pattern: Pattern, // applied to every tail element
    guard: Option<TailGuard>, // applied to the whole tail
    variable: Option<String>, // bound to the whole tail
}

impl TailPattern {
    pub fn new(pattern: Pattern) -> Self {
        TailPattern {
            pattern,
            guard: None,
            variable: None,
        }
    }

    pub fn when<F>(mut self, guard: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    pub fn named(mut self, variable: &str) -> Result<Self, InvalidPattern> {
        self.variable = Some(normalize_variable(variable)?);
        Ok(self)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn guard(&self) -> Option<&TailGuard> {
        self.guard.as_ref()
    }

    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }
}

impl std::fmt::Debug for TailPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailPattern")
            .field("pattern", &self.pattern)
            .field("variable", &self.variable)
            .field("guard", &self.guard.is_some())
            .finish()
    }
}

impl Display for TailPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "*{}", self.pattern)?;
        if let Some(variable) = &self.variable {
            write!(f, " @ {variable}")?;
        }
        if self.guard.is_some() {
            write!(f, " if <guard>")?;
        }
        Ok(())
    }
}
