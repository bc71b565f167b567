use crate::{
    case::errors::{InvalidPattern, MatchResult},
    context::MatchContext,
    dbg_line,
    value::Value,
};

use super::{Destructure, Pattern, TailPattern};

#[derive(Debug, Clone)]
pub enum Element {
    Pattern(Pattern),
    Tail(TailPattern),
}

/// Positional pattern over arrays, optionally ending in a tail pattern.
///
/// Without a tail the subject must have exactly as many elements as there are
/// fixed patterns; with one it must have at least that many.
#[derive(Debug, Clone)]
pub struct ArrayPattern {
    elements: Vec<Pattern>,
    tail: Option<TailPattern>,
}

impl ArrayPattern {
    pub fn new(elements: Vec<Element>) -> Result<Self, InvalidPattern> {
        let count = elements.len();
        let mut patterns = Vec::with_capacity(count);
        let mut tail = None;

        for (i, element) in elements.into_iter().enumerate() {
            match element {
                Element::Pattern(pattern) => patterns.push(pattern),
                Element::Tail(tail_pattern) if i + 1 == count => tail = Some(tail_pattern),
                Element::Tail(tail_pattern) => {
                    return Err(InvalidPattern {
                        dbg_line: dbg_line!(),
                        reason: format!(
                            "tail pattern {tail_pattern} is only allowed at the end of an array pattern, found at position {i} of {count}"
                        ),
                    })
                }
            }
        }

        Ok(ArrayPattern {
            elements: patterns,
            tail,
        })
    }

    pub fn elements(&self) -> &[Pattern] {
        &self.elements
    }

    pub fn tail(&self) -> Option<&TailPattern> {
        self.tail.as_ref()
    }
}

impl Destructure for ArrayPattern {
    fn destructure<'v>(&self, subject: &'v Value, context: &mut MatchContext<'v>) -> MatchResult {
        let Some(items) = subject.as_array() else {
            return context.fail("expected an array");
        };

        let fixed = self.elements.len();
        match &self.tail {
            None if items.len() != fixed => {
                return context.fail(format!(
                    "expected exactly {fixed} elements, got {}",
                    items.len()
                ));
            }
            Some(_) if items.len() < fixed => {
                return context.fail(format!(
                    "not enough elements, expected at least {fixed}, got {}",
                    items.len()
                ));
            }
            _ => {}
        }

        for (item, pattern) in items.iter().zip(&self.elements) {
            context.nest(item, pattern)?;
        }

        if let Some(tail) = &self.tail {
            let rest = &items[fixed..];
            for item in rest {
                context.nest(item, tail.pattern())?;
            }

            if let Some(guard) = tail.guard() {
                if !guard(rest) {
                    return context.fail("tail guard rejected the tail");
                }
            }

            if let Some(variable) = tail.variable() {
                context.bind(variable, Value::Array(rest.to_vec()))?;
            }
        }

        Ok(())
    }

    fn describe(&self) -> String {
        let mut parts: Vec<String> = self.elements.iter().map(|p| p.to_string()).collect();
        if let Some(tail) = &self.tail {
            parts.push(tail.to_string());
        }
        format!("[{}]", parts.join(", "))
    }
}
