use rustc_hash::FxHashMap;

use crate::{
    case::errors::{Result, UnboundVariable},
    dbg_line,
    value::Value,
};

/// Variables bound by a successful match, handed to clause actions.
///
/// Names are case-normalized: `get("A")` and `get("a")` look up the same
/// variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings(FxHashMap<String, Value>);

impl Bindings {
    /// Looks up `name`, failing with `UnboundVariable` if the matched
    /// pattern never bound it.
    pub fn get(&self, name: &str) -> Result<&Value> {
        match self.try_get(name) {
            Some(value) => Ok(value),
            None => Err(UnboundVariable {
                dbg_line: dbg_line!(),
                name: name.to_lowercase(),
            }
            .into()),
        }
    }

    pub fn try_get(&self, name: &str) -> Option<&Value> {
        self.0.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.try_get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    // sorted by name
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut bindings: Vec<_> = self.iter().collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.0.insert(name.to_lowercase(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::errors::CaseError;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut bindings = Bindings::default();
        bindings.insert("Tail", Value::Integer(1));
        assert_eq!(bindings.get("tail").unwrap(), &Value::Integer(1));
        assert_eq!(bindings.get("TAIL").unwrap(), &Value::Integer(1));
        assert!(bindings.contains("tail"));
    }

    #[test]
    fn unbound_variable() {
        let bindings = Bindings::default();
        let Err(CaseError::UnboundVariable(error)) = bindings.get("B") else {
            panic!("expected an unbound variable error");
        };
        assert_eq!(error.name, "b");
    }

    #[test]
    fn sorted_by_name() {
        let mut bindings = Bindings::default();
        bindings.insert("b", Value::Integer(2));
        bindings.insert("a", Value::Integer(1));
        let names: Vec<_> = bindings.sorted().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
