use std::fmt::Display;

use crate::{case::errors::MatchResult, context::MatchContext, value::Value};

use super::{Destructure, Pattern};

#[derive(Debug, Clone, PartialEq)]
pub enum MapKey {
    // the subject has to contain the key
    Required(Value),
    // matched only when present and not nil
    Optional(Value),
}

impl MapKey {
    pub fn key(&self) -> &Value {
        match self {
            MapKey::Required(key) | MapKey::Optional(key) => key,
        }
    }
}

// plain keys are required, see `crate::builder::optional`
macro_rules! required_key {
    ($($type:ty),*) => {
        $(impl From<$type> for MapKey {
            fn from(key: $type) -> Self {
                MapKey::Required(key.into())
            }
        })*
    };
}

required_key!(Value, bool, i32, i64, f64, &str, String);

impl Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapKey::Required(key) => write!(f, "{key}"),
            MapKey::Optional(key) => write!(f, "[{key}]"),
        }
    }
}

/// Pattern over maps: each entry matches the value stored under its key.
/// Keys the pattern does not mention are ignored.
#[derive(Debug, Clone)]
pub struct MapPattern {
    entries: Vec<(MapKey, Pattern)>,
}

impl MapPattern {
    pub fn new(entries: Vec<(MapKey, Pattern)>) -> Self {
        MapPattern { entries }
    }

    pub fn entries(&self) -> &[(MapKey, Pattern)] {
        &self.entries
    }
}

impl Destructure for MapPattern {
    fn destructure<'v>(&self, subject: &'v Value, context: &mut MatchContext<'v>) -> MatchResult {
        let Some(map) = subject.as_map() else {
            return context.fail("expected a map");
        };

        for (key, pattern) in &self.entries {
            match key {
                MapKey::Required(key) => {
                    let Some(value) = map.get(key) else {
                        return context.fail(format!("no required key: {key}"));
                    };
                    context.nest(value, pattern)?;
                }
                MapKey::Optional(key) => {
                    if let Some(value) = map.get(key).filter(|value| !value.is_nil()) {
                        context.nest(value, pattern)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn describe(&self) -> String {
        let joined = self
            .entries
            .iter()
            .map(|(key, pattern)| format!("{key} => {pattern}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{joined}}}")
    }
}
