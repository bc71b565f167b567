use std::ops::{Range, RangeInclusive};

use regex::Regex;

use crate::{
    pattern::{MapKey, Pattern, TailPattern},
    shared::types::Type,
    value::{NumberRange, Value},
};

/// Builds a [`Raw::Array`], converting every item with [`Raw::from`].
#[macro_export]
macro_rules! seq {
    ($($item:expr),* $(,)?) => {
        $crate::builder::Raw::Array(vec![$($crate::builder::Raw::from($item)),*])
    };
}

/// Builds a [`Raw::Map`] from `key => pattern` pairs. Keys are required
/// unless wrapped with [`crate::builder::optional`].
#[macro_export]
macro_rules! mapping {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::builder::Raw::Map(vec![$((
            $crate::pattern::MapKey::from($key),
            $crate::builder::Raw::from($value),
        )),*])
    };
}

/// Anything that can be coerced into a pattern with
/// [`super::PatternBuilder::is`].
#[derive(Debug, Clone)]
pub enum Raw {
    Pattern(Pattern),
    Tail(TailPattern),
    Regex(Regex),
    Array(Vec<Raw>),
    Range(NumberRange),
    Set(Vec<i64>),
    Map(Vec<(MapKey, Raw)>),
    Type(Type),
    Literal(Value),
}

pub fn required<T: Into<Value>>(key: T) -> MapKey {
    MapKey::Required(key.into())
}

pub fn optional<T: Into<Value>>(key: T) -> MapKey {
    MapKey::Optional(key.into())
}

impl From<Pattern> for Raw {
    fn from(pattern: Pattern) -> Self {
        Raw::Pattern(pattern)
    }
}

impl From<&Pattern> for Raw {
    fn from(pattern: &Pattern) -> Self {
        Raw::Pattern(pattern.clone())
    }
}

impl From<TailPattern> for Raw {
    fn from(tail: TailPattern) -> Self {
        Raw::Tail(tail)
    }
}

impl From<Regex> for Raw {
    fn from(regex: Regex) -> Self {
        Raw::Regex(regex)
    }
}

impl From<Vec<Raw>> for Raw {
    fn from(items: Vec<Raw>) -> Self {
        Raw::Array(items)
    }
}

impl From<Range<i64>> for Raw {
    fn from(range: Range<i64>) -> Self {
        Raw::Range(range.into())
    }
}

impl From<RangeInclusive<i64>> for Raw {
    fn from(range: RangeInclusive<i64>) -> Self {
        Raw::Range(range.into())
    }
}

impl From<NumberRange> for Raw {
    fn from(range: NumberRange) -> Self {
        Raw::Range(range)
    }
}

impl From<Type> for Raw {
    fn from(value_type: Type) -> Self {
        Raw::Type(value_type)
    }
}

// a one-element array key like `[:k]` marks an optional key
fn map_key(key: &Value) -> MapKey {
    match key.as_array() {
        Some([inner]) => MapKey::Optional(inner.clone()),
        _ => MapKey::Required(key.clone()),
    }
}

// Arrays and maps coerce structurally, element by element
impl From<Value> for Raw {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Raw::Array(items.into_iter().map(Raw::from).collect()),
            Value::Map(map) => Raw::Map(
                map.iter()
                    .map(|(key, value)| (map_key(key), Raw::from(value.clone())))
                    .collect(),
            ),
            value => Raw::Literal(value),
        }
    }
}

macro_rules! raw_literal {
    ($($type:ty),*) => {
        $(impl From<$type> for Raw {
            fn from(value: $type) -> Self {
                Raw::Literal(value.into())
            }
        })*
    };
}

raw_literal!(bool, i32, i64, f64, &str, String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array, map, value::sym};

    #[test]
    fn values_coerce_structurally() {
        let Raw::Array(items) = Raw::from(array![1, sym("a")]) else {
            panic!("expected an array");
        };
        assert!(matches!(items[0], Raw::Literal(Value::Integer(1))));

        let Raw::Map(entries) = Raw::from(map! { sym("k") => 1 }) else {
            panic!("expected a map");
        };
        assert_eq!(entries[0].0, MapKey::Required(sym("k")));
    }

    #[test]
    fn macros() {
        let Raw::Array(items) = crate::seq![1, "a", 1i64..3] else {
            panic!("expected an array");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(items[2], Raw::Range(_)));

        let raw = crate::mapping! { sym("a") => 1, optional(sym("b")) => 2 };
        let Raw::Map(entries) = raw else {
            panic!("expected a map");
        };
        assert_eq!(entries[1].0, MapKey::Optional(sym("b")));
    }

    #[test]
    fn mapping_accepts_scalar_keys() {
        let raw = crate::mapping! { 1 => 2, true => 3, "s" => 4, 1.5 => 5 };
        let Raw::Map(entries) = raw else {
            panic!("expected a map");
        };
        let keys: Vec<_> = entries.into_iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            vec![
                MapKey::Required(Value::Integer(1)),
                MapKey::Required(Value::Boolean(true)),
                MapKey::Required(Value::from("s")),
                MapKey::Required(Value::Float(1.5)),
            ]
        );
    }

    #[test]
    fn single_element_array_key_is_optional() {
        let Raw::Map(entries) = Raw::from(map! { array![sym("k")] => 1, array![1, 2] => 2 }) else {
            panic!("expected a map");
        };
        assert_eq!(entries[0].0, MapKey::Optional(sym("k")));
        assert_eq!(entries[1].0, MapKey::Required(array![1, 2]));
    }
}
