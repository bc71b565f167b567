mod map;
mod object;
mod range;
pub use self::{map::MapValue, object::ObjectValue, range::NumberRange};

use std::fmt::Display;

use crate::shared::types::Type;

/// Builds a [`Value::Array`], converting every item with [`Value::from`].
#[macro_export]
macro_rules! array {
    ($($value:expr),* $(,)?) => {
        $crate::value::Value::Array(vec![$($crate::value::Value::from($value)),*])
    };
}

/// Builds a [`Value::Map`] from `key => value` pairs.
#[macro_export]
macro_rules! map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::value::MapValue::new();
        $(map.insert($crate::value::Value::from($key), $crate::value::Value::from($value));)*
        $crate::value::Value::Map(map)
    }};
}

/// A runtime subject that patterns are matched against.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    // numbers
    Integer(i64),
    Float(f64),
    // text
    String(String),
    Symbol(String),
    // Built-in collections
    Array(Vec<Value>),
    Map(MapValue),
    // Anything opaque, compared by identity
    Object(ObjectValue),
}

pub fn sym(name: &str) -> Value {
    Value::Symbol(name.to_string())
}

impl Value {
    pub fn symbol<T: Into<String>>(name: T) -> Value {
        Value::Symbol(name.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Strict equality used for map keys: `1` and `1.0` are different keys.
    pub fn eql(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => false,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.eql(b))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value.eql(other)))
            }
            _ => self == other,
        }
    }

    // check if type equals
    pub fn is_type_of(&self, value_type: &Type) -> bool {
        match (self, value_type) {
            (Value::Nil, Type::Nil)
            | (Value::Boolean(_), Type::Boolean)
            | (Value::Integer(_), Type::Integer | Type::Numeric)
            | (Value::Float(_), Type::Float | Type::Numeric)
            | (Value::String(_), Type::String)
            | (Value::Symbol(_), Type::Symbol)
            | (Value::Array(_), Type::Array)
            | (Value::Map(_), Type::Map) => true,
            (Value::Object(object), Type::Object(class_name)) => object.class_name() == class_name,
            _ => false,
        }
    }
}

// exact, `as f64` would round integers above 2^53
fn integer_equals_float(integer: i64, float: f64) -> bool {
    float.fract() == 0.0
        && float >= i64::MIN as f64
        && float < i64::MAX as f64
        && float as i64 == integer
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                integer_equals_float(*a, *b)
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl From<MapValue> for Value {
    fn from(map: MapValue) -> Self {
        Value::Map(map)
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value),
            Value::String(value) => write!(f, "{:?}", value),
            Value::Symbol(name) => write!(f, ":{}", name),
            Value::Array(values) => {
                let joined = values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f, "[{joined}]")
            }
            Value::Map(map) => {
                let joined = map
                    .iter()
                    .map(|(key, value)| format!("{key} => {value}"))
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f, "{{{joined}}}")
            }
            Value::Object(object) => write!(f, "#<{}>", object.class_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numeric_cross_equality() {
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::Float(1.5));
        assert_ne!(Value::Integer(1), Value::String("1".into()));
    }

    #[test]
    fn large_integers_compare_exactly_with_floats() {
        assert_ne!(Value::Integer(9007199254740993), Value::Float(9007199254740992.0));
        assert_eq!(Value::Integer(9007199254740992), Value::Float(9007199254740992.0));
        assert_ne!(Value::Integer(i64::MAX), Value::Float(i64::MAX as f64));
        assert_ne!(Value::Integer(0), Value::Float(f64::NAN));
        assert_ne!(Value::Integer(1), Value::Float(f64::INFINITY));
    }

    #[test]
    fn eql_keeps_integers_and_floats_apart() {
        assert!(Value::Integer(1).eql(&Value::Integer(1)));
        assert!(!Value::Integer(1).eql(&Value::Float(1.0)));
        assert!(!array![1].eql(&array![1.0]));
        assert!(array![1, "a"].eql(&array![1, "a"]));
        assert!(!map! { 1 => 1 }.eql(&map! { 1 => 1.0 }));
    }

    #[test]
    fn symbols_and_strings_differ() {
        assert_ne!(sym("a"), Value::from("a"));
        assert_eq!(sym("a"), Value::symbol("a"));
    }

    #[test]
    fn type_checks() {
        assert!(Value::Integer(3).is_type_of(&Type::Numeric));
        assert!(Value::Float(3.5).is_type_of(&Type::Numeric));
        assert!(!Value::Float(3.5).is_type_of(&Type::Integer));
        assert!(array![1, 2].is_type_of(&Type::Array));
        assert!(map! { sym("a") => 1 }.is_type_of(&Type::Map));

        let point = Value::Object(ObjectValue::new("Point"));
        assert!(point.is_type_of(&Type::Object("Point".into())));
        assert!(!point.is_type_of(&Type::Object("Line".into())));
    }

    #[test]
    fn display() {
        let value = array![1, 2.5, "a", sym("b"), Value::Nil, map! { sym("k") => true }];
        assert_eq!(value.to_string(), r#"[1, 2.5, "a", :b, nil, {:k => true}]"#);
        assert_eq!(map! {}.to_string(), "{}");
        assert_eq!(Value::Object(ObjectValue::new("Point")).to_string(), "#<Point>");
    }
}
