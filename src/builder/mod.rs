mod raw;
pub use raw::{optional, required, Raw};

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::{
    case::errors::{InvalidPattern, Result},
    dbg_line,
    pattern::{ArrayPattern, Element, MapKey, MapPattern, Pattern, TailPattern},
    shared::types::Type,
    value::{NumberRange, Value},
};

/// Factory for patterns. Every constructor is pure: it only allocates the
/// pattern graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternBuilder;

fn compile_regex(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|error| {
        InvalidPattern {
            dbg_line: dbg_line!(),
            reason: format!("invalid regular expression {source:?}: {error}"),
        }
        .into()
    })
}

impl PatternBuilder {
    /// Coerces a raw value into the most specific pattern for its shape.
    pub fn is<T: Into<Raw>>(&self, raw: T) -> Result<Pattern> {
        match raw.into() {
            Raw::Pattern(pattern) => Ok(pattern),
            Raw::Tail(tail) => Err(InvalidPattern {
                dbg_line: dbg_line!(),
                reason: format!("tail pattern {tail} is only allowed inside an array pattern"),
            }
            .into()),
            Raw::Regex(regex) => Ok(self.string_regex(regex)),
            Raw::Array(items) => self.array(items),
            Raw::Range(range) => Ok(self.number_range(range)),
            Raw::Set(values) => Ok(self.number_set(values)),
            Raw::Map(entries) => self.map(entries),
            Raw::Type(value_type) => Ok(self.a(value_type)),
            Raw::Literal(value) => Ok(self.literal(value)),
        }
    }

    /// Matches subjects equal to `value`.
    pub fn literal<T: Into<Value>>(&self, value: T) -> Pattern {
        let value = value.into();
        let label = value.to_string();
        Pattern::predicate(label, move |subject| *subject == value)
    }

    /// Matches subjects of the given runtime type.
    pub fn a(&self, value_type: Type) -> Pattern {
        let label = value_type.to_string();
        Pattern::predicate(label, move |subject| subject.is_type_of(&value_type))
    }

    pub fn integer(&self) -> Pattern {
        self.a(Type::Integer)
    }

    pub fn integer_exact(&self, value: i64) -> Pattern {
        self.literal(value)
    }

    pub fn number_range<T: Into<NumberRange>>(&self, range: T) -> Pattern {
        let range = range.into();
        Pattern::predicate(format!("Integer({range})"), move |subject| {
            range.contains(subject)
        })
    }

    pub fn number_set<I: IntoIterator<Item = i64>>(&self, values: I) -> Pattern {
        let set: FxHashSet<i64> = values.into_iter().collect();

        let mut members: Vec<_> = set.iter().copied().collect();
        members.sort_unstable();
        let joined = members
            .iter()
            .map(|member| member.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Pattern::predicate(format!("Integer{{{joined}}}"), move |subject| {
            subject.as_integer().is_some_and(|value| set.contains(&value))
        })
    }

    pub fn string(&self) -> Pattern {
        self.a(Type::String)
    }

    /// Matches strings containing a match of the regular expression `source`.
    pub fn string_matching(&self, source: &str) -> Result<Pattern> {
        Ok(self.string_regex(compile_regex(source)?))
    }

    pub fn string_regex(&self, regex: Regex) -> Pattern {
        Pattern::predicate(format!("/{regex}/"), move |subject| {
            subject.as_str().is_some_and(|string| regex.is_match(string))
        })
    }

    pub fn symbol(&self) -> Pattern {
        self.a(Type::Symbol)
    }

    /// Like [`PatternBuilder::string_matching`], for symbols.
    pub fn symbol_matching(&self, source: &str) -> Result<Pattern> {
        Ok(self.symbol_regex(compile_regex(source)?))
    }

    pub fn symbol_regex(&self, regex: Regex) -> Pattern {
        Pattern::predicate(format!("Symbol(/{regex}/)"), move |subject| {
            subject.as_symbol().is_some_and(|name| regex.is_match(name))
        })
    }

    /// Matches anything.
    pub fn wildcard(&self) -> Pattern {
        Pattern::predicate("_", |_| true)
    }

    /// Wildcard bound to `name`.
    pub fn var(&self, name: &str) -> Result<Pattern> {
        Ok(self.wildcard().named(name)?)
    }

    /// Matches whatever `raw` matches and binds the subject to `name`.
    pub fn bind<T: Into<Raw>>(&self, raw: T, name: &str) -> Result<Pattern> {
        Ok(Pattern::nested(self.is(raw)?).named(name)?)
    }

    /// Matches subjects equal to any of `values`, binding the subject to
    /// `name`.
    pub fn one_of<I, T>(&self, values: I, name: &str) -> Result<Pattern>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let joined = values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let pattern = Pattern::predicate(format!("one_of({joined})"), move |subject| {
            values.iter().any(|value| value == subject)
        });
        Ok(pattern.named(name)?)
    }

    /// Positional array pattern. A [`Raw::Tail`] is only accepted as the
    /// last item.
    pub fn array<I: IntoIterator<Item = Raw>>(&self, items: I) -> Result<Pattern> {
        let elements = items
            .into_iter()
            .map(|item| match item {
                Raw::Tail(tail) => Ok(Element::Tail(tail)),
                item => self.is(item).map(Element::Pattern),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Pattern::structural(ArrayPattern::new(elements)?))
    }

    pub fn map<I: IntoIterator<Item = (MapKey, Raw)>>(&self, entries: I) -> Result<Pattern> {
        let entries = entries
            .into_iter()
            .map(|(key, value)| Ok((key, self.is(value)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Pattern::structural(MapPattern::new(entries)))
    }

    /// Tail pattern whose every element has to match `raw`.
    pub fn tail<T: Into<Raw>>(&self, raw: T) -> Result<TailPattern> {
        Ok(TailPattern::new(self.is(raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array, case::errors::CaseError, map, value::sym};
    use pretty_assertions::assert_eq;

    const P: PatternBuilder = PatternBuilder;

    fn accepts(pattern: &Pattern, value: Value) -> bool {
        pattern.test(&value).is_ok()
    }

    #[test]
    fn literal_matches_by_equality() {
        let pattern = P.literal("a");
        assert!(accepts(&pattern, "a".into()));
        assert!(!accepts(&pattern, sym("a")));
        assert!(!accepts(&pattern, Value::Integer(1)));
        assert_eq!(pattern.label(), "\"a\"");
    }

    #[test]
    fn number_range_and_set() {
        let range = P.number_range(1i64..=100);
        assert!(accepts(&range, Value::Integer(1)));
        assert!(accepts(&range, Value::Integer(100)));
        assert!(!accepts(&range, Value::Integer(0)));
        assert!(!accepts(&range, sym("a")));
        assert_eq!(range.label(), "Integer(1..=100)");

        let set = P.number_set([100, 2]);
        assert!(accepts(&set, Value::Integer(2)));
        assert!(accepts(&set, Value::Integer(100)));
        assert!(!accepts(&set, Value::Integer(1)));
        assert!(!accepts(&set, Value::Integer(102)));
        assert_eq!(set.label(), "Integer{2, 100}");
    }

    #[test]
    fn regex_patterns() {
        let string = P.string_matching("^a.*").unwrap();
        assert!(accepts(&string, "abc".into()));
        assert!(!accepts(&string, "babc".into()));
        assert!(!accepts(&string, sym("abc")));
        assert!(!accepts(&string, Value::Integer(10)));

        let symbol = P.symbol_matching("^a.*").unwrap();
        assert!(accepts(&symbol, sym("abc")));
        assert!(!accepts(&symbol, sym("babc")));
        assert!(!accepts(&symbol, "abc".into()));

        assert!(matches!(
            P.string_matching("(unclosed"),
            Err(CaseError::InvalidPattern(_))
        ));
    }

    #[test]
    fn bind_and_one_of() {
        let foo = P
            .bind(P.symbol(), "A")
            .unwrap()
            .when(|value| *value == sym("foo"));
        assert_eq!(foo.test(&sym("foo")).unwrap().get("a").unwrap(), &sym("foo"));
        assert!(foo.test(&sym("bar")).is_err());

        let one_of = P.one_of([Value::Integer(1), "b".into()], "V").unwrap();
        assert_eq!(one_of.test(&"b".into()).unwrap().get("v").unwrap(), &Value::from("b"));
        assert!(one_of.test(&"c".into()).is_err());
    }

    #[test]
    fn is_precedence() {
        assert!(accepts(&P.is(Regex::new("abc").unwrap()).unwrap(), "0abc0".into()));
        assert!(accepts(&P.is(1i64..101).unwrap(), Value::Integer(100)));
        assert!(!accepts(&P.is(1i64..101).unwrap(), Value::Integer(101)));
        assert!(accepts(&P.is(Type::String).unwrap(), "abc".into()));
        assert!(accepts(&P.is(array![1, 2]).unwrap(), array![1, 2]));
        assert!(accepts(&P.is(map! { sym("a") => 1 }).unwrap(), map! { sym("a") => 1 }));
        assert!(accepts(&P.is(Raw::Set(vec![3])).unwrap(), Value::Integer(3)));

        let pattern = P.literal(7);
        assert_eq!(P.is(pattern.clone()).unwrap().label(), pattern.label());
    }

    #[test]
    fn tail_outside_array_is_rejected() {
        let tail = P.tail(1).unwrap();
        assert!(matches!(P.is(tail), Err(CaseError::InvalidPattern(_))));

        let tail = P.tail(1).unwrap();
        assert!(matches!(
            P.array(vec![Raw::from(tail), Raw::from(2)]),
            Err(CaseError::InvalidPattern(_))
        ));
    }

    #[test]
    fn nested_arrays() {
        let pattern = P
            .is(crate::seq![1, 2, crate::seq![3, 4, P.tail(P.symbol()).unwrap()]])
            .unwrap();
        assert!(accepts(&pattern, array![1, 2, array![3, 4, sym("a"), sym("b")]]));
        assert!(accepts(&pattern, array![1, 2, array![3, 4]]));
        assert!(!accepts(&pattern, array![1, 2, array![3, 4, 5, 6]]));
        assert!(!accepts(&pattern, array![1, 2, array![3]]));
        assert!(!accepts(&pattern, array![1, 2]));
    }
}
