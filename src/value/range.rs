use std::{
    fmt::Display,
    ops::{Range, RangeInclusive},
};

use super::Value;

/// Integer bounds a numeric subject has to fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    pub start: i64,
    pub end: i64,
    pub inclusive: bool,
}

impl NumberRange {
    pub fn contains(&self, value: &Value) -> bool {
        match value {
            Value::Integer(number) => {
                *number >= self.start
                    && if self.inclusive {
                        *number <= self.end
                    } else {
                        *number < self.end
                    }
            }
            Value::Float(number) => {
                let (start, end) = (self.start as f64, self.end as f64);
                *number >= start && if self.inclusive { *number <= end } else { *number < end }
            }
            _ => false,
        }
    }
}

impl From<Range<i64>> for NumberRange {
    fn from(range: Range<i64>) -> Self {
        NumberRange {
            start: range.start,
            end: range.end,
            inclusive: false,
        }
    }
}

impl From<RangeInclusive<i64>> for NumberRange {
    fn from(range: RangeInclusive<i64>) -> Self {
        NumberRange {
            start: *range.start(),
            end: *range.end(),
            inclusive: true,
        }
    }
}

impl Display for NumberRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.inclusive {
            write!(f, "{}..={}", self.start, self.end)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let exclusive = NumberRange::from(1i64..100);
        assert!(exclusive.contains(&Value::Integer(1)));
        assert!(exclusive.contains(&Value::Integer(99)));
        assert!(!exclusive.contains(&Value::Integer(100)));

        let inclusive = NumberRange::from(1i64..=100);
        assert!(inclusive.contains(&Value::Integer(100)));
        assert!(inclusive.contains(&Value::Float(99.5)));
        assert!(!inclusive.contains(&Value::Float(100.5)));
        assert!(!inclusive.contains(&Value::from("50")));
    }
}
