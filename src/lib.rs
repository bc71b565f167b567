//! Structural pattern matching over dynamically typed runtime values.
//!
//! Patterns are built once with a [`PatternBuilder`] (or parsed from text
//! with [`notation::parse_pattern`]), grouped into an ordered [`Case`] and
//! tried first-match-wins against a [`Value`]. Variables captured along the
//! way are handed to the matching clause's action as [`Bindings`].
//!
//! ```
//! use matchmaker::{case, map, mapping, sym, Value};
//!
//! let user = map! { sym("name") => "Ada", sym("age") => 36 };
//!
//! let greeting = case(&user, |c| {
//!     c.of_then(mapping! { sym("name") => c.var("name")? }, |b| {
//!         Ok(Value::from(format!("hello {}", b.get("name")?)))
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(greeting, Value::from("hello \"Ada\""));
//! ```

pub mod builder;
pub mod case;
pub mod context;
pub mod notation;
pub mod pattern;
pub mod shared;
pub mod value;

pub use self::{
    builder::{optional, required, PatternBuilder, Raw},
    case::{
        case,
        errors::{
            CaseError, InvalidPattern, MatchResult, NoClauses, NoMatch, Result, Trace,
            TraceFrame, UnboundVariable,
        },
        Action, Case, CaseBuilder, Clause, Matched,
    },
    context::{Bindings, MatchContext},
    pattern::{Destructure, MapKey, Matcher, Pattern, TailPattern},
    shared::types::Type,
    value::{sym, MapValue, NumberRange, ObjectValue, Value},
};
