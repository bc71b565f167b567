//! Text notation for values and patterns, used by the command line.
//!
//! ```text
//! value   := nil | true | false | 12 | -3 | 1.5 | "text" | :sym
//!          | [value, ...] | {value => value, ...}
//! pattern := [*] primary [@ name]
//! primary := _ | name | TypeName | int..int | int..=int | /re/ | :/re/
//!          | [pattern, ...] | {key => pattern, ...} | literal
//! key     := value | [value]
//! ```

mod errors;
mod lexer;
mod matchers;
mod parser;
mod token;

pub use self::{
    lexer::Lexer,
    parser::Parser,
    token::{Token, TokenSpan},
};

use miette::Result;

use crate::{pattern::Pattern, value::Value};

pub fn parse_value(code: &str) -> Result<Value> {
    let tokens = Lexer::new(code).lex()?;
    Parser::new(code, tokens).parse_value()
}

pub fn parse_pattern(code: &str) -> Result<Pattern> {
    let tokens = Lexer::new(code).lex()?;
    Parser::new(code, tokens).parse_pattern()
}
