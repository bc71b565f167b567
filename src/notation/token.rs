use std::fmt::Debug;

use miette::SourceSpan;

#[derive(Debug, PartialEq, Clone)]
pub enum Token<'a> {
    // Literals
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(&'a str),
    Symbol(&'a str),

    // Pattern atoms
    Identifier(&'a str),  // x
    TypeName(&'a str),    // Integer
    Wildcard,             // _
    Regex(&'a str),       // /re/
    SymbolRegex(&'a str), // :/re/

    // Brackets
    LeftCurly,    // {
    RightCurly,   // }
    LeftBracket,  // [
    RightBracket, // ]

    // Separators
    Comma,    // ,
    FatArrow, // =>

    // Operators
    At,             // @
    Star,           // *
    ExclusiveRange, // ..
    InclusiveRange, // ..=
}

impl<'a> Token<'a> {
    pub fn eq_type(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(PartialEq)]
pub struct TokenSpan<'a> {
    pub token: Token<'a>,
    pub from: usize,
    pub to: usize,
}

impl From<&TokenSpan<'_>> for SourceSpan {
    fn from(span: &TokenSpan) -> Self {
        (span.from..span.to).into()
    }
}

impl<'a> TokenSpan<'a> {
    pub fn new(from: usize, to: usize, token: Token<'a>) -> Self {
        TokenSpan {
            from,
            // adding one because miette takes range instead of inclusive range
            to: to + 1,
            token,
        }
    }
}

impl Debug for TokenSpan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.token.fmt(f)
    }
}
