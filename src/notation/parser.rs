use miette::{bail, Report, Result, SourceSpan};

use super::{
    errors,
    token::{Token, TokenSpan},
};
use crate::{
    builder::{PatternBuilder, Raw},
    dbg_line,
    pattern::{MapKey, Pattern, TailPattern},
    shared::types::Type,
    value::{NumberRange, Value},
};

pub struct Parser<'a> {
    cursor: usize,
    code: &'a str,
    input: Vec<TokenSpan<'a>>,

    patterns: PatternBuilder,
}

impl<'a> Parser<'a> {
    pub fn new(code: &'a str, tokens: Vec<TokenSpan<'a>>) -> Self {
        Parser {
            cursor: 0,
            code,
            input: tokens,

            patterns: PatternBuilder,
        }
    }

    fn end_position(&self) -> SourceSpan {
        (self.code.len()..self.code.len()).into()
    }

    pub fn position(&self) -> SourceSpan {
        match self.input.get(self.cursor) {
            Some(span) => span.into(),
            None => self.end_position(),
        }
    }

    pub fn current_span(&self, expected: &str) -> Result<&TokenSpan<'a>> {
        if let Some(span) = self.input.get(self.cursor) {
            Ok(span)
        } else {
            bail!(errors::UnexpectedEndOfInput {
                dbg_line: dbg_line!(),
                expected: expected.to_string(),
                src: self.code.to_string(),
                position: self.end_position(),
            })
        }
    }

    pub fn peek(&self) -> Option<&Token<'a>> {
        self.input.get(self.cursor).map(|span| &span.token)
    }

    fn advance(&mut self, expected: &str) -> Result<(Token<'a>, SourceSpan)> {
        let span = self.current_span(expected)?;
        let next = (span.token.clone(), SourceSpan::from(span));
        self.cursor += 1;
        Ok(next)
    }

    // consumes the current token only if it has the same type as `token`
    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().is_some_and(|current| current.eq_type(token)) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<SourceSpan> {
        let expected = format!("{token:?}");
        let (actual, position) = self.advance(&expected)?;
        if actual.eq_type(token) {
            Ok(position)
        } else {
            Err(self.unexpected(&actual, position, expected))
        }
    }

    fn unexpected<T: ToString>(&self, actual: &Token, position: SourceSpan, expected: T) -> Report {
        errors::UnexpectedToken {
            dbg_line: dbg_line!(),
            expected: expected.to_string(),
            actual: format!("{actual:?}"),
            src: self.code.to_string(),
            position,
        }
        .into()
    }

    fn invalid<T: ToString>(&self, position: SourceSpan, reason: T) -> Report {
        errors::InvalidNotation {
            dbg_line: dbg_line!(),
            reason: reason.to_string(),
            src: self.code.to_string(),
            position,
        }
        .into()
    }

    fn finish(&self) -> Result<()> {
        match self.input.get(self.cursor) {
            Some(span) => Err(self.unexpected(&span.token, span.into(), "end of input")),
            None => Ok(()),
        }
    }

    pub fn parse_value(mut self) -> Result<Value> {
        let value = self.value()?;
        self.finish()?;
        Ok(value)
    }

    pub fn parse_pattern(mut self) -> Result<Pattern> {
        let position = self.position();
        let raw = self.raw()?;
        self.finish()?;
        self.patterns
            .is(raw)
            .map_err(|error| self.invalid(position, error))
    }

    // cursor starts after the opening bracket and ends after the closing one
    fn list<T, F>(&mut self, close: &Token, mut item: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let mut items = Vec::new();

        loop {
            if self.eat(close) {
                break;
            }

            items.push(item(self)?);

            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                break;
            }
        }

        Ok(items)
    }

    fn identifier(&mut self) -> Result<(&'a str, SourceSpan)> {
        match self.advance("an identifier")? {
            (Token::Identifier(name), position) => Ok((name, position)),
            (token, position) => Err(self.unexpected(&token, position, "an identifier")),
        }
    }

    fn value(&mut self) -> Result<Value> {
        let (token, position) = self.advance("a value")?;

        match token {
            Token::Nil => Ok(Value::Nil),
            Token::Bool(value) => Ok(Value::Boolean(value)),
            Token::Integer(value) => Ok(Value::Integer(value)),
            Token::Float(value) => Ok(Value::Float(value)),
            Token::String(value) => Ok(Value::from(value)),
            Token::Symbol(name) => Ok(Value::symbol(name)),

            Token::LeftBracket => Ok(Value::Array(self.list(&Token::RightBracket, Self::value)?)),
            Token::LeftCurly => {
                let entries = self.list(&Token::RightCurly, |parser| {
                    let key = parser.value()?;
                    parser.expect(&Token::FatArrow)?;
                    Ok((key, parser.value()?))
                })?;

                Ok(Value::Map(entries.into_iter().collect()))
            }

            token => Err(self.unexpected(&token, position, "a value")),
        }
    }

    // [*] primary [@ name]
    fn raw(&mut self) -> Result<Raw> {
        let position = self.position();

        if self.eat(&Token::Star) {
            let inner = self.primary()?;
            let pattern = self
                .patterns
                .is(inner)
                .map_err(|error| self.invalid(position, error))?;

            let mut tail = TailPattern::new(pattern);
            if self.eat(&Token::At) {
                let (name, at) = self.identifier()?;
                tail = tail.named(name).map_err(|error| self.invalid(at, error))?;
            }

            return Ok(Raw::Tail(tail));
        }

        let primary = self.primary()?;
        if self.eat(&Token::At) {
            let (name, at) = self.identifier()?;
            let pattern = self
                .patterns
                .bind(primary, name)
                .map_err(|error| self.invalid(at, error))?;

            Ok(Raw::Pattern(pattern))
        } else {
            Ok(primary)
        }
    }

    fn primary(&mut self) -> Result<Raw> {
        let (token, position) = self.advance("a pattern")?;
        let patterns = self.patterns;

        match token {
            Token::Wildcard => Ok(Raw::Pattern(patterns.wildcard())),
            Token::Identifier(name) => patterns
                .var(name)
                .map(Raw::Pattern)
                .map_err(|error| self.invalid(position, error)),
            Token::TypeName(name) => match Type::try_from(name) {
                Ok(value_type) => Ok(Raw::Type(value_type)),
                Err(error) => Err(self.invalid(position, error)),
            },

            Token::Integer(start)
                if matches!(
                    self.peek(),
                    Some(Token::ExclusiveRange | Token::InclusiveRange)
                ) =>
            {
                self.range(start)
            }

            Token::Regex(source) => patterns
                .string_matching(source)
                .map(Raw::Pattern)
                .map_err(|error| self.invalid(position, error)),
            Token::SymbolRegex(source) => patterns
                .symbol_matching(source)
                .map(Raw::Pattern)
                .map_err(|error| self.invalid(position, error)),

            Token::LeftBracket => {
                let items = self.list(&Token::RightBracket, Self::raw)?;
                patterns
                    .array(items)
                    .map(Raw::Pattern)
                    .map_err(|error| self.invalid(position, error))
            }
            Token::LeftCurly => {
                let entries = self.list(&Token::RightCurly, Self::entry)?;
                patterns
                    .map(entries)
                    .map(Raw::Pattern)
                    .map_err(|error| self.invalid(position, error))
            }

            Token::Nil
            | Token::Bool(_)
            | Token::Integer(_)
            | Token::Float(_)
            | Token::String(_)
            | Token::Symbol(_) => {
                self.cursor -= 1;
                Ok(Raw::Literal(self.value()?))
            }

            token => Err(self.unexpected(&token, position, "a pattern")),
        }
    }

    // cursor starts on the range operator
    fn range(&mut self, start: i64) -> Result<Raw> {
        let inclusive = self.eat(&Token::InclusiveRange);
        if !inclusive {
            self.expect(&Token::ExclusiveRange)?;
        }

        match self.advance("an integer")? {
            (Token::Integer(end), _) => Ok(Raw::Range(NumberRange {
                start,
                end,
                inclusive,
            })),
            (token, position) => Err(self.unexpected(&token, position, "an integer")),
        }
    }

    // [key] => pattern marks an optional key
    fn entry(&mut self) -> Result<(MapKey, Raw)> {
        let key = if self.eat(&Token::LeftBracket) {
            let key = self.value()?;
            self.expect(&Token::RightBracket)?;
            MapKey::Optional(key)
        } else {
            MapKey::Required(self.value()?)
        };

        self.expect(&Token::FatArrow)?;
        Ok((key, self.raw()?))
    }
}
