use std::ops::Range;
use std::str;

use miette::{bail, miette, LabeledSpan, Report, Result};

use super::{
    matchers::{Matcher, IDENTIFIER_MATCHER, NUMBER_MATCHER},
    token::{Token, TokenSpan},
};

const EMPTY_STR: &str = "";

pub struct Lexer<'a> {
    cursor: usize,
    code: &'a str,
    input: &'a [u8],
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Lexer {
            cursor: 0,
            code,
            input: code.as_bytes(),
        }
    }

    pub fn current(&self) -> u8 {
        self.peek_next_n(0)
    }

    pub fn peek_next(&self) -> u8 {
        self.peek_next_n(1)
    }

    pub fn peek_next_n(&self, n: usize) -> u8 {
        if self.cursor + n >= self.input.len() {
            0
        } else {
            self.input[self.cursor + n]
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.current().is_ascii_whitespace() {
            self.cursor += 1;
        }
    }

    fn report(&self, range: Range<usize>, message: &str) -> Report {
        miette!(
            labels = vec![LabeledSpan::at(range, message.to_string())],
            "Failed to lex notation",
        )
        .with_source_code(self.code.to_string())
    }

    pub fn read_slice_within(&self, range: Range<usize>) -> Result<&'a str> {
        let slice = &self.input[range];

        if let Ok(str) = str::from_utf8(slice) {
            Ok(str)
        } else {
            bail!("Failed to parse slice as UTF-8: {:?}", slice)
        }
    }

    // leaves cursor on the last matching character
    pub fn read_str_that_matches(&mut self, match_fn: Matcher) -> Result<&'a str> {
        let from = self.cursor;

        while self.current() != 0 && match_fn(self.current(), &self.input[from..self.cursor]) {
            self.cursor += 1;
        }

        if from == self.cursor {
            Ok(EMPTY_STR)
        } else {
            let str = self.read_slice_within(from..self.cursor)?;
            self.cursor -= 1;
            Ok(str)
        }
    }

    pub fn skip_matches(&mut self, match_fn: Matcher) {
        let from = self.cursor;
        while self.current() != 0 && match_fn(self.current(), &self.input[from..self.cursor]) {
            self.cursor += 1;
        }
    }

    // cursor starts on the opening delimiter and ends on the closing one
    pub fn read_delimited(&mut self, delimiter: u8) -> Result<&'a str> {
        let start = self.cursor;
        self.cursor += 1;
        let from = self.cursor;

        while self.current() != delimiter {
            if self.current() == 0 {
                return Err(self.report(
                    start..self.input.len(),
                    &format!("Missing closing {:?}", char::from(delimiter)),
                ));
            }
            self.cursor += 1;
        }

        self.read_slice_within(from..self.cursor)
    }

    pub fn read_number(&mut self) -> Result<Token<'a>> {
        let start = self.cursor;
        if self.current() == b'-' {
            self.cursor += 1;
        }
        self.skip_matches(NUMBER_MATCHER);

        if self.current() == b'.' && self.peek_next().is_ascii_digit() {
            self.cursor += 1;
            self.skip_matches(NUMBER_MATCHER);

            let float = self.read_slice_within(start..self.cursor)?;
            self.cursor -= 1;
            match float.parse::<f64>() {
                Ok(float) => Ok(Token::Float(float)),
                Err(_) => Err(self.report(start..self.cursor + 1, "Failed to parse float")),
            }
        } else {
            let number = self.read_slice_within(start..self.cursor)?;
            self.cursor -= 1;
            match number.parse::<i64>() {
                Ok(number) => Ok(Token::Integer(number)),
                Err(_) => Err(self.report(start..self.cursor + 1, "Failed to parse integer")),
            }
        }
    }

    pub fn lex(mut self) -> Result<Vec<TokenSpan<'a>>> {
        let mut tokens: Vec<TokenSpan<'a>> = Vec::new();

        loop {
            self.skip_whitespace();
            let span_from = self.cursor;

            let token = match self.current() {
                0 => break,

                b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                    let str = self.read_str_that_matches(IDENTIFIER_MATCHER)?;

                    match str {
                        "nil" => Token::Nil,
                        "true" => Token::Bool(true),
                        "false" => Token::Bool(false),
                        "_" => Token::Wildcard,
                        _ if str.starts_with(|char: char| char.is_ascii_uppercase()) => {
                            Token::TypeName(str)
                        }
                        _ => Token::Identifier(str),
                    }
                }

                b'0'..=b'9' => self.read_number()?,
                b'-' if self.peek_next().is_ascii_digit() => self.read_number()?,

                b'"' => Token::String(self.read_delimited(b'"')?),
                b'/' => Token::Regex(self.read_delimited(b'/')?),

                b':' => match self.peek_next() {
                    b'/' => {
                        self.cursor += 1;
                        Token::SymbolRegex(self.read_delimited(b'/')?)
                    }
                    b'"' => {
                        self.cursor += 1;
                        Token::Symbol(self.read_delimited(b'"')?)
                    }
                    b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                        self.cursor += 1;
                        Token::Symbol(self.read_str_that_matches(IDENTIFIER_MATCHER)?)
                    }
                    _ => return Err(self.report(span_from..span_from + 1, "Expected symbol name")),
                },

                b'{' => Token::LeftCurly,
                b'}' => Token::RightCurly,
                b'[' => Token::LeftBracket,
                b']' => Token::RightBracket,

                b',' => Token::Comma,
                b'@' => Token::At,
                b'*' => Token::Star,

                b'=' => match self.peek_next() {
                    b'>' => {
                        self.cursor += 1;
                        Token::FatArrow
                    }
                    _ => return Err(self.report(span_from..span_from + 1, "Expected \"=>\"")),
                },

                b'.' => match (self.peek_next(), self.peek_next_n(2)) {
                    (b'.', b'=') => {
                        self.cursor += 2;
                        Token::InclusiveRange
                    }
                    (b'.', _) => {
                        self.cursor += 1;
                        Token::ExclusiveRange
                    }
                    _ => return Err(self.report(span_from..span_from + 1, "Expected \"..\"")),
                },

                char => {
                    return Err(self.report(
                        span_from..span_from + 1,
                        &format!("Unexpected character {:?}", char::from(char)),
                    ))
                }
            };

            tokens.push(TokenSpan::new(span_from, self.cursor, token));

            self.cursor += 1;
        }

        Ok(tokens)
    }
}
