//! Recursive descent JSON parser

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::json::JsonLexer;
use crate::lexer::token::{Token, TokenKind};
use crate::value::{Array, Object, Value};

/// JSON parser configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

impl Config {
    pub const fn new(max_depth: u16) -> Self {
        Self { max_depth }
    }

    pub const fn unlimited() -> Self {
        Self { max_depth: 0 }
    }
}

/// Parses one JSON document into a `Value`
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: JsonLexer<'a>,
    config: Config,
    depth: u16,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            lexer: JsonLexer::new(input),
            config,
            depth: 0,
        }
    }

    /// Parse the complete input as a single value; trailing tokens after the
    /// document are an error
    pub fn parse(&mut self) -> Result<Value> {
        let token = self.lexer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Err(Error::at(ErrorKind::UnexpectedEof, token.span.start));
        }
        let value = self.parse_value(token)?;

        let trailing = self.lexer.next_token()?;
        if trailing.kind != TokenKind::Eof {
            return Err(expected_error("end of input", &trailing));
        }
        Ok(value)
    }

    fn parse_value(&mut self, token: Token) -> Result<Value> {
        match token.kind {
            TokenKind::Null => Ok(Value::Null),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Number(n) => Ok(Value::Number(n)),
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::LeftBrace => self.parse_object(&token),
            TokenKind::LeftBracket => self.parse_array(&token),
            _ => Err(expected_error("value", &token)),
        }
    }

    fn parse_object(&mut self, open: &Token) -> Result<Value> {
        self.enter(open)?;
        let mut object = Object::new();

        let mut token = self.lexer.next_token()?;
        if token.kind != TokenKind::RightBrace {
            loop {
                let key = match token.kind {
                    TokenKind::String(s) => s,
                    _ => return Err(expected_error("string key", &token)),
                };

                let colon = self.lexer.next_token()?;
                if colon.kind != TokenKind::Colon {
                    return Err(expected_error("':'", &colon));
                }

                let value_token = self.lexer.next_token()?;
                let value = self.parse_value(value_token)?;
                object.insert(key, value);

                let separator = self.lexer.next_token()?;
                match separator.kind {
                    TokenKind::Comma => token = self.lexer.next_token()?,
                    TokenKind::RightBrace => break,
                    _ => return Err(expected_error("',' or '}'", &separator)),
                }
            }
        }

        self.leave();
        Ok(Value::Object(object))
    }

    fn parse_array(&mut self, open: &Token) -> Result<Value> {
        self.enter(open)?;
        let mut array = Array::new();

        let mut token = self.lexer.next_token()?;
        if token.kind != TokenKind::RightBracket {
            loop {
                let value = self.parse_value(token)?;
                array.push(value);

                let separator = self.lexer.next_token()?;
                match separator.kind {
                    TokenKind::Comma => token = self.lexer.next_token()?,
                    TokenKind::RightBracket => break,
                    _ => return Err(expected_error("',' or ']'", &separator)),
                }
            }
        }

        self.leave();
        Ok(Value::Array(array))
    }

    fn enter(&mut self, open: &Token) -> Result<()> {
        if self.config.max_depth > 0 && self.depth >= self.config.max_depth {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                open.span.start,
            ));
        }
        self.depth = self.depth.saturating_add(1);
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

fn expected_error(expected: &str, token: &Token) -> Error {
    Error::at(
        ErrorKind::Expected {
            expected: expected.to_string(),
            found: token.kind.name().to_string(),
        },
        token.span.start,
    )
}
