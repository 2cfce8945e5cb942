//! JSON tokenizer (RFC 8259)

use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

/// Tokenizes JSON input into a stream of `Token`s
#[derive(Clone, Debug)]
pub struct JsonLexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> JsonLexer<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Next token, skipping insignificant whitespace
    pub fn next_token(&mut self) -> Result<Token> {
        self.cursor.skip_whitespace();
        let start = self.cursor.position();

        let kind = match self.cursor.current() {
            None => TokenKind::Eof,
            Some(b'{') => {
                self.cursor.advance();
                TokenKind::LeftBrace
            }
            Some(b'}') => {
                self.cursor.advance();
                TokenKind::RightBrace
            }
            Some(b'[') => {
                self.cursor.advance();
                TokenKind::LeftBracket
            }
            Some(b']') => {
                self.cursor.advance();
                TokenKind::RightBracket
            }
            Some(b':') => {
                self.cursor.advance();
                TokenKind::Colon
            }
            Some(b',') => {
                self.cursor.advance();
                TokenKind::Comma
            }
            Some(b'"') => self.lex_string()?,
            Some(b'n') => self.lex_keyword(b"null", TokenKind::Null)?,
            Some(b't') => self.lex_keyword(b"true", TokenKind::True)?,
            Some(b'f') => self.lex_keyword(b"false", TokenKind::False)?,
            Some(b'-' | b'0'..=b'9') => self.lex_number()?,
            Some(_) => return Err(self.error_here(ErrorKind::InvalidToken)),
        };

        let end = self.cursor.position();
        Ok(Token::new(kind, Span::new(start, end)))
    }

    /// Lex a string literal. Raw bytes are accumulated and decoded as UTF-8
    /// once, so multi-byte characters pass through unchanged.
    fn lex_string(&mut self) -> Result<TokenKind> {
        self.cursor.advance(); // opening quote
        let mut buf: Vec<u8> = Vec::new();

        loop {
            match self.cursor.current() {
                None => return Err(self.error_here(ErrorKind::UnterminatedString)),
                Some(b'"') => {
                    self.cursor.advance();
                    break;
                }
                Some(b'\\') => {
                    self.cursor.advance();
                    self.lex_escape(&mut buf)?;
                }
                Some(b) if b < 0x20 => {
                    // control characters must be escaped inside strings
                    return Err(self.error_here(ErrorKind::InvalidToken));
                }
                Some(b) => {
                    buf.push(b);
                    self.cursor.advance();
                }
            }
        }

        String::from_utf8(buf)
            .map(TokenKind::String)
            .map_err(|_| self.error_here(ErrorKind::InvalidUtf8))
    }

    fn lex_escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let Some(escape) = self.cursor.current() else {
            return Err(self.error_here(ErrorKind::InvalidEscape));
        };
        let decoded = match escape {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\x08',
            b'f' => '\x0C',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                self.cursor.advance();
                let ch = self.lex_unicode_escape()?;
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                return Ok(());
            }
            _ => return Err(self.error_here(ErrorKind::InvalidEscape)),
        };
        let mut utf8 = [0u8; 4];
        buf.extend_from_slice(decoded.encode_utf8(&mut utf8).as_bytes());
        self.cursor.advance();
        Ok(())
    }

    /// `\uXXXX` escape, including UTF-16 surrogate pairs
    fn lex_unicode_escape(&mut self) -> Result<char> {
        let high = self.lex_hex4()?;

        if (0xD800..0xDC00).contains(&high) {
            // high surrogate, a low surrogate escape must follow
            if self.cursor.peek_bytes(2) != Some(b"\\u") {
                return Err(self.error_here(ErrorKind::InvalidUnicodeEscape));
            }
            self.cursor.advance_by(2);
            let low = self.lex_hex4()?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(self.error_here(ErrorKind::InvalidUnicodeEscape));
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code)
                .ok_or_else(|| self.error_here(ErrorKind::InvalidUnicodeEscape));
        }

        char::from_u32(high).ok_or_else(|| self.error_here(ErrorKind::InvalidUnicodeEscape))
    }

    fn lex_hex4(&mut self) -> Result<u32> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            let digit = match self.cursor.current() {
                Some(b @ b'0'..=b'9') => u32::from(b - b'0'),
                Some(b @ b'a'..=b'f') => u32::from(b - b'a') + 10,
                Some(b @ b'A'..=b'F') => u32::from(b - b'A') + 10,
                _ => return Err(self.error_here(ErrorKind::InvalidUnicodeEscape)),
            };
            code = code * 16 + digit;
            self.cursor.advance();
        }
        Ok(code)
    }

    fn lex_keyword(&mut self, keyword: &'static [u8], kind: TokenKind) -> Result<TokenKind> {
        if self.cursor.peek_bytes(keyword.len()) == Some(keyword) {
            self.cursor.advance_by(keyword.len());
            Ok(kind)
        } else {
            Err(self.error_here(ErrorKind::InvalidToken))
        }
    }

    fn lex_number(&mut self) -> Result<TokenKind> {
        let start = self.cursor.pos();

        if self.cursor.current() == Some(b'-') {
            self.cursor.advance();
        }

        // integer part: single zero or a nonzero-led digit run
        match self.cursor.current() {
            Some(b'0') => self.cursor.advance(),
            Some(b'1'..=b'9') => self.eat_digits(),
            _ => return Err(self.error_here(ErrorKind::InvalidNumber)),
        }

        if self.cursor.current() == Some(b'.') {
            self.cursor.advance();
            if !matches!(self.cursor.current(), Some(b'0'..=b'9')) {
                return Err(self.error_here(ErrorKind::InvalidNumber));
            }
            self.eat_digits();
        }

        if matches!(self.cursor.current(), Some(b'e' | b'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some(b'+' | b'-')) {
                self.cursor.advance();
            }
            if !matches!(self.cursor.current(), Some(b'0'..=b'9')) {
                return Err(self.error_here(ErrorKind::InvalidNumber));
            }
            self.eat_digits();
        }

        let raw = self.cursor.slice_from(start);
        std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .map(TokenKind::Number)
            .ok_or_else(|| self.error_here(ErrorKind::InvalidNumber))
    }

    fn eat_digits(&mut self) {
        while matches!(self.cursor.current(), Some(b'0'..=b'9')) {
            self.cursor.advance();
        }
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.cursor.position())
    }
}
