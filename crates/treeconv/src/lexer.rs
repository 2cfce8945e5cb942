//! Lexing infrastructure shared by the JSON and XML parsers

pub mod cursor;
pub mod json;
pub mod token;

pub use cursor::Cursor;
pub use json::JsonLexer;
pub use token::{Token, TokenKind};
