//! Hand-written XML 1.0 parser
//!
//! Covers the element subset the converter needs: attributes, nested and
//! self-closing elements, character data with entity decoding. Comments,
//! processing instructions, DOCTYPE declarations and CDATA sections are
//! consumed and discarded. Element nesting is checked against a limit
//! (128 by default) so deep input errors instead of exhausting the stack.

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::Cursor;
use crate::xml::model::{Content, Document, Element};

const DEFAULT_MAX_DEPTH: u16 = 128;

/// XML parser over raw bytes
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    max_depth: u16,
}

impl<'a> Parser<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Parser with a custom element nesting limit (0 means unlimited)
    pub const fn with_max_depth(input: &'a [u8], max_depth: u16) -> Self {
        Self {
            cursor: Cursor::new(input),
            max_depth,
        }
    }

    /// Parse a complete document: one root element, optionally surrounded by
    /// whitespace, prolog and comments
    pub fn parse(&mut self) -> Result<Document> {
        self.skip_misc()?;
        let root = self.parse_element(0)?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::InvalidToken));
        }
        Ok(Document { root })
    }

    fn parse_element(&mut self, depth: u16) -> Result<Element> {
        if self.max_depth > 0 && depth >= self.max_depth {
            return Err(self.error_here(ErrorKind::MaxDepthExceeded {
                max: self.max_depth,
            }));
        }
        self.expect_byte(b'<')?;

        if self.cursor.current() == Some(b'/') {
            return Err(self.error_with(
                ErrorKind::InvalidToken,
                "closing tag without matching open tag",
            ));
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        // self-closing form
        if self.cursor.current() == Some(b'/') {
            self.cursor.advance();
            self.expect_byte(b'>')?;
            return Ok(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }
        self.expect_byte(b'>')?;

        let mut children = Vec::new();
        loop {
            match self.cursor.current() {
                None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
                Some(b'<') => match self.cursor.peek(1) {
                    Some(b'/') => {
                        self.cursor.advance_by(2);
                        let closed = self.parse_name()?;
                        if closed != name {
                            return Err(self.error_here(ErrorKind::MismatchedTag {
                                opened: name,
                                closed,
                            }));
                        }
                        self.cursor.skip_whitespace();
                        self.expect_byte(b'>')?;
                        break;
                    }
                    Some(b'!') => {
                        self.cursor.advance();
                        self.skip_bang_markup()?;
                    }
                    Some(b'?') => {
                        self.cursor.advance();
                        self.skip_until(b"?>")?;
                    }
                    _ => {
                        let child = self.parse_element(depth.saturating_add(1))?;
                        children.push(Content::Element(child));
                    }
                },
                Some(_) => {
                    if let Some(text) = self.parse_text()? {
                        children.push(Content::Text(text));
                    }
                }
            }
        }

        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here(ErrorKind::DuplicateAttribute { name }));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(self.error_with(
                    ErrorKind::InvalidToken,
                    "expected quoted attribute value",
                ))
            }
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = self.into_utf8(raw)?;
                return self.decode_entities(&text);
            }
            self.cursor.advance();
        }

        Err(self.error_here(ErrorKind::UnterminatedString))
    }

    fn parse_text(&mut self) -> Result<Option<String>> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = self.into_utf8(raw)?;
        let text = self.decode_entities(&text)?;
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        match self.cursor.current() {
            Some(b) if is_name_start(b) => {}
            Some(_) => return Err(self.error_with(ErrorKind::InvalidToken, "invalid name")),
            None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
        }

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }
        self.into_utf8(self.cursor.slice_from(start))
    }

    /// Skip `<!...>` markup: comments, CDATA sections and declarations.
    /// Cursor is positioned on the '!'.
    fn skip_bang_markup(&mut self) -> Result<()> {
        if self.cursor.peek_bytes(3) == Some(b"!--") {
            self.cursor.advance_by(3);
            return self.skip_until(b"-->");
        }
        if self.cursor.peek_bytes(8) == Some(b"![CDATA[") {
            self.cursor.advance_by(8);
            return self.skip_until(b"]]>");
        }
        self.skip_until(b">")
    }

    /// Skip prolog material before or after the root element
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current() == Some(b'<') {
                match self.cursor.peek(1) {
                    Some(b'?') => {
                        self.cursor.advance_by(2);
                        self.skip_until(b"?>")?;
                        continue;
                    }
                    Some(b'!') => {
                        self.cursor.advance();
                        self.skip_bang_markup()?;
                        continue;
                    }
                    _ => {}
                }
            }
            return Ok(());
        }
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(pattern.len()) == Some(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_with(ErrorKind::UnexpectedEof, "unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.current() == Some(expected) {
            self.cursor.advance();
            Ok(())
        } else {
            let found = match self.cursor.current() {
                Some(b) => format!("'{}'", char::from(b)),
                None => "end of input".to_string(),
            };
            Err(self.error_here(ErrorKind::Expected {
                expected: format!("'{}'", char::from(expected)),
                found,
            }))
        }
    }

    fn decode_entities(&self, input: &str) -> Result<String> {
        if !input.contains('&') {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(ch) = chars.next() {
            if ch != '&' {
                result.push(ch);
                continue;
            }

            let mut entity = String::new();
            let mut terminated = false;
            for next in chars.by_ref() {
                if next == ';' {
                    terminated = true;
                    break;
                }
                entity.push(next);
            }

            let decoded = if terminated {
                decode_entity(&entity)
            } else {
                None
            };
            match decoded {
                Some(ch) => result.push(ch),
                None => return Err(self.error_here(ErrorKind::InvalidEntity { entity })),
            }
        }
        Ok(result)
    }

    fn into_utf8(&self, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| self.error_here(ErrorKind::InvalidUtf8))
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.cursor.position())
    }

    fn error_with(&self, kind: ErrorKind, message: &str) -> Error {
        Error::with_message(
            kind,
            crate::error::Span::at(self.cursor.position()),
            message.to_string(),
        )
    }
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            if let Some(hex) = entity.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, Span};
    use std::fmt::Debug;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input.as_bytes()).parse()
    }

    fn ensure_eq<T: PartialEq + Debug>(left: T, right: T) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Error::with_message(
                ErrorKind::InvalidToken,
                Span::empty(),
                format!("assertion failed: left={left:?} right={right:?}"),
            ))
        }
    }

    #[test]
    fn test_empty_root() -> Result<()> {
        let doc = parse("<root></root>")?;
        ensure_eq(doc.root.name, "root".to_string())?;
        ensure_eq(doc.root.children.len(), 0)?;
        Ok(())
    }

    #[test]
    fn test_attributes_both_quote_styles() -> Result<()> {
        let doc = parse(r#"<item id="1" name='a b'/>"#)?;
        ensure_eq(doc.root.attributes.get("id"), Some(&"1".to_string()))?;
        ensure_eq(doc.root.attributes.get("name"), Some(&"a b".to_string()))?;
        Ok(())
    }

    #[test]
    fn test_nested_with_text() -> Result<()> {
        let doc = parse("<root><child>text</child></root>")?;
        let child = match doc.root.children.first() {
            Some(Content::Element(el)) => el,
            other => {
                return Err(Error::with_message(
                    ErrorKind::InvalidToken,
                    Span::empty(),
                    format!("expected element child, got {other:?}"),
                ))
            }
        };
        ensure_eq(child.name.clone(), "child".to_string())?;
        ensure_eq(child.text(), Some("text".to_string()))?;
        Ok(())
    }

    #[test]
    fn test_prolog_comment_and_cdata_skipped() -> Result<()> {
        let doc = parse(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- note -->\n<root><![CDATA[raw]]><a>1</a></root>",
        )?;
        ensure_eq(doc.root.child_elements().count(), 1)?;
        Ok(())
    }

    #[test]
    fn test_entity_decoding() -> Result<()> {
        let doc = parse("<root a=\"x &amp; y\">&lt;tag&gt; &#65;&#x42;</root>")?;
        ensure_eq(doc.root.attributes.get("a"), Some(&"x & y".to_string()))?;
        ensure_eq(doc.root.text(), Some("<tag> AB".to_string()))?;
        Ok(())
    }

    #[test]
    fn test_whitespace_only_text_dropped() -> Result<()> {
        let doc = parse("<root>\n  <a>1</a>\n</root>")?;
        ensure_eq(doc.root.children.len(), 1)?;
        Ok(())
    }

    #[test]
    fn test_mismatched_tag() {
        let result = parse("<a><b></a></b>");
        assert!(matches!(
            result,
            Err(err) if matches!(
                err.kind(),
                ErrorKind::MismatchedTag { opened, closed } if opened == "b" && closed == "a"
            )
        ));
    }

    #[test]
    fn test_duplicate_attribute() {
        let result = parse(r#"<a x="1" x="2"/>"#);
        assert!(matches!(
            result,
            Err(err) if matches!(err.kind(), ErrorKind::DuplicateAttribute { name } if name == "x")
        ));
    }

    #[test]
    fn test_unterminated_element() {
        let result = parse("<a><b>");
        assert!(matches!(
            result,
            Err(err) if *err.kind() == ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn test_unknown_entity() {
        let result = parse("<a>&nope;</a>");
        assert!(matches!(
            result,
            Err(err) if matches!(err.kind(), ErrorKind::InvalidEntity { entity } if entity == "nope")
        ));
    }

    #[test]
    fn test_depth_limit() {
        let input = format!("{}x{}", "<a>".repeat(5), "</a>".repeat(5));
        let result = Parser::with_max_depth(input.as_bytes(), 3).parse();
        assert!(matches!(
            result,
            Err(err) if matches!(err.kind(), ErrorKind::MaxDepthExceeded { max: 3 })
        ));
    }

    #[test]
    fn test_default_depth_accepts_reasonable_nesting() -> Result<()> {
        let input = format!("{}x{}", "<a>".repeat(64), "</a>".repeat(64));
        parse(&input)?;
        Ok(())
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let result = parse("<a/>junk");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_position() {
        let result = parse("<root>\n  <1bad/></root>");
        match result {
            Err(err) => assert_eq!(err.span().start.line, 2),
            Ok(doc) => unreachable!("expected error, got {doc:?}"),
        }
    }
}
