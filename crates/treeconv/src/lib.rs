//! treeconv - structural conversion between JSON, nested values and XML
//!
//! Three tree representations share one pivot type, [`Value`]: JSON text,
//! the in-memory nested value (mapping/sequence/scalar) and the XML element
//! tree. Conversions are pairwise and lossy by documented convention; a
//! key-path extractor resolves values out of the nested shape.
//!
//! # Quick Start
//!
//! ```
//! use treeconv::{extract, from_str};
//! # fn main() -> Result<(), treeconv::Error> {
//! let value = from_str(r#"{"user": {"name": "Ada"}}"#)?;
//! let name = extract(&value, &["user", "name"]);
//! assert_eq!(name.and_then(|v| v.as_str().map(String::from)), Some("Ada".to_string()));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod lexer;
pub use lexer::{Token, TokenKind};

pub mod value;
pub use value::{Array, Object, Value};

pub mod json;
pub use json::{Config as JsonConfig, Parser as JsonParser};

pub mod xml;
pub use xml::{Content as XmlContent, Document as XmlDocument, Element as XmlElement, Parser as XmlParser};

pub mod convert;
pub use convert::{
    convert, json_to_value, json_to_xml, value_to_json, value_to_xml, value_to_xml_str, xml_str_to_value,
    xml_to_json, xml_to_value, Config, Format, DEFAULT_ROOT_TAG,
};

pub mod extract;
pub use extract::{extract, extract_all};

pub mod transfer;
pub use transfer::{ByteSink, Endpoint};

#[cfg(feature = "serde")]
mod serde;

/// Parse JSON from a string
pub fn from_str(s: &str) -> Result<Value> {
    json::Parser::new(s.as_bytes()).parse()
}

/// Parse JSON with a custom configuration
pub fn from_str_with_config(s: &str, config: JsonConfig) -> Result<Value> {
    json::Parser::with_config(s.as_bytes(), config).parse()
}

/// Parse XML from a string into an element tree
pub fn from_xml_str(s: &str) -> Result<XmlDocument> {
    xml::Parser::new(s.trim().as_bytes()).parse()
}
