//! Structural conversions between JSON text, nested values and XML trees
//!
//! The nested `Value` is the pivot: every text-to-text conversion parses into
//! it and serializes out of it. The value/XML mapping is lossy by convention:
//! sibling elements sharing a tag collapse into a sequence under that tag, and
//! only consecutive runs are grouped (a later run of a tag seen earlier
//! overwrites the earlier entry).

use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::extract;
use crate::json;
use crate::value::{Array, Object, Value};
use crate::xml::model::{Content, Document, Element};

/// Default tag for the synthesized root element
pub const DEFAULT_ROOT_TAG: &str = "root";

/// Conversion configuration. Fixed defaults live here rather than in module
/// state so callers can override them per call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Tag of the synthesized root element for value-to-XML conversion
    pub root_tag: String,
    /// Maximum tree depth accepted by the conversions (0 means unlimited)
    pub max_depth: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            max_depth: 128,
        }
    }
}

/// Supported text formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

/// Convert between text formats through the nested value pivot. Converting a
/// format to itself returns the input unchanged.
pub fn convert(input: &str, from: Format, to: Format) -> Result<String> {
    debug!(?from, ?to, len = input.len(), "converting document");
    if from == to {
        return Ok(input.to_string());
    }
    match (from, to) {
        (Format::Json, Format::Xml) => json_to_xml(input),
        (Format::Xml, Format::Json) => xml_to_json(input),
        _ => Ok(input.to_string()),
    }
}

/// Parse JSON text into a nested value
pub fn json_to_value(input: &str) -> Result<Value> {
    json::Parser::new(input.as_bytes()).parse()
}

/// Serialize a nested value to compact JSON text
pub fn value_to_json(value: &Value) -> Result<String> {
    json::writer::to_string(value)
}

/// Parse XML text (leading/trailing whitespace tolerated) into a nested value
pub fn xml_str_to_value(input: &str) -> Result<Value> {
    let doc = crate::xml::Parser::new(input.trim().as_bytes()).parse()?;
    Ok(xml_to_value(&doc.root))
}

/// Convert a nested value to XML text
pub fn value_to_xml_str(value: &Value, config: &Config) -> Result<String> {
    let doc = value_to_xml(value, config)?;
    Ok(crate::xml::writer::to_string(&doc))
}

/// XML text to JSON text, composed through the value pivot
pub fn xml_to_json(input: &str) -> Result<String> {
    value_to_json(&xml_str_to_value(input)?)
}

/// JSON text to XML text, composed through the value pivot
pub fn json_to_xml(input: &str) -> Result<String> {
    value_to_xml_str(&json_to_value(input)?, &Config::default())
}

/// Extract the value at `path`, reading JSON text (see [`extract::extract`])
pub fn json_extract(input: &str, path: &[&str]) -> Result<Option<Value>> {
    Ok(extract::extract(&json_to_value(input)?, path))
}

/// Convert a mapping into an XML element tree rooted at `config.root_tag`.
///
/// Scalar entries become child elements whose text content is the scalar
/// rendered as text (`Null` renders as an empty element); mapping entries
/// recurse into one child element per entry; sequence entries yield one child
/// element per item, all named after the entry's key. A non-mapping root is
/// rejected with `ErrorKind::InvalidRoot`.
pub fn value_to_xml(value: &Value, config: &Config) -> Result<Document> {
    let Value::Object(obj) = value else {
        return Err(Error::unpositioned(ErrorKind::InvalidRoot {
            found: value.kind_name().to_string(),
        }));
    };
    let root = build_element(&config.root_tag, obj, config, 0)?;
    Ok(Document { root })
}

fn build_element(name: &str, obj: &Object, config: &Config, depth: u16) -> Result<Element> {
    if config.max_depth > 0 && depth >= config.max_depth {
        return Err(Error::unpositioned(ErrorKind::MaxDepthExceeded {
            max: config.max_depth,
        }));
    }

    let mut element = Element::new(name);
    for (key, value) in obj {
        append_entry(&mut element, key, value, config, depth)?;
    }
    Ok(element)
}

fn append_entry(
    parent: &mut Element,
    key: &str,
    value: &Value,
    config: &Config,
    depth: u16,
) -> Result<()> {
    match value {
        Value::Array(items) => {
            for item in items {
                append_entry(parent, key, item, config, depth)?;
            }
        }
        Value::Object(obj) => {
            let child = build_element(key, obj, config, depth + 1)?;
            parent.children.push(Content::Element(child));
        }
        scalar => {
            let mut child = Element::new(key);
            if let Some(text) = render_scalar(scalar) {
                child.children.push(Content::Text(text));
            }
            parent.children.push(Content::Element(child));
        }
    }
    Ok(())
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Convert an element's children into a mapping from tag name to a sequence
/// of per-child values.
///
/// Consecutive runs of same-tag children group into one sequence; when a tag
/// recurs after a different tag, the later run overwrites the earlier entry.
/// A child with element children recurses and then merges its attributes in
/// as string entries; a leaf child contributes its text content, or `Null`
/// when it has none (leaf attributes are dropped). An element with no element
/// children yields an empty mapping.
pub fn xml_to_value(element: &Element) -> Value {
    let mut map = Object::new();
    let mut run_tag: Option<&str> = None;
    let mut run = Array::new();

    for child in element.child_elements() {
        if run_tag.is_some_and(|tag| tag != child.name) {
            if let Some(tag) = run_tag {
                map.insert(tag, Value::Array(std::mem::take(&mut run)));
            }
        }
        run_tag = Some(&child.name);
        run.push(child_value(child));
    }
    if let Some(tag) = run_tag {
        map.insert(tag, Value::Array(run));
    }

    Value::Object(map)
}

fn child_value(child: &Element) -> Value {
    if child.has_child_elements() {
        let mut value = xml_to_value(child);
        if let Value::Object(obj) = &mut value {
            for (name, attr) in &child.attributes {
                obj.insert(name.clone(), Value::String(attr.clone()));
            }
        }
        value
    } else {
        child.text().map_or(Value::Null, Value::String)
    }
}
