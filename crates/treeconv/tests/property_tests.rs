//! Property-based tests for parsing, serialization, and extraction
//!
//! These use proptest to verify:
//! 1. Roundtrip property: serialize(value) -> parse == original
//! 2. Parsers never panic on arbitrary input
//! 3. XML conversion roundtrips on its supported shape

use proptest::prelude::*;
use treeconv::{
    extract, from_str, value_to_json, value_to_xml_str, xml_str_to_value, Config, Object, Value,
};

/// Strategy for mapping keys that are also valid XML element names
fn arb_key() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_-]{0,8}"
}

/// Strategy for arbitrary nested values
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1e9f64..1e9f64).prop_map(Value::Number),
        "\\PC*".prop_map(Value::String),
    ];

    leaf.prop_recursive(6, 128, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(|v| Value::Array(v.into())),
            prop::collection::vec((arb_key(), inner), 0..8)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

/// Strategy for mappings whose values are all non-empty scalar strings;
/// this is the shape the XML conversion can reproduce structurally
fn arb_flat_string_object() -> impl Strategy<Value = Object> {
    prop::collection::vec((arb_key(), "[a-zA-Z0-9][a-zA-Z0-9 ]{0,11}"), 1..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    })
}

proptest! {
    /// Serializing any value to JSON and parsing it back reproduces the value
    #[test]
    fn json_roundtrip(value in arb_value()) {
        let serialized = value_to_json(&value).unwrap();
        let parsed = from_str(&serialized).unwrap();
        prop_assert_eq!(parsed, value);
    }

    /// The JSON parser returns a result for arbitrary input instead of panicking
    #[test]
    fn json_parser_never_panics(input in "\\PC*") {
        let _ = from_str(&input);
    }

    /// The XML parser returns a result for arbitrary input instead of panicking
    #[test]
    fn xml_parser_never_panics(input in "\\PC*") {
        let _ = xml_str_to_value(&input);
    }

    /// A flat string mapping survives XML conversion with each value coming
    /// back as a singleton sequence
    #[test]
    fn flat_mapping_survives_xml(obj in arb_flat_string_object()) {
        let original = Value::Object(obj.clone());
        let xml = value_to_xml_str(&original, &Config::default()).unwrap();
        let back = xml_str_to_value(&xml).unwrap();

        let expected: Object = obj
            .into_iter()
            .map(|(k, v)| (k, Value::Array(vec![v].into())))
            .collect();
        prop_assert_eq!(back, Value::Object(expected));
    }

    /// Wrapping an intermediate mapping in a singleton sequence does not
    /// change what a deeper extraction finds
    #[test]
    fn singleton_wrapping_is_transparent_to_extract(
        value in arb_value(),
        outer in arb_key(),
        inner in arb_key(),
    ) {
        let mut leaf = Object::new();
        leaf.insert(inner.clone(), value);

        let mut plain = Object::new();
        plain.insert(outer.clone(), leaf.clone());
        let mut wrapped = Object::new();
        wrapped.insert(outer.clone(), Value::Array(vec![Value::Object(leaf)].into()));

        let path = [outer.as_str(), inner.as_str()];
        prop_assert_eq!(
            extract(&Value::Object(plain), &path),
            extract(&Value::Object(wrapped), &path)
        );
    }
}
