//! End-to-end conversion behavior across the public API

use treeconv::{
    convert, json_to_value, json_to_xml, value_to_json, value_to_xml_str, xml_str_to_value,
    xml_to_json, Config, Format, Object, Value,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn json_roundtrip_is_exact() -> TestResult {
    let inputs = [
        r#"{"a":1,"b":[true,null,"s"],"c":{"d":-2.5}}"#,
        r#"[]"#,
        r#"{"emoji":"😀","cjk":"转换"}"#,
        r#"{"nested":[[1],[2,3]]}"#,
    ];
    for input in inputs {
        let value = json_to_value(input)?;
        assert_eq!(value_to_json(&value)?, input, "roundtrip of {input}");
    }
    Ok(())
}

#[test]
fn json_key_order_is_stable() -> TestResult {
    let input = r#"{"zeta":1,"alpha":2,"mid":3}"#;
    assert_eq!(value_to_json(&json_to_value(input)?)?, input);
    Ok(())
}

#[test]
fn non_ascii_survives_json_serialization_literally() -> TestResult {
    let mut obj = Object::new();
    obj.insert("город", "Київ");
    assert_eq!(
        value_to_json(&Value::Object(obj))?,
        r#"{"город":"Київ"}"#
    );
    Ok(())
}

// Structural XML round-trip holds only for the restricted shape where every
// mapping value is a single scalar or a single nested mapping; each original
// value comes back wrapped in a singleton sequence.
#[test]
fn restricted_xml_roundtrip() -> TestResult {
    let mut inner = Object::new();
    inner.insert("c", "y");
    let mut obj = Object::new();
    obj.insert("a", "x");
    obj.insert("b", Value::Object(inner));
    let original = Value::Object(obj);

    let xml = value_to_xml_str(&original, &Config::default())?;
    assert_eq!(xml, "<root><a>x</a><b><c>y</c></b></root>");

    let mut inner_back = Object::new();
    inner_back.insert("c", Value::Array(vec![Value::from("y")].into()));
    let mut back = Object::new();
    back.insert("a", Value::Array(vec![Value::from("x")].into()));
    back.insert("b", Value::Array(vec![Value::Object(inner_back)].into()));
    assert_eq!(xml_str_to_value(&xml)?, Value::Object(back));
    Ok(())
}

#[test]
fn sibling_collapse_later_run_wins() -> TestResult {
    let value = xml_str_to_value("<root><a>1</a><b>2</b><a>3</a></root>")?;
    let obj = value.as_object().ok_or("expected mapping")?;
    assert_eq!(
        obj.get("a"),
        Some(&Value::Array(vec![Value::from("3")].into()))
    );
    assert_eq!(
        obj.get("b"),
        Some(&Value::Array(vec![Value::from("2")].into()))
    );
    Ok(())
}

#[test]
fn composed_pipeline_is_stable() -> TestResult {
    // json -> xml -> json settles into the list-wrapped form after one pass
    let xml = json_to_xml(r#"{"root":{"item":"1"}}"#)?;
    assert_eq!(xml, "<root><root><item>1</item></root></root>");

    let json = xml_to_json(&xml)?;
    assert_eq!(json, r#"{"root":[{"item":["1"]}]}"#);

    // a second pass through both conversions reproduces the same wrapped form
    let xml2 = json_to_xml(&json)?;
    assert_eq!(xml_to_json(&xml2)?, json);
    Ok(())
}

#[test]
fn convert_dispatches_all_pairs() -> TestResult {
    let json = r#"{"name":"test"}"#;
    let xml = "<root><name>test</name></root>";

    assert_eq!(convert(json, Format::Json, Format::Xml)?, xml);
    assert_eq!(
        convert(xml, Format::Xml, Format::Json)?,
        r#"{"name":["test"]}"#
    );
    assert_eq!(convert(json, Format::Json, Format::Json)?, json);
    assert_eq!(convert(xml, Format::Xml, Format::Xml)?, xml);
    Ok(())
}

#[test]
fn attributes_merge_then_serialize_as_elements() -> TestResult {
    // branch attributes become mapping entries, so converting back to XML
    // turns them into child elements rather than attributes
    let json = xml_to_json(r#"<root><page n="2"><line>x</line></page></root>"#)?;
    assert_eq!(json, r#"{"page":[{"line":["x"],"n":"2"}]}"#);
    Ok(())
}

#[test]
fn malformed_inputs_report_errors() {
    assert!(json_to_value("{\"open\":").is_err());
    assert!(xml_str_to_value("<a><b></a>").is_err());
    assert!(json_to_xml("not json").is_err());
    assert!(xml_to_json("<broken").is_err());
}

#[test]
fn deeply_nested_xml_errors_instead_of_overflowing() {
    let depth = 200_000;
    let input = format!("{}1{}", "<a>".repeat(depth), "</a>".repeat(depth));
    let result = xml_str_to_value(&input);
    assert!(matches!(
        result,
        Err(err) if matches!(err.kind(), treeconv::ErrorKind::MaxDepthExceeded { .. })
    ));
}

#[test]
fn xml_conversion_rejects_scalar_and_sequence_roots() {
    for input in ["[1,2]", r#""text""#, "42", "null", "true"] {
        let value = json_to_value(input).unwrap_or_else(|err| panic!("parse {input}: {err}"));
        let result = value_to_xml_str(&value, &Config::default());
        assert!(
            matches!(
                &result,
                Err(err) if matches!(err.kind(), treeconv::ErrorKind::InvalidRoot { .. })
            ),
            "expected InvalidRoot for {input}, got {result:?}"
        );
    }
}
