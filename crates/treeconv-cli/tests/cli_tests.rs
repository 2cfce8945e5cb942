use assert_cmd::Command;
use predicates::prelude::*;

fn treeconv() -> Command {
    Command::cargo_bin("treeconv").expect("binary builds")
}

#[test]
fn converts_json_file_to_xml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.json");
    std::fs::write(&input, r#"{"name":"test"}"#).expect("write input");

    treeconv()
        .arg(&input)
        .args(["--to", "xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<root><name>test</name></root>"));
}

#[test]
fn converts_xml_from_stdin_with_explicit_format() {
    treeconv()
        .args(["--from", "xml", "--to", "json"])
        .write_stdin("<root><name>test</name></root>")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"name":["test"]}"#));
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.xml");
    std::fs::write(&input, r#"{"a":"1"}"#).expect("write input");

    treeconv()
        .arg(&input)
        .args(["--to", "xml"])
        .args(["--output", output.to_str().expect("utf8 path")])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(written.trim(), "<root><a>1</a></root>");
}

#[test]
fn extracts_value_with_get() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.json");
    std::fs::write(&input, r#"{"book":{"chapter":{"title":"Intro"}}}"#).expect("write input");

    treeconv()
        .arg(&input)
        .args(["--to", "json", "--get", "book.chapter.title"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Intro""#));
}

#[test]
fn missing_path_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.json");
    std::fs::write(&input, r#"{"book":{}}"#).expect("write input");

    treeconv()
        .arg(&input)
        .args(["--to", "json", "--get", "book.title"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no value at path"));
}

#[test]
fn malformed_input_reports_position() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.json");
    std::fs::write(&input, r#"{"open":"#).expect("write input");

    treeconv()
        .arg(&input)
        .args(["--to", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn infers_format_from_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.xml");
    std::fs::write(&input, "<root><k>v</k></root>").expect("write input");

    treeconv()
        .arg(&input)
        .args(["--to", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"k":["v"]}"#));
}
