//! Integration tests for whole-document conversion
//!
//! Covers the documented scenarios, every error kind, and the fixture documents
//! under `tests/fixtures/`.

use odl::odl::formats::{CompactJsonFormatter, Formatter, JsonFormatter};
use odl::{convert, convert_with, ConvertOptions, ErrorKind, ParseOptions, TrailingPolicy, Value};
use rstest::rstest;
use std::fs;

fn read_fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}")).expect("Failed to read fixture")
}

fn to_compact_json(source: &str) -> String {
    let doc = convert(source).expect("document should parse");
    CompactJsonFormatter.serialize(&doc).unwrap()
}

#[test]
fn test_simple_document() {
    assert_eq!(
        to_compact_json(&read_fixture("simple.odl")),
        r#"{"FOO":1,"BAR":{"BAZ":"hello"}}"#
    );
}

#[test]
fn test_simple_document_pretty_snapshot() {
    let doc = convert(&read_fixture("simple.odl")).unwrap();
    let output = JsonFormatter::default().serialize(&doc).unwrap();

    insta::assert_snapshot!(output, @r#"
{
    "FOO": 1,
    "BAR": {
        "BAZ": "hello"
    }
}
"#);
}

#[test]
fn test_label_document() {
    assert_eq!(
        to_compact_json(&read_fixture("label.odl")),
        concat!(
            r#"{"PDS_VERSION_ID":"PDS3","RECORD_TYPE":"FIXED_LENGTH","RECORD_BYTES":2048,"#,
            r#""FILE_RECORDS":1024,"START_TIME":"2020-10-29T11:30:51.000000Z","#,
            r#""STOP_TIME":"10-29-2020T11:31:02Z","PRODUCT_ID":"CAM_0001","#,
            r#""SPACECRAFT_NAME":"EXPLORER 1","IMAGE":{"LINES":1024,"LINE_SAMPLES":1024,"#,
            r#""SAMPLE_BITS":8,"OFFSET":-5.0,"SCALING_FACTOR":0.075,"#,
            r#""WINDOW":{"FIRST_LINE":1,"LAST_LINE":512}},"#,
            r#""INSTRUMENT":{"NAME":"CAMERA","FILTER":"N/A"}}"#
        )
    );
}

#[test]
fn test_label_document_typed_access() {
    let doc = convert(&read_fixture("label.odl")).unwrap();

    assert_eq!(
        doc.get("START_TIME"),
        Some(&Value::DateTime("2020-10-29T11:30:51.000000Z".to_string()))
    );
    assert_eq!(doc.get_path("IMAGE.WINDOW.LAST_LINE"), Some(&Value::Integer(512)));
    assert_eq!(
        doc.get_path("INSTRUMENT.NAME").and_then(Value::as_str),
        Some("CAMERA")
    );
}

#[rstest]
#[case::end_only("END", "{}")]
#[case::end_with_whitespace("  \n\nEND\n\n", "{}")]
#[case::datetime("X = 2020-10-29T11:30:51.000000Z\nEND", r#"{"X":"2020-10-29T11:30:51.000000Z"}"#)]
#[case::semicolons("FOO = 1; END", r#"{"FOO":1}"#)]
#[case::newlines("FOO = 1\nEND", r#"{"FOO":1}"#)]
#[case::empty_group("GROUP = X\nEND_GROUP = X\nEND", r#"{"X":{}}"#)]
#[case::begin_group("BEGIN_GROUP = X; A = 'a'; END_GROUP = X; END", r#"{"X":{"A":"a"}}"#)]
#[case::duplicate_keys("A = 1\nA = 2\nEND", r#"{"A":2}"#)]
#[case::group_overwrites_key("X = 1\nGROUP = X\nEND_GROUP = X\nEND", r#"{"X":{}}"#)]
#[case::same_group_name_nested(
    "GROUP = X\nGROUP = X\nV = 1\nEND_GROUP = X\nEND_GROUP = X\nEND",
    r#"{"X":{"X":{"V":1}}}"#
)]
#[case::u64_max("N = 18446744073709551615\nEND", r#"{"N":18446744073709551615}"#)]
#[case::wide_negative("N = -170141183460469231731687303715884105728\nEND", r#"{"N":-170141183460469231731687303715884105728}"#)]
#[case::raw_fallback("A = N/A\nB = (1, 2)\nEND", r#"{"A":"N/A","B":"(1, 2)"}"#)]
#[case::value_with_equals("A = x = y\nEND", r#"{"A":"x = y"}"#)]
#[case::trailing_ignored("A = 1\nEND\nB = 2\ngarbage", r#"{"A":1}"#)]
fn test_converts(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(to_compact_json(source), expected);
}

#[rstest]
#[case::syntax_no_spaces("A=1\nEND", ErrorKind::StatementSyntax)]
#[case::syntax_bare_word("HELLO\nEND", ErrorKind::StatementSyntax)]
#[case::syntax_lowercase_end("end", ErrorKind::StatementSyntax)]
#[case::mismatch("GROUP = A\nEND_GROUP = B\nEND", ErrorKind::GroupMismatch)]
#[case::mismatch_inner("GROUP = A\nGROUP = B\nEND_GROUP = A\nEND", ErrorKind::GroupMismatch)]
#[case::close_without_open("END_GROUP = A\nEND", ErrorKind::GroupMismatch)]
#[case::unclosed("GROUP = A\nEND", ErrorKind::UnclosedGroup)]
#[case::empty_input("", ErrorKind::UnexpectedEndOfInput)]
#[case::missing_end("A = 1", ErrorKind::UnexpectedEndOfInput)]
#[case::missing_end_group("GROUP = A\nB = 1", ErrorKind::UnexpectedEndOfInput)]
fn test_rejects(#[case] source: &str, #[case] kind: ErrorKind) {
    let err = convert(source).unwrap_err();
    assert_eq!(err.kind(), kind, "{err}");
}

#[test]
fn test_mismatched_group_fixture_reports_both_names() {
    let err = convert(&read_fixture("mismatched_group.odl")).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("expected END_GROUP = A"), "{message}");
    assert!(message.contains("found END_GROUP = B"), "{message}");
    assert!(message.contains("statement #3"), "{message}");
}

#[test]
fn test_trailing_statements_rejected_when_configured() {
    let options = ConvertOptions {
        parse: ParseOptions {
            trailing: TrailingPolicy::Reject,
            ..ParseOptions::default()
        },
        ..ConvertOptions::default()
    };

    let err = convert_with("A = 1\nEND\nB = 2", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TrailingStatement);
    // nothing after END is fine either way
    assert!(convert_with("A = 1\nEND\n\n", &options).is_ok());
}

#[test]
fn test_semicolons_match_newlines() {
    let newline = convert("A = 1\nGROUP = G\nB = 2\nEND_GROUP = G\nEND").unwrap();
    let semicolon = convert("A = 1; GROUP = G; B = 2; END_GROUP = G; END").unwrap();
    assert_eq!(newline, semicolon);
}

fn nested_source(depth: usize) -> String {
    let mut source = String::new();
    for level in 0..depth {
        source.push_str(&format!("GROUP = G{level}\n"));
    }
    source.push_str("LEAF = 1\n");
    for level in (0..depth).rev() {
        source.push_str(&format!("END_GROUP = G{level}\n"));
    }
    source.push_str("END\n");
    source
}

#[test]
fn test_nesting_depth_is_capped() {
    let doc = convert(&nested_source(512)).unwrap();
    let json = CompactJsonFormatter.serialize(&doc).unwrap();
    assert!(json.ends_with(&format!("{{\"LEAF\":1}}{}", "}".repeat(512))));

    let err = convert(&nested_source(513)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    assert_eq!(err.statement().map(|s| s.ordinal()), Some(513));

    let shallow = ConvertOptions {
        parse: ParseOptions {
            max_depth: 2,
            ..ParseOptions::default()
        },
        ..ConvertOptions::default()
    };
    assert!(convert_with(&nested_source(2), &shallow).is_ok());
    assert_eq!(
        convert_with(&nested_source(3), &shallow).unwrap_err().kind(),
        ErrorKind::NestingTooDeep
    );
}
