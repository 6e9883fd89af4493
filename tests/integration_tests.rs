use std::collections::HashMap;

use tq_lang::codec::{CodecConfig, CodecError, Format, decode, encode, render_results};
use tq_lang::scanner::ScanError;
use tq_lang::{
    Error, LexErrorKind, ParseErrorKind, Tq, Value, compile_query, compile_query_bytes,
    validate_query,
};

const DOC: &str = r#"
foo = 1
bar = [10, 20, 30]
"#;

fn query(q: &str) -> Result<Vec<Value>, Error> {
    Tq::default().query(DOC, q)
}

fn run(q: &str) -> String {
    Tq::default().run(DOC, q).unwrap()
}

fn json_tq() -> Tq {
    Tq::new(CodecConfig {
        input: Format::Json,
        output: Format::Json,
        ..Default::default()
    })
}

fn document() -> Value {
    let mut map = HashMap::new();
    map.insert("foo".to_string(), Value::Integer(1));
    map.insert(
        "bar".to_string(),
        Value::Array(vec![
            Value::Integer(10),
            Value::Integer(20),
            Value::Integer(30),
        ]),
    );
    Value::Table(map)
}

// ============================================================================
// End-to-end queries
// ============================================================================

#[test]
fn test_identity_returns_whole_document() {
    assert_eq!(query(".").unwrap(), vec![document()]);
}

#[test]
fn test_empty_query_returns_whole_document() {
    assert_eq!(query("").unwrap(), vec![document()]);
}

#[test]
fn test_key_lookup() {
    assert_eq!(query(r#"["foo"]"#).unwrap(), vec![Value::Integer(1)]);
}

#[test]
fn test_key_then_index() {
    assert_eq!(query(r#"["bar"][1]"#).unwrap(), vec![Value::Integer(20)]);
}

#[test]
fn test_key_then_span() {
    assert_eq!(
        query(r#"["bar"][0:2]"#).unwrap(),
        vec![Value::Array(vec![Value::Integer(10), Value::Integer(20)])]
    );
}

#[test]
fn test_key_then_iterator() {
    assert_eq!(
        query(r#"["bar"][]"#).unwrap(),
        vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)]
    );
}

#[test]
fn test_missing_key_is_empty() {
    assert_eq!(query(r#"["missing"]"#).unwrap(), Vec::<Value>::new());
    assert_eq!(run(r#"["missing"]"#), "");
}

#[test]
fn test_malformed_query() {
    match query("[") {
        Err(Error::Parse(e)) => {
            assert_eq!(e.kind(), ParseErrorKind::SelectorUnterminated);
            assert!(e.is(ParseErrorKind::BufferExhausted));
            assert_eq!(e.offset(), 1);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_lexer_errors_surface_with_caret() {
    match query(r#"["foo"#) {
        Err(err @ Error::Lex(_)) => {
            if let Error::Lex(errors) = &err {
                assert_eq!(errors.kinds(), vec![LexErrorKind::UnterminatedString]);
            }
            assert!(err.render().contains("\n ^\n"));
        }
        other => panic!("Expected lexer error, got {:?}", other),
    }
}

#[test]
fn test_shape_mismatch_surfaces_as_eval_error() {
    let err = query("[0]").unwrap_err();
    assert!(matches!(err, Error::Eval(_)));
    assert!(err.render().starts_with("Interpreter error: cannot query [ table ]"));
}

#[test]
fn test_validate_query() {
    assert!(validate_query(r#". ["a"] [1:] []"#).is_ok());
    assert!(matches!(validate_query("[1"), Err(Error::Parse(_))));
    assert!(matches!(validate_query("[-1]"), Err(Error::Lex(_))));
}

#[test]
fn test_query_bytes() {
    assert_eq!(compile_query_bytes(b"[\"a\"][]").unwrap().len(), 2);
    assert!(matches!(
        compile_query_bytes(&[b'[', 0xc3]),
        Err(Error::Scan(ScanError::InvalidUtf8 { offset: 1 }))
    ));
}

#[test]
fn test_compiled_pipeline_is_reusable() {
    let pipeline = compile_query(r#"["foo"]"#).unwrap();
    for i in 0..3 {
        let mut map = HashMap::new();
        map.insert("foo".to_string(), Value::Integer(i));
        assert_eq!(pipeline.run(vec![Value::Table(map)]).unwrap(), vec![Value::Integer(i)]);
    }
}

#[test]
fn test_nested_tables() {
    let doc = r#"
[[servers]]
name = "alpha"
ip = "10.0.0.1"

[[servers]]
name = "beta"
ip = "10.0.0.2"
"#;
    let out = Tq::default().run(doc, r#"["servers"][]["ip"]"#).unwrap();
    assert_eq!(out, "\"10.0.0.1\"\n\"10.0.0.2\"");
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_scalar_results_encode_inline() {
    assert_eq!(run(r#"["bar"][]"#), "10\n20\n30");
    assert_eq!(run(r#"["bar"][0:2]"#), "[10, 20]");
}

#[test]
fn test_table_results_encode_as_documents() {
    assert_eq!(run("."), "bar = [10, 20, 30]\nfoo = 1");
}

#[test]
fn test_empty_encodings_are_skipped() {
    let doc = "x = [{}, { b = 1 }, {}]";
    assert_eq!(Tq::default().run(doc, r#"["x"][]"#).unwrap(), "b = 1");
}

#[test]
fn test_table_results_stay_separate_documents() {
    let doc = r#"
[[srv]]
ip = "x"

[srv.meta]
k = 1

[[srv]]
ip = "y"
"#;
    assert_eq!(
        Tq::default().run(doc, r#"["srv"][]"#).unwrap(),
        "ip = \"x\"\n\n[meta]\nk = 1\n\nip = \"y\""
    );
    assert_eq!(
        Tq::default().run("t = [{ a = 1 }, { a = 2 }]", r#"["t"][]"#).unwrap(),
        "a = 1\n\na = 2"
    );
}

#[test]
fn test_inline_tables() {
    let tq = Tq::new(CodecConfig {
        tables_inline: true,
        ..Default::default()
    });
    assert_eq!(
        tq.run("t = [{ a = 1 }, { a = 2, b = 'z' }]", r#"["t"][]"#).unwrap(),
        "{ a = 1 }\n{ a = 2, b = \"z\" }"
    );
    assert_eq!(tq.run("t = [{}]", r#"["t"][]"#).unwrap(), "{}");
}

#[test]
fn test_datetime_passes_through() {
    let doc = "born = 1979-05-27T07:32:00Z";
    assert_eq!(
        Tq::default().run(doc, r#"["born"]"#).unwrap(),
        "1979-05-27T07:32:00Z"
    );
}

#[test]
fn test_json_in_json_out() {
    let out = json_tq()
        .run(r#"{"a": {"b": [1, 2, 3]}}"#, r#"["a"]["b"][1:]"#)
        .unwrap();
    assert_eq!(out, "[2,3]");
}

#[test]
fn test_json_null_is_rejected() {
    let err = json_tq().query(r#"{"a": null}"#, ".").unwrap_err();
    assert!(matches!(err, Error::Codec(CodecError::Unrepresentable(_))));
}

#[test]
fn test_pretty_json() {
    let config = CodecConfig {
        output: Format::Json,
        pretty: true,
        ..Default::default()
    };
    let value = Value::Array(vec![Value::Integer(1)]);
    assert_eq!(encode(&value, &config).unwrap(), "[\n  1\n]");
}

#[test]
fn test_invalid_toml_is_codec_error() {
    let err = Tq::default().query("foo = ", ".").unwrap_err();
    assert!(matches!(err, Error::Codec(CodecError::TomlDecode(_))));
    assert!(Tq::default().validate_document("foo = 1").is_ok());
}

#[test]
fn test_render_results_joins_with_newline() {
    let values = vec![
        Value::String("a".into()),
        Value::Table(HashMap::new()),
        Value::Boolean(true),
    ];
    assert_eq!(
        render_results(&values, &CodecConfig::default()).unwrap(),
        "\"a\"\ntrue"
    );
}

#[test]
fn test_toml_decodes_to_table() {
    assert_eq!(decode(DOC, Format::Toml).unwrap(), document());
}

#[test]
fn test_format_from_str() {
    assert_eq!("TOML".parse::<Format>().unwrap(), Format::Toml);
    assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
    assert!("yaml".parse::<Format>().is_err());
}

#[test]
fn test_value_type_names() {
    let doc = decode("s = 'x'\nf = 1.5\nd = 1979-05-27", Format::Toml).unwrap();
    let mut names: Vec<&str> = match &doc {
        Value::Table(t) => t.values().map(Value::type_name).collect(),
        other => panic!("Expected table, got {:?}", other),
    };
    names.sort();
    assert_eq!(names, vec!["datetime", "float", "string"]);
    assert_eq!(doc.type_name(), "table");
}
