//! Unit tests for leaf encoding and decoding.

use rstest::rstest;
use serde_json::json;

use super::{CodecError, TypeTag, decode, decode_typed, encode};
use crate::value::ConfigValue;

fn value(input: serde_json::Value) -> ConfigValue {
    ConfigValue::from(input)
}

#[rstest]
#[case(json!(null), "{}")]
#[case(json!(true), "true")]
#[case(json!(false), "false")]
#[case(json!(42), "42")]
#[case(json!(-7), "-7")]
#[case(json!(2.75), "2.75")]
#[case(json!("hello"), r#""hello""#)]
#[case(json!("hello world"), r#""hello world""#)]
#[case(json!(""), r#""""#)]
#[case(json!([1, 2, 3]), "[list 1 2 3]")]
#[case(json!(["a", "b c"]), r#"[list "a" "b c"]"#)]
#[case(json!([]), "[list]")]
#[case(json!([[1, 2], "x"]), r#"[list [list 1 2] "x"]"#)]
fn encodes_leaves(#[case] input: serde_json::Value, #[case] expected: &str) {
    assert_eq!(encode(&value(input)).expect("leaf encodes"), expected);
}

#[rstest]
fn escapes_tcl_substitution_characters() {
    let text = encode(&ConfigValue::from("say \"hi\" to $user [now]\\\n")).expect("leaf encodes");
    assert_eq!(text, r#""say \"hi\" to \$user \[now\]\\\n""#);
}

#[rstest]
fn rejects_top_level_mappings() {
    let err = encode(&value(json!({"a": 1}))).expect_err("mappings are not leaves");
    assert_eq!(err, CodecError::UnsupportedLeaf { kind: "mapping" });
}

#[rstest]
#[case(json!([1, {"a": 1}]), r#"[list 1 [dict create "a" 1]]"#)]
#[case(json!([{"name": "a b", "tags": ["x"]}]), r#"[list [dict create "name" "a b" "tags" [list "x"]]]"#)]
#[case(json!([{"outer": {"inner": null}}]), r#"[list [dict create "outer" [dict create "inner" {}]]]"#)]
#[case(json!([{}]), "[list [dict create]]")]
fn encodes_mappings_inside_lists_as_dicts(
    #[case] input: serde_json::Value,
    #[case] expected: &str,
) {
    let original = value(input);
    let text = encode(&original).expect("list encodes");
    assert_eq!(text, expected);
    assert_eq!(decode(&text).expect("list decodes"), original);
}

#[rstest]
fn dict_keys_keep_their_order() {
    let decoded = decode(r#"[list [dict create "z" 1 "a" 2]]"#).expect("list decodes");
    let ConfigValue::Sequence(items) = decoded else {
        panic!("expected a sequence, got {decoded:?}");
    };
    let keys: Vec<&str> = items
        .first()
        .and_then(ConfigValue::as_mapping)
        .map(|entries| entries.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(keys, ["z", "a"]);
}

#[rstest]
#[case(json!(null))]
#[case(json!(true))]
#[case(json!(false))]
#[case(json!(0))]
#[case(json!(-12))]
#[case(json!(18_446_744_073_709_551_615_u64))]
#[case(json!(2.5))]
#[case(json!(1.0))]
#[case(json!(-0.001))]
#[case(json!("plain"))]
#[case(json!("true"))]
#[case(json!("with space"))]
#[case(json!(""))]
#[case(json!("{braces} and \"quotes\""))]
#[case(json!("tab\tnew\nline"))]
#[case(json!("semi;colon # hash"))]
#[case(json!(["a b", 1, false, null]))]
#[case(json!([["nested", ["deep"]], []]))]
fn leaves_round_trip(#[case] input: serde_json::Value) {
    let original = value(input);
    let text = encode(&original).expect("leaf encodes");
    assert_eq!(decode(&text).expect("leaf decodes"), original, "via {text}");
}

/// Strings that look like numbers come back as numbers. This is known,
/// accepted behaviour; type hints restore the string.
#[rstest]
#[case("8080", json!(8080))]
#[case("-3", json!(-3))]
#[case("0.5", json!(0.5))]
fn numeric_strings_decode_as_numbers(#[case] input: &str, #[case] expected: serde_json::Value) {
    let text = encode(&ConfigValue::from(input)).expect("leaf encodes");
    assert_eq!(text, format!("\"{input}\""));
    assert_eq!(decode(&text).expect("leaf decodes"), value(expected));
    assert_eq!(
        decode_typed(&text, TypeTag::String).expect("tagged leaf decodes"),
        ConfigValue::from(input)
    );
}

#[rstest]
#[case("hello", json!("hello"))]
#[case("{hello world}", json!("hello world"))]
#[case("1e3", json!(1000.0))]
#[case("inf", json!("inf"))]
#[case("nan", json!("nan"))]
#[case("True", json!("True"))]
#[case("", json!(null))]
#[case("  42  ", json!(42))]
fn decodes_bare_and_braced_words(#[case] input: &str, #[case] expected: serde_json::Value) {
    assert_eq!(decode(input).expect("word decodes"), value(expected));
}

#[rstest]
#[case(r#""unterminated"#)]
#[case("{unterminated")]
#[case("[list 1 2")]
#[case("two words")]
#[case(r#""glued"text"#)]
#[case("[dict create a 1]")]
#[case("[list [dict create a]]")]
#[case("[list [dict create [list k] 1]]")]
#[case("[array get a]")]
fn rejects_malformed_text(#[case] input: &str) {
    let err = decode(input).expect_err("text is malformed");
    assert!(
        matches!(err, CodecError::Decode { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case("1", TypeTag::Bool, json!(true))]
#[case("0", TypeTag::Bool, json!(false))]
#[case("TRUE", TypeTag::Bool, json!(true))]
#[case("{}", TypeTag::String, json!(""))]
#[case("{}", TypeTag::None, json!(null))]
#[case(r#""""#, TypeTag::None, json!(null))]
#[case("{1 2 {a b}}", TypeTag::List, json!([1, 2, "a b"]))]
#[case("[list 1 2]", TypeTag::List, json!([1, 2]))]
#[case("", TypeTag::List, json!([]))]
#[case("3.5", TypeTag::Number, json!(3.5))]
fn decodes_tagged_values(
    #[case] input: &str,
    #[case] tag: TypeTag,
    #[case] expected: serde_json::Value,
) {
    assert_eq!(decode_typed(input, tag).expect("tagged decode"), value(expected));
}

/// List hints describe the list as a whole; numeric-looking string elements
/// are still sniffed and come back as numbers.
#[rstest]
fn list_hints_do_not_protect_numeric_string_elements() {
    let original = value(json!(["8080", "x"]));
    let text = encode(&original).expect("list encodes");
    assert_eq!(
        decode_typed(&text, TypeTag::List).expect("tagged list decodes"),
        value(json!([8080, "x"]))
    );
}

#[rstest]
#[case("[dict create a 1]", TypeTag::List)]
#[case("abc", TypeTag::Number)]
#[case("maybe", TypeTag::Bool)]
fn tagged_decode_rejects_mismatches(#[case] input: &str, #[case] tag: TypeTag) {
    assert!(matches!(
        decode_typed(input, tag),
        Err(CodecError::Decode { .. })
    ));
}

#[rstest]
fn type_tags_round_trip_through_names() {
    for tag in [
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Bool,
        TypeTag::None,
        TypeTag::List,
    ] {
        assert_eq!(TypeTag::from_name(tag.as_str()), Some(tag));
    }
    assert_eq!(TypeTag::from_name("dict"), None);
}
