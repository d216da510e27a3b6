//! Plain data passes through untouched

use super::*;
use serde_json::json;

#[test]
fn test_round_trip_scalars() {
    for value in [
        Value::Null,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(0),
        Value::Int(i64::MAX),
        Value::Int(i64::MIN),
        Value::Float(3.25),
        Value::Float(-1e-10),
        Value::from(""),
        Value::from("日本語 \"quoted\"\n"),
    ] {
        assert_eq!(round_trip(&value, &Registry::new()), value);
    }
}

#[test]
fn test_round_trip_nested() {
    let value = Value::object([
        ("name", Value::from("widget")),
        (
            "tags",
            Value::Array(vec![Value::from("a"), Value::Null, Value::Int(2)]),
        ),
        (
            "dims",
            Value::object([("w", Value::Float(1.5)), ("h", Value::Float(2.0))]),
        ),
    ]);
    assert_eq!(round_trip(&value, &Registry::new()), value);
}

#[test]
fn test_plain_output_is_ordinary_json() {
    let value = Value::object([
        ("b", Value::Int(1)),
        ("a", Value::Array(vec![Value::Bool(true)])),
    ]);
    let text = encode(&value).unwrap();
    assert_eq!(text, r#"{"b":1,"a":[true]}"#);

    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({"b": 1, "a": [true]}));
}

#[test]
fn test_null_is_never_tagged() {
    let text = encode(&Value::object([("gone", Value::Null)])).unwrap();
    assert_eq!(text, r#"{"gone":null}"#);
}

#[test]
fn test_int_and_float_stay_distinct() {
    let value = Value::Array(vec![Value::Int(1), Value::Float(1.0)]);
    let decoded = round_trip(&value, &Registry::new());
    let items = decoded.as_array().unwrap();
    assert!(matches!(items[0], Value::Int(1)));
    assert!(matches!(items[1], Value::Float(f) if f == 1.0));
}

#[test]
fn test_decode_foreign_json() {
    let text = r#"  { "users": [ {"id": 1, "admin": false} ], "next": null }  "#;
    let value = decode(text, &Registry::new()).unwrap();
    assert_eq!(
        value,
        Value::object([
            (
                "users",
                Value::Array(vec![Value::object([
                    ("id", Value::Int(1)),
                    ("admin", Value::Bool(false)),
                ])]),
            ),
            ("next", Value::Null),
        ])
    );
}

#[test]
fn test_reserved_key_with_non_tag_value_is_data() {
    let value = Value::object([("$ref", Value::from("#/definitions/user"))]);
    assert_eq!(round_trip(&value, &Registry::new()), value);
}

#[test]
fn test_plain_data_needs_no_registry_entries() {
    let value = Value::object([("Point", Value::from("just a string"))]);
    assert_eq!(round_trip(&value, &Registry::new()), value);
}
