//! Repeated round-trips settle on one encoding

use super::*;

fn assert_stable(value: &Value, registry: &Registry) {
    let first = encode(value).unwrap();
    let second = encode(&decode(&first, registry).unwrap()).unwrap();
    let third = encode(&decode(&second, registry).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_mixed_document_is_stable() {
    let fx = fixtures();
    let ada = Instance::new(&fx.greeter, Greeter { name: "Ada".into() }).unwrap();
    let value = Value::object([
        ("kind", Value::from(fx.point.clone())),
        (
            "origin",
            Value::from(Instance::new(&fx.point, Point { x: 0, y: 0 }).unwrap()),
        ),
        ("hook", fx.handler.get("extend").unwrap()),
        ("greet", ada.get("greet").unwrap()),
        ("shout", ada.get("shout").unwrap()),
        (
            "heat",
            Value::from(Instance::new(&fx.temperature, Temperature { celsius: -40.0 }).unwrap()),
        ),
        (
            "plain",
            Value::Array(vec![Value::Null, Value::Float(0.1), Value::from("s")]),
        ),
    ]);
    assert_stable(&value, &fx.registry);
}

#[test]
fn test_nested_instances_are_stable() {
    let fx = fixtures();
    let value = Value::from(
        Instance::new(
            &fx.segment,
            Segment {
                from: Point { x: -1, y: 2 },
                to: Point { x: 3, y: -4 },
            },
        )
        .unwrap(),
    );
    assert_stable(&value, &fx.registry);
}

#[test]
fn test_pretty_codec_is_stable() {
    let fx = fixtures();
    let codec = Codec::builder().pretty(true).build();
    let value = Value::object([
        ("a", Value::from(fx.greeter.clone())),
        ("b", Value::Array(vec![Value::Int(1), Value::Int(2)])),
    ]);

    let first = codec.encode(&value).unwrap();
    assert!(first.contains('\n'));
    let second = codec
        .encode(&codec.decode(&first, &fx.registry).unwrap())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_tag_key() {
    let fx = fixtures();
    let codec = Codec::builder().tag_key("@ref").build();
    let value = Value::Array(vec![
        Value::from(fx.point.clone()),
        Value::object([("$ref", Value::object([("cls", Value::from("Point"))]))]),
    ]);

    let text = codec.encode(&value).unwrap();
    assert_eq!(
        text,
        r#"[{"@ref":{"cls":"Point"}},{"$ref":{"cls":"Point"}}]"#
    );

    let decoded = codec.decode(&text, &fx.registry).unwrap();
    assert_eq!(decoded, value);
    // The default key is ordinary data for this codec
    assert!(decoded.as_array().unwrap()[1].as_object().is_some());
}

#[test]
fn test_marked_static_fn_is_stable() {
    let fx = fixtures();
    let describe = fx.handler.get("describe").unwrap();
    assert!(describe.tag().is_none());

    let marked = mark(Origin::Class(&fx.handler), Some("describe"), describe, false).unwrap();
    assert_eq!(
        encode(&marked).unwrap(),
        r#"{"$ref":{"cls":"H","key":"describe"}}"#
    );
    assert_stable(&marked, &fx.registry);
}

#[test]
fn test_plain_static_value_is_stable() {
    let fx = fixtures();
    let version = mark(Origin::Class(&fx.handler), Some("version"), Value::Int(3), false).unwrap();
    assert_stable(&Value::Array(vec![version, Value::Int(3)]), &fx.registry);
}
