//! Marked references: static members, invocations and instance members

use super::*;
use jsonref::Ref;

fn ada(fx: &Fixtures) -> Instance {
    Instance::new(&fx.greeter, Greeter { name: "Ada".into() }).unwrap()
}

// === Static members ===

#[test]
fn test_referrable_static_wire_form() {
    let fx = fixtures();
    let extend = fx.handler.get("extend").unwrap();
    assert_eq!(
        encode(&extend).unwrap(),
        r#"{"$ref":{"cls":"H","key":"extend"}}"#
    );
}

#[test]
fn test_referrable_static_round_trip_is_same_member() {
    let fx = fixtures();
    let extend = fx.handler.get("extend").unwrap();
    let decoded = round_trip(&extend, &fx.registry);

    assert_eq!(decoded, extend);
    assert_eq!(decoded.tag(), extend.tag());
    assert_eq!(
        decoded.call(&[Value::from("x")]).unwrap(),
        Value::object([("route", Value::from("/h/x"))])
    );
}

#[test]
fn test_static_member_inside_data_round_trips() {
    let fx = fixtures();
    let value = Value::object([
        ("on_load", fx.handler.get("extend").unwrap()),
        ("retries", Value::Int(3)),
    ]);
    assert_eq!(round_trip(&value, &fx.registry), value);
}

#[test]
fn test_invocation_tag_decodes_to_result() {
    let fx = fixtures();
    let text = r#"{"$ref":{"cls":"H","key":"extend","args":["x"]}}"#;
    let decoded = decode(text, &fx.registry).unwrap();
    assert_eq!(decoded, Value::object([("route", Value::from("/h/x"))]));
}

#[test]
fn test_invocation_tag_encodes_verbatim() {
    let fx = fixtures();
    let value = Value::from(Ref {
        payload: Value::Null,
        tag: Tag::member("H", "extend").with_args(vec![Value::from("admin")]),
    });
    let text = encode(&value).unwrap();
    assert_eq!(text, r#"{"$ref":{"cls":"H","key":"extend","args":["admin"]}}"#);

    let decoded = decode(&text, &fx.registry).unwrap();
    assert_eq!(decoded, Value::object([("route", Value::from("/h/admin"))]));
}

#[test]
fn test_invocation_args_may_hold_references() {
    let fx = fixtures();
    let text = r#"{"$ref":{"cls":"H","key":"extend","args":[
        {"$ref":{"cls":"Greeter","key":"initial","ths":{"name":"Zed"}}}
    ]}}"#;
    let decoded = decode(text, &fx.registry).unwrap();
    assert_eq!(decoded, Value::object([("route", Value::from("/h/Z"))]));
}

#[test]
fn test_mark_class_member() {
    let fx = fixtures();
    let version = mark(Origin::Class(&fx.handler), Some("version"), Value::Int(3), false).unwrap();
    assert_eq!(
        encode(&version).unwrap(),
        r#"{"$ref":{"cls":"H","key":"version"}}"#
    );
    assert_eq!(round_trip(&version, &fx.registry), Value::Int(3));
}

#[test]
fn test_marked_static_twice_decodes_to_equal_members() {
    let fx = fixtures();
    let describe = fx.handler.get("describe").unwrap();
    let first = mark(Origin::Class(&fx.handler), Some("describe"), describe.clone(), false).unwrap();
    let second = mark(Origin::Class(&fx.handler), Some("describe"), describe.clone(), false).unwrap();

    let d1 = round_trip(&first, &fx.registry);
    let d2 = round_trip(&second, &fx.registry);
    assert_eq!(d1, d2);
    assert_eq!(d1, describe);
    assert_eq!(d1.call(&[]).unwrap(), Value::from("route handler"));
}

#[test]
fn test_mark_without_member_refers_to_type() {
    let fx = fixtures();
    let marked = mark(Origin::Class(&fx.point), None, Value::from("anything"), false).unwrap();
    let decoded = round_trip(&marked, &fx.registry);
    assert!(Arc::ptr_eq(decoded.as_class().unwrap(), &fx.point));
}

// === Instance members ===

#[test]
fn test_bound_method_wire_form() {
    let fx = fixtures();
    let greet = ada(&fx).get("greet").unwrap();
    assert_eq!(
        encode(&greet).unwrap(),
        r#"{"$ref":{"cls":"Greeter","key":"greet","ths":{"name":"Ada"}}}"#
    );
}

#[test]
fn test_bound_method_round_trip_behaves_the_same() {
    let fx = fixtures();
    let greet = ada(&fx).get("greet").unwrap();
    let decoded = round_trip(&greet, &fx.registry);

    let f = decoded.as_function().expect("function");
    assert!(f.is_bound());
    assert_eq!(decoded.tag(), greet.tag());
    assert_eq!(
        decoded.call(&[Value::from("Bo")]).unwrap(),
        greet.call(&[Value::from("Bo")]).unwrap()
    );
}

#[test]
fn test_bound_method_decodes_to_fresh_binding() {
    let fx = fixtures();
    let greet = ada(&fx).get("greet").unwrap();
    let text = encode(&greet).unwrap();

    let a = decode(&text, &fx.registry).unwrap();
    let b = decode(&text, &fx.registry).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, greet);
}

#[test]
fn test_bound_method_captures_payload_at_read_time() {
    let fx = fixtures();
    let first = ada(&fx).get("greet").unwrap();
    let second = Instance::new(&fx.greeter, Greeter { name: "Grace".into() })
        .unwrap()
        .get("greet")
        .unwrap();

    assert_ne!(encode(&first).unwrap(), encode(&second).unwrap());
    let decoded = round_trip(&second, &fx.registry);
    assert_eq!(
        decoded.call(&[]).unwrap(),
        Value::from("hello world, from Grace")
    );
}

#[test]
fn test_unbound_method_round_trip() {
    let fx = fixtures();
    let ada = ada(&fx);
    let shout = ada.get("shout").unwrap();

    assert!(!shout.as_function().unwrap().is_bound());
    assert_eq!(
        encode(&shout).unwrap(),
        r#"{"$ref":{"cls":"Greeter","key":"shout","ths":{"name":"Ada"}}}"#
    );
    assert_eq!(
        shout.call(&[Value::from(ada.clone())]).unwrap(),
        Value::from("ADA")
    );

    // Decoding always hands out the member bound to the rebuilt instance
    let decoded = round_trip(&shout, &fx.registry);
    assert!(decoded.as_function().unwrap().is_bound());
    assert_eq!(decoded.call(&[]).unwrap(), Value::from("ADA"));
}

#[test]
fn test_referrable_property_round_trip() {
    let fx = fixtures();
    let initial = ada(&fx).get("initial").unwrap();
    assert_eq!(
        encode(&initial).unwrap(),
        r#"{"$ref":{"cls":"Greeter","key":"initial","ths":{"name":"Ada"}}}"#
    );

    let decoded = round_trip(&initial, &fx.registry);
    assert_eq!(decoded, Value::from("A"));
    assert!(decoded.tag().is_none());
}

#[test]
fn test_non_referrable_member_encodes_by_value() {
    let fx = fixtures();
    let p = Instance::new(&fx.point, Point { x: 2, y: 3 }).unwrap();
    let sum = p.get("sum").unwrap();
    assert_eq!(encode(&sum).unwrap(), "5");
}

#[test]
fn test_mark_instance_without_member_refers_to_instance() {
    let fx = fixtures();
    let ada = ada(&fx);
    let marked = mark(Origin::Instance(&ada), None, Value::Null, false).unwrap();
    assert_eq!(
        encode(&marked).unwrap(),
        r#"{"$ref":{"cls":"Greeter","ths":{"name":"Ada"}}}"#
    );

    let decoded = round_trip(&marked, &fx.registry);
    assert_eq!(decoded.as_instance(), Some(&ada));
}

#[test]
fn test_instance_member_through_custom_projection() {
    let fx = fixtures();
    let temperature = Class::builder::<Temperature>("Thermo")
        .projection(|t: &Temperature| Value::object([("c10", Value::Int((t.celsius * 10.0) as i64))]))
        .factory(|payload: &Value| {
            let c10 = payload
                .as_object()
                .and_then(|m| m.get("c10"))
                .and_then(Value::as_int)
                .ok_or_else(|| Error::Construct {
                    cls: "Thermo".into(),
                    reason: "missing c10".into(),
                })?;
            Ok(Temperature {
                celsius: c10 as f64 / 10.0,
            })
        })
        .referrable_method("read", Binding::Bound, |t: &Temperature, _: &[Value]| {
            Ok(Value::Float(t.celsius))
        })
        .build();
    let registry = Registry::new().with(temperature.clone());

    let read = Instance::new(&temperature, Temperature { celsius: 21.5 })
        .unwrap()
        .get("read")
        .unwrap();
    let text = encode(&read).unwrap();
    assert_eq!(text, r#"{"$ref":{"cls":"Thermo","key":"read","ths":{"c10":215}}}"#);

    let decoded = decode(&text, &registry).unwrap();
    assert_eq!(decoded.call(&[]).unwrap(), Value::Float(21.5));
}
