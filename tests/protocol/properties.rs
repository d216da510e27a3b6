//! Property tests over plain data

use super::*;
use indexmap::IndexMap;
use proptest::prelude::*;

fn plain_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1e12f64..1e12f64).prop_map(Value::Float),
        "\\PC{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6).prop_map(|pairs| {
                Value::Object(pairs.into_iter().collect::<IndexMap<_, _>>())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_plain_round_trip(value in plain_value()) {
        let text = encode(&value).unwrap();
        let decoded = decode(&text, &Registry::new()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_plain_encoding_matches_serde_json(value in plain_value()) {
        let ours = encode(&value).unwrap();
        let theirs = serde_json::to_string(&value.to_json().unwrap()).unwrap();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn prop_any_text_decodes_or_fails_cleanly(text in "\\PC{0,32}") {
        if let Err(err) = decode(&text, &Registry::new()) {
            prop_assert!(err.is_syntax() || err.is_unknown_type());
        }
    }
}
