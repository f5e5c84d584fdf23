use bson::{Bson, Document};
use proptest::prelude::*;
use querylite::ParserConfig;
use querylite::query::{Operator, rewrite};

fn any_operator() -> impl Strategy<Value = Operator> + Clone {
    prop::sample::select(Operator::ALL.to_vec())
}

fn plain_key() -> impl Strategy<Value = String> + Clone {
    "[a-zA-Z]{1,8}".prop_filter("not an operator", |k| Operator::from_dsl(k).is_none())
}

fn mixed_key() -> impl Strategy<Value = String> + Clone {
    prop_oneof![any_operator().prop_map(|op| op.dsl_name().to_string()), plain_key()]
}

fn leaf() -> impl Strategy<Value = Bson> {
    prop_oneof![
        any::<i32>().prop_map(Bson::Int32),
        any::<i64>().prop_map(Bson::Int64),
        any::<bool>().prop_map(Bson::Boolean),
        "[a-z ]{0,8}".prop_map(Bson::String),
        Just(Bson::Null),
    ]
}

fn tree(key: impl Strategy<Value = String> + Clone + 'static) -> impl Strategy<Value = Bson> {
    leaf().prop_recursive(4, 48, 4, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Bson::Array),
            prop::collection::vec((key.clone(), inner), 0..4).prop_map(|kvs| {
                let mut d = Document::new();
                for (k, v) in kvs {
                    d.insert(k, v);
                }
                Bson::Document(d)
            }),
        ]
    })
}

fn key_order(b: &Bson) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    collect_keys(b, &mut out);
    out
}

fn collect_keys(b: &Bson, out: &mut Vec<Vec<String>>) {
    match b {
        Bson::Document(d) => {
            out.push(d.keys().cloned().collect());
            for v in d.values() {
                collect_keys(v, out);
            }
        }
        Bson::Array(items) => items.iter().for_each(|v| collect_keys(v, out)),
        _ => {}
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]

    #[test]
    fn prop_leaf_operator_maps_to_symbol(op in any_operator(), field in plain_key(), v in leaf()) {
        let mut pred = Document::new();
        pred.insert(op.dsl_name(), v.clone());
        let mut input = Document::new();
        input.insert(field.clone(), pred);

        let out = rewrite(Bson::Document(input), &ParserConfig::default()).unwrap();
        let out = out.as_document().unwrap().get_document(&field).unwrap();
        prop_assert_eq!(out.len(), 1);
        prop_assert_eq!(out.get(op.symbol()), Some(&v));
    }

    #[test]
    fn prop_plain_keys_are_never_touched(t in tree(plain_key())) {
        let out = rewrite(t.clone(), &ParserConfig::default()).unwrap();
        prop_assert_eq!(key_order(&out), key_order(&t));
        prop_assert_eq!(out, t);
    }

    #[test]
    fn prop_rewrite_is_idempotent(t in tree(mixed_key())) {
        let cfg = ParserConfig::default();
        let once = rewrite(t, &cfg).unwrap();
        let twice = rewrite(once.clone(), &cfg).unwrap();
        prop_assert_eq!(key_order(&twice), key_order(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_no_dsl_key_survives(t in tree(mixed_key())) {
        let out = rewrite(t, &ParserConfig::default()).unwrap();
        for keys in key_order(&out) {
            for k in keys {
                prop_assert!(Operator::from_dsl(&k).is_none(), "leftover operator key {}", k);
            }
        }
    }
}
