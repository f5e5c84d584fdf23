use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use querylite::query::{Operator, rewrite, rewrite_document};
use querylite::{ParserConfig, QueryError};

const HEX_A: &str = "507f1f77bcf86cd799439011";
const HEX_B: &str = "64b7f0c2a1e4d3f2b1c0a9e8";

fn oid(hex: &str) -> Bson {
    Bson::ObjectId(ObjectId::parse_str(hex).unwrap())
}

fn keys(d: &Document) -> Vec<&str> {
    d.keys().map(String::as_str).collect()
}

#[test]
fn every_operator_is_renamed_and_value_kept() {
    let cfg = ParserConfig::default();
    for op in Operator::ALL {
        let mut inner = Document::new();
        inner.insert(op.dsl_name(), "v");
        let out = rewrite_document(doc! { "field": inner }, &cfg).unwrap();
        let got = out.get_document("field").unwrap();
        assert_eq!(keys(got), [op.symbol()], "operator {}", op.dsl_name());
        assert_eq!(got.get_str(op.symbol()).unwrap(), "v");
    }
}

#[test]
fn regexp_and_not_in_use_store_names() {
    assert_eq!(Operator::from_dsl("regexp").unwrap().symbol(), "$regex");
    assert_eq!(Operator::from_dsl("notIn").unwrap().symbol(), "$nin");
}

#[test]
fn operator_lookup_is_exact() {
    assert_eq!(Operator::from_dsl("GT"), None);
    assert_eq!(Operator::from_dsl("notin"), None);
    assert_eq!(Operator::from_dsl("g"), None);
    assert_eq!(Operator::from_dsl("$gt"), None);
    assert_eq!(Operator::from_dsl("where"), None);
}

#[test]
fn unknown_keys_are_untouched() {
    let input = doc! { "name": "bob", "GT": 1, "$where": "x", "nested": { "foo": { "bar": 2 } } };
    let out = rewrite_document(input.clone(), &ParserConfig::default()).unwrap();
    assert_eq!(out, input);
    assert_eq!(keys(&out), keys(&input));
}

#[test]
fn logical_operators_recurse_through_arrays() {
    let input = doc! { "or": [ { "age": { "gt": 18 } }, { "name": { "regexp": "^a" } } ] };
    let out = rewrite_document(input, &ParserConfig::default()).unwrap();
    assert_eq!(
        out,
        doc! { "$or": [ { "age": { "$gt": 18 } }, { "name": { "$regex": "^a" } } ] }
    );
}

#[test]
fn renamed_keys_keep_their_position() {
    let input = doc! { "age": { "gt": 1, "foo": 2, "lt": 9 } };
    let out = rewrite_document(input, &ParserConfig::default()).unwrap();
    assert_eq!(keys(out.get_document("age").unwrap()), ["$gt", "foo", "$lt"]);
}

#[test]
fn identifier_scalar_operand_is_coerced() {
    let out = rewrite_document(doc! { "_id": { "eq": HEX_A } }, &ParserConfig::default()).unwrap();
    assert_eq!(out, doc! { "_id": { "$eq": oid(HEX_A) } });
}

#[test]
fn identifier_list_operand_is_coerced_element_wise() {
    let out = rewrite_document(doc! { "_id": { "in": [HEX_A, HEX_B] } }, &ParserConfig::default())
        .unwrap();
    assert_eq!(out, doc! { "_id": { "$in": [oid(HEX_A), oid(HEX_B)] } });
}

#[test]
fn bare_identifier_string_is_coerced() {
    let out = rewrite_document(doc! { "_id": HEX_A }, &ParserConfig::default()).unwrap();
    assert_eq!(out, doc! { "_id": oid(HEX_A) });
}

#[test]
fn identifier_inside_logical_branch_is_coerced() {
    let input = doc! { "or": [ { "_id": { "eq": HEX_A } }, { "owner": "me" } ] };
    let out = rewrite_document(input, &ParserConfig::default()).unwrap();
    assert_eq!(out, doc! { "$or": [ { "_id": { "$eq": oid(HEX_A) } }, { "owner": "me" } ] });
}

#[test]
fn invalid_identifier_is_rejected() {
    let err = rewrite_document(doc! { "_id": { "in": [HEX_A, "not-an-id"] } }, &ParserConfig::default())
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidIdentifier(_)), "{err}");
    assert!(err.to_string().contains("not-an-id"));

    let err = rewrite_document(doc! { "_id": { "eq": 42 } }, &ParserConfig::default()).unwrap_err();
    assert!(matches!(err, QueryError::InvalidIdentifier(_)));
}

#[test]
fn non_string_identifier_scalars_are_kept() {
    let input = doc! { "_id": Bson::Null, "n": { "_id": -1 }, "flag": { "_id": true } };
    let out = rewrite_document(input.clone(), &ParserConfig::default()).unwrap();
    assert_eq!(out, input);
}

#[test]
fn typed_identifiers_are_opaque_leaves() {
    let already = doc! { "_id": { "$in": [oid(HEX_A)] }, "ref": oid(HEX_B) };
    let out = rewrite_document(already.clone(), &ParserConfig::default()).unwrap();
    assert_eq!(out, already);
}

#[test]
fn rewriting_twice_is_a_no_op() {
    let cfg = ParserConfig::default();
    let once = rewrite_document(
        doc! { "and": [ { "_id": { "ne": HEX_A } }, { "n": { "not": { "gte": 3 } } } ] },
        &cfg,
    )
    .unwrap();
    let twice = rewrite_document(once.clone(), &cfg).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn identifier_field_is_configurable() {
    let cfg = ParserConfig { id_field: "ownerId".into(), ..ParserConfig::default() };
    let out = rewrite_document(doc! { "ownerId": { "eq": HEX_A }, "_id": "plain" }, &cfg).unwrap();
    assert_eq!(out, doc! { "ownerId": { "$eq": oid(HEX_A) }, "_id": "plain" });
}

#[test]
fn nesting_beyond_max_depth_fails() {
    let cfg = ParserConfig { max_depth: 3, ..ParserConfig::default() };
    assert!(rewrite_document(doc! { "a": { "b": { "c": 1 } } }, &cfg).is_ok());
    let err = rewrite_document(doc! { "a": { "b": { "c": { "d": 1 } } } }, &cfg).unwrap_err();
    assert!(matches!(err, QueryError::TooDeep(3)));
    let err = rewrite(Bson::Array(vec![Bson::Array(vec![Bson::Array(vec![Bson::Array(vec![])])])]), &cfg)
        .unwrap_err();
    assert!(matches!(err, QueryError::TooDeep(3)));
}

#[test]
fn scalars_pass_through() {
    let cfg = ParserConfig::default();
    assert_eq!(rewrite(Bson::Int32(5), &cfg).unwrap(), Bson::Int32(5));
    assert_eq!(rewrite(Bson::String("gt".into()), &cfg).unwrap(), Bson::String("gt".into()));
}
