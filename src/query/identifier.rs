use crate::errors::QueryError;
use bson::Bson;
use bson::oid::ObjectId;

/// Coerce one value found under the identifier field into a typed identifier.
/// Arrays are coerced element-wise; already-typed identifiers pass through unchanged.
pub fn coerce(value: Bson) -> Result<Bson, QueryError> {
    match value {
        Bson::Array(items) => items
            .into_iter()
            .map(coerce_one)
            .collect::<Result<Vec<_>, _>>()
            .map(Bson::Array),
        other => coerce_one(other),
    }
}

fn coerce_one(value: Bson) -> Result<Bson, QueryError> {
    match value {
        Bson::ObjectId(oid) => Ok(Bson::ObjectId(oid)),
        Bson::String(s) => ObjectId::parse_str(&s)
            .map(Bson::ObjectId)
            .map_err(|e| QueryError::InvalidIdentifier(format!("{s:?}: {e}"))),
        other => Err(QueryError::InvalidIdentifier(format!(
            "expected an identifier string, got {other}"
        ))),
    }
}
