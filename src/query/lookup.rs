use crate::errors::QueryError;
use crate::utils::num::bson_to_count;
use bson::{Bson, Document};

use super::types::LookupStage;

/// A join specification found under an `include` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncludeDescriptor {
    pub model: Option<String>,
    pub as_field: Option<String>,
    pub local_field: Option<Bson>,
    pub foreign_field: Option<Bson>,
    pub filter: Option<Document>,
    pub attributes: Option<Document>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl IncludeDescriptor {
    /// Read the reserved keys of an (already rewritten) include block. Other keys are ignored;
    /// `null` and empty strings count as absent.
    pub fn from_document(d: &Document) -> Result<Self, QueryError> {
        Ok(Self {
            model: opt_str(d, "model")?,
            as_field: opt_str(d, "as")?,
            local_field: present(d, "localField").cloned(),
            foreign_field: present(d, "foreignField").cloned(),
            filter: opt_doc(d, "where")?,
            attributes: opt_doc(d, "attributes")?,
            offset: present(d, "offset").map(|v| bson_to_count("offset", v)).transpose()?,
            limit: present(d, "limit").map(|v| bson_to_count("limit", v)).transpose()?,
        })
    }
}

/// Build the `$lookup` payload: `from` is the lower-cased model plus `s`; `as` defaults to
/// the model with a lower-cased first letter plus `s`.
pub fn format_lookup(desc: &IncludeDescriptor) -> Result<LookupStage, QueryError> {
    let (from, as_field) = match (&desc.model, &desc.as_field) {
        (Some(m), Some(a)) => (format!("{}s", m.to_lowercase()), a.clone()),
        (Some(m), None) => (format!("{}s", m.to_lowercase()), format!("{}s", lower_first(m))),
        (None, Some(a)) => (a.clone(), a.clone()),
        (None, None) => {
            return Err(QueryError::InvalidInclude("include requires `model` or `as`".into()));
        }
    };
    Ok(LookupStage {
        from,
        local_field: desc.local_field.clone(),
        foreign_field: desc.foreign_field.clone(),
        as_field,
    })
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn present<'a>(d: &'a Document, key: &str) -> Option<&'a Bson> {
    d.get(key).filter(|v| !matches!(v, Bson::Null))
}

fn opt_str(d: &Document, key: &str) -> Result<Option<String>, QueryError> {
    match present(d, key) {
        None => Ok(None),
        Some(Bson::String(s)) if s.is_empty() => Ok(None),
        Some(Bson::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(QueryError::InvalidInclude(format!("`{key}` must be a string, got {other}"))),
    }
}

fn opt_doc(d: &Document, key: &str) -> Result<Option<Document>, QueryError> {
    match present(d, key) {
        None => Ok(None),
        Some(Bson::Document(doc)) => Ok(Some(doc.clone())),
        Some(other) => Err(QueryError::InvalidInclude(format!("`{key}` must be an object, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn lower_first_only_touches_first_char() {
        assert_eq!(lower_first("OrderItem"), "orderItem");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn as_without_model_names_the_collection() {
        let d = IncludeDescriptor::from_document(&doc! { "as": "audit_log" }).unwrap();
        let l = format_lookup(&d).unwrap();
        assert_eq!(l.from, "audit_log");
        assert_eq!(l.as_field, "audit_log");
    }
}
