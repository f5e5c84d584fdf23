use crate::config::ParserConfig;
use crate::errors::QueryError;
use bson::{Bson, Document};

use super::identifier;
use super::operators::Operator;

/// Rewrite a parsed filter expression: DSL operator keys become store symbols and values
/// under the identifier field become typed identifiers. Returns a new tree; key order is kept.
///
/// Typed identifiers are leaves: an already-rewritten tree comes back unchanged.
pub fn rewrite(tree: Bson, cfg: &ParserConfig) -> Result<Bson, QueryError> {
    Rewriter { id_field: &cfg.id_field, max_depth: cfg.max_depth }.value(tree, 1)
}

/// Document-level convenience over [`rewrite`].
pub fn rewrite_document(doc: Document, cfg: &ParserConfig) -> Result<Document, QueryError> {
    Rewriter { id_field: &cfg.id_field, max_depth: cfg.max_depth }.document(doc, 1)
}

struct Rewriter<'a> {
    id_field: &'a str,
    max_depth: usize,
}

impl Rewriter<'_> {
    fn value(&self, value: Bson, depth: usize) -> Result<Bson, QueryError> {
        match value {
            Bson::Document(d) => self.document(d, depth).map(Bson::Document),
            Bson::Array(items) => {
                self.check_depth(depth)?;
                items
                    .into_iter()
                    .map(|v| self.value(v, depth + 1))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Bson::Array)
            }
            leaf => Ok(leaf),
        }
    }

    fn document(&self, doc: Document, depth: usize) -> Result<Document, QueryError> {
        self.check_depth(depth)?;
        let mut out = Document::new();
        for (key, value) in doc {
            let value = if key == self.id_field {
                self.identifier_field(value)?
            } else {
                self.value(value, depth + 1)?
            };
            out.insert(rename(key), value);
        }
        Ok(out)
    }

    /// Values under the identifier field: each operand of an operator sub-document is
    /// coerced and a bare string is coerced directly. Other scalars (sort directions,
    /// projection flags, `null`) are kept as they are.
    fn identifier_field(&self, value: Bson) -> Result<Bson, QueryError> {
        match value {
            Bson::Document(d) => {
                let mut out = Document::new();
                for (key, operand) in d {
                    out.insert(rename(key), identifier::coerce(operand)?);
                }
                Ok(Bson::Document(out))
            }
            s @ Bson::String(_) => identifier::coerce(s),
            other => Ok(other),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), QueryError> {
        if depth > self.max_depth {
            return Err(QueryError::TooDeep(self.max_depth));
        }
        Ok(())
    }
}

fn rename(key: String) -> String {
    match Operator::from_dsl(&key) {
        Some(op) => {
            log::trace!("operator `{key}` -> `{}`", op.symbol());
            op.symbol().to_string()
        }
        None => key,
    }
}
