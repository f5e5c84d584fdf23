use crate::errors::QueryError;
use bson::{Bson, Document};

use super::lookup::{IncludeDescriptor, format_lookup};
use super::types::Stage;

/// Reserved key marking a join descriptor.
pub const INCLUDE_KEY: &str = "include";

/// Collect the stages of every include descriptor in `tree`, in traversal order.
///
/// An `include` block expands to lookup, then match/project/skip/limit when present.
/// Includes nested inside an include block are not expanded.
pub fn expand(tree: &Bson) -> Result<Vec<Stage>, QueryError> {
    let mut out = Vec::new();
    walk(tree, &mut out)?;
    Ok(out)
}

fn walk(node: &Bson, out: &mut Vec<Stage>) -> Result<(), QueryError> {
    match node {
        Bson::Document(d) => {
            for (key, value) in d {
                if key == INCLUDE_KEY {
                    expand_include(value, out)?;
                } else {
                    walk(value, out)?;
                }
            }
        }
        Bson::Array(items) => {
            for item in items {
                walk(item, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn expand_include(value: &Bson, out: &mut Vec<Stage>) -> Result<(), QueryError> {
    match value {
        Bson::Document(d) => out.extend(expand_descriptor(d)?),
        Bson::Array(items) => {
            for item in items {
                match item {
                    Bson::Document(d) => out.extend(expand_descriptor(d)?),
                    other => {
                        return Err(QueryError::InvalidInclude(format!(
                            "include list entries must be objects, got {other}"
                        )));
                    }
                }
            }
        }
        // scalars under `include` carry no descriptor
        _ => {}
    }
    Ok(())
}

/// Stages for one descriptor, in the fixed order lookup, match, project, skip, limit.
pub fn expand_descriptor(d: &Document) -> Result<Vec<Stage>, QueryError> {
    let desc = IncludeDescriptor::from_document(d)?;
    let mut stages = vec![Stage::Lookup(format_lookup(&desc)?)];
    if let Some(filter) = desc.filter {
        stages.push(Stage::Match(filter));
    }
    if let Some(attrs) = desc.attributes {
        stages.push(Stage::Project(attrs));
    }
    if let Some(n) = desc.offset {
        stages.push(Stage::Skip(n));
    }
    if let Some(n) = desc.limit {
        stages.push(Stage::Limit(n));
    }
    Ok(stages)
}
