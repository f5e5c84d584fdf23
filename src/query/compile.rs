use crate::config::ParserConfig;
use crate::errors::QueryError;
use crate::utils::json::{json_object_to_document, json_to_bson, parse_param, parse_param_object};
use crate::utils::num::parse_count;
use bson::{Bson, Document};

use super::include::{INCLUDE_KEY, expand};
use super::params::QueryParams;
use super::rewrite::{rewrite, rewrite_document};
use super::types::{Pipeline, Stage};

/// Top-level parameters the compiler understands. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Include,
    Query,
    Attributes,
    Limit,
    Offset,
    Sort,
}

impl Param {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "include" => Self::Include,
            "query" => Self::Query,
            "attributes" => Self::Attributes,
            "limit" => Self::Limit,
            "offset" => Self::Offset,
            "sort" => Self::Sort,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Query => "query",
            Self::Attributes => "attributes",
            Self::Limit => "limit",
            Self::Offset => "offset",
            Self::Sort => "sort",
        }
    }

    /// Stages contributed by one parameter value.
    pub fn stages(self, raw: &str, cfg: &ParserConfig) -> Result<Vec<Stage>, QueryError> {
        match self {
            Self::Include => {
                let tree = rewrite(json_to_bson(parse_param(raw)?), cfg)?;
                let mut wrapper = Document::new();
                wrapper.insert(INCLUDE_KEY, tree);
                expand(&Bson::Document(wrapper))
            }
            Self::Query => Ok(vec![Stage::Match(object_param(self, raw, cfg)?)]),
            Self::Attributes => {
                let attrs = parse_param_object(self.name(), raw)?;
                if attrs.is_empty() {
                    return Ok(Vec::new());
                }
                let doc = rewrite_document(json_object_to_document(attrs), cfg)?;
                Ok(vec![Stage::Project(doc)])
            }
            Self::Limit => Ok(vec![Stage::Limit(parse_count(self.name(), raw)?)]),
            Self::Offset => Ok(vec![Stage::Skip(parse_count(self.name(), raw)?)]),
            Self::Sort => Ok(vec![Stage::Sort(object_param(self, raw, cfg)?)]),
        }
    }
}

fn object_param(param: Param, raw: &str, cfg: &ParserConfig) -> Result<Document, QueryError> {
    let map = parse_param_object(param.name(), raw)?;
    rewrite_document(json_object_to_document(map), cfg)
}

/// Compile request parameters into a pipeline. Stages follow the order parameters appear
/// in the request; a request contributing no stages compiles to `[{ $match: {} }]`.
/// The first error aborts the whole translation.
pub fn compile(params: &QueryParams, cfg: &ParserConfig) -> Result<Pipeline, QueryError> {
    log::debug!("request query: {params:?}");
    let mut stages = Vec::new();
    for (name, raw) in params.iter() {
        let Some(param) = Param::from_name(name) else {
            log::trace!("ignoring unrecognized parameter `{name}`");
            continue;
        };
        stages.extend(param.stages(raw, cfg)?);
    }

    if let Some(max) = cfg.max_limit {
        for stage in &mut stages {
            if let Stage::Limit(n) = stage {
                if *n > max {
                    log::warn!("$limit {n} clamped to {max}");
                    *n = max;
                }
            }
        }
    }

    if stages.is_empty() {
        stages.push(Stage::Match(Document::new()));
    }
    let pipeline = Pipeline { stages };
    log::debug!("compiled pipeline: {:?}", pipeline.to_documents());
    Ok(pipeline)
}

/// Compile a raw query string such as `query=...&limit=10`.
pub fn compile_query_string(qs: &str, cfg: &ParserConfig) -> Result<Pipeline, QueryError> {
    compile(&QueryParams::from_query_string(qs)?, cfg)
}
