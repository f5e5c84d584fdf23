use crate::config::ParserConfig;
use crate::errors::QueryError;
use crate::query::{self, ErrorMessage, Pipeline, QueryParams};

// Caller-facing helpers for request handlers: errors flattened into `[{ msg }]`.

/// Compile request parameters into pipeline documents ready for an aggregate call.
///
/// This is `async` only to fit async request handlers; it never suspends.
///
/// # Errors
/// Returns a one-element list carrying the message of the first failure.
pub async fn parse_query(
    params: &QueryParams,
    cfg: &ParserConfig,
) -> Result<Vec<bson::Document>, Vec<ErrorMessage>> {
    parse_query_sync(params, cfg)
}

/// Synchronous form of [`parse_query`].
///
/// # Errors
/// Returns a one-element list carrying the message of the first failure.
pub fn parse_query_sync(
    params: &QueryParams,
    cfg: &ParserConfig,
) -> Result<Vec<bson::Document>, Vec<ErrorMessage>> {
    finish(query::compile(params, cfg), params.len()).map(|p| p.to_documents())
}

/// Compile a raw query string such as `query=...&limit=10`, keeping the typed pipeline.
///
/// # Errors
/// Returns a one-element list carrying the message of the first failure.
pub async fn compile_request(qs: &str, cfg: &ParserConfig) -> Result<Pipeline, Vec<ErrorMessage>> {
    let result = QueryParams::from_query_string(qs).and_then(|params| {
        let n = params.len();
        query::compile(&params, cfg).map(|p| (p, n))
    });
    match result {
        Ok((pipeline, n)) => finish(Ok(pipeline), n),
        Err(e) => finish(Err(e), 0),
    }
}

fn finish(result: Result<Pipeline, QueryError>, n_params: usize) -> Result<Pipeline, Vec<ErrorMessage>> {
    match result {
        Ok(pipeline) => {
            log::info!(target: crate::logger::AUDIT_TARGET, "compiled {} stage(s) from {n_params} parameter(s)", pipeline.len());
            Ok(pipeline)
        }
        Err(e) => {
            log::error!("query parser error: {e}");
            Err(vec![ErrorMessage { msg: e.to_string() }])
        }
    }
}
