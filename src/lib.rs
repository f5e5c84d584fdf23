//! Compile REST query-string parameters (`query`, `include`, `attributes`, `sort`,
//! `limit`, `offset`) into a MongoDB-style aggregation pipeline.
//!
//! ```
//! use querylite::{ParserConfig, query::compile_query_string};
//!
//! let cfg = ParserConfig::default();
//! let p = compile_query_string("query=%7B%22age%22%3A%7B%22gt%22%3A18%7D%7D&limit=10", &cfg).unwrap();
//! assert_eq!(p.to_documents(), vec![
//!     bson::doc! { "$match": { "age": { "$gt": 18 } } },
//!     bson::doc! { "$limit": 10 },
//! ]);
//! ```
pub mod api;
pub mod config;
pub mod errors;
pub mod logger;
pub mod query;
pub mod utils;

pub use config::ParserConfig;
pub use errors::QueryError;
pub use query::{Pipeline, QueryParams, Stage};

/// Initializes logging from `log4rs.yaml`.
///
/// Call once at startup, before compiling queries, if file logging is wanted.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
