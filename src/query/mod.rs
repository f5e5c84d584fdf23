// Submodules, leaf first
mod compile;
mod identifier;
mod include;
mod lookup;
mod operators;
mod params;
mod rewrite;
mod types;

// Public API re-exports
pub use compile::{Param, compile, compile_query_string};
pub use identifier::coerce as coerce_identifier;
pub use include::{INCLUDE_KEY, expand, expand_descriptor};
pub use lookup::{IncludeDescriptor, format_lookup};
pub use operators::Operator;
pub use params::QueryParams;
pub use rewrite::{rewrite, rewrite_document};
pub use types::{ErrorMessage, LookupStage, Pipeline, Stage, StageKind};
