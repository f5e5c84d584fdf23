use crate::errors::QueryError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ID_FIELD: &str = "_id";
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Compiler settings. Every field has a default, so an empty TOML file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Reserved key whose values are coerced into document identifiers.
    pub id_field: String,
    /// Maximum nesting of a filter expression.
    pub max_depth: usize,
    /// Upper bound applied to every emitted `$limit`.
    pub max_limit: Option<i64>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { id_field: DEFAULT_ID_FIELD.to_string(), max_depth: DEFAULT_MAX_DEPTH, max_limit: None }
    }
}

/// Partial config as read from one file; unset keys fall through to the next source.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    id_field: Option<String>,
    max_depth: Option<usize>,
    max_limit: Option<i64>,
}

impl ParserConfig {
    /// Parse a complete config from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, QueryError> {
        let cfg: Self = toml::from_str(s).map_err(|e| QueryError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.id_field.is_empty() {
            return Err(QueryError::Config("id_field must not be empty".into()));
        }
        if self.max_depth == 0 {
            return Err(QueryError::Config("max_depth must be at least 1".into()));
        }
        if matches!(self.max_limit, Some(n) if n < 1) {
            return Err(QueryError::Config("max_limit must be positive".into()));
        }
        Ok(())
    }

    /// Load from the process environment and the default config locations.
    pub fn load(cli_cfg: Option<&Path>) -> Result<Self, QueryError> {
        Self::load_with(cli_cfg, |k| std::env::var(k).ok())
    }

    /// Precedence: env > config files (first found wins per key) > defaults.
    /// CLI flags are applied on top by the caller.
    pub fn load_with(
        cli_cfg: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, QueryError> {
        let mut file = FileConfig::default();
        for p in find_config_paths(cli_cfg, &env) {
            if !p.exists() {
                continue;
            }
            let s = std::fs::read_to_string(&p)
                .map_err(|e| QueryError::Config(format!("{}: {e}", p.display())))?;
            let found: FileConfig = toml::from_str(&s)
                .map_err(|e| QueryError::Config(format!("{}: {e}", p.display())))?;
            log::debug!("loaded config from {}", p.display());
            if file.id_field.is_none() { file.id_field = found.id_field; }
            if file.max_depth.is_none() { file.max_depth = found.max_depth; }
            if file.max_limit.is_none() { file.max_limit = found.max_limit; }
        }

        let mut cfg = Self::default();
        if let Some(v) = file.id_field { cfg.id_field = v; }
        if let Some(v) = file.max_depth { cfg.max_depth = v; }
        if file.max_limit.is_some() { cfg.max_limit = file.max_limit; }

        if let Some(v) = env("QUERYLITE_ID_FIELD") {
            cfg.id_field = v;
        }
        if let Some(v) = env("QUERYLITE_MAX_DEPTH") {
            cfg.max_depth = v
                .parse()
                .map_err(|_| QueryError::Config(format!("QUERYLITE_MAX_DEPTH: not a number: {v}")))?;
        }
        if let Some(v) = env("QUERYLITE_MAX_LIMIT") {
            cfg.max_limit = Some(
                v.parse()
                    .map_err(|_| QueryError::Config(format!("QUERYLITE_MAX_LIMIT: not a number: {v}")))?,
            );
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Candidate config files in priority order.
pub fn find_config_paths(
    cli_cfg: Option<&Path>,
    env: &impl Fn(&str) -> Option<String>,
) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg { paths.push(p.to_path_buf()); }
    if let Some(p) = env("QUERYLITE_CONFIG") { paths.push(PathBuf::from(p)); }
    if let Some(dir) = dirs_next::config_dir() { paths.push(dir.join("querylite.toml")); }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join("querylite.toml")); }
    paths
}
