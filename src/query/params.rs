use crate::errors::QueryError;
use crate::utils::json::decode_component;

/// Ordered request parameters: name to raw value. Values stay percent-encoded; the
/// compiler decodes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter. A repeated name keeps its first position and takes
    /// the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            log::warn!("duplicate query parameter `{name}`; last value wins");
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Split a raw query string (`a=1&b=2`, optional leading `?`). Names are
    /// percent-decoded; values are kept raw. A name without `=` gets an empty value.
    pub fn from_query_string(qs: &str) -> Result<Self, QueryError> {
        let mut params = Self::new();
        for pair in qs.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode_component(name)?, value);
        }
        Ok(params)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
