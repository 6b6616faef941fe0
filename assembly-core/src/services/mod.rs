//! Service registry and token resolution.

mod registry;

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{RegistryError, ResolutionError};

/// Lookup table of service id to display name, with the reverse index.
#[derive(Debug, Clone, Default)]
pub struct ServiceMap {
    by_id: BTreeMap<String, String>,
    by_name: BTreeMap<String, String>,
}

impl ServiceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry compiled into the crate.
    pub fn builtin() -> Self {
        registry::KNOWN_SERVICES.iter().copied().collect()
    }

    /// Reads a `{ "<id>": "<name>", ... }` registry document.
    pub fn from_json_str(input: &str) -> Result<Self, RegistryError> {
        let value: Value = serde_json::from_str(input)?;
        let obj = value.as_object().ok_or(RegistryError::NotAnObject)?;
        let mut map = Self::new();
        for (id, name) in obj {
            let name = name.as_str().ok_or(RegistryError::NotAnObject)?;
            map.insert(id.clone(), name.to_string());
        }
        Ok(map)
    }

    /// Reads a registry document from disk; see [`ServiceMap::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Adds a service. The first id registered under a display name keeps the name.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        let name = name.into();
        self.by_name.entry(name.clone()).or_insert_with(|| id.clone());
        self.by_id.insert(id, name);
    }

    pub fn extend(&mut self, other: ServiceMap) {
        for (id, name) in other.by_id {
            self.insert(id, name);
        }
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_id.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl<I, N> FromIterator<(I, N)> for ServiceMap
where
    I: Into<String>,
    N: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (I, N)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (id, name) in iter {
            map.insert(id, name);
        }
        map
    }
}

/// Minimum length for an unknown token to be accepted as an id.
const MIN_HEURISTIC_ID_LEN: usize = 10;

/// Maps user-supplied tokens to canonical service ids.
#[derive(Debug, Clone)]
pub struct ServiceResolver {
    services: ServiceMap,
}

impl ServiceResolver {
    pub fn new(services: ServiceMap) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &ServiceMap {
        &self.services
    }

    /// Resolves `token`, checking in order: known id, known display name, then any alphanumeric
    /// token longer than ten characters (ids published after the registry was built).
    pub fn resolve(&self, token: &str) -> Result<String, ResolutionError> {
        if self.services.contains_id(token) {
            return Ok(token.to_string());
        }
        if let Some(id) = self.services.id_for_name(token) {
            return Ok(id.to_string());
        }
        if looks_like_id(token) {
            return Ok(token.to_string());
        }
        Err(ResolutionError::new(token))
    }

    /// Case-insensitive substring search over ids and names.
    pub fn search(&self, keyword: &str) -> BTreeMap<String, String> {
        let needle = keyword.to_lowercase();
        self.services
            .iter()
            .filter(|(id, name)| {
                id.to_lowercase().contains(&needle) || name.to_lowercase().contains(&needle)
            })
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect()
    }
}

impl Default for ServiceResolver {
    fn default() -> Self {
        Self::new(ServiceMap::builtin())
    }
}

fn looks_like_id(token: &str) -> bool {
    token.chars().count() > MIN_HEURISTIC_ID_LEN && token.chars().all(char::is_alphanumeric)
}
