// dartnml/src/case.rs

//! Case values: the flat name to value store a template is reduced against.

use anyhow::Context;
use f90defaults::FortranValue;
use linked_hash_map::LinkedHashMap;
use log::debug;
use std::path::Path;

/// Variable values for one case, keyed by lower-cased variable name.
///
/// Group names play no part in the lookup, so a name shared by several
/// groups is overridden in all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseValues {
    values: LinkedHashMap<String, FortranValue>,
}

impl CaseValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Into<FortranValue>>(&mut self, name: &str, value: T) -> &mut Self {
        self.values.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FortranValue> {
        self.values.get(&name.to_lowercase())
    }

    /// Lookup callback for [`f90defaults::reduce`].
    pub fn lookup(&self, name: &str) -> Option<FortranValue> {
        self.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load from `.json`, or from YAML for any other extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs_err::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let result = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        };
        result.with_context(|| format!("Failed to load case values from {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        Self::from_raw(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        Self::from_raw(serde_json::from_str(text)?)
    }

    /// `null` entries carry no value and are left out, so the template
    /// default stays in place for them.
    fn from_raw(raw: LinkedHashMap<String, Option<FortranValue>>) -> anyhow::Result<Self> {
        let mut case = Self::new();

        for (name, value) in raw {
            let Some(value) = value else {
                debug!("Case value for '{}' is null, keeping the template default", name);
                continue;
            };
            if value.has_nested_array() {
                anyhow::bail!("Case value for '{}' nests an array inside an array", name);
            }
            case.insert(&name, value);
        }

        Ok(case)
    }
}
