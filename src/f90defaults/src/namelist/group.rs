// f90defaults/src/namelist/group.rs

//! Namelist group data structure and operations.

use crate::fortran_types::{render_literal, FortranValue};
use crate::WriteOptions;
use linked_hash_map::LinkedHashMap;
use std::fmt;

/// An ordered set of namelist variables.
///
/// Each variable holds either a value or the "no default" marker (`None`),
/// which is kept so templates stay structurally complete.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamelistGroup {
    variables: LinkedHashMap<String, Option<FortranValue>>,
}

impl NamelistGroup {
    /// Create a new empty namelist group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable with automatic type conversion.
    pub fn insert<T: Into<FortranValue>>(&mut self, name: &str, value: T) -> &mut Self {
        self.insert_setting(name, Some(value.into()))
    }

    /// Insert a variable with explicit FortranValue.
    pub fn insert_value(&mut self, name: &str, value: FortranValue) -> &mut Self {
        self.insert_setting(name, Some(value))
    }

    /// Insert a variable that has no default value.
    pub fn insert_missing(&mut self, name: &str) -> &mut Self {
        self.insert_setting(name, None)
    }

    /// Insert a value or the "no default" marker. Re-inserting an existing
    /// variable updates it in place and keeps its position.
    pub fn insert_setting(&mut self, name: &str, setting: Option<FortranValue>) -> &mut Self {
        let name = name.to_lowercase();
        match self.variables.get_mut(&name) {
            Some(existing) => *existing = setting,
            None => {
                self.variables.insert(name, setting);
            }
        }
        self
    }

    /// Get a variable's value; `None` if absent or without a default.
    pub fn get(&self, name: &str) -> Option<&FortranValue> {
        self.variables.get(&name.to_lowercase())?.as_ref()
    }

    /// Get a variable's setting, distinguishing "absent" (`None`) from
    /// "present without default" (`Some(None)`).
    pub fn setting(&self, name: &str) -> Option<&Option<FortranValue>> {
        self.variables.get(&name.to_lowercase())
    }

    /// Check if a variable exists.
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(&name.to_lowercase())
    }

    /// Whether the variable exists but has no default value.
    pub fn is_missing(&self, name: &str) -> bool {
        matches!(self.setting(name), Some(None))
    }

    /// Get all variable names in order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Get an iterator over all variables in order.
    pub fn variables(&self) -> impl Iterator<Item = (&String, Option<&FortranValue>)> {
        self.variables.iter().map(|(name, value)| (name, value.as_ref()))
    }

    pub(crate) fn settings_mut(&mut self) -> impl Iterator<Item = (&String, &mut Option<FortranValue>)> {
        self.variables.iter_mut()
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_integer()
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_real()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_logical()
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_character()
    }

    /// Check if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Get the number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Render the group body: one `name = value` line per variable.
    pub fn to_fortran_string(&self, options: &WriteOptions) -> String {
        let mut output = String::new();

        for (name, value) in self.variables() {
            output.push_str(&options.indent);
            output.push_str(name);
            output.push_str(" = ");
            match value {
                Some(value) => output.push_str(&render_literal(value)),
                None => output.push_str(&options.missing_default),
            }
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for NamelistGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fortran_string(&WriteOptions::default()))
    }
}
