// f90defaults/src/namelist/core.rs

//! Core NamelistTemplate struct and basic operations.

use super::group::NamelistGroup;
use crate::error::{F90DefaultsError, Result};
use crate::fortran_types::FortranValue;
use crate::WriteOptions;
use linked_hash_map::LinkedHashMap;
use std::fmt;

/// Group name to ordered variable settings.
///
/// Produced once from an extraction pass (or read from an existing namelist
/// file) and reduced many times against different case values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamelistTemplate {
    groups: LinkedHashMap<String, NamelistGroup>,
}

impl NamelistTemplate {
    /// Create a new empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new group and return a mutable reference to it. An existing
    /// group of the same name is returned unchanged.
    pub fn insert_group(&mut self, name: &str) -> &mut NamelistGroup {
        self.groups
            .entry(name.to_lowercase())
            .or_insert_with(NamelistGroup::new)
    }

    /// Insert a group object directly, replacing any group of the same name
    /// in place.
    pub fn insert_group_object(&mut self, name: &str, group: NamelistGroup) {
        *self.insert_group(name) = group;
    }

    /// Get a group by name.
    pub fn get_group(&self, name: &str) -> Option<&NamelistGroup> {
        self.groups.get(&name.to_lowercase())
    }

    /// Get a mutable reference to a group by name.
    pub fn get_group_mut(&mut self, name: &str) -> Option<&mut NamelistGroup> {
        self.groups.get_mut(&name.to_lowercase())
    }

    /// Check if a group exists.
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(&name.to_lowercase())
    }

    /// Get all group names in order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Get an iterator over all groups in order.
    pub fn groups(&self) -> impl Iterator<Item = (&String, &NamelistGroup)> {
        self.groups.iter()
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = (&String, &mut NamelistGroup)> {
        self.groups.iter_mut()
    }

    /// Check if the template is empty.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check that no value nests an array inside an array.
    pub fn validate(&self) -> Result<()> {
        for (group_name, group) in self.groups() {
            for (name, value) in group.variables() {
                if value.is_some_and(FortranValue::has_nested_array) {
                    return Err(F90DefaultsError::NestedArray {
                        group: group_name.clone(),
                        variable: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Override template values with case values. See [`super::reduce`].
    pub fn reduce<F>(&self, lookup: F) -> NamelistTemplate
    where
        F: Fn(&str) -> Option<FortranValue>,
    {
        super::reduce::reduce(self, lookup)
    }

    /// Render as namelist text: one `&group ... /` block per group, each
    /// followed by a blank line.
    pub fn to_fortran_string(&self, options: &WriteOptions) -> String {
        let mut output = String::new();

        for (name, group) in self.groups() {
            output.push('&');
            output.push_str(name);
            output.push('\n');
            output.push_str(&group.to_fortran_string(options));
            output.push_str("/\n\n");
        }

        output
    }
}

impl fmt::Display for NamelistTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fortran_string(&WriteOptions::default()))
    }
}
