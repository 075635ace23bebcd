// f90defaults/src/namelist/serialization.rs

//! Template persistence format.
//!
//! Every variable is wrapped in a `values` mapping, with `null` standing for
//! "no default":
//!
//! ```yaml
//! filter_nml:
//!   ens_size:
//!     values: 20
//!   obs_sequence_in_name:
//!     values: null
//! ```
//!
//! Group and variable order is preserved in both directions.

use super::core::NamelistTemplate;
use super::group::NamelistGroup;
use crate::fortran_types::FortranValue;
use linked_hash_map::LinkedHashMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
struct EntryRef<'a> {
    values: Option<&'a FortranValue>,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    values: Option<FortranValue>,
}

struct GroupEntries<'a>(&'a NamelistGroup);

impl Serialize for GroupEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0.variables() {
            map.serialize_entry(name, &EntryRef { values: value })?;
        }
        map.end()
    }
}

impl Serialize for NamelistTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, group) in self.groups() {
            map.serialize_entry(name, &GroupEntries(group))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NamelistTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A group written as `filter_nml:` with nothing under it is empty.
        let raw: LinkedHashMap<String, Option<LinkedHashMap<String, Entry>>> =
            LinkedHashMap::deserialize(deserializer)?;

        let mut template = NamelistTemplate::new();
        for (group_name, entries) in raw {
            let group = template.insert_group(&group_name);
            for (name, entry) in entries.unwrap_or_default() {
                group.insert_setting(&name, entry.values);
            }
        }

        template.validate().map_err(D::Error::custom)?;
        Ok(template)
    }
}

#[cfg(feature = "yaml")]
/// Serialize a template to YAML.
pub fn to_yaml(template: &NamelistTemplate) -> crate::Result<String> {
    Ok(serde_yaml::to_string(template)?)
}

#[cfg(feature = "yaml")]
/// Deserialize a template from YAML.
pub fn from_yaml(text: &str) -> crate::Result<NamelistTemplate> {
    Ok(serde_yaml::from_str(text)?)
}

#[cfg(feature = "json")]
/// Serialize a template to pretty-printed JSON.
pub fn to_json(template: &NamelistTemplate) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(template)?)
}

#[cfg(feature = "json")]
/// Deserialize a template from JSON.
pub fn from_json(text: &str) -> crate::Result<NamelistTemplate> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> NamelistTemplate {
        let mut template = NamelistTemplate::new();
        template
            .insert_group("filter_nml")
            .insert("ens_size", 20i64)
            .insert("cutoff", 0.2)
            .insert("output_mean", true)
            .insert("qceff_table_filename", "")
            .insert("inf_flavor", vec![2i64, 0])
            .insert_missing("obs_sequence_in_name");
        template.insert_group("model_nml").insert("template_file", "wrfinput_d01");
        template
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_round_trip() {
        let original = template();
        let text = to_yaml(&original).unwrap();

        assert!(text.starts_with("filter_nml:\n  ens_size:\n    values: 20\n"));
        assert!(text.contains("obs_sequence_in_name:\n    values: null\n"));

        let restored = from_yaml(&text).unwrap();
        assert_eq!(restored, original);
        assert_eq!(
            restored.group_names().collect::<Vec<_>>(),
            vec!["filter_nml", "model_nml"]
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_round_trip() {
        let original = template();
        let restored = from_json(&to_json(&original).unwrap()).unwrap();
        assert_eq!(restored, original);

        let filter = restored.get_group("filter_nml").unwrap();
        assert_eq!(filter.get_string("qceff_table_filename"), Some(""));
        assert!(filter.is_missing("obs_sequence_in_name"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_missing_values_key_and_empty_group() {
        let text = "filter_nml:\n  ens_size: {}\nempty_nml:\n";
        let template = from_yaml(text).unwrap();

        assert!(template.get_group("filter_nml").unwrap().is_missing("ens_size"));
        assert!(template.get_group("empty_nml").unwrap().is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_nested_arrays_are_rejected() {
        let text = r#"{"g": {"x": {"values": [[1, 2], 3]}}}"#;
        let err = from_json(text).unwrap_err();
        assert!(err.to_string().contains("Nested array"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_numbers_keep_their_kind() {
        let text = r#"{"g": {"n": {"values": 3}, "x": {"values": 3.0}}}"#;
        let template = from_json(text).unwrap();
        let group = template.get_group("g").unwrap();

        assert_eq!(group.get("n"), Some(&FortranValue::Integer(3)));
        assert_eq!(group.get("x"), Some(&FortranValue::Real(3.0)));
    }
}
