// f90defaults/src/namelist/reduce.rs

//! Case reduction: overlay case values onto a template.

use super::core::NamelistTemplate;
use crate::fortran_types::FortranValue;
use log::debug;

/// Produce a copy of `template` where each variable for which `lookup`
/// returns a value takes that value. Variables the lookup does not know keep
/// the template setting, including the "no default" marker.
///
/// The template itself is never modified, so one template can be reduced
/// against any number of cases.
///
/// # Examples
///
/// ```
/// use f90defaults::{FortranValue, NamelistTemplate};
///
/// let mut template = NamelistTemplate::new();
/// template.insert_group("filter_nml").insert("ens_size", 20i64);
///
/// let reduced = f90defaults::reduce(&template, |name| {
///     (name == "ens_size").then(|| FortranValue::Integer(80))
/// });
///
/// assert_eq!(reduced.get_group("filter_nml").unwrap().get_i64("ens_size"), Some(80));
/// assert_eq!(template.get_group("filter_nml").unwrap().get_i64("ens_size"), Some(20));
/// ```
pub fn reduce<F>(template: &NamelistTemplate, lookup: F) -> NamelistTemplate
where
    F: Fn(&str) -> Option<FortranValue>,
{
    let mut reduced = template.clone();

    for (group_name, group) in reduced.groups_mut() {
        for (name, setting) in group.settings_mut() {
            if let Some(value) = lookup(name) {
                debug!("{}%{} overridden with {}", group_name, name, value);
                *setting = Some(value);
            }
        }
    }

    reduced
}
