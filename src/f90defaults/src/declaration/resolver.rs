// f90defaults/src/declaration/resolver.rs

//! Merge namelist membership with declaration defaults.

use super::{replicate, Extraction, ParameterTable};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::fortran_types::{clean_default_value, parse_literal, split_unquoted};
use crate::namelist::NamelistTemplate;

/// Parameters may be defined in terms of other parameters; chains longer
/// than this are treated as unresolvable and left as written.
const MAX_PARAMETER_DEPTH: usize = 8;

/// Build one ordered group per recorded namelist statement.
///
/// Members without a declaration, or whose declaration has no initializer,
/// are kept with an explicit "no default" marker.
pub fn resolve_namelists(extraction: &Extraction, sink: &mut dyn DiagnosticSink) -> NamelistTemplate {
    let mut template = NamelistTemplate::new();

    for (group_name, members) in extraction.namelists.iter() {
        let group = template.insert_group(group_name);

        for member in members {
            let declaration = extraction.declarations.get(member);
            let default = declaration.and_then(|decl| decl.default.as_deref().map(|d| (d, decl.size)));

            match default {
                Some((literal, size)) => {
                    let resolved = resolve_parameters(literal, &extraction.parameters);
                    group.insert_value(member, parse_literal(&expand_seed(resolved, size)));
                }
                None => {
                    sink.report(Diagnostic::UnresolvedDefault {
                        group: group_name.clone(),
                        variable: member.clone(),
                    });
                    group.insert_missing(member);
                }
            }
        }
    }

    template
}

/// Substitute parameter references in a default literal.
///
/// A literal that names a parameter (case-insensitively) is replaced by the
/// parameter's literal; for comma-joined array defaults each element is
/// substituted on its own.
pub fn resolve_parameters(literal: &str, parameters: &ParameterTable) -> String {
    if let Some(value) = lookup_parameter(literal, parameters) {
        return value;
    }

    let elements = split_unquoted(literal, ',');
    if elements.len() == 1 {
        return literal.to_string();
    }

    elements
        .into_iter()
        .map(|element| {
            lookup_parameter(element, parameters).unwrap_or_else(|| element.trim().to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replicate a single-element default across a `size`-element array. Defaults
/// that already list several elements are left as they are.
fn expand_seed(resolved: String, size: usize) -> String {
    if size > 1 && split_unquoted(&resolved, ',').len() == 1 {
        replicate(&resolved, size)
    } else {
        resolved
    }
}

fn lookup_parameter(text: &str, parameters: &ParameterTable) -> Option<String> {
    let mut current = parameters.get(&text.trim().to_lowercase())?;

    for _ in 0..MAX_PARAMETER_DEPTH {
        match parameters.get(&current.trim().to_lowercase()) {
            Some(next) => current = next,
            None => break,
        }
    }

    Some(clean_default_value(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Declaration;
    use crate::fortran_types::FortranValue;

    fn declare(extraction: &mut Extraction, name: &str, default: Option<&str>) {
        declare_array(extraction, name, default, 1);
    }

    fn declare_array(extraction: &mut Extraction, name: &str, default: Option<&str>, size: usize) {
        extraction.declarations.insert(
            name.to_string(),
            Declaration {
                name: name.to_string(),
                default: default.map(str::to_string),
                size,
                is_parameter: false,
            },
        );
    }

    #[test]
    fn test_resolve_parameters() {
        let mut parameters = ParameterTable::new();
        parameters.insert("max_files".to_string(), "1000".to_string());
        parameters.insert("alias".to_string(), "MAX_FILES".to_string());
        parameters.insert("missing_r8".to_string(), "-888888.0".to_string());

        assert_eq!(resolve_parameters("MAX_FILES", &parameters), "1000");
        assert_eq!(resolve_parameters("alias", &parameters), "1000");
        assert_eq!(
            resolve_parameters("missing_r8, missing_r8", &parameters),
            "-888888.0, -888888.0"
        );
        assert_eq!(resolve_parameters("'max_files'", &parameters), "'max_files'");
        assert_eq!(resolve_parameters("42", &parameters), "42");
    }

    #[test]
    fn test_parameter_cycle_terminates() {
        let mut parameters = ParameterTable::new();
        parameters.insert("a".to_string(), "b".to_string());
        parameters.insert("b".to_string(), "a".to_string());

        let resolved = resolve_parameters("a", &parameters);
        assert!(resolved == "a" || resolved == "b");
    }

    #[test]
    fn test_expand_seed() {
        assert_eq!(expand_seed("5".to_string(), 3), "5, 5, 5");
        assert_eq!(expand_seed("'a,b'".to_string(), 2), "'a,b', 'a,b'");
        assert_eq!(expand_seed("1, 2".to_string(), 2), "1, 2");
        assert_eq!(expand_seed("7".to_string(), 1), "7");
    }

    #[test]
    fn test_array_parameter_default_is_not_replicated() {
        let mut extraction = Extraction::default();
        extraction
            .parameters
            .insert("def_kinds".to_string(), "'QTY_U', 'QTY_V'".to_string());
        extraction
            .parameters
            .insert("missing_r8".to_string(), "-888888.0".to_string());
        declare_array(&mut extraction, "kinds", Some("DEF_KINDS"), 2);
        declare_array(&mut extraction, "bounds", Some("MISSING_R8"), 3);
        declare_array(&mut extraction, "flags", Some(".false."), 2);
        extraction.namelists.insert(
            "obs_nml".to_string(),
            vec!["kinds".to_string(), "bounds".to_string(), "flags".to_string()],
        );

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let template = resolve_namelists(&extraction, &mut diagnostics);
        let group = template.get_group("obs_nml").unwrap();

        assert_eq!(
            group.get("kinds"),
            Some(&FortranValue::Array(vec![
                FortranValue::character("QTY_U"),
                FortranValue::character("QTY_V"),
            ]))
        );
        assert_eq!(
            group.get("bounds"),
            Some(&FortranValue::Array(vec![FortranValue::Real(-888888.0); 3]))
        );
        assert_eq!(
            group.get("flags"),
            Some(&FortranValue::Array(vec![FortranValue::Logical(false); 2]))
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_groups_in_order() {
        let mut extraction = Extraction::default();
        extraction
            .parameters
            .insert("default_size".to_string(), "80".to_string());
        declare(&mut extraction, "ens_size", Some("default_size"));
        declare(&mut extraction, "output_mean", Some(".true."));
        declare(&mut extraction, "obs_file", None);
        extraction.namelists.insert(
            "filter_nml".to_string(),
            vec![
                "output_mean".to_string(),
                "ens_size".to_string(),
                "obs_file".to_string(),
                "undeclared".to_string(),
            ],
        );

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let template = resolve_namelists(&extraction, &mut diagnostics);
        let group = template.get_group("filter_nml").unwrap();

        assert_eq!(
            group.variable_names().collect::<Vec<_>>(),
            vec!["output_mean", "ens_size", "obs_file", "undeclared"]
        );
        assert_eq!(group.get("ens_size"), Some(&FortranValue::Integer(80)));
        assert_eq!(group.get("output_mean"), Some(&FortranValue::Logical(true)));
        assert!(group.is_missing("obs_file"));
        assert!(group.is_missing("undeclared"));
        assert_eq!(diagnostics.len(), 2);
    }
}
