// dartnml/src/cli/write.rs

use super::{emit, load_template};
use crate::case::CaseValues;
use log::info;
use std::path::Path;

/// Reduce a template with case values and write it as namelist text.
pub fn write_case(
    template_path: &Path,
    values: Option<&Path>,
    output: Option<&Path>,
    force: bool,
) -> anyhow::Result<()> {
    let template = load_template(template_path)?;

    let case = match values {
        Some(path) => CaseValues::load(path)?,
        None => {
            info!("No case values given, writing template defaults");
            CaseValues::new()
        }
    };

    let reduced = f90defaults::reduce(&template, |name| case.lookup(name));
    info!(
        "Reduced {} namelist groups with {} case values",
        reduced.len(),
        case.len()
    );

    emit(&f90defaults::writes(&reduced), output, force)
}
