// dartnml/src/cli/extract.rs

use super::{emit, OutputFormat, TemplateFormat};
use anyhow::Context;
use f90defaults::Diagnostics;
use log::{info, warn};
use std::path::Path;

/// Extract the namelist groups declared in a Fortran source file
pub fn extract_source(
    source: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    force: bool,
) -> anyhow::Result<()> {
    let mut diagnostics = Diagnostics::new();
    let template = f90defaults::extract_file(source, &mut diagnostics)
        .with_context(|| format!("Failed to extract namelists from {}", source.display()))?;

    if template.is_empty() {
        warn!("No namelists found in {}", source.display());
    }
    info!(
        "{}: {} namelist groups, {} variables without default, {} declarations skipped",
        source.display(),
        template.len(),
        diagnostics.unresolved_defaults(),
        diagnostics.skipped_declarations()
    );

    let text = match format {
        OutputFormat::Nml => f90defaults::writes(&template),
        OutputFormat::Yaml => TemplateFormat::Yaml.render(&template)?,
        OutputFormat::Json => TemplateFormat::Json.render(&template)?,
    };

    emit(&text, output, force)
}
