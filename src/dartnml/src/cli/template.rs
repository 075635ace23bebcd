// dartnml/src/cli/template.rs

use super::{emit, TemplateFormat};
use anyhow::Context;
use log::{info, warn};
use std::path::Path;

/// Convert an existing namelist file into a `values`-wrapped template.
///
/// Without an explicit format the output extension decides, and stdout gets
/// YAML.
pub fn template_from_namelist(
    input: &Path,
    output: Option<&Path>,
    format: Option<TemplateFormat>,
    force: bool,
) -> anyhow::Result<()> {
    let template = f90defaults::read(input)
        .with_context(|| format!("Failed to read namelist file {}", input.display()))?;

    if template.is_empty() {
        warn!("No namelist groups found in {}", input.display());
    }
    info!("Read {} namelist groups from {}", template.len(), input.display());

    let format = format
        .or_else(|| output.map(TemplateFormat::from_path))
        .unwrap_or(TemplateFormat::Yaml);

    emit(&format.render(&template)?, output, force)
}
