// dartnml/src/cli/mod.rs

pub mod extract;
pub mod template;
pub mod write;

pub use extract::extract_source;
pub use template::template_from_namelist;
pub use write::write_case;

use anyhow::Context;
use clap::ValueEnum;
use f90defaults::NamelistTemplate;
use log::info;
use std::io::Write;
use std::path::Path;

/// Output of `extract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Nml,
    Yaml,
    Json,
}

/// Serialized template format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

impl TemplateFormat {
    /// `.json` means JSON; anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match extension(path).as_deref() {
            Some("json") => TemplateFormat::Json,
            _ => TemplateFormat::Yaml,
        }
    }

    pub fn render(self, template: &NamelistTemplate) -> anyhow::Result<String> {
        let text = match self {
            TemplateFormat::Yaml => f90defaults::to_yaml(template)?,
            TemplateFormat::Json => f90defaults::to_json(template)?,
        };
        Ok(text)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Load a template by extension: `.json`, `.nml`, otherwise YAML.
pub fn load_template(path: &Path) -> anyhow::Result<NamelistTemplate> {
    let text = fs_err::read_to_string(path)?;

    let template = match extension(path).as_deref() {
        Some("json") => f90defaults::from_json(&text),
        Some("nml") => f90defaults::reads(&text),
        _ => f90defaults::from_yaml(&text),
    }
    .with_context(|| format!("Failed to load template {}", path.display()))?;
    Ok(template)
}

/// Write `text` to `output`, or to stdout when no output is given.
pub fn emit(text: &str, output: Option<&Path>, force: bool) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if !force && path.exists() {
                anyhow::bail!(
                    "{} already exists; use --force to overwrite it",
                    path.display()
                );
            }
            fs_err::write(path, text)
                .context(format!("Error writing file {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_format_from_path() {
        assert_eq!(TemplateFormat::from_path(Path::new("input_nml.json")), TemplateFormat::Json);
        assert_eq!(TemplateFormat::from_path(Path::new("input_nml.YAML")), TemplateFormat::Yaml);
        assert_eq!(TemplateFormat::from_path(Path::new("input_nml")), TemplateFormat::Yaml);
    }

    #[test]
    fn test_emit_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.nml");

        emit("first\n", Some(&path), false).unwrap();
        assert!(emit("second\n", Some(&path), false).is_err());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "first\n");

        emit("second\n", Some(&path), true).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "second\n");
    }
}
