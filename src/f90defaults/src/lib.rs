// f90defaults/src/lib.rs

//! Recover Fortran namelist defaults from source code and write namelist
//! files from them.
//!
//! This library provides functionality to:
//! - Extract every namelist group declared in a Fortran source file, with the
//!   default value of each member taken from its declaration
//! - Read existing namelist files into the same template structure
//! - Persist templates as YAML or JSON (`values`-wrapped, order preserved)
//! - Reduce a template against case-specific values and write the result as
//!   a namelist file
//!
//! ```
//! use f90defaults::{Diagnostics, StatementScanner};
//!
//! let source = "\
//! module filter_mod
//!   integer :: ens_size = 20
//!   namelist /filter_nml/ ens_size
//! end module filter_mod
//! ";
//!
//! let mut diagnostics = Diagnostics::new();
//! let template = f90defaults::extract_str(source, "filter_mod.f90", &StatementScanner, &mut diagnostics)?;
//! assert_eq!(f90defaults::writes(&template), "&filter_nml\n  ens_size = 20\n/\n\n");
//! # Ok::<(), f90defaults::F90DefaultsError>(())
//! ```

pub mod declaration;
pub mod diagnostics;
pub mod error;
pub mod fortran_types;
pub mod namelist;
pub mod scanner;
pub mod source;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub use declaration::{extract_declarations, resolve_namelists, DeclTree, Extraction};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
pub use error::{F90DefaultsError, Result};
pub use fortran_types::{clean_default_value, parse_literal, render_literal, FortranValue};
pub use namelist::{reduce, NamelistGroup, NamelistTemplate};
pub use source::{StatementScanner, TreeBuilder};

#[cfg(feature = "json")]
pub use namelist::serialization::{from_json, to_json};
#[cfg(feature = "yaml")]
pub use namelist::serialization::{from_yaml, to_yaml};

/// Build a template from an already constructed declaration tree.
pub fn extract_tree(tree: &DeclTree, sink: &mut dyn DiagnosticSink) -> NamelistTemplate {
    let extraction = extract_declarations(tree, sink);
    resolve_namelists(&extraction, sink)
}

/// Build a template from source text using the given tree builder.
pub fn extract_str<B: TreeBuilder + ?Sized>(
    source: &str,
    source_name: &str,
    builder: &B,
    sink: &mut dyn DiagnosticSink,
) -> Result<NamelistTemplate> {
    let tree = builder.build(source, source_name)?;
    Ok(extract_tree(&tree, sink))
}

/// Build a template from a free-form Fortran source file.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), f90defaults::F90DefaultsError> {
///     let mut diagnostics = f90defaults::Diagnostics::new();
///     let template = f90defaults::extract_file("filter_mod.f90", &mut diagnostics)?;
///     print!("{}", template);
///     Ok(())
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P, sink: &mut dyn DiagnosticSink) -> Result<NamelistTemplate> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(F90DefaultsError::SourceNotFound(path.to_path_buf()));
    }

    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    extract_str(&contents, &path.display().to_string(), &StatementScanner, sink)
}

/// Parse a namelist file into a template.
pub fn read<P: AsRef<Path>>(path: P) -> Result<NamelistTemplate> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    reads(&contents)
}

/// Parse namelist text into a template.
///
/// # Examples
///
/// ```
/// fn main() -> Result<(), f90defaults::F90DefaultsError> {
///     let template = f90defaults::reads("&filter_nml ens_size = 20, cutoff = 0.2 /")?;
///     let group = template.get_group("filter_nml").unwrap();
///     assert_eq!(group.get_i64("ens_size"), Some(20));
///     Ok(())
/// }
/// ```
pub fn reads(content: &str) -> Result<NamelistTemplate> {
    scanner::read_template(content)
}

/// Render a template as namelist text with default options.
pub fn writes(template: &NamelistTemplate) -> String {
    template.to_fortran_string(&WriteOptions::default())
}

/// Write a template to a namelist file.
///
/// Fails with [`F90DefaultsError::FileAlreadyExists`] rather than overwrite
/// an existing file; see [`WriteOptions::force`].
pub fn write<P: AsRef<Path>>(template: &NamelistTemplate, path: P) -> Result<()> {
    write_with_options(template, path, &WriteOptions::default())
}

/// Write a template to a file with specific options.
pub fn write_with_options<P: AsRef<Path>>(
    template: &NamelistTemplate,
    path: P,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();

    if !options.force && path.exists() {
        return Err(F90DefaultsError::FileAlreadyExists(path.to_path_buf()));
    }

    let mut file = File::create(path)?;
    write_to_writer(template, &mut file, options)
}

/// Write a template to any writer implementing the Write trait.
pub fn write_to_writer<W: Write>(
    template: &NamelistTemplate,
    writer: &mut W,
    options: &WriteOptions,
) -> Result<()> {
    let formatted = template.to_fortran_string(options);
    writer.write_all(formatted.as_bytes())?;
    Ok(())
}

/// Options for controlling namelist output.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Force overwrite existing files
    pub force: bool,
    /// Indentation before each variable line
    pub indent: String,
    /// Text written after `name = ` for a variable without a default
    pub missing_default: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            force: false,
            indent: "  ".to_string(),
            missing_default: "! No default value found".to_string(),
        }
    }
}
