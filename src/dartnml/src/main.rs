// dartnml/src/main.rs

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use dartnml::cli::{extract_source, template_from_namelist, write_case, OutputFormat, TemplateFormat};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dartnml")]
#[command(about = "Namelist templates from Fortran sources, and input.nml files from templates", long_about = None)]
#[command(version = env!("DARTNML_CLI_VERSION"))]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract namelist groups and their defaults from a Fortran source file
    Extract {
        /// Free-form Fortran source file
        source: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Nml)]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Convert an existing namelist file into a template
    Template {
        /// Namelist file, e.g. input.nml
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Template format (defaults to the output extension, else yaml)
        #[arg(short, long, value_enum)]
        format: Option<TemplateFormat>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Reduce a template with case values and write a namelist file
    Write {
        /// Template file (.yaml, .yml, .json or .nml)
        template: PathBuf,

        /// Case values: flat name to value mapping (.yaml, .yml or .json)
        #[arg(long, env = "DARTNML_VALUES", value_name = "FILE")]
        values: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Extract {
            source,
            format,
            output,
            force,
        } => extract_source(&source, format, output.as_deref(), force),
        Commands::Template {
            input,
            output,
            format,
            force,
        } => template_from_namelist(&input, output.as_deref(), format, force),
        Commands::Write {
            template,
            values,
            output,
            force,
        } => write_case(&template, values.as_deref(), output.as_deref(), force),
    }
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
