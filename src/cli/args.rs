use crate::constants::{exit_codes, verbosity};
use crate::inflect::Pluralization;
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for typegen.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Template directory or import path under `$GOPATH/src`.
    #[arg(short = 's', long = "src", value_name = "TEMPLATE")]
    pub template: String,

    /// Replacement pairs, e.g. `T__=User,U__=int`. Applied in order.
    #[arg(short, long = "replace", value_name = "PAIRS")]
    pub replace: String,

    /// Only keep these declarations (comma-separated, `Type.Method` for methods).
    #[arg(long)]
    pub include: Option<String>,

    /// Drop these declarations (comma-separated, `Type.Method` for methods).
    #[arg(long)]
    pub exclude: Option<String>,

    /// Package of the generated files. Defaults to the package already in
    /// the output directory.
    #[arg(short, long)]
    pub package: Option<String>,

    /// Destination directory for generated files.
    #[arg(short, long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Placeholder type declared by the template.
    #[arg(long)]
    pub placeholder: Option<String>,

    /// How plural forms of type names are built.
    #[arg(long, value_enum)]
    pub pluralization: Option<Pluralization>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Preview actions without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
