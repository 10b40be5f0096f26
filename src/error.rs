use std::process::ExitStatus;
use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON config. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML config. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to parse ignore pattern. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to load the Go grammar. Original error: {0}")]
    GrammarError(#[from] tree_sitter::LanguageError),

    #[error("Cannot proceed: template '{location}' not found ({reason}).")]
    TemplateNotFound { location: String, reason: String },

    /// The template source is not valid Go.
    #[error("Failed to parse '{file}' at {line}:{column}.")]
    ParseError { file: String, line: usize, column: usize },

    /// No usable `from=to` pair was supplied.
    #[error("Invalid replacement spec '{0}': expected a comma separated list of from=to pairs.")]
    InvalidReplacementSpec(String),

    #[error("Cannot write '{path}'. Original error: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine the Go package of '{output_dir}'. Use --package to set it.")]
    PackageUnresolved { output_dir: String },

    #[error("Formatter '{command}' failed: {message}")]
    FormatterError { command: String, message: String },

    #[error("Formatter '{command}' exited with status: {status}")]
    FormatterExitError { command: String, status: ExitStatus },

    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with typegen's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Logs the error, prints it to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    log::error!("instantiation failed: {err}");
    eprintln!("{err}");
    std::process::exit(exit_codes::FAILURE);
}
