use std::io::{BufReader, Write};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::ioutils::read_from;

/// Final formatting pass over a printed file.
pub trait SourceFormatter {
    /// Formats printed source text.
    ///
    /// # Arguments
    /// * `file_name` - Output file name, used in diagnostics
    /// * `source` - Printed source text
    ///
    /// # Returns
    /// * `Result<String>` - The formatted source
    fn format(&self, file_name: &str, source: &str) -> Result<String>;
}

/// Built-in formatter. The printer already keeps the template's layout, so
/// this only normalises the end of the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct TidyFormatter;

impl SourceFormatter for TidyFormatter {
    fn format(&self, _file_name: &str, source: &str) -> Result<String> {
        let mut out = source.trim_end().to_string();
        out.push('\n');
        Ok(out)
    }
}

/// Pipes the source through an external program such as `gofmt` or
/// `goimports`, which reads stdin and writes the result to stdout.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Builds a formatter from `[program, args...]`.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    fn command_line(&self) -> String {
        std::iter::once(&self.program).chain(&self.args).cloned().collect::<Vec<_>>().join(" ")
    }
}

impl SourceFormatter for CommandFormatter {
    fn format(&self, file_name: &str, source: &str) -> Result<String> {
        log::debug!("Formatting {file_name} with '{}'", self.command_line());
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::FormatterError {
                command: self.command_line(),
                message: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                if e.kind() == std::io::ErrorKind::BrokenPipe {
                    log::debug!("Formatter closed stdin early (broken pipe)");
                } else {
                    return Err(Error::FormatterError {
                        command: self.command_line(),
                        message: e.to_string(),
                    });
                }
            }
            // Close stdin so the formatter sees end of input.
            drop(stdin);
        }

        let formatted = match child.stdout.take() {
            Some(stdout) => read_from(BufReader::new(stdout))?,
            None => String::new(),
        };

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::FormatterExitError { command: self.command_line(), status });
        }
        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_leaves_a_single_trailing_newline() {
        let out = TidyFormatter.format("a.go", "package a\n\n\n").unwrap();
        assert_eq!(out, "package a\n");
    }

    #[test]
    fn from_command_splits_program_and_args() {
        let command = vec!["gofmt".to_string(), "-s".to_string()];
        let formatter = CommandFormatter::from_command(&command).unwrap();
        assert_eq!(formatter.command_line(), "gofmt -s");
        assert!(CommandFormatter::from_command(&[]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn command_formatter_pipes_through_program() {
        let formatter = CommandFormatter::new("cat", vec![]);
        let out = formatter.format("a.go", "package a\n").unwrap();
        assert_eq!(out, "package a\n");
    }

    #[cfg(unix)]
    #[test]
    fn command_formatter_reports_failure() {
        let formatter = CommandFormatter::new("false", vec![]);
        let result = formatter.format("a.go", "package a\n");
        assert!(matches!(
            result,
            Err(Error::FormatterExitError { .. }) | Err(Error::FormatterError { .. })
        ));
    }

    #[test]
    fn missing_program_is_a_formatter_error() {
        let formatter = CommandFormatter::new("typegen-no-such-formatter", vec![]);
        assert!(matches!(
            formatter.format("a.go", "package a\n"),
            Err(Error::FormatterError { .. })
        ));
    }
}
