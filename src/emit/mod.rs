//! Emission of instantiated template files
//!
//! - `operation`: what emitting one file does to the output directory
//! - `formatter`: the final formatting pass over printed source

pub mod formatter;
pub mod operation;

use std::path::{Path, PathBuf};

use crate::constants::OUTPUT_NAME_SEPARATOR;
use crate::error::Result;
use crate::ext::PathExt;
use crate::ioutils::{read_existing, write_file};
use crate::syntax::{print, SourceFile};

pub use formatter::{CommandFormatter, SourceFormatter, TidyFormatter};
pub use operation::EmitOperation;

/// `lowercase(concrete)_basename(original)`, e.g. `User` + `map.go` gives
/// `user_map.go`.
pub fn output_file_name(concrete_name: &str, original: &str) -> Result<String> {
    let base = Path::new(original).base_name()?;
    Ok(format!("{}{OUTPUT_NAME_SEPARATOR}{base}", concrete_name.to_lowercase()))
}

/// A rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub content: String,
}

/// Writes instantiated files into an output directory.
#[derive(Debug, Clone)]
pub struct Emitter {
    output_dir: PathBuf,
    dry_run: bool,
}

impl Emitter {
    pub fn new(output_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self { output_dir: output_dir.into(), dry_run }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Prints and formats one file under its derived output name.
    pub fn render(
        &self,
        concrete_name: &str,
        file: &SourceFile,
        formatter: &dyn SourceFormatter,
    ) -> Result<GeneratedFile> {
        let file_name = output_file_name(concrete_name, file.name())?;
        let content = formatter.format(&file_name, &print(file))?;
        Ok(GeneratedFile { file_name, content })
    }

    /// Writes a rendered file unless the target already holds the same
    /// bytes. Later writes to the same target win.
    pub fn write(&self, generated: &GeneratedFile) -> Result<EmitOperation> {
        let target = self.output_dir.join(&generated.file_name);
        let operation = match read_existing(&target)? {
            Some(existing) if existing == generated.content => {
                EmitOperation::Unchanged { target }
            }
            existing => EmitOperation::Write {
                target,
                content: generated.content.clone(),
                target_exists: existing.is_some(),
            },
        };

        if let EmitOperation::Write { target, content, .. } = &operation {
            if !self.dry_run {
                write_file(content, target)?;
            }
        }
        log::info!("{}", operation.get_message(self.dry_run));
        Ok(operation)
    }

    /// Renders and writes one file, returning the path it was written to.
    pub fn emit(
        &self,
        concrete_name: &str,
        file: &SourceFile,
        formatter: &dyn SourceFormatter,
    ) -> Result<PathBuf> {
        let generated = self.render(concrete_name, file, formatter)?;
        Ok(self.write(&generated)?.target().clone())
    }
}
