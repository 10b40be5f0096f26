use crate::{
    cli::Args,
    constants::TEMPLATE_EXTENSION,
    emit::{EmitOperation, Emitter},
    error::{Error, Result},
    ext::PathExt,
    filter::{parse_selection, InclusionSpec},
    instantiate::{instantiate, parse_replacements, InstantiationRequest},
    syntax::GoParser,
};
use std::path::Path;

/// Main CLI runner that turns arguments into one instantiation request
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete generation workflow
    pub fn run(self) -> Result<Vec<EmitOperation>> {
        let request = self.build_request()?;
        let emitter = Emitter::new(&self.args.output_dir, self.args.dry_run);
        let operations = instantiate(&request, &emitter)?;

        let written = operations
            .iter()
            .filter(|op| matches!(op, EmitOperation::Write { .. }))
            .count();
        println!(
            "Generated {} file(s) for {} in {} ({} unchanged).",
            written,
            request.concrete_name(),
            emitter.output_dir().display(),
            operations.len() - written
        );
        Ok(operations)
    }

    /// Parses the replacement and selection flags into a request
    fn build_request(&self) -> Result<InstantiationRequest> {
        let replacements = parse_replacements(&self.args.replace)?;
        let selection = InclusionSpec::new(
            self.args.include.as_deref().map(parse_selection).unwrap_or_default(),
            self.args.exclude.as_deref().map(parse_selection).unwrap_or_default(),
        );
        let package = match &self.args.package {
            Some(package) => package.clone(),
            None => detect_package(&self.args.output_dir)?,
        };

        Ok(InstantiationRequest::new(
            self.args.template.as_str(),
            package,
            replacements,
            selection,
        )?
        .with_placeholder(self.args.placeholder.clone())
        .with_pluralization(self.args.pluralization))
    }
}

/// Reads the package clause of the first parseable Go file in `output_dir`.
pub fn detect_package(output_dir: &Path) -> Result<String> {
    let unresolved = || Error::PackageUnresolved {
        output_dir: output_dir.display().to_string(),
    };
    let Ok(entries) = std::fs::read_dir(output_dir) else {
        return Err(unresolved());
    };

    let mut candidates: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXTENSION)
        })
        .collect();
    candidates.sort();

    let mut parser = GoParser::new()?;
    for path in candidates {
        let Ok(source) = std::fs::read_to_string(&path) else { continue };
        let name = path.base_name()?;
        match parser.parse(name, &source) {
            Ok(file) => {
                if let Some(package) = file.package_name() {
                    log::debug!("Using package '{package}' declared in {}", path.display());
                    return Ok(package.to_string());
                }
            }
            Err(e) => log::debug!("Skipping {} for package detection: {e}", path.display()),
        }
    }
    Err(unresolved())
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn detects_package_from_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a_broken.go"), "package (\n").unwrap();
        std::fs::write(tmp.path().join("b_model.go"), "package model\n\ntype User struct{}\n")
            .unwrap();
        assert_eq!(detect_package(tmp.path()).unwrap(), "model");
    }

    #[test]
    fn missing_package_is_unresolved() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "package model\n").unwrap();
        assert!(matches!(detect_package(tmp.path()), Err(Error::PackageUnresolved { .. })));
        assert!(matches!(
            detect_package(&tmp.path().join("missing")),
            Err(Error::PackageUnresolved { .. })
        ));
    }

    #[test]
    fn builds_request_from_flags() {
        let args = Args::parse_from([
            "typegen",
            "--src",
            "iterator",
            "--replace",
            "T__=User,bad,U__=int",
            "--exclude",
            "T__Slice.Reduce",
            "--package",
            "user",
            "--placeholder",
            "T__",
        ]);
        let request = Runner::new(args).build_request().unwrap();
        assert_eq!(request.template, "iterator");
        assert_eq!(request.package, "user");
        assert_eq!(request.replacements.len(), 2);
        assert!(request.selection.include.is_empty());
        assert!(request.selection.exclude.contains("T__Slice.Reduce"));
        assert_eq!(request.placeholder.as_deref(), Some("T__"));
        assert_eq!(request.pluralization, None);
    }

    #[test]
    fn rejects_replacements_without_pairs() {
        let args = Args::parse_from([
            "typegen", "--src", "iterator", "--replace", "nonsense", "--package", "user",
        ]);
        assert!(matches!(
            Runner::new(args).build_request(),
            Err(Error::InvalidReplacementSpec(_))
        ));
    }
}
