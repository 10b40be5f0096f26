use std::fmt::Display;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::TemplateConfig;
use crate::emit::{EmitOperation, Emitter, GeneratedFile};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::filter::filter_declarations;
use crate::loader::{get_template, template_files};
use crate::rewrite::Rewriter;
use crate::syntax::{GoParser, SourceFile};

use super::request::InstantiationRequest;

/// Progress of one instantiation. Any stage may fail, which aborts the
/// whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Located,
    Parsed,
    Filtered,
    Rewritten,
    Relabeled,
    Emitted,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Located => "located",
            Stage::Parsed => "parsed",
            Stage::Filtered => "filtered",
            Stage::Rewritten => "rewritten",
            Stage::Relabeled => "relabeled",
            Stage::Emitted => "emitted",
        };
        write!(f, "{s}")
    }
}

/// One instantiation of a template, owning its private copy of the parsed
/// files from parsing until emission.
#[derive(Debug)]
pub struct Instantiation<'r> {
    request: &'r InstantiationRequest,
    stage: Stage,
    template_dir: PathBuf,
    config: TemplateConfig,
    files: Vec<SourceFile>,
}

impl<'r> Instantiation<'r> {
    /// Resolves the template directory and its configuration; request
    /// overrides win over the configuration.
    pub fn locate(request: &'r InstantiationRequest) -> Result<Self> {
        let template_dir = get_template(&request.template)?;
        let mut config = TemplateConfig::load_config(&template_dir)?;
        if let Some(placeholder) = &request.placeholder {
            config.placeholder = placeholder.clone();
        }
        if let Some(pluralization) = request.pluralization {
            config.pluralization = pluralization;
        }
        config.validate()?;

        let instantiation =
            Self { request, stage: Stage::Located, template_dir, config, files: Vec::new() };
        instantiation.log_stage();
        Ok(instantiation)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Parses every template file. A single malformed file fails the request.
    pub fn parse(mut self) -> Result<Self> {
        let paths = template_files(&self.template_dir, self.config.ignore.as_slice())?;
        if paths.is_empty() {
            return Err(Error::TemplateNotFound {
                location: self.request.template.clone(),
                reason: "no Go source files".to_string(),
            });
        }

        let mut parser = GoParser::new()?;
        for path in paths {
            let name = path.base_name()?.to_string();
            let source = std::fs::read_to_string(&path)?;
            self.files.push(parser.parse(&name, &source)?);
        }
        self.advance(Stage::Parsed);
        Ok(self)
    }

    /// Drops declarations the request and template do not keep. Decided on
    /// the template's own names, before anything is renamed.
    pub fn filter(mut self) -> Self {
        let spec = self.request.selection.clone().with_excluded(self.config.exclude.clone());
        for file in &mut self.files {
            let removed = filter_declarations(file, &spec, &self.config.placeholder);
            debug!("{}: removed {removed} declarations", file.name());
        }
        self.advance(Stage::Filtered);
        self
    }

    pub fn rewrite(mut self) -> Self {
        let rewriter = Rewriter::new(self.config.pluralization);
        for file in &mut self.files {
            rewriter.rewrite(file, &self.request.replacements);
        }
        self.advance(Stage::Rewritten);
        self
    }

    /// Moves every file into the requested package.
    pub fn relabel(mut self) -> Self {
        for file in &mut self.files {
            if !file.set_package_name(&self.request.package) {
                warn!("{}: no package clause to relabel", file.name());
            }
        }
        self.advance(Stage::Relabeled);
        self
    }

    /// Prints and formats every file without touching the filesystem.
    pub fn render(&self, emitter: &Emitter) -> Result<Vec<GeneratedFile>> {
        let formatter = self.config.formatter();
        self.files
            .iter()
            .map(|file| emitter.render(self.request.concrete_name(), file, formatter.as_ref()))
            .collect()
    }

    /// Renders all files first, then writes them in template file order.
    /// Files written before a failing write are not rolled back.
    pub fn emit(mut self, emitter: &Emitter) -> Result<Vec<EmitOperation>> {
        let generated = self.render(emitter)?;
        let operations = generated
            .iter()
            .map(|file| emitter.write(file))
            .collect::<Result<Vec<_>>>()?;
        self.advance(Stage::Emitted);
        Ok(operations)
    }

    fn advance(&mut self, stage: Stage) {
        self.stage = stage;
        self.log_stage();
    }

    fn log_stage(&self) {
        info!(
            "{} {} ({} files)",
            self.request.template,
            self.stage,
            self.files.len()
        );
    }
}

/// Runs one request from location to emitted files.
pub fn instantiate(
    request: &InstantiationRequest,
    emitter: &Emitter,
) -> Result<Vec<EmitOperation>> {
    info!(
        "generating {} from {} into package {}",
        request.concrete_name(),
        request.template,
        request.package
    );
    for pair in &request.replacements {
        debug!("replacing {} -> {}", pair.from, pair.to);
    }
    Instantiation::locate(request)?.parse()?.filter().rewrite().relabel().emit(emitter)
}

/// Runs one request and returns the generated files without writing them.
pub fn generate(request: &InstantiationRequest) -> Result<Vec<GeneratedFile>> {
    let emitter = Emitter::new(PathBuf::new(), true);
    Instantiation::locate(request)?.parse()?.filter().rewrite().relabel().render(&emitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::InclusionSpec;
    use crate::instantiate::ReplacementPair;

    const MAP: &str = "package iterator\n\n// T__Slice is a slice of T__.\ntype T__Slice []T__\n";
    const MARKER: &str = "package iterator\n\n// T__ stands in for the element type.\ntype T__ interface{}\n";

    fn template() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("map.go"), MAP).unwrap();
        std::fs::write(tmp.path().join("t.go"), MARKER).unwrap();
        tmp
    }

    fn request(dir: &std::path::Path) -> InstantiationRequest {
        InstantiationRequest::new(
            dir.to_str().unwrap(),
            "user",
            vec![ReplacementPair::new("T__", "User")],
            InclusionSpec::default(),
        )
        .unwrap()
    }

    #[test]
    fn stages_advance_in_order() {
        let tmp = template();
        let request = request(tmp.path());
        let located = Instantiation::locate(&request).unwrap();
        assert_eq!(located.stage(), Stage::Located);
        let parsed = located.parse().unwrap();
        assert_eq!(parsed.stage(), Stage::Parsed);
        assert_eq!(parsed.files().len(), 2);
        let relabeled = parsed.filter().rewrite().relabel();
        assert_eq!(relabeled.stage(), Stage::Relabeled);
        assert!(relabeled.files().iter().all(|f| f.package_name() == Some("user")));
    }

    #[test]
    fn generate_renders_every_file() {
        let tmp = template();
        let files = generate(&request(tmp.path())).unwrap();
        assert_eq!(
            files,
            vec![
                GeneratedFile {
                    file_name: "user_map.go".into(),
                    content: "package user\n\n// UserSlice is a slice of User.\ntype UserSlice []User\n"
                        .into(),
                },
                GeneratedFile { file_name: "user_t.go".into(), content: "package user\n".into() },
            ]
        );
    }

    #[test]
    fn renamed_struct_fields_are_realigned() {
        if which::which("gofmt").is_err() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("info.go"),
            "package iterator\n\ntype T__Info struct {\n\tT__ID int    // id of the T__\n\tName  string // display name\n}\n",
        )
        .unwrap();
        let request = InstantiationRequest::new(
            tmp.path().to_str().unwrap(),
            "user",
            vec![ReplacementPair::new("T__", "Customer")],
            InclusionSpec::default(),
        )
        .unwrap();
        let files = generate(&request).unwrap();
        assert_eq!(files[0].file_name, "customer_info.go");
        assert_eq!(
            files[0].content,
            "package user\n\n\
             type CustomerInfo struct {\n\
             \tCustomerID int    // id of the Customer\n\
             \tName       string // display name\n\
             }\n"
        );
    }

    #[test]
    fn request_placeholder_overrides_config() {
        let tmp = template();
        std::fs::write(tmp.path().join("typegen.yaml"), "placeholder: Elem\n").unwrap();
        let request = request(tmp.path()).with_placeholder(Some("T__".into()));
        let located = Instantiation::locate(&request).unwrap();
        assert_eq!(located.config().placeholder, "T__");
    }

    #[test]
    fn empty_template_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let request = request(tmp.path());
        let result = Instantiation::locate(&request).unwrap().parse();
        assert!(matches!(result, Err(Error::TemplateNotFound { .. })));
    }

    #[test]
    fn parse_error_aborts_before_emission() {
        let tmp = template();
        std::fs::write(tmp.path().join("broken.go"), "package iterator\n\nfunc (\n").unwrap();
        let out = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(out.path(), false);
        let result = instantiate(&request(tmp.path()), &emitter);
        assert!(matches!(result, Err(Error::ParseError { .. })));
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
