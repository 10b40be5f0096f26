//! Configuration loading and management

use crate::constants::{CONFIG_FILENAMES, DEFAULT_FORMATTER, DEFAULT_PLACEHOLDER};
use crate::emit::{CommandFormatter, SourceFormatter, TidyFormatter};
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_patterns;
use crate::inflect::Pluralization;
use crate::instantiate::is_identifier;
use serde::Deserialize;
use std::path::Path;

/// Settings a template ships next to its sources. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Identifier standing in for the type being instantiated.
    #[serde(default = "get_default_placeholder")]
    pub placeholder: String,
    #[serde(default)]
    pub pluralization: Pluralization,
    /// Qualified declaration names never emitted for this template.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// File name globs of template files to skip.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// External formatter, `[program, args...]`.
    #[serde(default)]
    pub formatter: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            placeholder: get_default_placeholder(),
            pluralization: Pluralization::default(),
            exclude: Vec::new(),
            ignore: Vec::new(),
            formatter: Vec::new(),
        }
    }
}

impl TemplateConfig {
    /// Loads the first config file found in `template_root`, or the defaults
    /// when the template has none.
    pub fn load_config<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        let template_root = template_root.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = template_root.join(config_file_name);

            if config_file_path.exists() {
                log::debug!("Loading config from {}", config_file_path.display());
                let content = std::fs::read_to_string(&config_file_path)?;
                let config: TemplateConfig = if config_file_name.ends_with(".json") {
                    serde_json::from_str(&content)?
                } else {
                    serde_yaml::from_str(&content)?
                };
                config.validate()?;
                return Ok(config);
            }
        }

        log::debug!("No config file in {}, using defaults", template_root.display());
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.placeholder) {
            return Err(Error::ConfigValidation(format!(
                "placeholder '{}' must be an identifier",
                self.placeholder
            )));
        }
        if self.formatter.first().is_some_and(|program| program.trim().is_empty()) {
            return Err(Error::ConfigValidation("formatter program must not be empty".into()));
        }
        parse_ignore_patterns(self.ignore.as_slice())?;
        Ok(())
    }

    /// The formatter applied to every emitted file: the configured command,
    /// else `gofmt` from `PATH`, else the built-in tidy pass.
    pub fn formatter(&self) -> Box<dyn SourceFormatter> {
        if let Some(formatter) = CommandFormatter::from_command(&self.formatter) {
            return Box::new(formatter);
        }
        match which::which(DEFAULT_FORMATTER) {
            Ok(path) => {
                log::debug!("Using {} as formatter", path.display());
                Box::new(CommandFormatter::new(path.to_string_lossy().into_owned(), Vec::new()))
            }
            Err(e) => {
                log::warn!(
                    "{DEFAULT_FORMATTER} not found ({e}); generated files keep the template layout"
                );
                Box::new(TidyFormatter)
            }
        }
    }
}

fn get_default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = TemplateConfig::load_config(tmp.path()).unwrap();
        assert_eq!(config, TemplateConfig::default());
        assert_eq!(config.placeholder, "T__");
    }

    #[test]
    fn loads_yaml_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("typegen.yaml"),
            "placeholder: Elem\npluralization: inflected\nexclude:\n  - Elem.debug\nignore:\n  - '*_test.go'\n",
        )
        .unwrap();
        let config = TemplateConfig::load_config(tmp.path()).unwrap();
        assert_eq!(config.placeholder, "Elem");
        assert_eq!(config.pluralization, Pluralization::Inflected);
        assert_eq!(config.exclude, vec!["Elem.debug"]);
        assert_eq!(config.ignore, vec!["*_test.go"]);
    }

    #[test]
    fn json_takes_precedence_over_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("typegen.json"), r#"{"placeholder": "J__"}"#).unwrap();
        std::fs::write(tmp.path().join("typegen.yaml"), "placeholder: Y__\n").unwrap();
        let config = TemplateConfig::load_config(tmp.path()).unwrap();
        assert_eq!(config.placeholder, "J__");
    }

    #[test]
    fn rejects_invalid_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("typegen.yml"), "placeholder: 'not valid'\n").unwrap();
        assert!(matches!(
            TemplateConfig::load_config(tmp.path()),
            Err(Error::ConfigValidation(_))
        ));
    }

    #[test]
    fn rejects_unknown_fields() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("typegen.json"), r#"{"placeholdr": "T__"}"#).unwrap();
        assert!(matches!(
            TemplateConfig::load_config(tmp.path()),
            Err(Error::JSONParseError(_))
        ));
    }

    #[test]
    fn rejects_empty_formatter_program() {
        let config = TemplateConfig { formatter: vec![" ".into()], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn configured_formatter_wins_over_gofmt() {
        let config = TemplateConfig { formatter: vec!["cat".into()], ..Default::default() };
        let source = "package a\n\ntype A struct {\n\tLongName int\n\tB  int\n}\n";
        assert_eq!(config.formatter().format("a.go", source).unwrap(), source);
    }
}
