use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::constants::{LIST_SEPARATOR, PAIR_SEPARATOR};
use crate::error::{Error, Result};
use crate::filter::InclusionSpec;
use crate::inflect::{last_identifier, Pluralization};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").expect("identifier pattern is valid")
});

/// Whether `s` is a valid Go identifier.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Rename `from` (a template identifier) to `to`, the concrete type as it is
/// spelled at the use site (`User`, `models.User`, `*User`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementPair {
    pub from: String,
    pub to: String,
}

impl ReplacementPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

impl Display for ReplacementPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{PAIR_SEPARATOR}{}", self.from, self.to)
    }
}

impl FromStr for ReplacementPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(PAIR_SEPARATOR).collect();
        match parts.as_slice() {
            [from, to] if is_identifier(from) && is_type_expression(to) => {
                Ok(Self::new(*from, *to))
            }
            _ => Err(Error::InvalidReplacementSpec(s.to_string())),
        }
    }
}

fn is_type_expression(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace) && is_identifier(last_identifier(s))
}

/// Parses `A=B,C=D` into ordered pairs.
///
/// Malformed entries are skipped with a warning; the list as a whole is
/// rejected only when nothing usable remains.
pub fn parse_replacements(list: &str) -> Result<Vec<ReplacementPair>> {
    let pairs: Vec<ReplacementPair> = list
        .split(LIST_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(|entry| match entry.parse() {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!("skipping replacement: {e}");
                None
            }
        })
        .collect();
    if pairs.is_empty() {
        return Err(Error::InvalidReplacementSpec(list.to_string()));
    }
    Ok(pairs)
}

/// Everything one instantiation needs. Built once per invocation and passed
/// by reference through every stage.
#[derive(Debug, Clone)]
pub struct InstantiationRequest {
    /// Directory path or `$GOPATH/src` import path of the template.
    pub template: String,
    /// Package name written into every generated file.
    pub package: String,
    pub replacements: Vec<ReplacementPair>,
    pub selection: InclusionSpec,
    /// Overrides the template's configured placeholder.
    pub placeholder: Option<String>,
    /// Overrides the template's configured pluralization.
    pub pluralization: Option<Pluralization>,
}

impl InstantiationRequest {
    pub fn new(
        template: impl Into<String>,
        package: impl Into<String>,
        replacements: Vec<ReplacementPair>,
        selection: InclusionSpec,
    ) -> Result<Self> {
        let package = package.into();
        if !is_identifier(&package) {
            return Err(Error::ConfigValidation(format!(
                "'{package}' is not a valid package name"
            )));
        }
        if replacements.is_empty() {
            return Err(Error::InvalidReplacementSpec(String::new()));
        }
        Ok(Self {
            template: template.into(),
            package,
            replacements,
            selection,
            placeholder: None,
            pluralization: None,
        })
    }

    pub fn with_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_pluralization(mut self, pluralization: Option<Pluralization>) -> Self {
        self.pluralization = pluralization;
        self
    }

    /// The concrete type named by the first pair; prefixes output files.
    /// Only the last identifier of a qualified type counts, so
    /// `models.User` gives `User`.
    pub fn concrete_name(&self) -> &str {
        last_identifier(&self.replacements[0].to)
    }
}
