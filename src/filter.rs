use indexmap::IndexSet;
use log::debug;

use crate::constants::LIST_SEPARATOR;
use crate::syntax::{NodeKind, SourceFile};

/// Which declarations of a template survive into the output.
///
/// Names are qualified as `Name` for functions and types and
/// `Receiver.Method` for methods, always using the template's own names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionSpec {
    pub include: IndexSet<String>,
    pub exclude: IndexSet<String>,
}

impl InclusionSpec {
    pub fn new(include: IndexSet<String>, exclude: IndexSet<String>) -> Self {
        Self { include, exclude }
    }

    /// Adds further exclusions, e.g. those configured by the template.
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_kept(&self, qualified_name: &str, placeholder: &str) -> bool {
        is_declaration_kept(qualified_name, &self.include, &self.exclude, placeholder)
    }
}

/// Parses a comma separated selection list. Blank entries are dropped.
pub fn parse_selection(list: &str) -> IndexSet<String> {
    list.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// The placeholder and excluded names are always dropped; a non-empty
/// include list keeps only the names it lists.
pub fn is_declaration_kept(
    qualified_name: &str,
    include: &IndexSet<String>,
    exclude: &IndexSet<String>,
    placeholder: &str,
) -> bool {
    if qualified_name == placeholder || exclude.contains(qualified_name) {
        return false;
    }
    include.is_empty() || include.contains(qualified_name)
}

/// Removes every top-level declaration `spec` does not keep.
///
/// Type declarations are decided per spec; a grouped declaration is removed
/// only once none of its specs survive. Returns the number of removed
/// declarations and specs.
pub fn filter_declarations(
    file: &mut SourceFile,
    spec: &InclusionSpec,
    placeholder: &str,
) -> usize {
    let mut removed = 0;
    for id in file.declarations() {
        if file.node(id).kind == NodeKind::TypeDecl {
            let specs: Vec<_> = file
                .node(id)
                .children
                .iter()
                .copied()
                .filter(|c| matches!(file.node(*c).kind, NodeKind::TypeSpec { .. }))
                .collect();
            let mut kept = 0;
            for type_spec in &specs {
                let name = file.qualified_name(*type_spec).unwrap_or_default();
                if spec.is_kept(&name, placeholder) {
                    kept += 1;
                } else {
                    debug!("{}: dropping type '{name}'", file.name());
                    file.remove(*type_spec);
                    removed += 1;
                }
            }
            if kept == 0 && !specs.is_empty() {
                file.remove(id);
            }
            continue;
        }

        let Some(name) = file.qualified_name(id) else { continue };
        if spec.is_kept(&name, placeholder) {
            debug!("{}: keeping '{name}'", file.name());
        } else {
            debug!("{}: dropping '{name}'", file.name());
            file.remove(id);
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{print, GoParser};

    fn set(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn placeholder_is_always_dropped() {
        assert!(!is_declaration_kept("T__", &set(&[]), &set(&[]), "T__"));
        assert!(!is_declaration_kept("T__", &set(&["T__"]), &set(&[]), "T__"));
    }

    #[test]
    fn exclude_names_a_single_receiver() {
        let exclude = set(&["Item.helper"]);
        assert!(!is_declaration_kept("Item.helper", &set(&[]), &exclude, "T__"));
        assert!(is_declaration_kept("Order.helper", &set(&[]), &exclude, "T__"));
    }

    #[test]
    fn include_keeps_only_listed_names() {
        let include = set(&["Slice"]);
        assert!(is_declaration_kept("Slice", &include, &set(&[]), "T__"));
        assert!(!is_declaration_kept("Slice.Map", &include, &set(&[]), "T__"));
        assert!(!is_declaration_kept("Other", &include, &set(&[]), "T__"));
    }

    #[test]
    fn exclude_beats_include() {
        let both = set(&["Slice"]);
        assert!(!is_declaration_kept("Slice", &both, &both, "T__"));
    }

    #[test]
    fn parses_selection_lists() {
        assert_eq!(parse_selection("A, B.c,,A"), set(&["A", "B.c"]));
        assert!(parse_selection("").is_empty());
    }

    #[test]
    fn filters_methods_by_receiver() {
        let src = "package p\n\ntype T__ interface{}\n\nfunc (i Item) helper() {}\n\nfunc (o *Order) helper() {}\n";
        let mut file = GoParser::new().unwrap().parse("p.go", src).unwrap();
        let spec = InclusionSpec::default().with_excluded(["Item.helper"]);
        assert_eq!(filter_declarations(&mut file, &spec, "T__"), 2);
        assert_eq!(print(&file), "package p\n\nfunc (o *Order) helper() {}\n");
    }

    #[test]
    fn grouped_types_are_filtered_per_spec() {
        let src = "package p\n\ntype (\n\tT__ interface{}\n\tList []T__\n)\n";
        let mut file = GoParser::new().unwrap().parse("p.go", src).unwrap();
        filter_declarations(&mut file, &InclusionSpec::default(), "T__");
        assert_eq!(print(&file), "package p\n\ntype (\n\tList []T__\n)\n");
    }
}
