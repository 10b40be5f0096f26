use tree_sitter::{Node as TsNode, Parser};

use super::tree::{NodeId, NodeKind, SourceFile};
use crate::error::{Error, Result};

/// Tree-sitter node kinds that carry an identifier.
const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "field_identifier",
    "package_identifier",
    "label_name",
];

/// Parses Go source text into an owned [`SourceFile`] arena.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parses one file. `name` is used for diagnostics and output naming.
    pub fn parse(&mut self, name: &str, source: &str) -> Result<SourceFile> {
        let tree = self.parser.parse(source, None).ok_or_else(|| Error::ParseError {
            file: name.to_string(),
            line: 1,
            column: 1,
        })?;
        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|n| (n.start_position().row + 1, n.start_position().column + 1))
                .unwrap_or((1, 1));
            return Err(Error::ParseError { file: name.to_string(), line, column });
        }

        let mut file = SourceFile::new(name, source);
        let file_root = file.root();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            lower_top_level(&mut file, file_root, child, source);
        }
        file.attach_docs(file_root);
        log::trace!("parsed '{}' into {} nodes", name, file.len());
        Ok(file)
    }
}

fn first_error(node: TsNode<'_>) -> Option<TsNode<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().filter(|c| c.has_error()).find_map(first_error)
}

fn rows(node: TsNode<'_>) -> (usize, usize) {
    (node.start_position().row, node.end_position().row)
}

fn text<'s>(node: TsNode<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

fn lower_top_level(file: &mut SourceFile, parent: NodeId, node: TsNode<'_>, source: &str) {
    match node.kind() {
        "package_clause" => {
            let mut cursor = node.walk();
            let name = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "package_identifier");
            if let Some(name) = name {
                file.push(parent, NodeKind::PackageName, name.byte_range(), rows(name));
            }
        }
        "function_declaration" => {
            let name = node
                .child_by_field_name("name")
                .map(|n| text(n, source).to_string())
                .unwrap_or_default();
            let id = file.push(parent, NodeKind::Function { name }, node.byte_range(), rows(node));
            collect_leaves(file, id, node);
        }
        "method_declaration" => {
            let name = node
                .child_by_field_name("name")
                .map(|n| text(n, source).to_string())
                .unwrap_or_default();
            let receiver = node
                .child_by_field_name("receiver")
                .and_then(|r| receiver_type_name(r, source))
                .unwrap_or_default();
            let id = file.push(
                parent,
                NodeKind::Method { receiver, name },
                node.byte_range(),
                rows(node),
            );
            collect_leaves(file, id, node);
        }
        "type_declaration" => {
            let id = file.push(parent, NodeKind::TypeDecl, node.byte_range(), rows(node));
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "type_spec" | "type_alias" => {
                        let name = child
                            .child_by_field_name("name")
                            .map(|n| text(n, source).to_string())
                            .unwrap_or_default();
                        let spec = file.push(
                            id,
                            NodeKind::TypeSpec { name },
                            child.byte_range(),
                            rows(child),
                        );
                        collect_leaves(file, spec, child);
                    }
                    _ => collect_leaves(file, id, child),
                }
            }
            file.attach_docs(id);
        }
        "comment" => {
            file.push(parent, NodeKind::Comment, node.byte_range(), rows(node));
        }
        _ => {
            let id = file.push(parent, NodeKind::Other, node.byte_range(), rows(node));
            collect_leaves(file, id, node);
        }
    }
}

/// Adds every identifier and comment below `node` as a child of `parent`.
fn collect_leaves(file: &mut SourceFile, parent: NodeId, node: TsNode<'_>) {
    let kind = node.kind();
    if kind == "comment" {
        file.push(parent, NodeKind::Comment, node.byte_range(), rows(node));
        return;
    }
    if IDENTIFIER_KINDS.contains(&kind) {
        file.push(parent, NodeKind::Identifier, node.byte_range(), rows(node));
        return;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    for child in children {
        collect_leaves(file, parent, child);
    }
}

/// Receiver type of a method: `(t T)`, `(t *T)` and `(t *T[K])` all give `T`.
fn receiver_type_name(receiver: TsNode<'_>, source: &str) -> Option<String> {
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")?;
    let mut ty = param.child_by_field_name("type")?;
    if ty.kind() == "pointer_type" {
        ty = ty.named_child(0)?;
    }
    if ty.kind() == "generic_type" {
        ty = ty.child_by_field_name("type")?;
    }
    Some(text(ty, source).to_string())
}
