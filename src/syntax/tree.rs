use std::ops::Range;

use crate::constants::QUALIFIER_SEPARATOR;

/// Index of a node inside its [`SourceFile`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File,
    /// The name in the `package` clause.
    PackageName,
    Function { name: String },
    /// A function bound to a receiver type.
    Method { receiver: String, name: String },
    /// A `type` declaration; its specs are children.
    TypeDecl,
    TypeSpec { name: String },
    /// Imports, constants and variables.
    Other,
    Identifier,
    Comment,
}

impl NodeKind {
    /// Whether the node holds text the rewriter may change.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Identifier | NodeKind::Comment)
    }

    /// Whether the node takes part in declaration filtering.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::Function { .. } | NodeKind::Method { .. } | NodeKind::TypeDecl
        )
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Byte range in the original source.
    pub span: Range<usize>,
    /// First and last source rows the node occupies.
    pub rows: (usize, usize),
    /// Current text of identifiers, comments and the package name.
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Comments attached to a declaration, removed together with it.
    pub docs: Vec<NodeId>,
    pub removed: bool,
}

/// One parsed template file, owned exclusively by a single instantiation.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    source: String,
    nodes: Vec<Node>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let root = Node {
            kind: NodeKind::File,
            span: 0..source.len(),
            rows: (0, 0),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            docs: Vec::new(),
            removed: false,
        };
        Self { name: name.into(), source, nodes: vec![root] }
    }

    /// File name of the template, without directories.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Appends a node under `parent` and returns its id.
    pub fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        span: Range<usize>,
        rows: (usize, usize),
    ) -> NodeId {
        let text = if kind.is_text() || kind == NodeKind::PackageName {
            self.source[span.clone()].to_string()
        } else {
            String::new()
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            span,
            rows,
            text,
            parent: Some(parent),
            children: Vec::new(),
            docs: Vec::new(),
            removed: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Text of the node as it appears in the original source.
    pub fn original_text(&self, id: NodeId) -> &str {
        &self.source[self.node(id).span.clone()]
    }

    /// Top-level declarations subject to filtering, in source order.
    pub fn declarations(&self) -> Vec<NodeId> {
        self.node(self.root())
            .children
            .iter()
            .copied()
            .filter(|id| self.node(*id).kind.is_declaration())
            .collect()
    }

    /// `Name` for functions and type specs, `Receiver.Name` for methods.
    pub fn qualified_name(&self, id: NodeId) -> Option<String> {
        match &self.node(id).kind {
            NodeKind::Function { name } | NodeKind::TypeSpec { name } => {
                Some(name.clone())
            }
            NodeKind::Method { receiver, name } => {
                Some(format!("{receiver}{QUALIFIER_SEPARATOR}{name}"))
            }
            _ => None,
        }
    }

    /// Marks a node and its attached comments as removed.
    pub fn remove(&mut self, id: NodeId) {
        let docs = self.node(id).docs.clone();
        self.node_mut(id).removed = true;
        for doc in docs {
            self.node_mut(doc).removed = true;
        }
    }

    /// Whether the node or any of its ancestors is removed.
    pub fn is_removed(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            if node.removed {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Retained nodes in document order, skipping removed subtrees.
    pub fn retained(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.removed {
                continue;
            }
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Retained identifier and comment nodes.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        self.retained().into_iter().filter(|id| self.node(*id).kind.is_text()).collect()
    }

    /// Current package name, if the file has a package clause.
    pub fn package_name(&self) -> Option<&str> {
        self.nodes
            .iter()
            .find(|n| n.kind == NodeKind::PackageName)
            .map(|n| n.text.as_str())
    }

    /// Sets the name in the package clause.
    pub fn set_package_name(&mut self, package: &str) -> bool {
        match self.nodes.iter_mut().find(|n| n.kind == NodeKind::PackageName) {
            Some(node) => {
                node.text = package.to_string();
                true
            }
            None => false,
        }
    }

    /// Attaches comments adjacent to each declaration among `parent`'s
    /// children: the unbroken run of comment lines directly above it and a
    /// comment starting on its last line.
    pub fn attach_docs(&mut self, parent: NodeId) {
        let children = self.node(parent).children.clone();
        for (idx, &id) in children.iter().enumerate() {
            let kind = &self.node(id).kind;
            if !(kind.is_declaration() || matches!(kind, NodeKind::TypeSpec { .. })) {
                continue;
            }
            let (mut top, bottom) = self.node(id).rows;
            let mut docs = Vec::new();
            for &prev in children[..idx].iter().rev() {
                let node = self.node(prev);
                if node.kind != NodeKind::Comment || node.rows.1 + 1 < top {
                    break;
                }
                // A trailing comment of the previous line belongs to that line.
                if self.shares_row_with_code(prev) {
                    break;
                }
                docs.push(prev);
                top = node.rows.0;
            }
            docs.reverse();
            if let Some(&next) = children.get(idx + 1) {
                let node = self.node(next);
                if node.kind == NodeKind::Comment && node.rows.0 == bottom {
                    docs.push(next);
                }
            }
            self.node_mut(id).docs = docs;
        }
    }

    fn shares_row_with_code(&self, id: NodeId) -> bool {
        let start = self.node(id).span.start;
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        !self.source[line_start..start].trim().is_empty()
    }
}
