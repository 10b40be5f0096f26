//! Go source trees for template files
//!
//! - `tree`: the owned arena a template file is lowered into
//! - `parse`: tree-sitter based parsing into that arena
//! - `print`: lossless printing of an edited arena back to source

pub mod parse;
pub mod print;
pub mod tree;

pub use parse::GoParser;
pub use print::print;
pub use tree::{Node, NodeId, NodeKind, SourceFile};
