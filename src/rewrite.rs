use log::debug;

use crate::inflect::Pluralization;
use crate::instantiate::ReplacementPair;
use crate::matcher::Morphology;
use crate::syntax::SourceFile;

/// Applies replacement pairs to every retained identifier and comment.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter {
    pluralization: Pluralization,
}

impl Rewriter {
    pub fn new(pluralization: Pluralization) -> Self {
        Self { pluralization }
    }

    /// Runs one pass per pair, in order, so a later pair sees the output of
    /// the earlier ones. Returns the number of changed nodes.
    pub fn rewrite(&self, file: &mut SourceFile, pairs: &[ReplacementPair]) -> usize {
        let nodes = file.text_nodes();
        let mut changed = 0;
        for pair in pairs {
            let morphology = Morphology::new(&pair.from, &pair.to, self.pluralization);
            let mut pass_changes = 0;
            for &id in &nodes {
                let node = file.node_mut(id);
                let rewritten = morphology.apply(&node.text);
                if rewritten != node.text {
                    node.text = rewritten;
                    pass_changes += 1;
                }
            }
            debug!("{}: {} -> {} changed {pass_changes} nodes", file.name(), pair.from, pair.to);
            changed += pass_changes;
        }
        changed
    }
}
