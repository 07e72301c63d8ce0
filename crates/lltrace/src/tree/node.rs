use crate::grammar::Symbol;
use compact_str::CompactString;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A node of the concrete parse tree.
///
/// Children are owned by their parent. Only matched terminal leaves carry a
/// `value`: the token text they consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SyntaxTreeNode {
    pub symbol: Symbol,
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<SyntaxTreeNode>,
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<CompactString>,
}

impl SyntaxTreeNode {
    /// Create a childless node without a value.
    #[must_use]
    pub const fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            children: Vec::new(),
            value: None,
        }
    }

    /// Create an internal node.
    #[must_use]
    pub fn with_children(symbol: Symbol, children: Vec<Self>) -> Self {
        Self {
            symbol,
            children,
            value: None,
        }
    }

    /// Create a matched terminal leaf.
    #[must_use]
    pub fn leaf(symbol: Symbol, value: impl Into<CompactString>) -> Self {
        Self {
            symbol,
            children: Vec::new(),
            value: Some(value.into()),
        }
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The matched token text, for terminal leaves.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Nodes in pre-order, this node first.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Values of the matched terminal leaves, left to right.
    ///
    /// For a tree built from a successful trace this is the token stream.
    pub fn leaf_values(&self) -> impl Iterator<Item = &str> {
        self.preorder()
            .filter(|node| node.is_leaf() && node.symbol.is_terminal())
            .filter_map(Self::value)
    }

    /// Number of nodes in this subtree, this node included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Number of levels: 1 for a lone node.
    #[must_use]
    pub fn depth(&self) -> usize {
        // Walk with an explicit stack; derivations of long inputs are deep.
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

impl fmt::Display for SyntaxTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render_tree(self, &crate::render::RenderConfig::default()))
    }
}

/// Pre-order iterator over a tree.
pub struct Preorder<'a> {
    stack: Vec<&'a SyntaxTreeNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Drop for SyntaxTreeNode {
    fn drop(&mut self) {
        // Flatten the subtree before it goes away so that dropping a deep
        // tree does not recurse once per level.
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
