//! # Syntax Tree Builder
//!
//! Reconstructs the concrete parse tree from a derivation [`Trace`].
//!
//! Every expansion in the trace becomes an internal node whose children
//! mirror the production's right-hand side (none for `ε`), and every terminal
//! match fills in the leaf it consumed. The builder checks that each step
//! lines up with the nodes built so far and fails instead of producing a
//! misshapen tree.
//!
//! [`Trace`]: crate::driver::Trace

mod builder;
mod node;

pub use builder::build_tree;
pub use node::{Preorder, SyntaxTreeNode};
