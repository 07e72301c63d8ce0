//! # Rendering
//!
//! Plain-text views of a derivation: the step table and the indented tree.
//!
//! ```text
//! step | stack           | input           | action
//! -----|-----------------|-----------------|-------
//! 0    | $ E             | id $            | start
//! 1    | $ E' T          | id $            | apply E → T E'
//! ```

use crate::driver::{Configuration, Trace};
use crate::tree::SyntaxTreeNode;
use std::fmt::Write;

/// Layout settings for the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Indentation added per tree level.
    pub indent: String,
    /// Minimum width of the step column.
    pub step_width: usize,
    /// Minimum width of the stack column.
    pub stack_width: usize,
    /// Minimum width of the input column.
    pub input_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: "  ".into(),
            step_width: 4,
            stack_width: 15,
            input_width: 15,
        }
    }
}

impl RenderConfig {
    /// Use `indent` for each tree level.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the minimum widths of the step, stack and input columns.
    #[must_use]
    pub const fn with_widths(mut self, step: usize, stack: usize, input: usize) -> Self {
        self.step_width = step;
        self.stack_width = stack;
        self.input_width = input;
        self
    }
}

/// What happened at a step, as shown in the action column.
#[must_use]
pub fn describe_action(previous: Option<&Configuration>, config: &Configuration) -> String {
    match (config.production(), previous) {
        (Some(production), _) => format!("apply {production}"),
        (None, Some(previous)) if config.step() > 0 => previous
            .input()
            .front()
            .map_or_else(|| "match".to_string(), |token| format!("match {token}")),
        (None, _) => "start".to_string(),
    }
}

/// Render the trace as a `step | stack | input | action` table.
#[must_use]
pub fn render_trace(trace: &Trace, config: &RenderConfig) -> String {
    let mut out = String::new();
    let (sw, kw, iw) = (config.step_width, config.stack_width, config.input_width);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{:<sw$} | {:<kw$} | {:<iw$} | action", "step", "stack", "input");
    let _ = writeln!(
        out,
        "{}-|-{}-|-{}-|-------",
        "-".repeat(sw),
        "-".repeat(kw),
        "-".repeat(iw)
    );

    let mut previous = None;
    for configuration in trace {
        let stack = join(configuration.stack().to_vec().iter());
        let input = join(configuration.input().as_slice().iter());
        let action = describe_action(previous, configuration);
        let _ = writeln!(
            out,
            "{:<sw$} | {:<kw$} | {:<iw$} | {}",
            configuration.step(),
            stack,
            input,
            action
        );
        previous = Some(configuration);
    }
    out
}

/// Render the tree, one node per line.
///
/// A node prints as its symbol, then ` (value)` for matched terminals, then
/// ` → [children]` when it has children.
#[must_use]
pub fn render_tree(node: &SyntaxTreeNode, config: &RenderConfig) -> String {
    let mut out = String::new();
    let mut pending = vec![(node, 0usize)];
    while let Some((node, depth)) = pending.pop() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&config.indent.repeat(depth));
        out.push_str(node.symbol.as_str());
        if let Some(value) = node.value() {
            let _ = write!(out, " ({value})");
        }
        if !node.is_leaf() {
            let _ = write!(out, " → [{}]", join(node.children.iter().map(|c| &c.symbol)));
        }
        pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    out
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let mut out = String::new();
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{item}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::drive;
    use crate::testing::{arithmetic_table, start_symbol, terminals};
    use crate::tree::build_tree;

    #[test]
    fn trace_table_rows() {
        let table = arithmetic_table();
        let trace = drive(&start_symbol(), &table, &terminals("id").unwrap()).unwrap();
        let text = render_trace(&trace, &RenderConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "step | stack           | input           | action");
        assert_eq!(lines[2], "0    | $ E             | id $            | start");
        assert_eq!(lines[3], "1    | $ E' T          | id $            | apply E → T E'");
        assert_eq!(lines[6], "4    | $ E' T'         | $               | match id");
        assert_eq!(lines[8], "6    | $               | $               | apply E' → ε");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn tree_lines() {
        let table = arithmetic_table();
        let trace = drive(&start_symbol(), &table, &terminals("id").unwrap()).unwrap();
        let tree = build_tree(&trace).unwrap();
        let text = render_tree(&tree, &RenderConfig::default());
        assert_eq!(
            text,
            "E → [T E']\n  T → [F T']\n    F → [id]\n      id (id)\n    T'\n  E'"
        );
        assert_eq!(tree.to_string(), text);
    }

    #[test]
    fn custom_indent() {
        let table = arithmetic_table();
        let trace = drive(&start_symbol(), &table, &terminals("num").unwrap()).unwrap();
        let tree = build_tree(&trace).unwrap();
        let text = render_tree(&tree, &RenderConfig::default().with_indent("\t"));
        assert!(text.lines().any(|line| line == "\t\t\tnum (num)"));
    }
}
