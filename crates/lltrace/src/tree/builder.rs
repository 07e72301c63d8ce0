use crate::driver::Configuration;
use crate::error::TreeError;
use crate::grammar::{Lookahead, Symbol};
use crate::tree::SyntaxTreeNode;
use compact_str::CompactString;

/// Node under construction; children are arena indices.
struct PendingNode {
    symbol: Symbol,
    children: Vec<usize>,
    value: Option<CompactString>,
}

/// Rebuild the parse tree from a successful, complete trace.
///
/// The node stack mirrors the driver's symbol stack (without `$`): an
/// expansion replaces the front node by its children, first child on top, and
/// a match pops the front leaf and fills in the consumed token.
///
/// # Errors
///
/// Fails on an empty trace, an initial configuration without a start symbol,
/// or any step that does not line up with the nodes built so far.
pub fn build_tree<C>(trace: C) -> Result<SyntaxTreeNode, TreeError>
where
    C: AsRef<[Configuration]>,
{
    let configurations = trace.as_ref();
    let first = configurations.first().ok_or(TreeError::EmptyTrace)?;
    let root_symbol = first.stack().get(1).cloned().ok_or(TreeError::MissingStartSymbol {
        stack_len: first.stack().len(),
    })?;
    if first.step() != 0 {
        return Err(TreeError::NonConsecutiveStep {
            index: 0,
            expected: 0,
            found: first.step(),
        });
    }

    let mut arena = vec![PendingNode {
        symbol: root_symbol,
        children: Vec::new(),
        value: None,
    }];
    // Top of the node stack is the end of the vector.
    let mut pending: Vec<usize> = vec![0];

    for (index, pair) in configurations.windows(2).enumerate() {
        let (previous, config) = (&pair[0], &pair[1]);
        let step = config.step();
        if step != previous.step() + 1 {
            return Err(TreeError::NonConsecutiveStep {
                index: index + 1,
                expected: previous.step() + 1,
                found: step,
            });
        }

        let front = pending.pop().ok_or(TreeError::NodeStackUnderflow { step })?;

        if let Some(production) = config.production() {
            if arena[front].symbol.as_nonterminal() != Some(production.left()) {
                return Err(TreeError::ExpansionMismatch {
                    step,
                    expected: production.left().clone(),
                    found: arena[front].symbol.clone(),
                });
            }

            let first_child = arena.len();
            arena.extend(production.expansion().map(|symbol| PendingNode {
                symbol: symbol.clone(),
                children: Vec::new(),
                value: None,
            }));
            let children: Vec<usize> = (first_child..arena.len()).collect();
            pending.extend(children.iter().rev());
            arena[front].children = children;
        } else {
            let consumed = previous
                .input()
                .front()
                .ok_or(TreeError::NoConsumedToken { step })?;
            let leaf = &mut arena[front];
            if !leaf.symbol.matches(consumed) {
                return Err(TreeError::MatchMismatch {
                    step,
                    consumed: consumed.clone(),
                    found: leaf.symbol.clone(),
                });
            }
            leaf.value = Some(token_text(consumed));
        }
    }

    if !pending.is_empty() {
        return Err(TreeError::UnfinishedNodes {
            pending: pending.len(),
        });
    }

    assemble(arena).ok_or(TreeError::EmptyTrace)
}

fn token_text(token: &Lookahead) -> CompactString {
    CompactString::from(token.as_str())
}

/// Turn the index arena into an owned tree.
///
/// Children always have larger indices than their parent, so walking the
/// arena backwards finishes every child before its parent needs it.
fn assemble(arena: Vec<PendingNode>) -> Option<SyntaxTreeNode> {
    let mut finished: Vec<Option<SyntaxTreeNode>> = Vec::with_capacity(arena.len());
    finished.resize_with(arena.len(), || None);

    for (index, node) in arena.into_iter().enumerate().rev() {
        let children = node
            .children
            .iter()
            .filter_map(|&child| finished[child].take())
            .collect();
        finished[index] = Some(SyntaxTreeNode {
            symbol: node.symbol,
            children,
            value: node.value,
        });
    }

    finished.into_iter().next().flatten()
}
