//! Recursive type indexing of node trees.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{ExtractError, Node, Result};

use super::TypeIndex;

/// Walks node trees and groups every tagged node by its type tag.
pub struct NodeTypeIndexer;

impl NodeTypeIndexer {
    /// Index all nodes reachable from `roots`.
    ///
    /// Each root is walked depth-first in pre-order: a node is recorded
    /// before any of its `context` children, and children are visited in
    /// sequence order. Untagged nodes are walked but not recorded.
    pub fn index(roots: &[Node]) -> Result<TypeIndex<'_>> {
        let mut index = TypeIndex::new();
        let mut visited: HashSet<*const Node> = HashSet::new();
        let mut visited_count = 0usize;

        for root in roots {
            let mut stack = vec![root];

            while let Some(node) = stack.pop() {
                if !visited.insert(node as *const Node) {
                    return Err(ExtractError::CyclicStructure {
                        node_type: node.node_type.clone(),
                    });
                }
                visited_count += 1;

                if let Some(tag) = node.node_type() {
                    index.push(tag, node);
                }

                // Reversed so the first child is popped first.
                stack.extend(node.children().iter().rev());
            }
        }

        debug!(
            roots = roots.len(),
            visited = visited_count,
            indexed = index.total_nodes(),
            tags = index.len(),
            "Built type index"
        );

        Ok(index)
    }
}

/// Index all nodes reachable from `roots`.
pub fn index(roots: &[Node]) -> Result<TypeIndex<'_>> {
    NodeTypeIndexer::index(roots)
}
