use thiserror::Error;

use crate::ast::{Node, NodeId, Slot, Tag};

/// Errors raised by the syntax tree arena and its cursor.
///
/// None of these can be caused by a well-formed program on a tree built by the
/// parser, except [`TreeError::CapacityExceeded`] for programs larger than the
/// configured node budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The arena is full.
    #[error("Internal error: parse tree is out of memory ({capacity} nodes).")]
    CapacityExceeded {
        /// The fixed node capacity of the tree.
        capacity: usize,
    },
    /// Parentheses, brackets or blocks nest deeper than the parser allows.
    #[error("Internal error: program nests deeper than {limit} levels.")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
    },
    /// `ascend` was called with an empty ancestor stack.
    #[error("Internal error: cannot ascend above the root node.")]
    AscendPastRoot,
    /// `descend` named a slot the current node does not occupy.
    #[error("Internal error: {tag} node has no child in slot {slot}.")]
    EmptySlot {
        /// Tag of the current node.
        tag:  Tag,
        /// The requested slot.
        slot: Slot,
    },
    /// A walker found a node of the wrong kind.
    #[error("Internal error: expecting {expected}, found {found}.")]
    UnexpectedNode {
        /// The tag the walker needed.
        expected: Tag,
        /// The tag actually found.
        found:    Tag,
    },
    /// A node identity that does not belong to the tree.
    #[error("Internal error: node {0} is not in the tree.")]
    UnknownNode(NodeId),
    /// The tree has no root yet.
    #[error("Internal error: the parse tree is empty.")]
    Empty,
}

impl TreeError {
    /// Builds the error for a walker that needed `expected` but met `found`.
    #[must_use]
    pub const fn unexpected(expected: Tag, found: &Node) -> Self {
        Self::UnexpectedNode { expected,
                               found: found.tag() }
    }
}
