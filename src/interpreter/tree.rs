use std::{fmt, ops::Index};

use crate::{
    ast::{Node, NodeId, Slot, Tag},
    error::TreeError,
};

/// Result type used by tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Node budget used when no other capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Deepest nesting of parentheses, brackets and statement blocks the parser
/// accepts, whatever the node budget.
///
/// Every nesting level costs at least one node, so a tree within the default
/// budget never reaches this limit.
pub const MAX_NESTING: usize = DEFAULT_CAPACITY;

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    line: usize,
}

/// A bounded, append-only arena of syntax nodes.
///
/// The parser allocates children before their parent, so every child slot of
/// a node refers to an entry that already exists. The last node allocated by
/// a successful parse is marked as the root.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    entries:  Vec<Entry>,
    capacity: usize,
    root:     Option<NodeId>,
}

impl SyntaxTree {
    /// Creates an empty tree that can hold up to `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
               capacity,
               root: None }
    }

    /// Appends a node that starts on source line `line`.
    ///
    /// # Errors
    /// Returns [`TreeError::CapacityExceeded`] when the tree is full.
    ///
    /// # Example
    /// ```
    /// use core_interp::{ast::Node, error::TreeError, interpreter::tree::SyntaxTree};
    ///
    /// let mut tree = SyntaxTree::with_capacity(1);
    /// assert!(tree.alloc(Node::Int(1), 1).is_ok());
    /// assert_eq!(tree.alloc(Node::Int(2), 1),
    ///            Err(TreeError::CapacityExceeded { capacity: 1 }));
    /// ```
    pub fn alloc(&mut self, node: Node, line: usize) -> TreeResult<NodeId> {
        if self.entries.len() >= self.capacity {
            return Err(TreeError::CapacityExceeded { capacity: self.capacity });
        }
        let capacity = self.capacity;
        let id = u32::try_from(self.entries.len()).map(NodeId)
                                                  .map_err(|_| TreeError::CapacityExceeded { capacity })?;
        self.entries.push(Entry { node, line });
        Ok(id)
    }

    /// Marks `id` as the root of the tree.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownNode`] if `id` was not allocated here.
    pub fn set_root(&mut self, id: NodeId) -> TreeResult<()> {
        if id.index() >= self.entries.len() {
            return Err(TreeError::UnknownNode(id));
        }
        self.root = Some(id);
        Ok(())
    }

    /// Returns the root node, if parsing completed.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node with identity `id`.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownNode`] for an identity from another tree.
    pub fn get(&self, id: NodeId) -> TreeResult<&Node> {
        self.entries
            .get(id.index())
            .map(|entry| &entry.node)
            .ok_or(TreeError::UnknownNode(id))
    }

    /// Returns the source line of the node, or `0` for an unknown identity.
    #[must_use]
    pub fn line(&self, id: NodeId) -> usize {
        self.entries.get(id.index()).map_or(0, |entry| entry.line)
    }

    /// Returns the number of allocated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no node has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the fixed node capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a cursor positioned at the root.
    ///
    /// # Errors
    /// Returns [`TreeError::Empty`] if no root has been set.
    pub fn cursor(&self) -> TreeResult<Cursor<'_>> {
        let root = self.root.ok_or(TreeError::Empty)?;
        Ok(Cursor { tree:      self,
                    current:   root,
                    ancestors: Vec::new(), })
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Index<NodeId> for SyntaxTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.entries[id.index()].node
    }
}

/// Navigation state over a [`SyntaxTree`]: the current node and the stack of
/// its ancestors.
///
/// # Example
/// ```
/// use core_interp::{ast::{Slot, Tag}, interpreter::parser::parse};
///
/// let parsed = parse("program int A; begin A = 1; end", 100).unwrap();
/// let mut cursor = parsed.tree.cursor().unwrap();
///
/// assert_eq!(cursor.tag(), Tag::Program);
/// cursor.descend(Slot::Second).unwrap();
/// assert_eq!(cursor.tag(), Tag::StmtSeq);
/// assert_eq!(cursor.alt(), 1);
/// cursor.ascend().unwrap();
/// assert!(cursor.ascend().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tree:      &'t SyntaxTree,
    current:   NodeId,
    ancestors: Vec<NodeId>,
}

impl<'t> Cursor<'t> {
    /// Returns the identity of the current node.
    #[must_use]
    pub const fn current(&self) -> NodeId {
        self.current
    }

    /// Returns the current node.
    #[must_use]
    pub fn node(&self) -> &'t Node {
        let tree: &'t SyntaxTree = self.tree;
        &tree[self.current]
    }

    /// Returns the tag of the current node.
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.node().tag()
    }

    /// Returns the alternative of the current node.
    #[must_use]
    pub fn alt(&self) -> u8 {
        self.node().alt()
    }

    /// Returns the source line of the current node.
    #[must_use]
    pub fn line(&self) -> usize {
        self.tree.line(self.current)
    }

    /// Returns the number of ancestors above the current node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Moves to the child in `slot`, remembering the current node.
    ///
    /// # Errors
    /// Returns [`TreeError::EmptySlot`] if the current production has no
    /// child there.
    pub fn descend(&mut self, slot: Slot) -> TreeResult<()> {
        let child = self.node()
                        .child(slot)
                        .ok_or(TreeError::EmptySlot { tag: self.tag(),
                                                      slot })?;
        self.ancestors.push(self.current);
        self.current = child;
        Ok(())
    }

    /// Moves back to the parent of the current node.
    ///
    /// # Errors
    /// Returns [`TreeError::AscendPastRoot`] with an empty ancestor stack.
    pub fn ascend(&mut self) -> TreeResult<()> {
        self.current = self.ancestors.pop().ok_or(TreeError::AscendPastRoot)?;
        Ok(())
    }

    /// Descends into `slot`, runs `visit`, and ascends again.
    ///
    /// # Errors
    /// Propagates navigation errors and whatever `visit` returns.
    pub fn within<T, E>(&mut self,
                        slot: Slot,
                        visit: impl FnOnce(&mut Self) -> Result<T, E>)
                        -> Result<T, E>
        where E: From<TreeError>
    {
        self.descend(slot)?;
        let result = visit(self);
        self.ascend()?;
        result
    }
}

impl fmt::Display for SyntaxTree {
    /// Writes one line per node as `tag/alt`, indented by depth, visiting
    /// children in slot order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(mut cursor) = self.cursor() else {
            return writeln!(f, "<empty>");
        };
        dump(&mut cursor, f).map_err(|DumpFailed| fmt::Error)
    }
}

fn dump(cursor: &mut Cursor<'_>, f: &mut fmt::Formatter<'_>) -> Result<(), DumpFailed> {
    // For each node on the current path, the index of the next slot to try.
    let mut next = vec![0];
    dump_node(cursor, f)?;
    while let Some(start) = next.last_mut() {
        let node = cursor.node();
        let child = Slot::ALL.into_iter()
                             .enumerate()
                             .skip(*start)
                             .find(|&(_, slot)| node.child(slot).is_some());
        match child {
            Some((index, slot)) => {
                *start = index + 1;
                cursor.descend(slot)?;
                dump_node(cursor, f)?;
                next.push(0);
            },
            None => {
                next.pop();
                if !next.is_empty() {
                    cursor.ascend()?;
                }
            },
        }
    }
    Ok(())
}

fn dump_node(cursor: &Cursor<'_>, f: &mut fmt::Formatter<'_>) -> Result<(), DumpFailed> {
    write!(f, "{:width$}{}/{}", "", cursor.tag(), cursor.alt(), width = cursor.depth() * 2)?;
    match *cursor.node() {
        Node::Int(value) => write!(f, " {value}")?,
        Node::Ident(symbol) => write!(f, " #{}", symbol.index())?,
        _ => {},
    }
    writeln!(f)?;
    Ok(())
}

struct DumpFailed;

impl From<fmt::Error> for DumpFailed {
    fn from(_: fmt::Error) -> Self {
        Self
    }
}

impl From<TreeError> for DumpFailed {
    fn from(_: TreeError) -> Self {
        Self
    }
}
