use core_interp::{
    ast::{Expr, Node, Operand, Slot, Tag, Term},
    error::TreeError,
    interpreter::{
        parser::parse,
        tree::{Cursor, SyntaxTree},
    },
};

/// Builds `1 * 2` by hand, bottom-up.
fn product_tree() -> SyntaxTree {
    let mut tree = SyntaxTree::with_capacity(8);
    let one = tree.alloc(Node::Int(1), 1).unwrap();
    let lhs = tree.alloc(Node::Operand(Operand::Int(one)), 1).unwrap();
    let two = tree.alloc(Node::Int(2), 1).unwrap();
    let rhs = tree.alloc(Node::Operand(Operand::Int(two)), 1).unwrap();
    let rest = tree.alloc(Node::Term(Term::Operand(rhs)), 1).unwrap();
    let term = tree.alloc(Node::Term(Term::Mul(lhs, rest)), 1).unwrap();
    let root = tree.alloc(Node::Expr(Expr::Term(term)), 1).unwrap();
    tree.set_root(root).unwrap();
    tree
}

#[test]
fn capacity_is_fixed_at_construction() {
    let mut tree = SyntaxTree::with_capacity(2);
    tree.alloc(Node::Int(1), 1).unwrap();
    tree.alloc(Node::Int(2), 1).unwrap();

    assert_eq!(tree.alloc(Node::Int(3), 1), Err(TreeError::CapacityExceeded { capacity: 2 }));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.capacity(), 2);
}

#[test]
fn default_tree_holds_a_thousand_nodes() {
    let mut tree = SyntaxTree::default();
    for i in 0..1000 {
        tree.alloc(Node::Int(i), 1).unwrap();
    }
    assert!(tree.alloc(Node::Int(0), 1).is_err());
}

#[test]
fn identities_from_another_tree_are_rejected() {
    let big = product_tree();
    let mut small = SyntaxTree::with_capacity(4);
    small.alloc(Node::Int(5), 1).unwrap();
    let foreign = big.root().unwrap();

    assert_eq!(small.get(foreign), Err(TreeError::UnknownNode(foreign)));
    assert_eq!(small.set_root(foreign), Err(TreeError::UnknownNode(foreign)));
    assert_eq!(small.line(foreign), 0);
}

#[test]
fn cursor_requires_a_root() {
    let tree = SyntaxTree::with_capacity(4);

    assert!(matches!(tree.cursor(), Err(TreeError::Empty)));
    assert_eq!(tree.to_string(), "<empty>\n");
}

#[test]
fn cursor_descends_and_ascends() {
    let tree = product_tree();
    let mut cursor = tree.cursor().unwrap();

    assert_eq!((cursor.tag(), cursor.alt(), cursor.depth()), (Tag::Expr, 1, 0));
    cursor.descend(Slot::First).unwrap();
    assert_eq!((cursor.tag(), cursor.alt()), (Tag::Term, 2));
    cursor.descend(Slot::Second).unwrap();
    cursor.descend(Slot::First).unwrap();
    cursor.descend(Slot::First).unwrap();
    assert_eq!(cursor.node(), &Node::Int(2));
    assert_eq!(cursor.depth(), 4);

    for _ in 0..4 {
        cursor.ascend().unwrap();
    }
    assert_eq!(cursor.current(), tree.root().unwrap());
}

#[test]
fn empty_slots_and_the_root_are_hard_limits() {
    let tree = product_tree();
    let mut cursor = tree.cursor().unwrap();

    assert_eq!(cursor.ascend(), Err(TreeError::AscendPastRoot));
    assert_eq!(cursor.descend(Slot::Second),
               Err(TreeError::EmptySlot { tag:  Tag::Expr,
                                          slot: Slot::Second, }));
    assert_eq!(cursor.tag(), Tag::Expr);
}

#[test]
fn within_restores_the_position() {
    let tree = product_tree();
    let mut cursor = tree.cursor().unwrap();

    let tag = cursor.within(Slot::First, |c| {
                        c.within(Slot::First, |c| Ok::<_, TreeError>(c.tag()))
                    })
                    .unwrap();

    assert_eq!(tag, Tag::Operand);
    assert_eq!(cursor.depth(), 0);
    assert!(cursor.within(Slot::Third, |c| Ok::<_, TreeError>(c.tag())).is_err());
}

fn visit(cursor: &mut Cursor<'_>) -> Result<usize, TreeError> {
    let node = cursor.node();
    let occupied = node.children().iter().filter(|c| c.is_some()).count();
    let expected = match node {
        Node::Term(Term::Mul(..)) => 2,
        Node::Int(_) => 0,
        _ => 1,
    };
    assert_eq!(occupied, expected, "{node:?}");

    let mut visited = 1;
    for slot in Slot::ALL {
        if node.child(slot).is_some() {
            visited += cursor.within(slot, visit)?;
        }
    }
    Ok(visited)
}

#[test]
fn slot_occupancy_follows_the_alternative() {
    let tree = product_tree();
    let mut cursor = tree.cursor().unwrap();

    assert_eq!(visit(&mut cursor), Ok(tree.len()));
}

#[test]
fn dump_shows_one_node_per_line() {
    let parsed = parse("program int A; begin A = 1; end", 100).unwrap();

    assert_eq!(parsed.tree.to_string(),
               "<program>/1\n  <decl seq>/1\n    <decl>/1\n      <id list>/1\n        <id>/1 \
                #0\n  <stmt seq>/1\n    <stmt>/1\n      <assign>/1\n        <id>/1 #0\n        \
                <expr>/1\n          <term>/1\n            <operand>/1\n              <int>/1 1\n");
}

#[test]
fn nodes_remember_their_line() {
    let parsed = parse("program\nint A;\nbegin\nA = 1;\nend", 100).unwrap();
    let tree = &parsed.tree;
    let mut cursor = tree.cursor().unwrap();

    assert_eq!(cursor.line(), 1);
    cursor.descend(Slot::First).unwrap();
    assert_eq!(cursor.line(), 2);
    cursor.ascend().unwrap();
    cursor.descend(Slot::Second).unwrap();
    assert_eq!(cursor.line(), 4);
}

#[test]
fn dump_handles_long_statement_sequences() {
    let count = 2_000;
    let src = format!("program int A; begin {} end", "A = 1; ".repeat(count));
    let parsed = parse(&src, 100_000).unwrap();
    let dump = parsed.tree.to_string();

    assert_eq!(dump.lines().count(), parsed.tree.len());
    assert!(dump.lines().last().unwrap().ends_with("<int>/1 1"));
}
