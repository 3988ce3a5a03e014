use core_interp::{
    ast::{Cond, Expr, Node, NodeId, Operand, Slot, Stmt, Tag, Term},
    error::{Expected, ParseError},
    interpreter::parser::{Parsed, parse},
};

fn parse_ok(src: &str) -> Parsed {
    parse(src, 1000).unwrap_or_else(|e| panic!("{src:?} failed to parse: {e}"))
}

fn parse_err(src: &str) -> String {
    match parse(src, 1000) {
        Ok(_) => panic!("{src:?} parsed but was expected to fail"),
        Err(e) => e.to_string(),
    }
}

/// Returns the expression of the first statement, which must be an
/// assignment.
fn first_assignment_value(parsed: &Parsed) -> NodeId {
    let tree = &parsed.tree;
    let Node::Program { stmts, .. } = tree[tree.root().unwrap()] else { panic!("no program") };
    let Node::StmtSeq { stmt, .. } = tree[stmts] else { panic!("no stmt seq") };
    let Node::Stmt(Stmt::Assign(assign)) = tree[stmt] else { panic!("not an assignment") };
    let Node::Assign { value, .. } = tree[assign] else { panic!("no assign node") };
    value
}

#[test]
fn minimal_program_builds_a_rooted_tree() {
    let parsed = parse_ok("program int X; begin X = 1; end");
    let root = parsed.tree.root().expect("root is set");

    assert_eq!(parsed.tree[root].tag(), Tag::Program);
    assert_eq!(root.index(), parsed.tree.len() - 1);
    assert_eq!(parsed.symbols.names().collect::<Vec<_>>(), vec!["X"]);
}

#[test]
fn children_are_allocated_before_parents() {
    let parsed = parse_ok("program int A, B; begin read A; if (A < 2) then B = A; else B = 0; end; end");
    let tree = &parsed.tree;

    let mut stack = vec![tree.root().unwrap()];
    while let Some(id) = stack.pop() {
        for child in tree[id].children().into_iter().flatten() {
            assert!(child < id, "{child} is not older than {id}");
            stack.push(child);
        }
    }
}

#[test]
fn sequences_record_whether_more_follow() {
    let parsed = parse_ok("program int A; int B, C; begin A = 1; B = 2; end");
    let tree = &parsed.tree;
    let Node::Program { decls, stmts } = tree[tree.root().unwrap()] else { panic!() };

    assert_eq!(tree[decls].alt(), 2);
    let Node::DeclSeq { decl, rest: Some(rest) } = tree[decls] else { panic!() };
    assert_eq!(tree[rest].alt(), 1);
    let Node::Decl { ids } = tree[decl] else { panic!() };
    assert_eq!(tree[ids].alt(), 1);
    assert_eq!(tree[stmts].alt(), 2);
}

#[test]
fn subtraction_and_multiplication_are_right_recursive() {
    let parsed = parse_ok("program int A; begin A = 10 - 3 - 2; end");
    let tree = &parsed.tree;
    let value = first_assignment_value(&parsed);

    let Node::Expr(Expr::Sub(_, rest)) = tree[value] else { panic!("top is not a subtraction") };
    assert!(matches!(tree[rest], Node::Expr(Expr::Sub(..))));

    let parsed = parse_ok("program int A; begin A = 2 * 3 * 4; end");
    let tree = &parsed.tree;
    let Node::Expr(Expr::Term(term)) = tree[first_assignment_value(&parsed)] else { panic!() };
    let Node::Term(Term::Mul(_, rest)) = tree[term] else { panic!() };
    assert!(matches!(tree[rest], Node::Term(Term::Mul(..))));
}

#[test]
fn operands_record_their_alternative() {
    let parsed = parse_ok("program int A; begin A = (A); end");
    let tree = &parsed.tree;
    let Node::Expr(Expr::Term(term)) = tree[first_assignment_value(&parsed)] else { panic!() };
    let Node::Term(Term::Operand(operand)) = tree[term] else { panic!() };

    assert_eq!(tree[operand].alt(), 3);
    let Node::Operand(Operand::Paren(inner)) = tree[operand] else { panic!() };
    assert_eq!(tree[inner].tag(), Tag::Expr);
}

#[test]
fn condition_alternatives() {
    let parsed = parse_ok("program int A; begin A = 1; while ![(A == 1) || (A != 2)] loop A = 2; end; end");
    let tree = &parsed.tree;
    let mut cursor = tree.cursor().unwrap();
    cursor.descend(Slot::Second).unwrap();
    cursor.descend(Slot::Second).unwrap();
    cursor.descend(Slot::First).unwrap();
    assert_eq!(cursor.tag(), Tag::Stmt);
    assert_eq!(cursor.alt(), 3);
    cursor.descend(Slot::First).unwrap();
    cursor.descend(Slot::First).unwrap();
    assert_eq!(cursor.tag(), Tag::Cond);
    assert_eq!(cursor.alt(), 2);
    cursor.descend(Slot::First).unwrap();
    assert_eq!(cursor.alt(), 4);
    assert!(matches!(cursor.node(), Node::Cond(Cond::Or(..))));
    cursor.descend(Slot::Second).unwrap();
    cursor.descend(Slot::First).unwrap();
    cursor.descend(Slot::Second).unwrap();
    assert_eq!(cursor.tag(), Tag::CompOp);
    assert_eq!(cursor.alt(), 1);
}

#[test]
fn statement_alternatives() {
    let parsed = parse_ok("program int A; begin A = 1; if (A < 1) then A = 2; end; while (A < 1) loop A = 2; end; read A; write A; end");
    let tree = &parsed.tree;
    let mut seen = Vec::new();
    let mut seq = match tree[tree.root().unwrap()] {
        Node::Program { stmts, .. } => Some(stmts),
        _ => None,
    };
    while let Some(id) = seq {
        let Node::StmtSeq { stmt, rest } = tree[id] else { panic!() };
        seen.push(tree[stmt].alt());
        seq = rest;
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn missing_tokens_name_the_expected_construct() {
    assert_eq!(parse_err("int A; begin end"), "Error on line 1: Expecting \"program\" at int");
    assert_eq!(parse_err("program begin A = 1; end"),
               "Error on line 1: Expecting at least one declaration at begin");
    assert_eq!(parse_err("program int A begin A = 1; end"),
               "Error on line 1: Expecting \";\" at begin");
    assert_eq!(parse_err("program int A; begin end"),
               "Error on line 1: Expecting at least one statement at end");
    assert_eq!(parse_err("program int A; begin A 1; end"), "Error on line 1: Expecting \"=\" at 1");
    assert_eq!(parse_err("program int ; begin end"),
               "Error on line 1: Expecting an identifier at ;");
    assert_eq!(parse_err("program int A; begin if (A < 1) then A = 1; A end"),
               "Error on line 1: Expecting \"=\" at end");
    assert_eq!(parse_err("program int A; begin if (A < 1) then A = 1; ; end"),
               "Error on line 1: Expecting \"else\" or \"end\" at ;");
    assert_eq!(parse_err("program int A; begin while (A < 1) A = 1; end; end"),
               "Error on line 1: Expecting \"loop\" at A");
    assert_eq!(parse_err("program int A; begin if [(A < 1) (A < 2)] then A = 1; end; end"),
               "Error on line 1: Expecting \"&&\" or \"||\" at (");
    assert_eq!(parse_err("program int A; begin if A then A = 1; end; end"),
               "Error on line 1: Expecting a comparison condition at A");
    assert_eq!(parse_err("program int A; begin if (A = 1) then A = 1; end; end"),
               "Error on line 1: Expecting a comparison operator at =");
    assert_eq!(parse_err("program int A; begin A = ; end"),
               "Error on line 1: Expecting an integer, an identifier, or an expression at ;");
    assert_eq!(parse_err("program int A; begin A = (1; end"),
               "Error on line 1: Expecting \")\" at ;");
    assert_eq!(parse_err("program int A; begin A = 1;"),
               "Error on line 1: Expecting \"end\" at EOF");
}

#[test]
fn errors_report_the_offending_line() {
    let err = parse("program\n  int A;\nbegin\n  A = 1;\n  B = 2;\nend", 1000).unwrap_err();

    assert_eq!(err.line(), Some(5));
    assert!(matches!(err, ParseError::UndeclaredVariable { ref name, line: 5 } if name == "B"));
}

#[test]
fn read_and_write_resolve_names() {
    assert_eq!(parse_err("program int A; begin read A, B; end"),
               "Error on line 1: Undeclared variable B");
    assert_eq!(parse_err("program int A; begin write C; end"),
               "Error on line 1: Undeclared variable C");
}

#[test]
fn uses_in_conditions_and_expressions_are_resolved() {
    assert_eq!(parse_err("program int A; begin if (Z < 1) then A = 1; end; end"),
               "Error on line 1: Undeclared variable Z");
    assert_eq!(parse_err("program int A; begin A = A * (Q + 1); end"),
               "Error on line 1: Undeclared variable Q");
}

#[test]
fn expected_constructs_render_like_the_diagnostics() {
    assert_eq!(Expected::Semicolon.to_string(), "\";\"");
    assert_eq!(Expected::ElseOrEnd.to_string(), "\"else\" or \"end\"");
    assert_eq!(Expected::Operand.to_string(), "an integer, an identifier, or an expression");
}
