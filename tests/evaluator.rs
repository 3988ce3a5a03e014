use std::io::{self, Write};

use core_interp::{
    error::RuntimeError,
    interpreter::{
        environment::{Environment, SymbolTable},
        evaluator::{ExecStats, Executor, execute, input::DataStream},
        parser::{Parsed, parse},
    },
};

fn exec(src: &str, data: &str) -> Result<(ExecStats, String), RuntimeError> {
    let parsed = parse(src, 1000).unwrap_or_else(|e| panic!("{src:?} failed to parse: {e}"));
    let mut out = Vec::new();
    let stats = execute(&parsed, data.as_bytes(), &mut out)?;
    Ok((stats, String::from_utf8(out).unwrap()))
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn statements_run_in_source_order() {
    let (_, out) = exec("program int A, B; begin A = 1; B = A + 1; A = B * 10; write A, B; end",
                        "").unwrap();

    assert_eq!(out, "A = 20\nB = 2\n");
}

#[test]
fn environment_is_visible_after_execution() {
    let parsed = parse("program int A, B, C; begin read A; B = A - 50; end", 100).unwrap();
    let mut out = Vec::new();
    let mut executor = Executor::new(&parsed, "8".as_bytes(), &mut out);
    executor.run().unwrap();

    let env = executor.environment();
    assert_eq!(env.get_by_name("A"), Some(8));
    assert_eq!(env.get_by_name("B"), Some(-42));
    assert_eq!(env.get_by_name("C"), None);
    assert_eq!(env.bindings().collect::<Vec<_>>(),
               vec![("A", Some(8)), ("B", Some(-42)), ("C", None)]);
}

#[test]
fn stats_count_statements_per_iteration() {
    let src = "program int I; begin I = 0; while (I < 4) loop I = I + 1; end; end";
    let (stats, _) = exec(src, "").unwrap();

    assert_eq!(stats,
               ExecStats { statements:  6,
                           conditions:  5,
                           comparisons: 5,
                           iterations:  4, });
}

#[test]
fn read_consumes_data_across_lines_and_statements() {
    let src = "program int A, B, C; begin read A; read B, C; write C, B, A; end";
    let (_, out) = exec(src, "  10\n\n-20\t+30 99\n").unwrap();

    assert_eq!(out, "C = 30\nB = -20\nA = 10\n");
}

#[test]
fn uninitialized_read_in_an_expression_names_the_variable_and_line() {
    let err = exec("program int A, B;\nbegin\nA = 1;\nA = A + B;\nend", "").unwrap_err();

    assert!(matches!(err, RuntimeError::UninitializedVariable { ref name, line: 4 } if name == "B"));
}

#[test]
fn uninitialized_variable_in_a_condition_is_an_error() {
    let err = exec("program int A; begin while (A < 3) loop A = 1; end; end", "").unwrap_err();

    assert!(matches!(err, RuntimeError::UninitializedVariable { .. }));
}

#[test]
fn write_fails_midway_through_a_list() {
    let parsed = parse("program int A, B; begin A = 1; write A, B; end", 100).unwrap();
    let mut out = Vec::new();
    let err = execute(&parsed, "".as_bytes(), &mut out).unwrap_err();

    assert!(matches!(err, RuntimeError::UninitializedVariable { ref name, .. } if name == "B"));
    assert_eq!(String::from_utf8(out).unwrap(), "A = 1\n");
}

#[test]
fn overflow_in_multiplication_and_subtraction() {
    let err = exec("program int A; begin A = 4611686018427387904 * 2; end", "").unwrap_err();
    assert!(matches!(err, RuntimeError::Overflow { line: 1 }));

    let err = exec("program int A; begin A = 0 - 9223372036854775807 - 2; end", "");
    assert!(err.is_ok(), "0 - (MAX - 2) fits: {err:?}");

    let err = exec("program int A, B; begin read A; B = A - 1; end", "-9223372036854775808").unwrap_err();
    assert!(matches!(err, RuntimeError::Overflow { .. }));
}

#[test]
fn failing_output_is_an_io_error() {
    let parsed = parse("program int A; begin A = 1; write A; end", 100).unwrap();
    let err = execute(&parsed, "".as_bytes(), BrokenPipe).unwrap_err();

    assert!(matches!(err, RuntimeError::Io { line: 1, .. }));
}

#[test]
fn data_stream_reports_exhaustion_and_garbage() {
    let mut data = DataStream::new("12 x3".as_bytes());

    assert_eq!(data.next_integer(1).unwrap(), 12);
    assert!(matches!(data.next_integer(2), Err(RuntimeError::InputNotInteger { ref token, line: 2 }) if token == "x3"));
    assert!(matches!(data.next_integer(3), Err(RuntimeError::InputExhausted { line: 3 })));
}

#[test]
fn data_stream_rejects_values_outside_the_integer_range() {
    let mut data = DataStream::new("9223372036854775808".as_bytes());

    assert!(matches!(data.next_integer(1), Err(RuntimeError::InputNotInteger { .. })));
}

#[test]
fn environment_slots_are_shared_by_name_and_symbol() {
    let mut symbols = SymbolTable::new();
    let a = symbols.declare("A").unwrap();
    symbols.declare("B").unwrap();

    let mut env = Environment::new(&symbols);
    assert!(env.set(a, 3));
    assert_eq!(env.get_by_name("A"), Some(3));
    assert!(env.set_by_name("B", 4));
    assert_eq!(env.get(symbols.resolve("B").unwrap()), Some(4));
    assert!(!env.set_by_name("Z", 1));
}

#[test]
fn data_that_is_not_utf8_is_not_an_integer() {
    let mut data = DataStream::new(&b"7 4\xff2 9"[..]);

    assert_eq!(data.next_integer(1).unwrap(), 7);
    assert!(matches!(data.next_integer(2), Err(RuntimeError::InputNotInteger { line: 2, .. })));
    assert_eq!(data.next_integer(3).unwrap(), 9);
}

#[test]
fn storing_to_a_foreign_symbol_is_reported() {
    let mut other = SymbolTable::new();
    other.declare("A").unwrap();
    let foreign = other.declare("B").unwrap();

    let mut symbols = SymbolTable::new();
    symbols.declare("A").unwrap();
    let mut env = Environment::new(&symbols);

    assert!(!env.set(foreign, 1));
    assert_eq!(env.bindings().collect::<Vec<_>>(), vec![("A", None)]);
}

#[test]
fn assignment_to_a_variable_missing_from_the_environment_fails() {
    let parsed = parse("program int A;\nbegin\nA = 1;\nend", 100).unwrap();
    let parsed = Parsed { symbols: SymbolTable::new(),
                          ..parsed };
    let mut out = Vec::new();
    let err = execute(&parsed, "".as_bytes(), &mut out).unwrap_err();

    assert!(matches!(err, RuntimeError::UnknownVariable { line: 3, .. }), "{err}");
}

#[test]
fn stacked_negations_are_each_counted() {
    let (stats, out) = exec("program int A; begin A = 1; if !!!(A == 1) then A = 2; else write A; end; end",
                            "").unwrap();

    assert_eq!(out, "A = 1\n");
    assert_eq!(stats.conditions, 4);
    assert_eq!(stats.comparisons, 1);
}
