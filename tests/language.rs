use std::fs;

use rstest::rstest;
use scopewalk::{
    Options,
    ast::Statement,
    error::{Error, ParseError, RuntimeError, SemanticError},
    interpreter::{
        evaluator::{Interpreter, RuntimeStore, interpret},
        parser::parse,
        value::Value,
    },
    regenerate_source, run, run_with,
};
use walkdir::WalkDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn store(src: &str) -> Vec<(String, Value)> {
    init_logger();
    run(src).unwrap_or_else(|e| panic!("Program failed: {e}\n{src}"))
}

fn int(name: &str, value: i64) -> (String, Value) {
    (name.to_string(), Value::Integer(value))
}

fn real(name: &str, value: f64) -> (String, Value) {
    (name.to_string(), Value::Real(value))
}

/// Runs `expr` as the only assignment of a program and returns the result.
fn eval_expr(expr: &str, declared: &str) -> Result<Value, Error> {
    init_logger();
    let src = format!("PROGRAM t; VAR r : {declared}; BEGIN r := {expr} END.");
    let mut pairs = run(&src)?;
    Ok(pairs.remove(0).1)
}

#[test]
fn demo_programs_work() {
    init_logger();
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "pas")
                                      })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&source) {
            panic!("Demo {path:?} failed to run:\n{source}\nError: {e:?}");
        }
        if let Err(e) = regenerate_source(&source) {
            panic!("Demo {path:?} failed to regenerate:\n{source}\nError: {e:?}");
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

#[test]
fn arithmetic_demo_final_store() {
    let source = fs::read_to_string("demos/arithmetic.pas").expect("demo exists");
    assert_eq!(store(&source),
               vec![int("a", 2),
                    int("b", 25),
                    int("c", 27),
                    int("number", 2),
                    int("x", 11),
                    real("y", 20.0 / 7.0 + 3.25)]);
}

#[test]
fn assignment_and_precedence() {
    assert_eq!(store("PROGRAM Test; VAR a, b : INTEGER; BEGIN a := 2; b := a + 3 * 2; END."),
               vec![int("a", 2), int("b", 8)]);
}

#[test]
fn float_division_of_integers_is_real() {
    assert_eq!(store("PROGRAM Test; VAR x : REAL; BEGIN x := 10 / 4; END."),
               vec![real("x", 2.5)]);
}

#[test]
fn integer_division_truncates() {
    assert_eq!(store("PROGRAM Test; VAR x : INTEGER; BEGIN x := 10 // 3; END."),
               vec![int("x", 3)]);
}

#[rstest]
#[case("2 + 3 * 4", Value::Integer(14))]
#[case("(2 + 3) * 4", Value::Integer(20))]
#[case("10 - 4 - 3", Value::Integer(3))]
#[case("-7 // 2", Value::Integer(-4))]
#[case("7 // -2", Value::Integer(-4))]
#[case("-8 // 2", Value::Integer(-4))]
#[case("6 / 2", Value::Real(3.0))]
#[case("1 + 2.5", Value::Real(3.5))]
#[case("2.5 * 2", Value::Real(5.0))]
#[case("7.5 // 2", Value::Real(3.0))]
#[case("- - 4", Value::Integer(4))]
#[case("+ - 4", Value::Integer(-4))]
#[case("-(1 + 2) * 3", Value::Integer(-9))]
#[case("3.", Value::Real(3.0))]
#[case("7 DIV 2", Value::Integer(3))]
#[case("-7 div 2", Value::Integer(-4))]
#[case("7.5 Div 2", Value::Real(3.0))]
fn arithmetic(#[case] expr: &str, #[case] expected: Value) {
    let declared = if expected.is_real() { "REAL" } else { "INTEGER" };
    assert_eq!(eval_expr(expr, declared).unwrap(), expected, "{expr}");
}

#[rstest]
#[case("1 // 0")]
#[case("1 / 0")]
#[case("1.5 / 0.0")]
#[case("2.0 // 0")]
fn division_by_zero_is_error(#[case] expr: &str) {
    let err = eval_expr(expr, "REAL").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::DivisionByZero { line: 1 })),
            "{expr}: {err:?}");
}

#[test]
fn integer_overflow_is_error() {
    let err = eval_expr("9223372036854775807 + 1", "INTEGER").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::Overflow { .. })));

    let err = eval_expr("9007199254740993 / 1", "REAL").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::IntegerTooLarge { .. })));
}

#[test]
fn unknown_variable_is_semantic_error() {
    let err = run("PROGRAM Test; BEGIN y := 1; END.").unwrap_err();
    match err {
        Error::Semantic(SemanticError::UnresolvedIdentifier { name, line }) => {
            assert_eq!(name, "y");
            assert_eq!(line, 1);
        },
        other => panic!("expected an unresolved identifier, got {other:?}"),
    }
}

#[test]
fn reading_unassigned_variable_is_runtime_error() {
    let err = run("PROGRAM p; VAR a, b : INTEGER;\nBEGIN\n a := b\nEND.").unwrap_err();
    assert_eq!(err.to_string(), "Error on line 3: Undefined variable 'b'.");
    assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedVariable { .. })));
}

#[test]
fn interpreter_alone_does_not_check_scopes() {
    let program = parse("PROGRAM p; BEGIN y := 4; z := y * 2 END.").unwrap();
    let store = interpret(&program).unwrap();
    assert_eq!(store.get("z"), Some(Value::Integer(8)));

    let program = parse("PROGRAM p; BEGIN y := z END.").unwrap();
    assert_eq!(interpret(&program).unwrap_err(),
               RuntimeError::UndefinedVariable { name: "z".to_string(),
                                                 line: 1, });
}

#[test]
fn interpreter_executes_one_statement_at_a_time() {
    init_logger();
    let program = parse("PROGRAM p; VAR b, a : REAL; \
                         BEGIN b := 1.5; a := b * 2; b := 100000000000000000000.0 END.").unwrap();
    let mut interpreter = Interpreter::new();
    assert!(interpreter.store().is_empty());

    let statements: Vec<&Statement> = program.block.compound.statements.iter().collect();
    interpreter.exec_statement(statements[0]).unwrap();
    assert_eq!(interpreter.store().len(), 1);
    assert_eq!(interpreter.store().get("b"), Some(Value::from(1.5)));

    for statement in &statements[1..] {
        interpreter.exec_statement(statement).unwrap();
    }
    let written: Vec<(&str, Value)> = interpreter.store().iter().collect();
    assert_eq!(written, vec![("a", Value::from(3.0)), ("b", Value::from(1e20))]);
    assert_eq!(written[1].1.to_string(), "100000000000000000000.0");
}

#[test]
fn runtime_store_by_hand() {
    let mut store = RuntimeStore::new();
    assert!(store.is_empty());

    store.assign("n", Value::from(4_i64));
    store.assign("n", Value::from(5_i64));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("n"), Some(Value::Integer(5)));
    assert_eq!(store.get("missing"), None);
    assert_eq!(store.into_pairs(), vec![int("n", 5)]);
}

#[test]
fn store_is_ordered_by_name_and_overwrites() {
    assert_eq!(store("PROGRAM p; VAR zeta, alpha : INTEGER; \
                      BEGIN zeta := 1; alpha := 2; zeta := zeta + alpha END."),
               vec![int("alpha", 2), int("zeta", 3)]);
}

#[test]
fn identifiers_are_case_insensitive() {
    assert_eq!(store("program P; var Total : integer; BEGIN TOTAL := 4; total := ToTaL * 2 end."),
               vec![int("total", 8)]);
}

#[test]
fn procedure_bodies_never_touch_the_flat_store() {
    // Procedures are declared but cannot be called, and all variables share
    // one namespace keyed by bare name.
    let src = "PROGRAM p; VAR x : INTEGER;
               PROCEDURE q; VAR x : REAL; BEGIN x := 99.5 END;
               BEGIN x := 1 END.";
    assert_eq!(store(src), vec![int("x", 1)]);

    let source = fs::read_to_string("demos/procedures.pas").expect("demo exists");
    assert_eq!(store(&source), vec![real("ratio", 1.5), int("total", -3)]);
}

#[test]
fn nesting_limit_is_configurable() {
    let terms = vec!["1"; 600].join(" + ");
    let src = format!("PROGRAM p; VAR s : INTEGER; BEGIN s := {terms} END.");

    let err = run(&src).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::NestingTooDeep { limit: 256, .. })));
    assert_eq!(err.to_string(), "Error on line 1: Syntax tree too deep (limit 256 levels).");

    let pairs = run_with(&src, Options { max_depth: 1000 }).unwrap();
    assert_eq!(pairs, vec![int("s", 600)]);
}

#[test]
fn unterminated_comment_is_error_not_hang() {
    let err = run("PROGRAM P; { never closes").unwrap_err();
    assert_eq!(err.to_string(), "Error on line 1, column 12: Unterminated comment.");
}
