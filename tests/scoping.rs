use rstest::rstest;
use scopewalk::{
    check,
    error::{Error, SemanticError},
    interpreter::{
        analyzer::analyze,
        parser::parse,
        lexer::{Token, tokenize},
        regenerator::regenerate,
        symbols::{BuiltinType, ProcedureSymbol, ScopeArena, Symbol, VariableSymbol},
    },
    regenerate_source,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn semantic_error(src: &str) -> SemanticError {
    init_logger();
    match check(src) {
        Err(Error::Semantic(err)) => err,
        Err(other) => panic!("expected a semantic error, got {other:?}"),
        Ok(_) => panic!("Program passed analysis but was expected to fail:\n{src}"),
    }
}

fn regenerated(src: &str) -> String {
    init_logger();
    regenerate_source(src).unwrap_or_else(|e| panic!("Regeneration failed: {e}\n{src}"))
}

fn variable(name: &str, declared_type: BuiltinType) -> VariableSymbol {
    VariableSymbol { name: name.to_string(),
                     declared_type }
}

#[test]
fn builtins_live_below_the_program_scope() {
    let (mut scopes, builtins) = ScopeArena::with_builtins();
    assert_eq!(scopes.scope(builtins).level, 0);
    assert_eq!(scopes.scope(builtins).enclosing, None);
    assert_eq!(scopes.scope(builtins).len(), 2);

    let global = scopes.push("global", builtins);
    assert_eq!(scopes.scope(global).level, 1);
    assert!(scopes.scope(global).is_empty());
    assert_eq!(scopes.lookup(global, "REAL", false),
               Some(&Symbol::Builtin(BuiltinType::Real)));
    assert_eq!(scopes.lookup(global, "REAL", true), None);
}

#[test]
fn define_overwrites_and_lookup_walks_outward() {
    let (mut scopes, builtins) = ScopeArena::with_builtins();
    let global = scopes.push("global", builtins);
    scopes.define(global, Symbol::Variable(variable("x", BuiltinType::Integer)));
    scopes.define(global, Symbol::Variable(variable("x", BuiltinType::Real)));
    assert_eq!(scopes.scope(global).len(), 1);

    let inner = scopes.push("inner", global);
    scopes.define(inner, Symbol::Variable(variable("y", BuiltinType::Integer)));

    let resolved = scopes.resolve(inner, "x").unwrap();
    assert_eq!(resolved.level, 1);
    assert_eq!(resolved.symbol.declared_type(), Some(BuiltinType::Real));
    assert_eq!(scopes.resolve(inner, "y").unwrap().level, 2);
    assert!(scopes.lookup(global, "y", false).is_none());
    assert!(scopes.lookup(inner, "missing", false).is_none());

    assert_eq!(scopes.pop(inner), Some(global));
    assert_eq!(scopes.pop(global), Some(builtins));
}

#[test]
fn procedure_symbol_records_parameters_in_order() {
    let program = parse("PROGRAM p; PROCEDURE q(b, a : INTEGER; c : REAL); BEGIN END; BEGIN END.").unwrap();
    let scopewalk::ast::Declaration::Procedure(decl) = &program.block.declarations[0] else {
        panic!("expected a procedure declaration");
    };

    let (mut scopes, builtins) = ScopeArena::with_builtins();
    let global = scopes.push("global", builtins);
    let (inner, params) = scopes.open_procedure(global, decl).unwrap();

    let expected = vec![variable("b", BuiltinType::Integer),
                        variable("a", BuiltinType::Integer),
                        variable("c", BuiltinType::Real)];
    assert_eq!(params, expected);
    assert_eq!(scopes.lookup(global, "q", true),
               Some(&Symbol::Procedure(ProcedureSymbol { name:   "q".to_string(),
                                                         params: expected, })));
    assert_eq!(scopes.scope(inner).level, 2);
    assert!(scopes.lookup(inner, "a", true).is_some());
    assert!(scopes.lookup(global, "a", false).is_none());
}

#[test]
fn parameters_are_local_to_their_procedure() {
    init_logger();
    assert!(check("PROGRAM P; PROCEDURE Inner(a : INTEGER); BEGIN a := a + 1; END; BEGIN END.").is_ok());

    let err = semantic_error("PROGRAM P; PROCEDURE Inner(a : INTEGER); BEGIN a := a + 1; END; \
                              BEGIN a := 1 END.");
    assert_eq!(err,
               SemanticError::UnresolvedIdentifier { name: "a".to_string(),
                                                     line: 1, });
}

#[rstest]
#[case::same_block("PROGRAM p; VAR x : INTEGER; x : REAL; BEGIN END.", "x")]
#[case::separate_var_groups("PROGRAM p; VAR x : INTEGER; VAR x : INTEGER; BEGIN END.", "x")]
#[case::procedure_and_variable("PROGRAM p; VAR q : INTEGER; PROCEDURE q; BEGIN END; BEGIN END.", "q")]
#[case::two_procedures("PROGRAM p; PROCEDURE q; BEGIN END; PROCEDURE q; BEGIN END; BEGIN END.", "q")]
#[case::parameters("PROGRAM p; PROCEDURE q(a, a : INTEGER); BEGIN END; BEGIN END.", "a")]
#[case::parameter_and_local("PROGRAM p; PROCEDURE q(a : INTEGER); VAR a : REAL; BEGIN END; BEGIN END.", "a")]
fn duplicate_identifiers(#[case] src: &str, #[case] name: &str) {
    let err = semantic_error(src);
    assert!(matches!(err, SemanticError::DuplicateIdentifier { .. }), "{err:?}");
    assert_eq!(err.name(), name);
}

#[test]
fn redeclaring_in_a_nested_procedure_is_allowed() {
    init_logger();
    let src = "PROGRAM p; VAR x : INTEGER;
               PROCEDURE q; VAR x : REAL;
                  PROCEDURE r(x : INTEGER); BEGIN x := 1 END;
               BEGIN x := 2.5 END;
               BEGIN x := 1 END.";
    assert!(check(src).is_ok());
}

#[rstest]
#[case::sibling_procedure("PROGRAM p;
                           PROCEDURE a; VAR secret : INTEGER; BEGIN secret := 1 END;
                           PROCEDURE b; BEGIN secret := 2 END;
                           BEGIN END.", "secret", 3)]
#[case::child_procedure("PROGRAM p;
                         PROCEDURE a; VAR secret : INTEGER; BEGIN END;
                         BEGIN x := secret END.", "x", 3)]
#[case::used_in_expression("PROGRAM p; VAR x : INTEGER;
                            BEGIN x := 1 + -(2 * missing) END.", "missing", 2)]
#[case::used_before_global("PROGRAM p; VAR a : INTEGER; BEGIN BEGIN a := b END END.", "b", 1)]
fn unresolved_identifiers(#[case] src: &str, #[case] name: &str, #[case] line: usize) {
    assert_eq!(semantic_error(src),
               SemanticError::UnresolvedIdentifier { name: name.to_string(),
                                                     line });
}

#[test]
fn procedures_can_name_themselves() {
    init_logger();
    let src = "PROGRAM p; PROCEDURE q; BEGIN q := 1 END; BEGIN END.";
    assert!(check(src).is_ok());
    assert!(regenerated(src).contains("<q1:PROCEDURE> := 1;"));
}

#[test]
fn analysis_does_not_change_the_tree() {
    let program = parse("PROGRAM p; VAR x : INTEGER; BEGIN x := 1 END.").unwrap();
    let before = program.clone();
    analyze(&program).unwrap();
    assert_eq!(program, before);
}

#[test]
fn regenerated_program_is_annotated_with_levels() {
    let src = "program Main;
                  var x, y : real;

                  procedure Alpha(a : integer);
                     var y : integer;
                  begin
                     x := a + x + y;
                  end;

               begin { Main }
               end.  { Main }";

    let expected = "\
program main0;
   var x1 : REAL0;
   var y1 : REAL0;
   procedure alpha1(a2 : INTEGER0);
      var y2 : INTEGER0;

   begin
      <x1:REAL0> := <a2:INTEGER0> + <x1:REAL0> + <y2:INTEGER0>;
   end; {END OF alpha}

begin
end. {END OF main}";

    assert_eq!(regenerated(src), expected);
}

#[test]
fn regenerated_nested_procedures_and_statements() {
    let src = "PROGRAM p; VAR a, b : INTEGER;
               PROCEDURE outer; VAR c : REAL;
                  PROCEDURE inner(d : REAL; e : INTEGER); BEGIN c := d * e END;
               BEGIN BEGIN c := a END END;
               BEGIN a := (1 + 2) * 3; b := 1 - (2 - 3) - -a END.";

    let expected = "\
program p0;
   var a1 : INTEGER0;
   var b1 : INTEGER0;
   procedure outer1;
      var c2 : REAL0;
      procedure inner2(d3 : REAL0; e3 : INTEGER0);

      begin
         <c2:REAL0> := <d3:REAL0> * <e3:INTEGER0>;
      end; {END OF inner}

   begin
      begin
         <c2:REAL0> := <a1:INTEGER0>;
      end;
   end; {END OF outer}

begin
   <a1:INTEGER0> := (1 + 2) * 3;
   <b1:INTEGER0> := 1 - (2 - 3) - -<a1:INTEGER0>;
end. {END OF p}";

    assert_eq!(regenerated(src), expected);
}

#[test]
fn regenerated_constants_read_back_unchanged() {
    let text = regenerated("PROGRAM p; VAR x : REAL;
                            BEGIN x := 100000000000000000000.0 + 3. * 0.0000001 + 7 DIV 2 END.");
    let value = "100000000000000000000.0 + 3.0 * 0.0000001 + 7 // 2";
    assert!(text.contains(&format!("<x1:REAL0> := {value};")), "{text}");

    let constants: Vec<Token> = tokenize(value).unwrap()
                                               .into_iter()
                                               .map(|lexeme| lexeme.token)
                                               .filter(|token| matches!(token, Token::RealConst(_)))
                                               .collect();
    assert_eq!(constants,
               vec![Token::RealConst(1e20), Token::RealConst(3.0), Token::RealConst(1e-7)]);
}

#[test]
fn regenerator_resolves_to_the_nearest_declaration() {
    let text = regenerated("PROGRAM p; VAR x : REAL;
                            PROCEDURE q; VAR x : INTEGER; BEGIN x := 1 END;
                            PROCEDURE r; BEGIN x := 2 END;
                            BEGIN x := 3 END.");
    assert!(text.contains("<x2:INTEGER0> := 1;"), "{text}");
    assert!(text.contains("<x1:REAL0> := 2;"), "{text}");
    assert!(text.contains("<x1:REAL0> := 3;"), "{text}");
}

#[test]
fn regenerator_reports_the_same_errors_as_analysis() {
    init_logger();
    for src in ["PROGRAM p; VAR x : INTEGER; x : REAL; BEGIN END.",
                "PROGRAM p; BEGIN y := 1 END.",
                "PROGRAM p; PROCEDURE q(a : INTEGER); BEGIN END; BEGIN a := 1 END."]
    {
        let program = parse(src).unwrap();
        assert_eq!(regenerate(&program).unwrap_err(), analyze(&program).unwrap_err(), "{src}");
    }
}

#[test]
fn decorated_names_start_with_the_declared_identifier() {
    let src = "PROGRAM Round; VAR alpha, beta : INTEGER; gamma : REAL;
               PROCEDURE Delta(epsilon : REAL); VAR alpha : REAL; BEGIN alpha := epsilon / 2 END;
               BEGIN alpha := 1; beta := alpha * 2; gamma := beta / 3 END.";
    let names = ["alpha", "beta", "gamma", "delta", "epsilon"];
    let text = regenerated(src);

    let mut checked = 0;
    for reference in text.split('<').skip(1) {
        let decorated = reference.split(':').next().unwrap_or_default();
        let name = names.iter()
                        .find(|candidate| decorated.starts_with(*candidate))
                        .unwrap_or_else(|| panic!("unexpected reference {decorated}"));
        let level = &decorated[name.len()..];
        assert!(!level.is_empty() && level.chars().all(|c| c.is_ascii_digit()),
                "{decorated} is not {name} followed by a level");
        checked += 1;
    }
    assert_eq!(checked, 7);
}
