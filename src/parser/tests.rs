use super::*;
use crate::ast::{ExprKind, StmtKind};
use crate::lexer::Lexer;
use crate::token::TokenKind;
use crate::value::Value;
use std::rc::Rc;

fn parse(source: &str) -> (crate::ast::Program, Vec<ParseError>) {
    let file: Rc<str> = Rc::from("test.cflat");
    let (tokens, lex_errors) = Lexer::new(source, file).tokenize();
    assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);
    let (program, errors, _) = Parser::new(tokens).parse();
    (program, errors)
}

fn parse_ok(source: &str) -> crate::ast::Program {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    program
}

#[test]
fn test_var_decl_with_initializer() {
    let program = parse_ok("var x = 1;");
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0].kind {
        StmtKind::VarDecl { name, initializer } => {
            assert!(matches!(&name.kind, TokenKind::Identifier(n) if n == "x"));
            assert!(matches!(initializer, Some(e) if matches!(e.kind, ExprKind::Literal(Value::Int(1)))));
        }
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_arr_decl_with_initializers() {
    let program = parse_ok("arr xs = { 1, 2, 3 };");
    match &program.statements[0].kind {
        StmtKind::ArrayDecl { initializers, .. } => assert_eq!(initializers.len(), 3),
        other => panic!("expected ArrayDecl, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    // a = (b = 1)
    let program = parse_ok("func f() { var a = 0; var b = 0; a = b = 1; }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        other => panic!("expected FunctionDecl, got {:?}", other),
    };
    match &body[2].kind {
        StmtKind::ExprStmt(e) => match &e.kind {
            ExprKind::Assignment { value, .. } => {
                assert!(matches!(value.kind, ExprKind::Assignment { .. }));
            }
            other => panic!("expected Assignment, got {:?}", other),
        },
        other => panic!("expected ExprStmt, got {:?}", other),
    }
}

#[test]
fn test_compound_assignment_desugars_to_binary() {
    let program = parse_ok("func f() { var a = 0; a += 1; }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[1].kind {
        StmtKind::ExprStmt(e) => match &e.kind {
            ExprKind::Assignment { value, .. } => {
                assert!(matches!(value.kind, ExprKind::Binary(_, _, _)));
            }
            other => panic!("expected Assignment, got {:?}", other),
        },
        other => panic!("expected ExprStmt, got {:?}", other),
    }
}

#[test]
fn test_ternary_is_right_associative() {
    let program = parse_ok("func f() { var a = true ? 1 : false ? 2 : 3; }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[0].kind {
        StmtKind::VarDecl { initializer: Some(e), .. } => match &e.kind {
            ExprKind::Ternary(_, _, else_branch) => {
                assert!(matches!(else_branch.kind, ExprKind::Ternary(_, _, _)));
            }
            other => panic!("expected Ternary, got {:?}", other),
        },
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_additive_is_left_associative() {
    let program = parse_ok("func f() { var a = 1 - 2 - 3; }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[0].kind {
        StmtKind::VarDecl { initializer: Some(e), .. } => match &e.kind {
            ExprKind::Binary(left, _, _) => {
                assert!(matches!(left.kind, ExprKind::Binary(_, _, _)));
            }
            other => panic!("expected Binary, got {:?}", other),
        },
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_type_cast_disambiguated_from_grouping() {
    let program = parse_ok("func f() { var a = (int) x; var b = (x); }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[0].kind {
        StmtKind::VarDecl { initializer: Some(e), .. } => assert!(matches!(e.kind, ExprKind::TypeCast(_, _))),
        other => panic!("expected VarDecl, got {:?}", other),
    }
    match &body[1].kind {
        StmtKind::VarDecl { initializer: Some(e), .. } => assert!(matches!(e.kind, ExprKind::Grouping(_))),
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_index_chain_and_slice() {
    let program = parse_ok("func f() { var a = xs[0][1]; var b = xs[1:2]; var c = xs[:]; }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[0].kind {
        StmtKind::VarDecl { initializer: Some(e), .. } => match &e.kind {
            ExprKind::Index { array, .. } => assert!(matches!(array.kind, ExprKind::Index { .. })),
            other => panic!("expected Index, got {:?}", other),
        },
        other => panic!("expected VarDecl, got {:?}", other),
    }
    match &body[2].kind {
        StmtKind::VarDecl { initializer: Some(e), .. } => match &e.kind {
            ExprKind::Index { start, colon, end, .. } => {
                assert!(start.is_none() && colon.is_some() && end.is_none());
            }
            other => panic!("expected Index, got {:?}", other),
        },
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_assign_at_only_permits_equals_or_plus_equals() {
    let (_, errors) = parse("func f() { xs[0] -= 1; }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ParseErrorKind::InvalidAssignAtOperator);
}

#[test]
fn test_for_loop_desugars_into_block_and_while() {
    let program = parse_ok("func f() { for (var i = 0; i < 10; i += 1) { print(i); } }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[0].kind {
        StmtKind::Block(stmts) => {
            assert_eq!(stmts.len(), 2);
            assert!(matches!(stmts[0].kind, StmtKind::VarDecl { .. }));
            match &stmts[1].kind {
                StmtKind::While { body, .. } => match &body.kind {
                    StmtKind::Block(inner) => assert_eq!(inner.len(), 2),
                    other => panic!("expected Block, got {:?}", other),
                },
                other => panic!("expected While, got {:?}", other),
            }
        }
        other => panic!("expected Block, got {:?}", other),
    }
}

#[test]
fn test_switch_parses_parallel_switchee_and_case_arrays() {
    let program = parse_ok(
        "func f() { switch (x) { case 1: print(\"a\"); case 2: print(\"b\"); break; default: print(\"c\"); } }",
    );
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[0].kind {
        StmtKind::Switch { switchees, cases, default, .. } => {
            assert_eq!(switchees.len(), 2);
            assert_eq!(cases.len(), 2);
            assert!(default.is_some());
        }
        other => panic!("expected Switch, got {:?}", other),
    }
}

#[test]
fn test_call_requires_bare_identifier_callee() {
    let (_, errors) = parse("func f() { (1 + 2)(3); }");
    assert!(!errors.is_empty());
    assert_eq!(errors[0].kind(), ParseErrorKind::InvalidConstruct);
}

#[test]
fn test_unary_minus_folds_into_int_literal() {
    let program = parse_ok("func f() { var a = -5; }");
    let body = match &program.statements[0].kind {
        StmtKind::FunctionDecl { body, .. } => body,
        _ => unreachable!(),
    };
    match &body[0].kind {
        StmtKind::VarDecl { initializer: Some(e), .. } => assert!(matches!(e.kind, ExprKind::Literal(Value::Int(-5)))),
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_rerail_skips_to_next_line_after_error() {
    let (program, errors) = parse("var;\nvar y = 2;\n");
    assert_eq!(errors.len(), 1);
    // The malformed "var;" line is skipped entirely by rerail; only the
    // well-formed declaration on line 2 survives.
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.statements[0].kind, StmtKind::VarDecl { .. }));
}

#[test]
fn test_import_with_multiple_names() {
    let program = parse_ok("import a, b, c;");
    match &program.statements[0].kind {
        StmtKind::Import(names) => assert_eq!(names.len(), 3),
        other => panic!("expected Import, got {:?}", other),
    }
}

#[test]
fn test_void_function_sets_returns_false() {
    let program = parse_ok("void greet() { print(\"hi\"); }");
    match &program.statements[0].kind {
        StmtKind::FunctionDecl { returns, .. } => assert!(!returns),
        other => panic!("expected FunctionDecl, got {:?}", other),
    }
}
