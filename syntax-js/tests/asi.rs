use syntax_js::ast::stmt::Stmt;
use syntax_js::parse;

#[test]
fn line_break_separates_statements() {
  let top = parse("a\nb").unwrap();
  assert_eq!(top.stx.body.len(), 2);
  assert!(matches!(*top.stx.body[0].stx, Stmt::Expr(_)));
  assert!(matches!(*top.stx.body[1].stx, Stmt::Expr(_)));
}

#[test]
fn continuation_across_line_break() {
  // `+` cannot start a statement here, so `a\n+b` is one expression.
  let top = parse("a\n+ b").unwrap();
  assert_eq!(top.stx.body.len(), 1);
}

#[test]
fn return_is_a_restricted_production() {
  let top = parse("function f() { return\na; }").unwrap();
  let Stmt::FunctionDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected function");
  };
  let Some(syntax_js::ast::func::FuncBody::Block(body)) = &decl.stx.function.stx.body else {
    panic!("expected block body");
  };
  // `return` ends at the line break; `a;` is a separate statement.
  assert_eq!(body.len(), 2);
  let Stmt::Return(ret) = &*body[0].stx else {
    panic!("expected return");
  };
  assert!(ret.stx.value.is_none());
  assert!(matches!(*body[1].stx, Stmt::Expr(_)));
}

#[test]
fn throw_must_not_be_followed_by_line_break() {
  use syntax_js::error::SyntaxErrorType;
  let err = parse("throw\nx;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);
  assert!(parse("throw x;").is_ok());
}

#[test]
fn postfix_operators_do_not_cross_line_breaks() {
  // `a\n++b` is `a; ++b;` under ASI, not `a++; b`.
  let top = parse("a\n++b").unwrap();
  assert_eq!(top.stx.body.len(), 2);
}

#[test]
fn implicit_semicolon_before_closing_brace_and_eof() {
  assert!(parse("if (a) { b }").is_ok());
  assert!(parse("a = 1").is_ok());
  let top = parse("var x = 1\nvar y = 2").unwrap();
  assert_eq!(top.stx.body.len(), 2);
}

#[test]
fn missing_semicolon_without_line_break_is_an_error() {
  assert!(parse("a b").is_err());
}
