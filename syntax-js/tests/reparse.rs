use syntax_js::ast::func::FuncBody;
use syntax_js::ast::stmt::Stmt;
use syntax_js::parse;
use syntax_js::parse_function_body;
use syntax_js::parse_program;
use syntax_js::parse::ParseOptions;

const SRC: &str = "var n = 1;\nfunction outer(a) { var b = `x${a}y`; function inner() { return b; } return inner; }\nouter(n);";

fn skip_options() -> ParseOptions {
  ParseOptions {
    skip_function_bodies: true,
    ..ParseOptions::default()
  }
}

#[test]
fn skipped_bodies_record_resume_points() {
  let parsed = parse_program(SRC, skip_options());
  assert!(parsed.errors.is_empty());
  let Stmt::FunctionDecl(decl) = &*parsed.top_level.stx.body[1].stx else {
    panic!("expected function declaration");
  };
  let func = &decl.stx.function.stx;
  assert!(func.body.is_none());
  let skipped = func.skipped.expect("skip points recorded");
  // Start is just after the `{`, end just before the `}`.
  assert_eq!(&SRC[skipped.start.offset..skipped.start.offset + 6], " var b");
  assert_eq!(SRC.as_bytes()[skipped.end.offset], b'}');
  assert!(skipped.start.offset < skipped.end.offset);
  // All on line 2.
  assert_eq!(skipped.start.line, 2);
  assert_eq!(skipped.end.line, 2);
}

#[test]
fn reparse_restores_the_skipped_body() {
  let parsed = parse_program(SRC, skip_options());
  let Stmt::FunctionDecl(decl) = &*parsed.top_level.stx.body[1].stx else {
    panic!("expected function declaration");
  };
  let skipped = decl.stx.function.stx.skipped.unwrap();

  // Re-seed a fresh parser at the recorded resume point.
  let body = parse_function_body(SRC, skipped, false, ParseOptions::default()).unwrap();
  assert_eq!(body.len(), 3);
  assert!(matches!(*body[0].stx, Stmt::VarDecl(_)));
  assert!(matches!(*body[1].stx, Stmt::FunctionDecl(_)));
  assert!(matches!(*body[2].stx, Stmt::Return(_)));
}

#[test]
fn reparse_agrees_with_a_full_parse() {
  let full = parse(SRC).unwrap();
  let Stmt::FunctionDecl(decl) = &*full.stx.body[1].stx else {
    panic!("expected function declaration");
  };
  let Some(FuncBody::Block(full_body)) = &decl.stx.function.stx.body else {
    panic!("expected block body");
  };

  let parsed = parse_program(SRC, skip_options());
  let Stmt::FunctionDecl(decl) = &*parsed.top_level.stx.body[1].stx else {
    panic!("expected function declaration");
  };
  let skipped = decl.stx.function.stx.skipped.unwrap();
  let reparsed = parse_function_body(SRC, skipped, false, ParseOptions::default()).unwrap();

  // Same statements with the same source positions as the original parse.
  let full_json = serde_json::to_value(full_body).unwrap();
  let reparsed_json = serde_json::to_value(&reparsed).unwrap();
  assert_eq!(full_json, reparsed_json);
  for (a, b) in full_body.iter().zip(reparsed.iter()) {
    assert_eq!(a.loc, b.loc);
  }
}

#[test]
fn statements_after_a_skipped_body_still_parse() {
  let parsed = parse_program(SRC, skip_options());
  assert_eq!(parsed.top_level.stx.body.len(), 3);
  assert!(matches!(*parsed.top_level.stx.body[2].stx, Stmt::Expr(_)));
}

#[test]
fn skipping_handles_braces_inside_templates() {
  let src = "function f() { return `a${ {b: 1}.b }c`; } var tail = 1;";
  let parsed = parse_program(src, skip_options());
  assert!(parsed.errors.is_empty());
  assert_eq!(parsed.top_level.stx.body.len(), 2);
}
