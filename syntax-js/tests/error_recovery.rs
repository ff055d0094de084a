use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::Stmt;
use syntax_js::parse::ParseOptions;
use syntax_js::parse_program;

#[test]
fn malformed_statement_does_not_block_the_rest() {
  let parsed = parse_program("var x = ;\nvar y = 1;", ParseOptions::default());
  assert!(!parsed.errors.is_empty());
  // The bad statement is replaced by an error placeholder; `y` still parses.
  let body = &parsed.top_level.stx.body;
  assert!(body.iter().any(|s| matches!(&*s.stx, Stmt::Error(_))));
  let decl = body
    .iter()
    .find_map(|s| match &*s.stx {
      Stmt::VarDecl(d) => Some(d),
      _ => None,
    })
    .expect("the second declaration should have parsed");
  assert_eq!(decl.stx.mode, VarDeclMode::Var);
  assert_eq!(decl.stx.declarators.len(), 1);
}

#[test]
fn every_discoverable_error_is_collected() {
  let parsed = parse_program("var a = ;\nvar b = ;\nvar c = 3;", ParseOptions::default());
  assert_eq!(parsed.errors.len(), 2);
  let ok_decls = parsed
    .top_level
    .stx
    .body
    .iter()
    .filter(|s| matches!(&*s.stx, Stmt::VarDecl(_)))
    .count();
  assert_eq!(ok_decls, 1);
}

#[test]
fn recovery_makes_progress_on_stray_tokens() {
  // A stray `}` can't start a statement and consumes no input; recovery must
  // still terminate and keep parsing.
  let parsed = parse_program("}\nvar ok = 1;", ParseOptions::default());
  assert!(!parsed.errors.is_empty());
  assert!(parsed
    .top_level
    .stx
    .body
    .iter()
    .any(|s| matches!(&*s.stx, Stmt::VarDecl(_))));
}

#[test]
fn errors_carry_positions() {
  let src = "var x = ;";
  let parsed = parse_program(src, ParseOptions::default());
  let err = &parsed.errors[0];
  assert!(err.loc.0 <= src.len() && err.loc.1 <= src.len());
  assert!(err.loc.0 <= err.loc.1);
}

#[test]
fn sloppy_legacy_octal_is_a_warning_not_an_error() {
  use syntax_js::error::SyntaxErrorType;
  let parsed = parse_program("var a = 0644;", ParseOptions::default());
  assert!(parsed.errors.is_empty());
  assert_eq!(parsed.warnings.len(), 1);
  assert_eq!(
    parsed.warnings[0].typ,
    SyntaxErrorType::LegacyOctalInStrictMode
  );
}

#[test]
fn source_url_directive_is_surfaced() {
  let parsed = parse_program(
    "//# sourceURL=app.js\nvar a = 1;",
    ParseOptions::default(),
  );
  assert_eq!(parsed.source_url.as_deref(), Some("app.js"));
}
