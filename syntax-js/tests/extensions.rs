use syntax_js::ast::expr::Expr;
use syntax_js::ast::stmt::Stmt;
use syntax_js::error::SyntaxErrorType;
use syntax_js::parse::ParseOptions;
use syntax_js::parse_program;

fn ext_options() -> ParseOptions {
  ParseOptions {
    extensions: true,
    ..ParseOptions::default()
  }
}

fn parse_ext(src: &str) -> syntax_js::ParsedProgram {
  parse_program(src, ext_options())
}

#[test]
fn import_statement_records_dotted_path() {
  let parsed = parse_ext("import java.util.HashMap;");
  assert!(parsed.errors.is_empty());
  let Stmt::ImportName(import) = &*parsed.top_level.stx.body[0].stx else {
    panic!("expected import statement");
  };
  let path: Vec<&str> = import.stx.path.iter().map(|s| s.as_ref()).collect();
  assert_eq!(path, vec!["java", "util", "HashMap"]);
}

#[test]
fn import_is_rejected_without_extensions() {
  let parsed = parse_program("import a.b.C;", ParseOptions::default());
  assert!(parsed
    .errors
    .iter()
    .any(|e| e.typ == SyntaxErrorType::SyntaxExtensionDisabled));
}

#[test]
fn bean_construction_after_import() {
  let parsed = parse_ext("import a.b.Point;\nvar p = Point(1, 2) { z: 3 };");
  assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
  let Stmt::VarDecl(decl) = &*parsed.top_level.stx.body[1].stx else {
    panic!("expected var declaration");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  let Expr::Bean(bean) = &*init.stx else {
    panic!("expected bean expression, got {:?}", init);
  };
  assert_eq!(bean.stx.name.as_ref(), "Point");
  assert_eq!(bean.stx.arguments.len(), 2);
  assert_eq!(bean.stx.members.stx.members.len(), 1);
}

#[test]
fn imported_name_without_members_is_a_plain_call() {
  let parsed = parse_ext("import a.b.Point;\nvar p = Point(1, 2);");
  assert!(parsed.errors.is_empty());
  let Stmt::VarDecl(decl) = &*parsed.top_level.stx.body[1].stx else {
    panic!("expected var declaration");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  assert!(matches!(&*init.stx, Expr::Call(_)));
}

#[test]
fn unimported_names_never_parse_as_beans() {
  // `Point(1) { ... }` without a prior import is a call followed by a
  // syntax error, not a bean.
  let parsed = parse_ext("var p = Point(1) { z: 3 };");
  assert!(!parsed.errors.is_empty());
}

#[test]
fn for_each_iteration() {
  let parsed = parse_ext("for each (x in xs) f(x);");
  assert!(parsed.errors.is_empty());
  let Stmt::ForIn(for_in) = &*parsed.top_level.stx.body[0].stx else {
    panic!("expected for-in");
  };
  assert!(for_in.stx.each);

  // Plain for-in is unaffected.
  let parsed = parse_ext("for (x in xs) f(x);");
  let Stmt::ForIn(for_in) = &*parsed.top_level.stx.body[0].stx else {
    panic!("expected for-in");
  };
  assert!(!for_in.stx.each);
}

#[test]
fn for_each_requires_extensions() {
  let parsed = parse_program("for each (x in xs) f(x);", ParseOptions::default());
  assert!(!parsed.errors.is_empty());
}

#[test]
fn guarded_multi_catch() {
  let src = "try { f(); } catch (e if e.fatal) { a(); } catch (e if e.soft) { b(); } catch (e) { c(); } finally { d(); }";
  let parsed = parse_ext(src);
  assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
  let Stmt::Try(try_stmt) = &*parsed.top_level.stx.body[0].stx else {
    panic!("expected try");
  };
  assert_eq!(try_stmt.stx.catches.len(), 3);
  assert!(try_stmt.stx.catches[0].stx.condition.is_some());
  assert!(try_stmt.stx.catches[1].stx.condition.is_some());
  assert!(try_stmt.stx.catches[2].stx.condition.is_none());
  assert!(try_stmt.stx.finally.is_some());
}

#[test]
fn guarded_catch_requires_extensions() {
  let parsed = parse_program("try { f(); } catch (e if x) { }", ParseOptions::default());
  assert!(parsed
    .errors
    .iter()
    .any(|e| e.typ == SyntaxErrorType::SyntaxExtensionDisabled));
}

#[test]
fn imports_are_scoped_to_one_parse() {
  // The first parse registers Point; a separate parse must not see it.
  let _ = parse_ext("import a.b.Point;\nvar p = Point(0, 0) {};");
  let parsed = parse_ext("var p = Point(0, 0) { z: 1 };");
  assert!(!parsed.errors.is_empty());
}
