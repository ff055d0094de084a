use diagnostics::source::SourceFile;
use diagnostics::ErrorManager;
use syntax_js::parse::ParseOptions;
use syntax_js::parse_program;

/// End-to-end: a script with several syntax errors yields a formatted list
/// of diagnostics, one per recoverable error, instead of a single aborted
/// exception.
#[test]
fn one_compile_attempt_reports_every_error() {
  let src = "var a = ;\nvar b = 1;\nvar c = ;\n";
  let source = SourceFile::new("script.js", src);
  let parsed = parse_program(src, ParseOptions::default());

  let mut mgr = ErrorManager::new();
  mgr.syntax_errors(&parsed.errors);
  assert_eq!(mgr.error_count(), 2);

  let rendered = mgr.render(&source);
  assert!(rendered.contains("script.js:1:"));
  assert!(rendered.contains("script.js:3:"));
  assert!(rendered.contains("^"));
}

#[test]
fn source_url_directive_renames_the_report() {
  let src = "//# sourceURL=lib/widget.js\nvar x = ;\n";
  let source = SourceFile::new("<eval>", src);
  let parsed = parse_program(src, ParseOptions::default());
  if let Some(url) = &parsed.source_url {
    source.set_url(url.clone());
  }

  let mut mgr = ErrorManager::new();
  mgr.syntax_errors(&parsed.errors);
  let rendered = mgr.render(&source);
  assert!(rendered.contains("lib/widget.js:2:"));
  assert!(!rendered.contains("<eval>"));
}

#[test]
fn clean_parse_reports_nothing() {
  let src = "var a = 1;\n";
  let parsed = parse_program(src, ParseOptions::default());
  let mut mgr = ErrorManager::new();
  mgr.syntax_errors(&parsed.errors);
  assert!(!mgr.has_errors());
  assert!(mgr.render(&SourceFile::new("a.js", src)).is_empty());
}
