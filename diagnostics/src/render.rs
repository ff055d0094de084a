use crate::source::SourceFile;
use crate::Diagnostic;
use std::fmt::Write;

/// Renders one diagnostic with a caret-marked source snippet:
///
/// ```text
/// error[PS0004]: expected expression operand
///  --> app.js:1:9
///   |
/// 1 | var x = ;
///   |         ^ expected expression operand
/// ```
///
/// Multi-line spans underline each covered line. The displayed file name is
/// the source's explicit URL when one was set by a directive.
pub fn render_diagnostic(source: &SourceFile, diagnostic: &Diagnostic) -> String {
  let mut out = String::new();
  writeln!(
    out,
    "{}[{}]: {}",
    diagnostic.severity, diagnostic.code, diagnostic.message
  )
  .unwrap();

  let text = source.text();
  let start = clamp_to_char_boundary(text, diagnostic.start);
  let end = clamp_to_char_boundary(text, diagnostic.end.max(diagnostic.start));
  let (line, col) = source.line_col(start);
  writeln!(out, " --> {}:{}:{}", source.display_name(), line, col).unwrap();

  let start_line = source.line_index(start);
  let end_line = source.line_index(if end > start { end - 1 } else { end });
  let gutter = (end_line + 1).to_string().len().max(1);

  writeln!(out, "{:>gutter$} |", "", gutter = gutter).unwrap();
  for line_idx in start_line..=end_line {
    let (line_start, line_end) = source.line_bounds(line_idx);
    let line_text = &text[line_start..line_end];
    writeln!(out, "{:>gutter$} | {}", line_idx + 1, line_text, gutter = gutter).unwrap();

    let mark_from = if line_idx == start_line {
      start - line_start
    } else {
      0
    };
    let mark_to = if line_idx == end_line {
      end.clamp(line_start, line_end) - line_start
    } else {
      line_text.len()
    };
    let marker_len = mark_to.saturating_sub(mark_from).max(1);
    let mut marker_line = String::new();
    write!(marker_line, "{:>gutter$} | ", "", gutter = gutter).unwrap();
    marker_line.push_str(&" ".repeat(mark_from));
    marker_line.push_str(&"^".repeat(marker_len));
    if line_idx == start_line && !diagnostic.message.is_empty() {
      marker_line.push(' ');
      marker_line.push_str(&diagnostic.message);
    }
    marker_line.push('\n');
    out.push_str(&marker_line);
  }

  for note in &diagnostic.notes {
    writeln!(out, "= note: {}", note).unwrap();
  }

  out
}

fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
  let mut offset = offset.min(text.len());
  while offset > 0 && !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Severity;
  use syntax_js::loc::Loc;

  #[test]
  fn renders_single_line_span() {
    let source = SourceFile::new("test.js", "let x = 1;");
    let d = Diagnostic::error("TEST0001", "unused variable", Loc(4, 5));
    let rendered = render_diagnostic(&source, &d);
    let expected = "error[TEST0001]: unused variable\n --> test.js:1:5\n  |\n1 | let x = 1;\n  |     ^ unused variable\n";
    assert_eq!(rendered, expected);
  }

  #[test]
  fn renders_multi_line_span() {
    let source = SourceFile::new("main.js", "function f() {\n  return 1;\n}\n");
    let d = Diagnostic::error("TEST0002", "broken function", Loc(0, 27));
    let rendered = render_diagnostic(&source, &d);
    assert!(rendered.contains(" --> main.js:1:1"));
    assert!(rendered.contains("1 | function f() {"));
    assert!(rendered.contains("2 |   return 1;"));
  }

  #[test]
  fn warning_severity_and_notes() {
    let source = SourceFile::new("w.js", "a");
    let d = Diagnostic {
      code: "TEST0003",
      severity: Severity::Warning,
      message: "suspicious".into(),
      start: 0,
      end: 1,
      notes: vec!["consider removing".into()],
    };
    let rendered = render_diagnostic(&source, &d);
    assert!(rendered.starts_with("warning[TEST0003]"));
    assert!(rendered.contains("= note: consider removing"));
  }

  #[test]
  fn directive_url_overrides_the_display_name() {
    let source = SourceFile::new("anonymous", "var x = ;");
    source.set_url("app.js");
    let d = Diagnostic::error("PS0004", "expected expression operand", Loc(8, 9));
    let rendered = render_diagnostic(&source, &d);
    assert!(rendered.contains(" --> app.js:1:9"));
  }

  #[test]
  fn empty_spans_still_get_a_caret() {
    let source = SourceFile::new("e.js", "abc");
    let d = Diagnostic::error("TEST0004", "here", Loc(1, 1));
    let rendered = render_diagnostic(&source, &d);
    assert!(rendered.contains("^ here"));
  }
}
