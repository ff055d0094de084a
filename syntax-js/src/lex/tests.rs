use super::*;

fn lex_all(src: &str) -> Vec<(TT, String)> {
  let mut lexer = Lexer::new(src);
  let mut tokens = Vec::new();
  loop {
    let t = lex_next(&mut lexer, LexMode::Standard);
    if t.typ == TT::EOF {
      break;
    }
    tokens.push((t.typ, lexer[t.loc].to_string()));
  }
  tokens
}

#[test]
fn keywords_vs_identifiers() {
  let tokens = lex_all("in instanceof informal of offset");
  assert_eq!(tokens, vec![
    (TT::KeywordIn, "in".to_string()),
    (TT::KeywordInstanceof, "instanceof".to_string()),
    (TT::Identifier, "informal".to_string()),
    (TT::KeywordOf, "of".to_string()),
    (TT::Identifier, "offset".to_string()),
  ]);
}

#[test]
fn longest_operator_wins() {
  let tokens = lex_all("a >>>= b >>> c >> d > e");
  let ops: Vec<TT> = tokens.iter().map(|(t, _)| *t).filter(|t| *t != TT::Identifier).collect();
  assert_eq!(ops, vec![
    TT::ChevronRightChevronRightChevronRightEquals,
    TT::ChevronRightChevronRightChevronRight,
    TT::ChevronRightChevronRight,
    TT::ChevronRight,
  ]);
}

#[test]
fn line_terminator_tracking() {
  let mut lexer = Lexer::new("a\nb /* x\ny */ c d");
  let a = lex_next(&mut lexer, LexMode::Standard);
  assert!(!a.preceded_by_line_terminator);
  let b = lex_next(&mut lexer, LexMode::Standard);
  assert!(b.preceded_by_line_terminator);
  // A multiline comment containing a newline counts.
  let c = lex_next(&mut lexer, LexMode::Standard);
  assert!(c.preceded_by_line_terminator);
  let d = lex_next(&mut lexer, LexMode::Standard);
  assert!(!d.preceded_by_line_terminator);
}

#[test]
fn slash_mode_disambiguates_regex() {
  let mut lexer = Lexer::new("/ab[/]c/gi");
  let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
  assert_eq!(t.typ, TT::LiteralRegex);
  assert_eq!(&lexer[t.loc], "/ab[/]c/gi");

  let mut lexer = Lexer::new("/ 2");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, TT::Slash);
}

#[test]
fn numbers() {
  let tokens = lex_all("1 2.5 .5 1e3 0x1F 0b11 0o17 0644");
  assert!(tokens.iter().all(|(t, _)| *t == TT::LiteralNumber));
  assert_eq!(tokens.len(), 8);
}

#[test]
fn template_parts() {
  let mut lexer = Lexer::new("`a${x}b`");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, TT::LiteralTemplatePartString);
  assert_eq!(&lexer[t.loc], "`a${");
  let x = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(x.typ, TT::Identifier);
  let close = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(close.typ, TT::BraceClose);
  let t = lex_next(&mut lexer, LexMode::TemplateStrContinue);
  assert_eq!(t.typ, TT::LiteralTemplatePartStringEnd);
  assert_eq!(&lexer[t.loc], "b`");
}

#[test]
fn strings_with_escapes() {
  let tokens = lex_all(r#"'a\'b' "c\"d""#);
  assert_eq!(tokens.len(), 2);
  assert!(tokens.iter().all(|(t, _)| *t == TT::LiteralString));
}

#[test]
fn unterminated_string_is_invalid() {
  let mut lexer = Lexer::new("'abc\ndef'");
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, TT::Invalid);
}

#[test]
fn source_url_directive_first_wins() {
  let mut lexer = Lexer::new("//# sourceURL=first.js\nvar a;\n//# sourceURL=second.js\n");
  while lex_next(&mut lexer, LexMode::Standard).typ != TT::EOF {}
  assert_eq!(lexer.source_url(), Some("first.js"));
}

#[test]
fn legacy_at_source_url_directive() {
  let mut lexer = Lexer::new("//@ sourceURL=legacy.js\n1;");
  while lex_next(&mut lexer, LexMode::Standard).typ != TT::EOF {}
  assert_eq!(lexer.source_url(), Some("legacy.js"));
}

#[test]
fn html_comments() {
  let tokens = lex_all("<!-- a\nb\n--> c\nd");
  // `<!--` and (line-start) `-->` are comments; only b and d remain.
  assert_eq!(tokens.iter().map(|(_, s)| s.as_str()).collect::<Vec<_>>(), vec!["b", "d"]);
}

#[test]
fn resume_points() {
  let lexer = Lexer::new("ab\ncd\nef");
  let p = lexer.resume_point_at(0);
  assert_eq!((p.line, p.column), (1, 0));
  let p = lexer.resume_point_at(4);
  assert_eq!((p.line, p.column), (2, 1));
  let p = lexer.resume_point_at(6);
  assert_eq!((p.line, p.column), (3, 0));
}

#[test]
fn reseed_continues_lexing() {
  let mut lexer = Lexer::new("aa bb cc");
  let _ = lex_next(&mut lexer, LexMode::Standard);
  let resume = lexer.resume_point_at(lexer.next());
  let b1 = lex_next(&mut lexer, LexMode::Standard);
  let _ = lex_next(&mut lexer, LexMode::Standard);
  lexer.reseed(resume);
  let b2 = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(b1.loc, b2.loc);
  assert_eq!(b1.typ, b2.typ);
}
