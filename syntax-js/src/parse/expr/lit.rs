use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::lit::DirectPropKey;
use crate::ast::expr::lit::IdShorthand;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::lit::ObjMember;
use crate::ast::expr::lit::PropKey;
use crate::ast::func::FuncKind;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::lex::KEYWORDS_MAPPING;
use crate::num::is_legacy_octal;
use crate::num::parse_numeric_literal;
use crate::num::JsNumber;
use crate::token::TT;

/// Decodes the escape sequences of a string or template chunk. Unknown
/// escapes resolve to the escaped character itself, matching runtime
/// semantics.
pub fn decode_string_value(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    let Some(esc) = chars.next() else {
      break;
    };
    match esc {
      'n' => out.push('\n'),
      't' => out.push('\t'),
      'r' => out.push('\r'),
      'b' => out.push('\u{8}'),
      'f' => out.push('\u{c}'),
      'v' => out.push('\u{b}'),
      '0' if !chars.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
      'x' => {
        let hi = chars.next();
        let lo = chars.next();
        match (hi, lo) {
          (Some(hi), Some(lo)) => {
            match u32::from_str_radix(&format!("{}{}", hi, lo), 16)
              .ok()
              .and_then(char::from_u32)
            {
              Some(c) => out.push(c),
              None => {
                out.push('x');
                out.push(hi);
                out.push(lo);
              }
            }
          }
          _ => out.push('x'),
        }
      }
      'u' => {
        let mut digits = String::new();
        if chars.peek() == Some(&'{') {
          chars.next();
          for c in chars.by_ref() {
            if c == '}' {
              break;
            }
            digits.push(c);
          }
        } else {
          for _ in 0..4 {
            if let Some(c) = chars.next() {
              digits.push(c);
            }
          }
        }
        match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
          Some(c) => out.push(c),
          None => {
            out.push('u');
            out.push_str(&digits);
          }
        }
      }
      // Line continuation: an escaped line terminator produces nothing.
      '\n' | '\u{2028}' | '\u{2029}' => {}
      '\r' => {
        if chars.peek() == Some(&'\n') {
          chars.next();
        }
      }
      other => out.push(other),
    }
  }
  out
}

impl<'a> Parser<'a> {
  pub fn lit_bool(&mut self) -> SyntaxResult<Node<LitBoolExpr>> {
    self.with_loc(|p| {
      let t = p.consume();
      let value = match t.typ {
        TT::LiteralTrue => true,
        TT::LiteralFalse => false,
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("boolean literal"))),
      };
      Ok(LitBoolExpr { value })
    })
  }

  pub fn lit_null(&mut self) -> SyntaxResult<Node<LitNullExpr>> {
    self.with_loc(|p| {
      p.require(TT::LiteralNull)?;
      Ok(LitNullExpr {})
    })
  }

  pub fn lit_num(&mut self) -> SyntaxResult<Node<LitNumExpr>> {
    self.with_loc(|p| {
      let t = p.require(TT::LiteralNumber)?;
      let raw = p.str(t.loc);
      if is_legacy_octal(raw) {
        if p.is_strict_mode() {
          return Err(t.error(SyntaxErrorType::LegacyOctalInStrictMode));
        }
        // Legal in sloppy mode, but flagged on the non-fatal channel since
        // it becomes an error the moment the code turns strict.
        p.warn(t.error(SyntaxErrorType::LegacyOctalInStrictMode));
      }
      let value = parse_numeric_literal(raw)
        .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?;
      Ok(LitNumExpr {
        value: JsNumber(value),
      })
    })
  }

  pub fn lit_str(&mut self) -> SyntaxResult<Node<LitStrExpr>> {
    self.with_loc(|p| {
      let t = p.require(TT::LiteralString)?;
      let raw = p.str(t.loc);
      // Strip the quotes before decoding.
      let value = decode_string_value(&raw[1..raw.len() - 1]);
      Ok(LitStrExpr { value })
    })
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<Node<LitRegexExpr>> {
    self.with_loc(|p| {
      let t = p.require_with_mode(TT::LiteralRegex, LexMode::SlashIsRegex)?;
      let value = p.intern_loc(t.loc);
      Ok(LitRegexExpr { value })
    })
  }

  pub fn lit_arr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitArrExpr>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          // A bare comma here is an elision: the separator after an element
          // is consumed below, so this one had no element before it.
          elements.push(LitArrElem::Empty);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        if p.consume_if(TT::DotDotDot).is_match() {
          let value = p.expr(ctx, [TT::Comma, TT::BracketClose])?;
          elements.push(LitArrElem::Rest(value));
        } else {
          let value = p.expr(ctx, [TT::Comma, TT::BracketClose])?;
          elements.push(LitArrElem::Single(value));
        }
        if p.peek().typ != TT::BracketClose && !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BracketClose)?;
      Ok(LitArrExpr { elements })
    })
  }

  /// Parses a non-computed or computed property key. Reserved words,
  /// strings, and numbers are valid non-computed keys.
  pub fn prop_key(&mut self, ctx: ParseCtx) -> SyntaxResult<PropKey> {
    if self.consume_if(TT::BracketOpen).is_match() {
      let key = self.expr(ctx, [TT::BracketClose])?;
      self.require(TT::BracketClose)?;
      return Ok(PropKey::Computed(key));
    }
    let t = self.consume();
    let valid = t.typ == TT::Identifier
      || t.typ == TT::LiteralString
      || t.typ == TT::LiteralNumber
      || KEYWORDS_MAPPING.contains_key(&t.typ);
    if !valid {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("property key")));
    }
    let name = match t.typ {
      // The key is the decoded value, so `{ "a": 1 }` and `{ a: 1 }` have
      // the same key.
      TT::LiteralString => {
        let raw = self.string(t.loc);
        let decoded = decode_string_value(&raw[1..raw.len() - 1]);
        self.intern(&decoded)
      }
      _ => self.intern_loc(t.loc),
    };
    Ok(PropKey::Direct(Node::new(t.loc, DirectPropKey {
      name,
      tt: t.typ,
    })))
  }

  pub fn lit_obj(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitObjExpr>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut members = Vec::new();
      while p.peek().typ != TT::BraceClose {
        let member = p.with_loc(|p| {
          let [t0, t1] = p.peek_n();
          // `get`/`set` begin an accessor only when followed by a key;
          // `{ get: 1 }` and `{ get }` are ordinary properties.
          let accessor_kind = match t0.typ {
            TT::KeywordGet if is_key_start(t1.typ) => Some(FuncKind::Getter),
            TT::KeywordSet if is_key_start(t1.typ) => Some(FuncKind::Setter),
            _ => None,
          };
          if let Some(kind) = accessor_kind {
            p.consume();
            let key = p.prop_key(ctx)?;
            let func = p.with_loc(|p| p.accessor_func(ctx, kind))?;
            return Ok(match kind {
              FuncKind::Getter => ObjMember::Getter { key, func },
              _ => ObjMember::Setter { key, func },
            });
          }
          let key = p.prop_key(ctx)?;
          if p.consume_if(TT::Colon).is_match() {
            let value = p.expr(ctx, [TT::Comma, TT::BraceClose])?;
            return Ok(ObjMember::Prop { key, value });
          }
          // Shorthand property; the key must be a plain identifier name.
          match key {
            PropKey::Direct(n)
              if super::pat::is_valid_pattern_identifier(n.stx.tt, ctx.rules) =>
            {
              let id = n.derive_stx(|n| IdShorthand {
                name: n.name.clone(),
              });
              Ok(ObjMember::Shorthand { id })
            }
            PropKey::Direct(n) => Err(n.error(SyntaxErrorType::ExpectedSyntax("property value"))),
            PropKey::Computed(n) => {
              Err(n.error(SyntaxErrorType::ExpectedSyntax("property value")))
            }
          }
        })?;
        members.push(member);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(LitObjExpr { members })
    })
  }

  /// Parses a whole template literal. The opening token has already been
  /// identified (but not consumed) by the caller.
  pub fn lit_template_parts(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<LitTemplatePart>> {
    let t = self.consume();
    let raw = self.string(t.loc);
    let mut parts = Vec::new();
    match t.typ {
      TT::LiteralTemplatePartStringEnd => {
        parts.push(LitTemplatePart::String(template_chunk(&raw, t.typ, 1)));
        return Ok(parts);
      }
      TT::LiteralTemplatePartString => {
        parts.push(LitTemplatePart::String(template_chunk(&raw, t.typ, 1)));
      }
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("template literal"))),
    }
    loop {
      let sub = self.expr(ctx, [TT::BraceClose])?;
      parts.push(LitTemplatePart::Substitution(sub));
      self.require(TT::BraceClose)?;
      let cont = self.consume_with_mode(LexMode::TemplateStrContinue);
      let raw = self.string(cont.loc);
      match cont.typ {
        TT::LiteralTemplatePartStringEnd => {
          parts.push(LitTemplatePart::String(template_chunk(&raw, cont.typ, 0)));
          break;
        }
        TT::LiteralTemplatePartString => {
          parts.push(LitTemplatePart::String(template_chunk(&raw, cont.typ, 0)));
        }
        _ => return Err(cont.error(SyntaxErrorType::ExpectedSyntax("template continuation"))),
      }
    }
    Ok(parts)
  }

  pub fn lit_template(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitTemplateExpr>> {
    self.with_loc(|p| {
      let parts = p.lit_template_parts(ctx)?;
      Ok(LitTemplateExpr { parts })
    })
  }
}

fn template_chunk(raw: &str, typ: TT, leading_delim: usize) -> String {
  let trailing = match typ {
    // Ends with `${`.
    TT::LiteralTemplatePartString => 2,
    // Ends with a backtick.
    _ => 1,
  };
  decode_string_value(&raw[leading_delim..raw.len() - trailing])
}

fn is_key_start(typ: TT) -> bool {
  typ == TT::Identifier
    || typ == TT::LiteralString
    || typ == TT::LiteralNumber
    || typ == TT::BracketOpen
    || KEYWORDS_MAPPING.contains_key(&typ)
}

#[cfg(test)]
mod tests {
  use super::decode_string_value;

  #[test]
  fn decodes_simple_escapes() {
    assert_eq!(decode_string_value(r"a\nb\tc"), "a\nb\tc");
    assert_eq!(decode_string_value(r"\x41B"), "AB");
    assert_eq!(decode_string_value(r"\u{1F600}"), "\u{1F600}");
    assert_eq!(decode_string_value(r"\q"), "q");
    assert_eq!(decode_string_value("a\\\nb"), "ab");
  }
}
