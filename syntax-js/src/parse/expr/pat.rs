use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::FuncName;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

#[derive(Clone, Copy)]
pub struct ParsePatternRules {
  // `yield` is not allowed as a parameter or variable inside a generator
  // function.
  pub yield_allowed: bool,
}

pub fn is_valid_pattern_identifier(typ: TT, rules: ParsePatternRules) -> bool {
  match typ {
    TT::Identifier => true,
    TT::KeywordYield => rules.yield_allowed,
    // `let` is only a declaration keyword when followed by a pattern; as a
    // plain name it's an ordinary (sloppy-mode) identifier.
    TT::KeywordLet => true,
    t => t.is_unreserved_keyword(),
  }
}

// Future reserved words of the strict grammar; binding or referencing these
// in strict code is an early error.
const STRICT_RESERVED_WORDS: [&str; 9] = [
  "implements",
  "interface",
  "let",
  "package",
  "private",
  "protected",
  "public",
  "static",
  "yield",
];

impl<'a> Parser<'a> {
  /// Strict-mode early errors for a name in binding position.
  pub fn validate_binding_name(&mut self, loc: Loc, name: &str) -> SyntaxResult<()> {
    if !self.is_strict_mode() {
      return Ok(());
    }
    if name == "eval" || name == "arguments" {
      return Err(loc.error(SyntaxErrorType::StrictModeBindingName, None));
    }
    if STRICT_RESERVED_WORDS.contains(&name) {
      return Err(loc.error(SyntaxErrorType::ReservedWordAsIdentifier, None));
    }
    Ok(())
  }

  pub fn maybe_func_name(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<Node<FuncName>>> {
    let t = self.consume_if_pred(|t| is_valid_pattern_identifier(t.typ, ctx.rules));
    match t.match_loc() {
      None => Ok(None),
      Some(loc) => {
        let name = self.intern_loc(loc);
        self.validate_binding_name(loc, &name)?;
        Ok(Some(Node::new(loc, FuncName { name })))
      }
    }
  }

  /// Parses an identifier pattern.
  pub fn id_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IdPat>> {
    self.with_loc(|p| {
      let t = p.consume();
      if !is_valid_pattern_identifier(t.typ, ctx.rules) {
        return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
      }
      let name = p.intern_loc(t.loc);
      p.validate_binding_name(t.loc, &name)?;
      Ok(IdPat { name })
    })
  }

  /// Parses an object pattern like `{ x, y: z, [computed]: value }`.
  pub fn obj_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      while p.peek().typ != TT::BraceClose {
        let prop = p.with_loc(|p| {
          let key = p.prop_key(ctx)?;
          let (shorthand, target) = if p.consume_if(TT::Colon).is_match() {
            // There's a colon, so there's a subpattern and it's not a
            // shorthand.
            (false, p.pat(ctx)?)
          } else {
            // No colon: a shorthand. The key must be non-computed and a
            // valid identifier name (not a number or reserved keyword).
            use crate::ast::expr::lit::PropKey;
            match &key {
              PropKey::Computed(name) => {
                return Err(name.error(SyntaxErrorType::ExpectedSyntax(
                  "object pattern property subpattern",
                )));
              }
              PropKey::Direct(n) => {
                if !is_valid_pattern_identifier(n.stx.tt, ctx.rules) {
                  return Err(n.error(SyntaxErrorType::ExpectedSyntax("identifier")));
                }
                p.validate_binding_name(n.loc, &n.stx.name)?;
                let id_pat = n
                  .derive_stx(|n| IdPat {
                    name: n.name.clone(),
                  })
                  .into_wrapped();
                (true, id_pat)
              }
            }
          };
          let default_value = p
            .consume_if(TT::Equals)
            .and_then(|| p.expr(ctx, [TT::Comma, TT::BraceClose]))?;
          Ok(ObjPatProp {
            key,
            target,
            shorthand,
            default_value,
          })
        })?;
        properties.push(prop);
        // This will break if `}`.
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(ObjPat { properties })
    })
  }

  /// Parses an array pattern like `[a, , b = c, ...rest]`.
  pub fn arr_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<Option<ArrPatElem>>::new();
      let mut rest = None;
      while p.peek().typ != TT::BracketClose {
        // Checked inside the loop so the rest element must come first or
        // after a comma; no trailing comma after it.
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat(ctx)?);
          break;
        };

        // An elision skips that element.
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
        } else {
          let target = p.pat(ctx)?;
          let default_value = p
            .consume_if(TT::Equals)
            .and_then(|| p.expr(ctx, [TT::Comma, TT::BracketClose]))?;
          elements.push(Some(ArrPatElem {
            target,
            default_value,
          }));
          // This will break if `]`.
          if !p.consume_if(TT::Comma).is_match() {
            break;
          };
        };
      }
      p.require(TT::BracketClose)?;
      Ok(ArrPat { elements, rest })
    })
  }

  /// Parses any pattern: identifier, object, or array.
  pub fn pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Pat>> {
    let t = self.peek();
    let pat: Node<Pat> = match t.typ {
      t if is_valid_pattern_identifier(t, ctx.rules) => self.id_pat(ctx)?.into_wrapped(),
      TT::BraceOpen => self.obj_pat(ctx)?.into_wrapped(),
      TT::BracketOpen => self.arr_pat(ctx)?.into_wrapped(),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("pattern"))),
    };
    Ok(pat)
  }
}
