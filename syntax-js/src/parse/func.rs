use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::FuncFlags;
use crate::ast::func::FuncKind;
use crate::ast::func::SkippedBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::Ident;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::parse::expr::pat::ParsePatternRules;
use crate::token::TT;
use ahash::HashSet;
use ahash::HashSetExt;

pub struct FuncBodyState {
  in_function: u32,
  in_iteration: u32,
  in_switch: u32,
  labels: Vec<Ident>,
}

impl<'a> Parser<'a> {
  pub fn func_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut parameters: Vec<Node<ParamDecl>> = Vec::new();
    while !self.consume_if(TT::ParenthesisClose).is_match() {
      if let Some(prev) = parameters.last() {
        // A previous parameter exists, so a comma separated it; a rest
        // parameter can't have been it.
        if prev.stx.rest {
          return Err(prev.error(SyntaxErrorType::ExpectedSyntax("rest parameter last")));
        }
      }
      let param = self.with_loc(|p| {
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let pattern = p.pat_decl(ctx)?;
        let default_value = p
          .consume_if(TT::Equals)
          .and_then(|| p.expr(ctx, [TT::Comma, TT::ParenthesisClose]))?;
        if rest && default_value.is_some() {
          return Err(
            pattern.error(SyntaxErrorType::ExpectedSyntax("rest parameter without default")),
          );
        }
        Ok(ParamDecl {
          rest,
          pattern,
          default_value,
        })
      })?;
      parameters.push(param);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::ParenthesisClose)?;
        break;
      }
    }
    Ok(parameters)
  }

  /// Looks ahead over the directive prologue for `"use strict"` without
  /// consuming anything.
  pub fn has_use_strict_directive(&mut self) -> bool {
    let cp = self.checkpoint();
    let mut found = false;
    loop {
      let t = self.peek();
      if t.typ != TT::LiteralString {
        break;
      }
      let raw = self.string(t.loc);
      let is_use_strict = raw == "\"use strict\"" || raw == "'use strict'";
      self.consume();
      let next = self.peek();
      // A directive is a whole statement: the string must be followed by an
      // explicit or inserted semicolon. `"use strict" + x` is an ordinary
      // expression and ends the prologue.
      let terminated = next.typ == TT::Semicolon
        || next.typ == TT::BraceClose
        || next.typ == TT::EOF
        || next.preceded_by_line_terminator;
      if !terminated {
        break;
      }
      if is_use_strict {
        found = true;
        break;
      }
      if next.typ == TT::Semicolon {
        self.consume();
      }
      if next.typ == TT::BraceClose || next.typ == TT::EOF {
        break;
      }
    }
    self.restore_checkpoint(cp);
    found
  }

  pub fn enter_func_body(&mut self) -> FuncBodyState {
    let state = FuncBodyState {
      in_function: self.in_function,
      in_iteration: self.in_iteration,
      in_switch: self.in_switch,
      labels: std::mem::take(&mut self.labels),
    };
    self.in_function += 1;
    self.in_iteration = 0;
    self.in_switch = 0;
    state
  }

  pub fn exit_func_body(&mut self, state: FuncBodyState) {
    self.in_function = state.in_function;
    self.in_iteration = state.in_iteration;
    self.in_switch = state.in_switch;
    self.labels = state.labels;
  }

  /// Parses the parameter list and braced body shared by function
  /// declarations, function expressions, and accessors. The caller has
  /// already consumed everything up to the parameter list.
  pub fn func_tail(&mut self, ctx: ParseCtx, kind: FuncKind, generator: bool) -> SyntaxResult<Func> {
    let fn_ctx = ctx.with_rules(ParsePatternRules {
      yield_allowed: !generator,
    });
    let parameters = self.func_params(fn_ctx)?;

    if self.options().skip_function_bodies {
      let skipped = self.skip_function_body()?;
      return Ok(Func {
        kind,
        generator,
        flags: FuncFlags::empty(),
        parameters,
        body: None,
        skipped: Some(skipped),
      });
    }

    self.require(TT::BraceOpen)?;
    let strict_directive = self.has_use_strict_directive();
    if strict_directive {
      self.enter_strict();
    }
    if let Err(err) = self.validate_formal_parameters(&parameters) {
      if strict_directive {
        self.exit_strict();
      }
      return Err(err);
    }
    self.push_fn_frame(kind);
    let saved = self.enter_func_body();
    let res = (|| {
      let body = self.stmts(fn_ctx, TT::BraceClose)?;
      self.require(TT::BraceClose)?;
      Ok(body)
    })();
    self.exit_func_body(saved);
    // The frame must be popped exactly once, including on error paths.
    let flags = self.pop_fn_frame();
    if strict_directive {
      self.exit_strict();
    }
    let body = res?;
    Ok(Func {
      kind,
      generator,
      flags,
      parameters,
      body: Some(FuncBody::Block(body)),
      skipped: None,
    })
  }

  /// An accessor in an object literal: `get key() {...}` / `set key(v) {...}`.
  pub fn accessor_func(&mut self, ctx: ParseCtx, kind: FuncKind) -> SyntaxResult<Func> {
    let func = self.func_tail(ctx, kind, false)?;
    match kind {
      FuncKind::Getter if !func.parameters.is_empty() => {
        Err(func.parameters[0].error(SyntaxErrorType::ExpectedSyntax("getter with no parameters")))
      }
      FuncKind::Setter if func.parameters.len() != 1 => Err(self.peek().error(
        SyntaxErrorType::ExpectedSyntax("setter with exactly one parameter"),
      )),
      _ => Ok(func),
    }
  }

  fn collect_bound_names(pat: &Node<Pat>, out: &mut Vec<(Ident, Loc)>) {
    match pat.stx.as_ref() {
      Pat::Id(id) => out.push((id.stx.name.clone(), id.loc)),
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter().flatten() {
          Self::collect_bound_names(&elem.target, out);
        }
        if let Some(rest) = arr.stx.rest.as_ref() {
          Self::collect_bound_names(rest, out);
        }
      }
      Pat::Obj(obj) => {
        for prop in obj.stx.properties.iter() {
          Self::collect_bound_names(&prop.stx.target, out);
        }
      }
    }
  }

  /// Early errors over a formal parameter list. Only strict code restricts
  /// duplicates and the reserved binding names; the parameters were parsed
  /// before a `"use strict"` directive took effect, so they are re-checked
  /// here.
  pub fn validate_formal_parameters(&mut self, params: &[Node<ParamDecl>]) -> SyntaxResult<()> {
    if !self.is_strict_mode() {
      return Ok(());
    }
    let mut bound_names = Vec::new();
    for param in params {
      Self::collect_bound_names(&param.stx.pattern.stx.pat, &mut bound_names);
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for (name, loc) in bound_names.iter() {
      if !seen.insert(name.as_ref()) {
        return Err(loc.error(SyntaxErrorType::DuplicateParameterName, None));
      }
      self.validate_binding_name(*loc, name)?;
    }
    Ok(())
  }

  /// Fast-forwards over a function body instead of parsing it, by counting
  /// balanced braces in the token stream. Records where the body starts
  /// (after `{`) and a snapshot taken just before the closing `}` is
  /// consumed, so a later reparse that re-lexes from either point sees
  /// exactly the tokens the original parse saw.
  pub fn skip_function_body(&mut self) -> SyntaxResult<SkippedBody> {
    let open = self.require(TT::BraceOpen)?;
    let start = self.resume_point(open.loc.1);
    let mut depth = 1usize;
    // Brace depths at which a template substitution is open; a `}` at such a
    // depth resumes the template instead of closing a block.
    let mut tmpl_stack: Vec<usize> = Vec::new();
    loop {
      let t = self.consume();
      match t.typ {
        TT::BraceOpen => depth += 1,
        TT::BraceClose => {
          if tmpl_stack.last() == Some(&depth) {
            // End of a template substitution; re-lex from here as template
            // continuation.
            let part = self.consume_with_mode(LexMode::TemplateStrContinue);
            match part.typ {
              TT::LiteralTemplatePartStringEnd => {
                tmpl_stack.pop();
              }
              TT::LiteralTemplatePartString => {}
              _ => return Err(part.error(SyntaxErrorType::ExpectedSyntax("template continuation"))),
            }
          } else {
            depth -= 1;
            if depth == 0 {
              let end = self.resume_point(t.loc.0);
              return Ok(SkippedBody { start, end });
            }
          }
        }
        TT::LiteralTemplatePartString => tmpl_stack.push(depth),
        TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
        _ => {}
      }
    }
  }
}
