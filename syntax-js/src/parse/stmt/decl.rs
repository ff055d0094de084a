use super::super::ParseCtx;
use super::super::Parser;
use crate::parse::expr::pat::ParsePatternRules;
use crate::ast::func::FuncKind;
use crate::ast::node::Node;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::expr::Asi;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VarDeclParseMode {
  // Standard parsing mode for a var/let/const statement.
  Asi,
  // Parse as many valid declarators as possible, then break before the
  // first non-comma token. Used by the for-loop header parser.
  Leftmost,
}

impl<'a> Parser<'a> {
  pub fn pat_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<PatDecl>> {
    self.with_loc(|p| {
      let pat = p.pat(ctx)?;
      Ok(PatDecl { pat })
    })
  }

  pub fn var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume();
    Ok(match t.typ {
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  /// Parses a variable declaration: one or more declarators, each with an
  /// optional initializer, e.g. `let a, b = 2, [c] = d`.
  pub fn var_decl(
    &mut self,
    ctx: ParseCtx,
    parse_mode: VarDeclParseMode,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let mode = p.var_decl_mode()?;
      let mut declarators = Vec::new();
      loop {
        let pattern = p.pat_decl(ctx)?;
        let mut asi = match parse_mode {
          VarDeclParseMode::Asi => Asi::can(),
          VarDeclParseMode::Leftmost => Asi::no(),
        };
        let initializer = match parse_mode {
          VarDeclParseMode::Asi => p
            .consume_if(TT::Equals)
            .and_then(|| p.expr_with_asi(ctx, [TT::Semicolon, TT::Comma], &mut asi))?,
          // In a for-loop header, `in` must not be parsed as a binary
          // operator inside the init clause (the NoIn restriction), so it
          // terminates the initializer like the header punctuation does.
          VarDeclParseMode::Leftmost => p.consume_if(TT::Equals).and_then(|| {
            p.expr(ctx, [TT::Semicolon, TT::Comma, TT::KeywordIn])
          })?,
        };
        // `const` requires an initializer, except in a for-in/of header
        // (which parses in Leftmost mode and supplies the value itself).
        if mode == VarDeclMode::Const
          && initializer.is_none()
          && parse_mode == VarDeclParseMode::Asi
        {
          return Err(pattern.error(SyntaxErrorType::ConstWithoutInitializer));
        }
        declarators.push(VarDeclarator {
          pattern,
          initializer,
        });
        match parse_mode {
          VarDeclParseMode::Asi => {
            if p.consume_if(TT::Semicolon).is_match() || asi.did_end_with_asi {
              break;
            }
            let t = p.peek();
            if t.typ == TT::EOF
              || t.typ == TT::BraceClose
              || (t.preceded_by_line_terminator && t.typ != TT::Comma)
            {
              // Automatic Semicolon Insertion.
              break;
            };
            p.require(TT::Comma)?;
          }
          VarDeclParseMode::Leftmost => {
            if !p.consume_if(TT::Comma).is_match() {
              break;
            }
          }
        }
      }
      Ok(VarDecl { mode, declarators })
    })
  }

  pub fn func_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      // The name may always be `yield`, even for a generator; it binds in
      // the enclosing scope, not the function's own.
      let name_ctx = ctx.with_rules(ParsePatternRules {
        yield_allowed: true,
      });
      let name = p
        .maybe_func_name(name_ctx)?
        .ok_or_else(|| start.error(SyntaxErrorType::ExpectedSyntax("function name")))?;
      let function = p.with_loc(|p| p.func_tail(ctx, FuncKind::Normal, generator))?;
      Ok(FuncDecl { name, function })
    })
  }
}
