pub mod decl;

use decl::VarDeclParseMode;

use super::expr::pat::is_valid_pattern_identifier;
use super::expr::util::lit_to_pat;
use super::expr::Asi;
use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForBody;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::ImportNameStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::ast::Ident;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn stmts(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.repeat_until_tt(end, |p| p.stmt(ctx))
  }

  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1] = self.peek_n();
    let stmt: Node<Stmt> = match t0.typ {
      TT::BraceOpen => self.block_stmt(ctx)?.into_wrapped(),
      TT::KeywordBreak => self.break_stmt(ctx)?.into_wrapped(),
      TT::KeywordConst | TT::KeywordVar => {
        self.var_decl(ctx, VarDeclParseMode::Asi)?.into_wrapped()
      }
      // `let` is contextual: a declaration only when followed by a pattern
      // start; otherwise `let` is an ordinary identifier expression/label.
      TT::KeywordLet
        if t1.typ == TT::BraceOpen
          || t1.typ == TT::BracketOpen
          || is_valid_pattern_identifier(t1.typ, ctx.rules) =>
      {
        self.var_decl(ctx, VarDeclParseMode::Asi)?.into_wrapped()
      }
      TT::KeywordContinue => self.continue_stmt(ctx)?.into_wrapped(),
      TT::KeywordDebugger => self.debugger_stmt()?.into_wrapped(),
      TT::KeywordDo => self.do_while_stmt(ctx)?.into_wrapped(),
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordFunction => self.func_decl(ctx)?.into_wrapped(),
      TT::KeywordIf => self.if_stmt(ctx)?.into_wrapped(),
      TT::KeywordImport => self.import_name_stmt()?.into_wrapped(),
      TT::KeywordReturn => self.return_stmt(ctx)?.into_wrapped(),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.into_wrapped(),
      TT::KeywordThrow => self.throw_stmt(ctx)?.into_wrapped(),
      TT::KeywordTry => self.try_stmt(ctx)?.into_wrapped(),
      TT::KeywordWhile => self.while_stmt(ctx)?.into_wrapped(),
      TT::KeywordWith => self.with_stmt(ctx)?.into_wrapped(),
      TT::Semicolon => self.empty_stmt()?.into_wrapped(),
      t if is_valid_pattern_identifier(t, ctx.rules) && t1.typ == TT::Colon => {
        self.label_stmt(ctx)?.into_wrapped()
      }
      _ => self.expr_stmt(ctx)?.into_wrapped(),
    };
    Ok(stmt)
  }

  /// Accepts the end of a statement: an explicit `;`, or an implicit one
  /// (Automatic Semicolon Insertion) before a line break, `}`, or EOF.
  pub fn end_of_statement(&mut self) -> SyntaxResult<()> {
    if self.consume_if(TT::Semicolon).is_match() {
      return Ok(());
    }
    let t = self.peek();
    if t.preceded_by_line_terminator || t.typ == TT::BraceClose || t.typ == TT::EOF {
      return Ok(());
    }
    Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)))
  }

  /// Non-standard `import a.b.C;`: records `C -> a.b.C` in the parser's
  /// import table for later bean construction.
  pub fn import_name_stmt(&mut self) -> SyntaxResult<Node<ImportNameStmt>> {
    if !self.options().extensions {
      let t = self.peek();
      return Err(t.error(SyntaxErrorType::SyntaxExtensionDisabled));
    }
    let node = self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      let mut path: Vec<Ident> = Vec::new();
      loop {
        let seg = p.consume();
        if seg.typ != TT::Identifier {
          return Err(seg.error(SyntaxErrorType::ExpectedSyntax("import path segment")));
        }
        path.push(p.intern_loc(seg.loc));
        if !p.consume_if(TT::Dot).is_match() {
          break;
        }
      }
      p.end_of_statement()?;
      Ok(ImportNameStmt { path })
    })?;
    self.register_import(node.stx.path.clone());
    Ok(node)
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LabelStmt>> {
    self.with_loc(|p| {
      let name_tok = p.consume();
      let name = p.intern_loc(name_tok.loc);
      p.require(TT::Colon)?;
      if p.labels.iter().any(|l| *l == name) {
        return Err(name_tok.error(SyntaxErrorType::DuplicateLabel));
      }
      p.labels.push(name.clone());
      let statement = p.stmt(ctx);
      p.labels.pop();
      Ok(LabelStmt {
        name,
        statement: statement?,
      })
    })
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| p.require(TT::Semicolon).map(|_| EmptyStmt {}))
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmts(ctx, TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  fn break_or_continue_label(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<Ident>> {
    let t = self.peek();
    let label = if is_valid_pattern_identifier(t.typ, ctx.rules) && !t.preceded_by_line_terminator
    {
      let name = self.consume_as_ident();
      if !self.labels.iter().any(|l| *l == name) {
        return Err(t.error(SyntaxErrorType::UndefinedLabel));
      }
      Some(name)
    } else if t.typ == TT::Semicolon {
      self.consume();
      None
    } else if t.preceded_by_line_terminator || t.typ == TT::BraceClose || t.typ == TT::EOF {
      // Automatic Semicolon Insertion.
      None
    } else {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("label")));
    };
    Ok(label)
  }

  pub fn break_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BreakStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordBreak)?;
      let label = p.break_or_continue_label(ctx)?;
      if label.is_none() && p.in_iteration == 0 && p.in_switch == 0 {
        return Err(start.error(SyntaxErrorType::IllegalBreak));
      }
      Ok(BreakStmt { label })
    })
  }

  pub fn continue_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ContinueStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordContinue)?;
      let label = p.break_or_continue_label(ctx)?;
      if p.in_iteration == 0 {
        return Err(start.error(SyntaxErrorType::IllegalContinue));
      }
      Ok(ContinueStmt { label })
    })
  }

  pub fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDebugger)?;
      p.end_of_statement()?;
      Ok(DebuggerStmt {})
    })
  }

  // WARNING: Do not reuse for other statements: this outputs a statement
  // node, not an expression.
  pub fn expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExprStmt>> {
    self.with_loc(|p| {
      let mut asi = Asi::can();
      let expr = p.expr_with_asi(ctx, [TT::Semicolon], &mut asi)?;
      if !asi.did_end_with_asi {
        p.require(TT::Semicolon)?;
      };
      Ok(ExprStmt { expr })
    })
  }

  fn for_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ForBody>> {
    self.in_iteration += 1;
    let res = self.with_loc(|p| {
      if p.peek().typ == TT::BraceOpen {
        p.require(TT::BraceOpen)?;
        let body = p.stmts(ctx, TT::BraceClose)?;
        p.require(TT::BraceClose)?;
        Ok(ForBody { body })
      } else {
        // Single statement.
        Ok(ForBody {
          body: vec![p.stmt(ctx)?],
        })
      }
    });
    self.in_iteration -= 1;
    res
  }

  pub fn for_triple_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ForTripleStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFor)?;
      p.require(TT::ParenthesisOpen)?;
      let init = {
        let [t0, t1] = p.peek_n();
        match t0.typ {
          TT::KeywordVar | TT::KeywordConst => {
            ForTripleStmtInit::Decl(p.var_decl(ctx, VarDeclParseMode::Leftmost)?)
          }
          TT::KeywordLet
            if t1.typ == TT::BraceOpen
              || t1.typ == TT::BracketOpen
              || is_valid_pattern_identifier(t1.typ, ctx.rules) =>
          {
            ForTripleStmtInit::Decl(p.var_decl(ctx, VarDeclParseMode::Leftmost)?)
          }
          TT::Semicolon => ForTripleStmtInit::None,
          // `in` must not be treated as a binary operator inside a for
          // header's init clause, so it terminates the expression.
          _ => ForTripleStmtInit::Expr(p.expr(ctx, [TT::Semicolon, TT::KeywordIn])?),
        }
      };
      p.require(TT::Semicolon)?;
      let cond = (p.peek().typ != TT::Semicolon)
        .then(|| p.expr(ctx, [TT::Semicolon]))
        .transpose()?;
      p.require(TT::Semicolon)?;
      let post = (p.peek().typ != TT::ParenthesisClose)
        .then(|| p.expr(ctx, [TT::ParenthesisClose]))
        .transpose()?;
      p.require(TT::ParenthesisClose)?;
      let body = p.for_body(ctx)?;
      Ok(ForTripleStmt {
        init,
        cond,
        post,
        body,
      })
    })
  }

  pub fn for_in_of_lhs(&mut self, ctx: ParseCtx) -> SyntaxResult<ForInOfLhs> {
    let [t0, t1] = self.peek_n();
    Ok(match t0.typ {
      TT::KeywordVar | TT::KeywordConst => ForInOfLhs::Decl({
        let mode = self.var_decl_mode()?;
        let pat = self.pat_decl(ctx)?;
        (mode, pat)
      }),
      TT::KeywordLet
        if t1.typ == TT::BraceOpen
          || t1.typ == TT::BracketOpen
          || is_valid_pattern_identifier(t1.typ, ctx.rules) =>
      {
        ForInOfLhs::Decl({
          let mode = self.var_decl_mode()?;
          let pat = self.pat_decl(ctx)?;
          (mode, pat)
        })
      }
      _ => {
        // Parse as an expression (covers member expressions and literal
        // patterns), then convert to an assignment target.
        let expr = self.expr(ctx, [TT::KeywordIn, TT::KeywordOf])?;
        let pat = lit_to_pat(expr)?;
        ForInOfLhs::Assign(pat)
      }
    })
  }

  pub fn for_in_stmt(&mut self, ctx: ParseCtx, each: bool) -> SyntaxResult<Node<ForInStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFor)?;
      if each {
        // Consume the `each` contextual keyword.
        p.consume();
      }
      p.require(TT::ParenthesisOpen)?;
      let lhs = p.for_in_of_lhs(ctx)?;
      p.require(TT::KeywordIn)?;
      let rhs = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let body = p.for_body(ctx)?;
      Ok(ForInStmt {
        each,
        lhs,
        rhs,
        body,
      })
    })
  }

  pub fn for_of_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ForOfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFor)?;
      p.require(TT::ParenthesisOpen)?;
      let lhs = p.for_in_of_lhs(ctx)?;
      p.require(TT::KeywordOf)?;
      let rhs = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let body = p.for_body(ctx)?;
      Ok(ForOfStmt { lhs, rhs, body })
    })
  }

  /// One of:
  /// - `for ( [<expr> | <var decls>]? ; <expr>? ; <expr>? ) <body>`
  /// - `for ( [<pat> | <var decl>] in <expr> ) <body>`
  /// - `for ( [<pat> | <var decl>] of <expr> ) <body>`
  /// - `for each ( [<pat> | <var decl>] in <expr> ) <body>` (extension)
  pub fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    // The header's shape can't be decided by fixed lookahead (patterns and
    // expressions have dynamic length), so drive the parser forward to find
    // the discriminating keyword, then rewind and parse the chosen variant
    // properly. Pathological headers re-parse some tokens, but in practice
    // headers are short, and a single all-variants-in-one parse tends
    // towards error-prone spaghetti.
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Type {
      Each,
      In,
      Of,
      Triple,
    }
    impl Type {
      fn determine(p: &mut Parser, ctx: ParseCtx) -> SyntaxResult<Self> {
        p.require(TT::KeywordFor)?;
        let mut each = false;
        if p.options().extensions {
          let t = p.peek();
          if t.typ == TT::Identifier && p.str(t.loc) == "each" {
            p.consume();
            each = true;
          }
        }
        p.require(TT::ParenthesisOpen)?;
        let determined = match p.peek().typ {
          TT::KeywordVar | TT::KeywordConst | TT::KeywordLet => {
            // A `let` that isn't a declaration is handled below as an
            // ordinary expression; probing it as a declaration first is
            // still correct because the var_decl parser fails and the
            // expression path is tried.
            match p.var_decl(ctx, VarDeclParseMode::Leftmost) {
              Ok(_) => match p.peek().typ {
                TT::KeywordIn => Type::In,
                TT::KeywordOf => Type::Of,
                _ => Type::Triple,
              },
              Err(_) => Type::Triple,
            }
          }
          TT::Semicolon => Type::Triple,
          _ => match p.expr(ctx, [TT::KeywordIn, TT::KeywordOf, TT::Semicolon]) {
            Ok(_) => match p.peek().typ {
              TT::KeywordIn => Type::In,
              TT::KeywordOf => Type::Of,
              _ => Type::Triple,
            },
            Err(_) => Type::Triple,
          },
        };
        Ok(if each && determined == Type::In {
          Type::Each
        } else {
          determined
        })
      }
    }

    let cp = self.checkpoint();
    let typ = Type::determine(self, ctx)?;
    self.restore_checkpoint(cp);
    Ok(match typ {
      Type::Triple => self.for_triple_stmt(ctx)?.into_wrapped(),
      Type::In => self.for_in_stmt(ctx, false)?.into_wrapped(),
      Type::Each => self.for_in_stmt(ctx, true)?.into_wrapped(),
      Type::Of => self.for_of_stmt(ctx)?.into_wrapped(),
    })
  }

  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let consequent = p.stmt(ctx)?;
      let alternate = p.consume_if(TT::KeywordElse).and_then(|| p.stmt(ctx))?;
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordReturn)?;
      if !p.in_function() {
        return Err(start.error(SyntaxErrorType::ReturnOutsideFunction));
      }
      let value = if p.peek().preceded_by_line_terminator
        || p.peek().typ == TT::BraceClose
        || p.peek().typ == TT::EOF
      {
        // Restricted production: `return \n expr` is `return;` then `expr`.
        None
      } else if p.consume_if(TT::Semicolon).is_match() {
        None
      } else {
        let mut asi = Asi::can();
        let value = p.expr_with_asi(ctx, [TT::Semicolon], &mut asi)?;
        if !asi.did_end_with_asi {
          p.require(TT::Semicolon)?;
        };
        Some(value)
      };
      Ok(ReturnStmt { value })
    })
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordThrow)?;
      if p.peek().preceded_by_line_terminator {
        // Restricted production: illegal under ASI rules.
        return Err(start.error(SyntaxErrorType::LineTerminatorAfterThrow));
      }
      let mut asi = Asi::can();
      let value = p.expr_with_asi(ctx, [TT::Semicolon], &mut asi)?;
      if !asi.did_end_with_asi {
        p.require(TT::Semicolon)?;
      };
      Ok(ThrowStmt { value })
    })
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordTry)?;
      let wrapped = p.block_stmt(ctx)?;
      let mut catches = Vec::new();
      while p.peek().typ == TT::KeywordCatch {
        let catch = p.with_loc(|p| {
          p.require(TT::KeywordCatch)?;
          let mut condition = None;
          let parameter = p
            .consume_if(TT::ParenthesisOpen)
            .and_then(|| {
              let pattern = p.pat_decl(ctx)?;
              // Non-standard guarded catch: `catch (e if cond)`.
              if p.peek().typ == TT::KeywordIf {
                if !p.options().extensions {
                  return Err(p.peek().error(SyntaxErrorType::SyntaxExtensionDisabled));
                }
                p.consume();
                condition = Some(p.expr(ctx, [TT::ParenthesisClose])?);
              }
              p.require(TT::ParenthesisClose)?;
              Ok(pattern)
            })?;
          p.require(TT::BraceOpen)?;
          let body = p.stmts(ctx, TT::BraceClose)?;
          p.require(TT::BraceClose)?;
          Ok(CatchBlock {
            parameter,
            condition,
            body,
          })
        })?;
        let unconditional = catch.stx.condition.is_none();
        catches.push(catch);
        // Only the guarded-catch extension allows more than one clause, and
        // nothing may follow the unconditional one.
        if unconditional || !p.options().extensions {
          break;
        }
      }
      let finally = p.consume_if(TT::KeywordFinally).and_then(|| p.block_stmt(ctx))?;
      if catches.is_empty() && finally.is_none() {
        return Err(start.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      }
      Ok(TryStmt {
        wrapped,
        catches,
        finally,
      })
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      p.in_iteration += 1;
      let body = p.stmt(ctx);
      p.in_iteration -= 1;
      Ok(WhileStmt {
        condition,
        body: body?,
      })
    })
  }

  pub fn with_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordWith)?;
      if p.is_strict_mode() {
        return Err(start.error(SyntaxErrorType::WithInStrictMode));
      }
      p.require(TT::ParenthesisOpen)?;
      let object = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(WithStmt { object, body })
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      p.in_iteration += 1;
      let body = p.stmt(ctx);
      p.in_iteration -= 1;
      let body = body?;
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      // The trailing semicolon is always optional after do-while.
      let _ = p.consume_if(TT::Semicolon).is_match();
      Ok(DoWhileStmt { condition, body })
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      p.require(TT::BraceOpen)?;
      p.in_switch += 1;
      let branches = p.repeat_until_tt_with_loc(TT::BraceClose, |p| {
        let case = if p.consume_if(TT::KeywordCase).is_match() {
          Some(p.expr(ctx, [TT::Colon])?)
        } else {
          p.require(TT::KeywordDefault)?;
          None
        };
        p.require(TT::Colon)?;
        let body = p.repeat_while(
          |p| {
            !matches!(
              p.peek().typ,
              TT::KeywordCase | TT::KeywordDefault | TT::BraceClose
            )
          },
          |p| p.stmt(ctx),
        )?;
        Ok(SwitchBranch { case, body })
      });
      p.in_switch -= 1;
      let branches = branches?;
      p.require(TT::BraceClose)?;
      Ok(SwitchStmt { test, branches })
    })
  }
}
