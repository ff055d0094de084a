use super::expr::pat::ParsePatternRules;
use super::ParseCtx;
use super::Parser;
use crate::ast::func::FuncKind;
use crate::ast::node::Node;
use crate::ast::stmt::ErrorStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxResult;
use crate::token::TT;

pub fn top_level_ctx() -> ParseCtx {
  ParseCtx {
    rules: ParsePatternRules {
      yield_allowed: true,
    },
  }
}

impl<'a> Parser<'a> {
  /// Parses a whole program, aborting on the first syntax error.
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let ctx = top_level_ctx();
    let strict = self.has_use_strict_directive();
    if strict {
      self.enter_strict();
    }
    self.push_fn_frame(FuncKind::Script);
    let res = (|| {
      let body = self.stmts(ctx, TT::EOF)?;
      self.require(TT::EOF)?;
      Ok(body)
    })();
    let flags = self.pop_fn_frame();
    if strict {
      self.exit_strict();
    }
    let body = res?;
    Ok(Node::new(self.source_range(), TopLevel { flags, body }))
  }

  /// Parses a whole program, recovering at statement boundaries: a failed
  /// statement is recorded (see [`Parser::take_recovered_errors`]), replaced
  /// by an error placeholder node, and the token stream advanced to the
  /// next safe point, so one malformed statement doesn't hide the rest of
  /// the program. Produces a best-effort AST even for invalid input.
  pub fn parse_top_level_with_recovery(&mut self) -> Node<TopLevel> {
    let ctx = top_level_ctx();
    let strict = self.has_use_strict_directive();
    if strict {
      self.enter_strict();
    }
    self.push_fn_frame(FuncKind::Script);
    let mut body: Vec<Node<Stmt>> = Vec::new();
    loop {
      let before = self.peek();
      if before.typ == TT::EOF {
        break;
      }
      match self.stmt(ctx) {
        Ok(stmt) => body.push(stmt),
        Err(err) => {
          let message = err.typ.message(err.actual_token);
          let err_loc = err.loc;
          self.recovered_errors.push(err);
          self.skip_to_statement_boundary();
          // Guarantee progress: a statement that failed without consuming
          // anything (e.g. a stray `}`) would otherwise fail identically
          // forever.
          let now = self.peek();
          if now.typ != TT::EOF && now.loc == before.loc {
            self.consume();
          }
          body.push(Node::new(err_loc, ErrorStmt { message }).into_wrapped());
        }
      }
    }
    let flags = self.pop_fn_frame();
    if strict {
      self.exit_strict();
    }
    Node::new(self.source_range(), TopLevel { flags, body })
  }
}
