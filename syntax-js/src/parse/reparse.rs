use super::expr::pat::ParsePatternRules;
use super::toplevel::top_level_ctx;
use super::ParseCtx;
use super::Parser;
use crate::ast::func::FuncKind;
use crate::ast::func::SkippedBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxResult;
use crate::loc::ResumePoint;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Drops all buffered tokens and restarts lexing from a resume point.
  /// The parser must have been constructed over the same source text the
  /// resume point was captured from.
  pub fn seek(&mut self, resume: ResumePoint) {
    self.buf.clear();
    self.next_tok_i = 0;
    self.lexer.reseed(resume);
  }

  /// Parses one function body whose range was recorded by an earlier parse
  /// that skipped it. Parsing starts at the skipped body's start point and
  /// consumes through its closing `}`.
  pub fn reparse_function_body(
    &mut self,
    skipped: SkippedBody,
    generator: bool,
  ) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.seek(skipped.start);
    let ctx = ParseCtx {
      rules: ParsePatternRules {
        yield_allowed: !generator,
      },
    };
    let strict = self.has_use_strict_directive();
    if strict {
      self.enter_strict();
    }
    self.push_fn_frame(FuncKind::Normal);
    let saved = self.enter_func_body();
    let res = (|| {
      let body = self.stmts(ctx, TT::BraceClose)?;
      self.require(TT::BraceClose)?;
      Ok(body)
    })();
    self.exit_func_body(saved);
    let _ = self.pop_fn_frame();
    if strict {
      self.exit_strict();
    }
    res
  }

  /// Parses source that consists of exactly one formal parameter list,
  /// including the parentheses, e.g. `(a, [b, c], d = 1)`.
  pub fn parse_formal_parameters(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    let ctx = top_level_ctx();
    let params = self.func_params(ctx)?;
    self.require(TT::EOF)?;
    Ok(params)
  }
}
