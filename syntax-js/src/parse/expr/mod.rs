pub mod lit;
pub mod pat;
pub mod util;

use pat::is_valid_pattern_identifier;
use util::lhs_expr_to_assign_target;

use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BeanExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::NewTargetExpr;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::FuncFlags;
use crate::ast::func::FuncKind;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::lex::KEYWORDS_MAPPING;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::parse::expr::pat::ParsePatternRules;
use crate::parse::operator::MULTARY_OPERATOR_MAPPING;
use crate::parse::operator::UNARY_OPERATOR_MAPPING;
use crate::token::TT;

/// Automatic Semicolon Insertion state threaded through an expression parse.
/// `can_end_with_asi` is set where the grammar allows a statement to end at
/// a line terminator; `did_end_with_asi` reports back that it did.
pub struct Asi {
  pub can_end_with_asi: bool,
  pub did_end_with_asi: bool,
}

impl Asi {
  pub fn can() -> Asi {
    Asi {
      can_end_with_asi: true,
      did_end_with_asi: false,
    }
  }

  pub fn no() -> Asi {
    Asi {
      can_end_with_asi: false,
      did_end_with_asi: false,
    }
  }
}

impl<'a> Parser<'a> {
  pub fn call_args(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<CallArg>>> {
    let mut args = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let arg = self.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr(ctx, [TT::Comma, TT::ParenthesisClose])?;
        Ok(CallArg { spread, value })
      })?;
      args.push(arg);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    Ok(args)
  }

  pub fn expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, 1, terminators, &mut Asi::no())
  }

  pub fn expr_with_asi<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, 1, terminators, asi)
  }

  /// Parses a parenthesised expression like `(a + b)`. A comma list stays a
  /// comma-operator expression; it only ever becomes a parameter list via
  /// [`Parser::arrow_function_or_grouping_expr`].
  pub fn grouping(&mut self, ctx: ParseCtx, asi: &mut Asi) -> SyntaxResult<Node<Expr>> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr_with_min_prec(ctx, 1, [TT::ParenthesisClose], asi)?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  pub fn arrow_func_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<ArrowFuncExpr>> {
    let func = self.with_loc(|p| {
      let [t0, t1] = p.peek_n();
      let parameters =
        if is_valid_pattern_identifier(t0.typ, ctx.rules) && t1.typ == TT::EqualsChevronRight {
          // Single unparenthesised parameter.
          let t = p.consume();
          let name = p.intern_loc(t.loc);
          p.validate_binding_name(t.loc, &name)?;
          let pat = Node::new(t.loc, IdPat { name }).into_wrapped();
          vec![Node::new(t.loc, ParamDecl {
            rest: false,
            pattern: Node::new(t.loc, PatDecl { pat }),
            default_value: None,
          })]
        } else {
          p.func_params(ctx)?
        };
      let arrow = p.require(TT::EqualsChevronRight)?;
      if arrow.preceded_by_line_terminator {
        // Illegal under Automatic Semicolon Insertion rules.
        return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
      }
      p.push_fn_frame(FuncKind::Arrow);
      let mut directive_strict = false;
      let res = (|| {
        Ok(match p.peek().typ {
          TT::BraceOpen => {
            p.require(TT::BraceOpen)?;
            if p.has_use_strict_directive() {
              directive_strict = true;
              p.enter_strict();
            }
            let saved = p.enter_func_body();
            let body = (|| {
              let body = p.stmts(ctx, TT::BraceClose)?;
              p.require(TT::BraceClose)?;
              Ok(body)
            })();
            p.exit_func_body(saved);
            FuncBody::Block(body?)
          }
          _ => FuncBody::Expression(p.expr_with_asi(ctx, terminators, &mut Asi::can())?),
        })
      })();
      // Popped while any body directive is still in effect, so the strict
      // fact lands on this function's flags.
      let flags = p.pop_fn_frame();
      if directive_strict {
        p.exit_strict();
      }
      let body = res?;
      Ok(Func {
        kind: FuncKind::Arrow,
        generator: false,
        flags,
        parameters,
        body: Some(body),
        skipped: None,
      })
    })?;
    Ok(Node::new(func.loc, ArrowFuncExpr { func }))
  }

  pub fn arrow_function_or_grouping_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    // Try to parse an arrow function signature first; if that fails,
    // backtrack and parse a grouping instead. Most groupings contain a
    // non-comma operator early, so the arrow attempt fails fast. Once `=>`
    // has been seen with no line terminator before it, the arrow
    // interpretation is committed.
    self
      .rewindable::<Node<Expr>, _>(|p| match p.arrow_func_expr(ctx, terminators) {
        Ok(expr) => Ok(Some(expr.into_wrapped())),
        Err(err) if err.typ == SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
          Err(err)
        }
        Err(_) => Ok(None),
      })
      .transpose()
      .unwrap_or_else(|| self.grouping(ctx, asi))
  }

  pub fn func_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      // The name may always be `yield`, even for a generator; the name
      // binds in the enclosing scope, not the function's own.
      let name_ctx = ctx.with_rules(ParsePatternRules {
        yield_allowed: true,
      });
      let name = p.maybe_func_name(name_ctx)?;
      let func = p.with_loc(|p| p.func_tail(ctx, FuncKind::Normal, generator))?;
      Ok(FuncExpr { name, func })
    })
  }

  pub fn id_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IdExpr>> {
    self.with_loc(|p| {
      let t = p.consume();
      if !is_valid_pattern_identifier(t.typ, ctx.rules) {
        return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
      };
      let name = p.intern_loc(t.loc);
      if name.as_ref() == "arguments" {
        p.mark_fn_flag(FuncFlags::USES_ARGUMENTS);
      }
      Ok(IdExpr { name })
    })
  }

  pub fn this_expr(&mut self) -> SyntaxResult<Node<ThisExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordThis)?;
      p.mark_fn_flag(FuncFlags::USES_THIS);
      Ok(ThisExpr {})
    })
  }

  pub fn super_expr(&mut self) -> SyntaxResult<Node<SuperExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSuper)?;
      Ok(SuperExpr {})
    })
  }

  pub fn new_target_expr(&mut self) -> SyntaxResult<Node<NewTargetExpr>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordNew)?;
      p.require(TT::Dot)?;
      let prop = p.require(TT::Identifier)?;
      if p.str(prop.loc) != "target" {
        return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`target` property")));
      };
      if !p.in_function() {
        return Err(start.error(SyntaxErrorType::NewTargetOutsideFunction));
      }
      p.mark_fn_flag(FuncFlags::USES_NEW_TARGET);
      Ok(NewTargetExpr {})
    })
  }

  /// `new X(...)`: the callee is a member-access chain only; a parenthesised
  /// argument list binds to this `new`, not to a call on the callee, so
  /// `new a.b()` constructs `a.b` and `new a.b().c` accesses `.c` on the
  /// result.
  pub fn new_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<NewExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordNew)?;
      let mut callee = p.expr_operand(ctx, [], &mut Asi::no())?;
      loop {
        match p.peek().typ {
          TT::Dot => {
            p.consume();
            let right_tok = p.consume();
            if right_tok.typ != TT::Identifier && !KEYWORDS_MAPPING.contains_key(&right_tok.typ) {
              return Err(right_tok.error(SyntaxErrorType::ExpectedSyntax("member access property")));
            }
            let right = p.intern_loc(right_tok.loc);
            callee = Node::new(callee.loc + right_tok.loc, MemberExpr {
              left: callee,
              right,
            })
            .into_wrapped();
          }
          TT::BracketOpen => {
            p.consume();
            let member = p.expr(ctx, [TT::BracketClose])?;
            let end = p.require(TT::BracketClose)?;
            callee = Node::new(callee.loc + end.loc, ComputedMemberExpr {
              object: callee,
              member,
            })
            .into_wrapped();
          }
          _ => break,
        }
      }
      let arguments = if p.consume_if(TT::ParenthesisOpen).is_match() {
        let args = p.call_args(ctx)?;
        p.require(TT::ParenthesisClose)?;
        args
      } else {
        Vec::new()
      };
      Ok(NewExpr { callee, arguments })
    })
  }

  /// Non-standard bean construction: `C(args) { key: value }` where `C` is a
  /// name bound by an `import` extension statement. Without a trailing
  /// object literal it degrades to an ordinary call.
  fn bean_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let name_tok = self.require(TT::Identifier)?;
    let name = self.intern_loc(name_tok.loc);
    self.require(TT::ParenthesisOpen)?;
    let arguments = self.call_args(ctx)?;
    let end = self.require(TT::ParenthesisClose)?;
    if self.peek().typ == TT::BraceOpen {
      let members = self.lit_obj(ctx)?;
      let loc = name_tok.loc + members.loc;
      Ok(Node::new(loc, BeanExpr {
        name,
        arguments,
        members,
      })
      .into_wrapped())
    } else {
      let callee = Node::new(name_tok.loc, IdExpr { name }).into_wrapped();
      Ok(Node::new(self.since_checkpoint(&start) + end.loc, CallExpr {
        callee,
        arguments,
      })
      .into_wrapped())
    }
  }

  fn expr_operand<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    let [t0, t1] = self.peek_n_with_mode([LexMode::SlashIsRegex, LexMode::Standard]);

    // Unary operators before an operand. `yield` is an operator only where
    // it isn't usable as an identifier (i.e. inside a generator).
    if let Some(operator) = UNARY_OPERATOR_MAPPING
      .get(&t0.typ)
      .filter(|operator| operator.name != OperatorName::Yield || !ctx.rules.yield_allowed)
    {
      return Ok(
        self
          .with_loc(|p| {
            p.consume_with_mode(LexMode::SlashIsRegex);
            let operator = if operator.name == OperatorName::Yield
              && p.consume_if(TT::Asterisk).is_match()
            {
              &OPERATORS[&OperatorName::YieldDelegated]
            } else {
              *operator
            };
            let next_min_prec =
              operator.precedence + (operator.associativity == Associativity::Left) as u8;

            // The operand of `yield` is optional: absent when a line
            // terminator follows (restricted production) or when the
            // expression obviously ends here.
            let has_operand = if matches!(
              operator.name,
              OperatorName::Yield | OperatorName::YieldDelegated
            ) {
              let next = p.peek();
              !next.preceded_by_line_terminator
                && !matches!(
                  next.typ,
                  TT::EOF
                    | TT::Semicolon
                    | TT::Comma
                    | TT::ParenthesisClose
                    | TT::BracketClose
                    | TT::BraceClose
                    | TT::Colon
                )
                && !terminators.contains(&next.typ)
            } else {
              true
            };
            let argument = if has_operand {
              Some(p.expr_with_min_prec(ctx, next_min_prec, terminators, asi)?)
            } else {
              None
            };
            Ok(match argument {
              Some(argument) => UnaryExpr {
                operator: operator.name,
                argument,
              },
              // An operand-less `yield` yields undefined.
              None => UnaryExpr {
                operator: operator.name,
                argument: p.undefined_id_expr(),
              },
            })
          })?
          .into_wrapped(),
      );
    };

    // Bean construction, only with extensions on and an imported short name.
    if self.options().extensions
      && t0.typ == TT::Identifier
      && t1.typ == TT::ParenthesisOpen
      && self.is_imported_name(self.str(t0.loc))
    {
      return self.bean_expr(ctx);
    }

    if is_valid_pattern_identifier(t0.typ, ctx.rules) {
      return Ok(if t1.typ == TT::EqualsChevronRight {
        // Single-unparenthesised-parameter arrow function.
        self.arrow_func_expr(ctx, terminators)?.into_wrapped()
      } else {
        self.id_expr(ctx)?.into_wrapped()
      });
    };

    let expr: Node<Expr> = match t0.typ {
      TT::BracketOpen => self.lit_arr(ctx)?.into_wrapped(),
      TT::BraceOpen => self.lit_obj(ctx)?.into_wrapped(),
      TT::KeywordFunction => self.func_expr(ctx)?.into_wrapped(),
      TT::KeywordNew if t1.typ == TT::Dot => self.new_target_expr()?.into_wrapped(),
      TT::KeywordNew => self.new_expr(ctx)?.into_wrapped(),
      TT::KeywordSuper => self.super_expr()?.into_wrapped(),
      TT::KeywordThis => self.this_expr()?.into_wrapped(),
      TT::LiteralTrue | TT::LiteralFalse => self.lit_bool()?.into_wrapped(),
      TT::LiteralNull => self.lit_null()?.into_wrapped(),
      TT::LiteralNumber => self.lit_num()?.into_wrapped(),
      TT::LiteralRegex => self.lit_regex()?.into_wrapped(),
      TT::LiteralString => self.lit_str()?.into_wrapped(),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.lit_template(ctx)?.into_wrapped()
      }
      TT::ParenthesisOpen => self.arrow_function_or_grouping_expr(ctx, terminators, asi)?,
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(expr)
  }

  // Synthesises an `undefined` reference, for productions whose operand may
  // be omitted.
  fn undefined_id_expr(&mut self) -> Node<Expr> {
    let loc = crate::loc::Loc(0, 0);
    let name = self.intern("undefined");
    Node::new(loc, IdExpr { name }).into_wrapped()
  }

  pub fn expr_with_min_prec<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    min_prec: u8,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<Node<Expr>> {
    let mut left = self.expr_operand(ctx, terminators, asi)?;

    loop {
      let cp = self.checkpoint();
      let t = self.consume();

      if terminators.contains(&t.typ) {
        self.restore_checkpoint(cp);
        break;
      };

      match t.typ {
        // Automatic Semicolon Insertion: no newline is allowed between an
        // operand and a postfix operator.
        TT::PlusPlus | TT::HyphenHyphen if !t.preceded_by_line_terminator => {
          let operator_name = match t.typ {
            TT::PlusPlus => OperatorName::PostfixIncrement,
            _ => OperatorName::PostfixDecrement,
          };
          let operator = &OPERATORS[&operator_name];
          if operator.precedence < min_prec {
            self.restore_checkpoint(cp);
            break;
          };
          left = Node::new(left.loc + t.loc, UnaryPostfixExpr {
            operator: operator_name,
            argument: left,
          })
          .into_wrapped();
          continue;
        }
        // Automatic Semicolon Insertion: no newline between a tag and its
        // template literal.
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd
          if !t.preceded_by_line_terminator =>
        {
          let loc = t.loc;
          self.restore_checkpoint(cp);
          let parts = self.lit_template_parts(ctx)?;
          left = Node::new(left.loc + loc, TaggedTemplateExpr {
            function: left,
            parts,
          })
          .into_wrapped();
          continue;
        }
        _ => {}
      };

      match MULTARY_OPERATOR_MAPPING.get(&t.typ) {
        None => {
          if asi.can_end_with_asi
            && (t.preceded_by_line_terminator || t.typ == TT::BraceClose || t.typ == TT::EOF)
          {
            // Automatic Semicolon Insertion.
            self.restore_checkpoint(cp);
            asi.did_end_with_asi = true;
            break;
          };
          if t.typ == TT::Semicolon {
            self.restore_checkpoint(cp);
            break;
          };
          return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operator")));
        }
        Some(operator) => {
          if operator.precedence < min_prec {
            self.restore_checkpoint(cp);
            break;
          };

          let next_min_prec =
            operator.precedence + (operator.associativity == Associativity::Left) as u8;

          left = match operator.name {
            OperatorName::Call => {
              // A direct call to `eval` or `super` changes the containing
              // function's scope requirements.
              match left.stx.as_ref() {
                Expr::Id(id) if id.stx.name.as_ref() == "eval" => {
                  self.mark_fn_flag(FuncFlags::USES_EVAL);
                }
                Expr::Super(_) => {
                  self.mark_fn_flag(FuncFlags::HAS_DIRECT_SUPER_CALL);
                }
                _ => {}
              }
              let arguments = self.call_args(ctx)?;
              let end = self.require(TT::ParenthesisClose)?;
              Node::new(left.loc + end.loc, CallExpr {
                callee: left,
                arguments,
              })
              .into_wrapped()
            }
            OperatorName::ComputedMemberAccess => {
              let member = self.expr(ctx, [TT::BracketClose])?;
              let end = self.require(TT::BracketClose)?;
              Node::new(left.loc + end.loc, ComputedMemberExpr {
                object: left,
                member,
              })
              .into_wrapped()
            }
            OperatorName::Conditional => {
              let consequent = self.expr(ctx, [TT::Colon])?;
              self.require(TT::Colon)?;
              let alternate = self.expr_with_min_prec(
                ctx,
                OPERATORS[&OperatorName::ConditionalAlternate].precedence,
                terminators,
                asi,
              )?;
              Node::new(left.loc + alternate.loc, CondExpr {
                test: left,
                consequent,
                alternate,
              })
              .into_wrapped()
            }
            OperatorName::MemberAccess => {
              let right_tok = self.consume();
              // Reserved words are valid property names (`a.new`).
              match right_tok.typ {
                TT::Identifier => {}
                t if KEYWORDS_MAPPING.contains_key(&t) => {}
                _ => {
                  return Err(
                    right_tok.error(SyntaxErrorType::ExpectedSyntax("member access property")),
                  )
                }
              };
              let right = self.intern_loc(right_tok.loc);
              Node::new(left.loc + right_tok.loc, MemberExpr { left, right }).into_wrapped()
            }
            _ => {
              if operator.name.is_assignment() {
                left = lhs_expr_to_assign_target(left, operator.name)?;
              };
              let right = self.expr_with_min_prec(ctx, next_min_prec, terminators, asi)?;
              Node::new(left.loc + right.loc, BinaryExpr {
                operator: operator.name,
                left,
                right,
              })
              .into_wrapped()
            }
          };
        }
      };
    }

    Ok(left)
  }
}
