use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::operator::OperatorName;
use crate::token::TT;

fn parse_one_expr(src: &str) -> Node<Expr> {
  let top = crate::parse(src).unwrap();
  let mut body = top.stx.body;
  assert_eq!(body.len(), 1, "expected one statement in {:?}", src);
  match *body.remove(0).stx {
    Stmt::Expr(n) => {
      let stx = *n.stx;
      stx.expr
    }
    other => panic!("expected expression statement, got {:?}", other),
  }
}

#[test]
fn token_stream_consumer() {
  let lexer = Lexer::new("let x = /a/ / 1;");
  let mut p = Parser::new(lexer);
  let cp = p.checkpoint();

  // Peeking buffers without consuming.
  let t = p.peek();
  assert_eq!(t.typ, TT::KeywordLet);
  let t = p.consume();
  assert_eq!(t.typ, TT::KeywordLet);
  let t = p.consume();
  assert_eq!(t.typ, TT::Identifier);

  // Rewind to a checkpoint, then re-read the same tokens.
  p.restore_checkpoint(cp);
  let t = p.consume();
  assert_eq!(t.typ, TT::KeywordLet);

  // Re-lexing under a different mode truncates the buffer from that point.
  let cp2 = p.checkpoint();
  let eq = &p.peek_n::<3>()[2];
  assert_eq!(eq.typ, TT::Slash); // `/a/` lexed as division in Standard mode
  p.restore_checkpoint(cp2);
  let _ = p.consume(); // x
  let _ = p.consume(); // =
  let regex = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(regex.typ, TT::LiteralRegex);
}

#[test]
fn identifier_interning_dedupes() {
  let lexer = Lexer::new("foo + foo;");
  let mut p = Parser::new(lexer);
  let a = p.intern("foo");
  let b = p.intern("foo");
  assert!(std::sync::Arc::ptr_eq(&a, &b));
  let c = p.intern("bar");
  assert!(!std::sync::Arc::ptr_eq(&a, &c));
}

#[test]
fn precedence_climbing_binds_multiplication_tighter() {
  let expr = parse_one_expr("1 + 2 * 3;");
  let Expr::Binary(add) = *expr.stx else {
    panic!("expected binary");
  };
  assert_eq!(add.stx.operator, OperatorName::Addition);
  let Expr::Binary(mul) = *add.stx.right.stx else {
    panic!("expected right child to be the multiplication");
  };
  assert_eq!(mul.stx.operator, OperatorName::Multiplication);
}

#[test]
fn addition_is_left_nested() {
  let expr = parse_one_expr("1 - 2 - 3;");
  let Expr::Binary(outer) = *expr.stx else {
    panic!("expected binary");
  };
  assert_eq!(outer.stx.operator, OperatorName::Subtraction);
  let Expr::Binary(inner) = *outer.stx.left.stx else {
    panic!("expected left-nested subtraction");
  };
  assert_eq!(inner.stx.operator, OperatorName::Subtraction);
}

#[test]
fn assignment_is_right_associative() {
  let expr = parse_one_expr("a = b = 1;");
  let Expr::Binary(outer) = *expr.stx else {
    panic!("expected binary");
  };
  assert_eq!(outer.stx.operator, OperatorName::Assignment);
  let Expr::Binary(inner) = *outer.stx.right.stx else {
    panic!("expected right-nested assignment");
  };
  assert_eq!(inner.stx.operator, OperatorName::Assignment);
}

#[test]
fn conditional_nests_in_alternate() {
  let expr = parse_one_expr("a ? b : c ? d : e;");
  let Expr::Cond(outer) = *expr.stx else {
    panic!("expected conditional");
  };
  assert!(matches!(*outer.stx.alternate.stx, Expr::Cond(_)));
}

#[test]
fn in_operator_is_suppressed_in_for_header() {
  // `in` in the init clause must terminate the expression, not parse as a
  // binary operator; it is only rejected later by the for parser requiring
  // `;`, which classifies this as a for-in over the declaration.
  let top = crate::parse("for (a in b) c;").unwrap();
  assert!(matches!(*top.stx.body[0].stx, Stmt::ForIn(_)));

  // In ordinary expressions, `in` is a relational operator.
  let expr = parse_one_expr("'x' in y;");
  let Expr::Binary(b) = *expr.stx else {
    panic!("expected binary");
  };
  assert_eq!(b.stx.operator, OperatorName::In);
}

#[test]
fn new_binds_member_chain_before_arguments() {
  let expr = parse_one_expr("new a.b(1).c;");
  // `new a.b(1)` is the constructor call; `.c` applies to the result.
  let Expr::Member(member) = *expr.stx else {
    panic!("expected member access on construction result");
  };
  assert_eq!(member.stx.right.as_ref(), "c");
  let Expr::New(new) = *member.stx.left.stx else {
    panic!("expected new expression");
  };
  assert_eq!(new.stx.arguments.len(), 1);
  assert!(matches!(*new.stx.callee.stx, Expr::Member(_)));
}

#[test]
fn regex_vs_division_at_operand_position() {
  let expr = parse_one_expr("a / /b/ / c;");
  // Parses as (a / /b/) / c.
  let Expr::Binary(outer) = *expr.stx else {
    panic!("expected binary");
  };
  assert_eq!(outer.stx.operator, OperatorName::Division);
  let Expr::Binary(inner) = *outer.stx.left.stx else {
    panic!("expected inner division");
  };
  assert!(matches!(*inner.stx.right.stx, Expr::LitRegex(_)));
}

#[test]
fn template_literal_parts() {
  use crate::ast::expr::lit::LitTemplatePart;
  let expr = parse_one_expr("`a${x}b${y}c`;");
  let Expr::LitTemplate(t) = *expr.stx else {
    panic!("expected template");
  };
  let parts = &t.stx.parts;
  assert_eq!(parts.len(), 5);
  assert!(matches!(&parts[0], LitTemplatePart::String(s) if s == "a"));
  assert!(matches!(&parts[1], LitTemplatePart::Substitution(_)));
  assert!(matches!(&parts[2], LitTemplatePart::String(s) if s == "b"));
  assert!(matches!(&parts[4], LitTemplatePart::String(s) if s == "c"));
}

#[test]
fn destructuring_assignment_target() {
  let expr = parse_one_expr("[a, b] = c;");
  let Expr::Binary(assign) = *expr.stx else {
    panic!("expected assignment");
  };
  assert_eq!(assign.stx.operator, OperatorName::Assignment);
  assert!(matches!(*assign.stx.left.stx, Expr::ArrPat(_)));
}

#[test]
fn invalid_assignment_target_is_reference_error() {
  use crate::error::ErrorKind;
  use crate::error::SyntaxErrorType;
  let err = crate::parse("a + b = c;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  assert_eq!(err.typ.kind(), ErrorKind::Reference);
}

#[test]
fn compound_assignment_rejects_destructuring() {
  let err = crate::parse("[a] += b;").unwrap_err();
  assert_eq!(
    err.typ,
    crate::error::SyntaxErrorType::InvalidAssignmentTarget
  );
}

#[test]
fn yield_in_generator_only() {
  // Inside a generator, `yield` is an operator.
  let top = crate::parse("function* g() { yield 1; yield* a; yield; }").unwrap();
  assert!(matches!(*top.stx.body[0].stx, Stmt::FunctionDecl(_)));

  // Outside, it's a plain identifier.
  let expr = parse_one_expr("yield;");
  assert!(matches!(*expr.stx, Expr::Id(_)));
}

#[test]
fn object_literal_accessors_and_shorthand() {
  use crate::ast::expr::lit::ObjMember;
  let expr = parse_one_expr("({ a, b: 1, get c() { return 1; }, set c(v) {}, [k]: 2 });");
  let Expr::LitObj(obj) = *expr.stx else {
    panic!("expected object literal");
  };
  let members = &obj.stx.members;
  assert_eq!(members.len(), 5);
  assert!(matches!(&*members[0].stx, ObjMember::Shorthand { .. }));
  assert!(matches!(&*members[1].stx, ObjMember::Prop { .. }));
  assert!(matches!(&*members[2].stx, ObjMember::Getter { .. }));
  assert!(matches!(&*members[3].stx, ObjMember::Setter { .. }));
  assert!(matches!(
    &*members[4].stx,
    ObjMember::Prop {
      key: crate::ast::expr::lit::PropKey::Computed(_),
      ..
    }
  ));
}

#[test]
fn labelled_statements_and_duplicates() {
  use crate::error::SyntaxErrorType;
  assert!(crate::parse("a: while (x) { break a; }").is_ok());
  let err = crate::parse("a: a: x;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::DuplicateLabel);
  let err = crate::parse("while (x) { break b; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UndefinedLabel);
}

#[test]
fn break_and_continue_require_context() {
  use crate::error::SyntaxErrorType;
  let err = crate::parse("break;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::IllegalBreak);
  let err = crate::parse("continue;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::IllegalContinue);
  assert!(crate::parse("while (a) break;").is_ok());
  assert!(crate::parse("switch (a) { default: break; }").is_ok());
}

#[test]
fn return_outside_function_rejected() {
  use crate::error::SyntaxErrorType;
  let err = crate::parse("return 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ReturnOutsideFunction);
  assert!(crate::parse("function f() { return 1; }").is_ok());
}

#[test]
fn special_name_flags_propagate_through_arrows() {
  use crate::ast::func::FuncFlags;
  use crate::ast::stmt::decl::FuncDecl;
  let top = crate::parse("function f() { var g = () => this.x; }").unwrap();
  let Stmt::FunctionDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected function declaration");
  };
  let FuncDecl { function, .. } = &*decl.stx;
  // The arrow uses `this` lexically, so the enclosing non-arrow function is
  // marked too.
  assert!(function.stx.flags.contains(FuncFlags::USES_THIS));
}

#[test]
fn eval_call_marks_function() {
  use crate::ast::func::FuncFlags;
  use crate::ast::stmt::decl::FuncDecl;
  let top = crate::parse("function f() { eval('x'); }").unwrap();
  let Stmt::FunctionDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected function declaration");
  };
  let FuncDecl { function, .. } = &*decl.stx;
  assert!(function.stx.flags.contains(FuncFlags::USES_EVAL));
  // A mere reference to a variable named eval does not count as a call.
  let top = crate::parse("function g() { var a = eval; }").unwrap();
  let Stmt::FunctionDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected function declaration");
  };
  assert!(!decl.stx.function.stx.flags.contains(FuncFlags::USES_EVAL));
}
