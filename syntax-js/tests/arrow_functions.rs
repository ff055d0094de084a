use syntax_js::ast::expr::Expr;
use syntax_js::ast::func::FuncBody;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::parse;

fn one_expr(src: &str) -> Node<Expr> {
  let top = parse(src).unwrap();
  let mut body = top.stx.body;
  assert_eq!(body.len(), 1);
  match *body.remove(0).stx {
    Stmt::Expr(n) => (*n.stx).expr,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

#[test]
fn parenthesised_parameters_with_arrow() {
  let expr = one_expr("(a, b) => a + b;");
  let Expr::ArrowFunc(arrow) = *expr.stx else {
    panic!("expected arrow function");
  };
  let func = &arrow.stx.func.stx;
  assert_eq!(func.parameters.len(), 2);
  assert!(matches!(func.body, Some(FuncBody::Expression(_))));
}

#[test]
fn parenthesised_list_without_arrow_is_comma_expression() {
  let expr = one_expr("(a, b);");
  // Never a parameter list: reinterpretation only happens on `=>`.
  let Expr::Binary(comma) = *expr.stx else {
    panic!("expected comma expression, got something else");
  };
  assert_eq!(
    comma.stx.operator,
    syntax_js::operator::OperatorName::Comma
  );
}

#[test]
fn single_parameter_without_parentheses() {
  let expr = one_expr("x => x * 2;");
  let Expr::ArrowFunc(arrow) = *expr.stx else {
    panic!("expected arrow function");
  };
  assert_eq!(arrow.stx.func.stx.parameters.len(), 1);
}

#[test]
fn default_parameters_are_kept_on_the_parameter() {
  let expr = one_expr("(a, b = 1) => a;");
  let Expr::ArrowFunc(arrow) = *expr.stx else {
    panic!("expected arrow function");
  };
  let params = &arrow.stx.func.stx.parameters;
  assert!(params[0].stx.default_value.is_none());
  assert!(params[1].stx.default_value.is_some());
}

#[test]
fn destructuring_and_rest_parameters() {
  let expr = one_expr("([a, b], { c }, ...rest) => a;");
  let Expr::ArrowFunc(arrow) = *expr.stx else {
    panic!("expected arrow function");
  };
  let params = &arrow.stx.func.stx.parameters;
  assert_eq!(params.len(), 3);
  assert!(params[2].stx.rest);
}

#[test]
fn block_body() {
  let expr = one_expr("(a) => { return a; };");
  let Expr::ArrowFunc(arrow) = *expr.stx else {
    panic!("expected arrow function");
  };
  assert!(matches!(
    arrow.stx.func.stx.body,
    Some(FuncBody::Block(_))
  ));
}

#[test]
fn line_break_before_arrow_is_an_error() {
  use syntax_js::error::SyntaxErrorType;
  let err = parse("(a, b)\n=> a;").unwrap_err();
  assert_eq!(
    err.typ,
    SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters
  );
}

#[test]
fn arrow_binds_this_lexically() {
  use syntax_js::ast::func::FuncFlags;
  let expr = one_expr("() => this;");
  let Expr::ArrowFunc(arrow) = *expr.stx else {
    panic!("expected arrow function");
  };
  assert!(arrow.stx.func.stx.flags.contains(FuncFlags::USES_THIS));
}
