use derive_visitor::visitor_enter_fn;
use derive_visitor::Drive;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::parse;

const SRC: &str = "var x = 1 + 2;\nfunction f(a) { return a * x; }\nf(x);";

#[test]
fn every_node_range_is_well_formed() {
  let top = parse(SRC).unwrap();
  let mut count = 0usize;
  top.drive(&mut visitor_enter_fn(|node: &Node<Stmt>| {
    assert!(node.loc.0 <= node.loc.1);
    assert!(node.loc.1 <= SRC.len());
    count += 1;
  }));
  assert!(count >= 4);
}

#[test]
fn node_start_matches_its_introducing_token() {
  let top = parse(SRC).unwrap();
  // The var declaration starts at `var`, the function declaration at
  // `function`, offsets straight out of the source text.
  assert_eq!(top.stx.body[0].loc.0, SRC.find("var").unwrap());
  assert_eq!(top.stx.body[1].loc.0, SRC.find("function").unwrap());
  assert_eq!(top.stx.body[2].loc.0, SRC.find("f(x)").unwrap());
}

#[test]
fn expression_ranges_nest() {
  let top = parse("a + b * c;").unwrap();
  let Stmt::Expr(stmt) = &*top.stx.body[0].stx else {
    panic!("expected expression statement");
  };
  let Expr::Binary(add) = &*stmt.stx.expr.stx else {
    panic!("expected binary");
  };
  let outer = add.loc;
  let Expr::Binary(mul) = &*add.stx.right.stx else {
    panic!("expected nested binary");
  };
  assert!(outer.0 <= mul.loc.0 && mul.loc.1 <= outer.1);
}

#[test]
fn whole_program_range_covers_source() {
  let top = parse(SRC).unwrap();
  assert_eq!(top.loc.0, 0);
  assert_eq!(top.loc.1, SRC.len());
}
