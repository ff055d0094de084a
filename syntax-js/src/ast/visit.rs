//! Tree rewriting without in-place mutation.
//!
//! AST nodes are treated as immutable once a grammar production returns
//! them; rewriting passes build replacement nodes instead. The driver calls
//! `enter_*` before descending into a node's children (returning
//! [`VisitAction::Skip`] prunes the subtree) and `leave_*` afterwards,
//! threading whatever `leave_*` returns back into the parent. A pass that
//! returns a different node therefore replaces the original without any
//! parent bookkeeping.
//!
//! For read-only or in-place traversal, every AST type also derives
//! `derive_visitor::{Drive, DriveMut}`.

use super::expr::lit::LitArrElem;
use super::expr::lit::LitObjExpr;
use super::expr::lit::LitTemplatePart;
use super::expr::lit::ObjMember;
use super::expr::lit::PropKey;
use super::expr::pat::ArrPatElem;
use super::expr::pat::Pat;
use super::expr::BinaryExpr;
use super::expr::CallArg;
use super::expr::Expr;
use super::expr::UnaryExpr;
use super::expr::UnaryPostfixExpr;
use super::func::Func;
use super::func::FuncBody;
use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::decl::PatDecl;
use super::stmt::decl::VarDecl;
use super::stmt::decl::VarDeclarator;
use super::stmt::ForInOfLhs;
use super::stmt::ForTripleStmtInit;
use super::stmt::Stmt;
use super::stx::TopLevel;
use crate::operator::OperatorName;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum VisitAction {
  Descend,
  Skip,
}

/// A rewriting pass. All hooks default to "descend and keep".
pub trait Rewriter {
  fn enter_top_level(&mut self, _node: &Node<TopLevel>) -> VisitAction {
    VisitAction::Descend
  }
  fn leave_top_level(&mut self, node: Node<TopLevel>) -> Node<TopLevel> {
    node
  }
  fn enter_stmt(&mut self, _node: &Node<Stmt>) -> VisitAction {
    VisitAction::Descend
  }
  fn leave_stmt(&mut self, node: Node<Stmt>) -> Node<Stmt> {
    node
  }
  fn enter_expr(&mut self, _node: &Node<Expr>) -> VisitAction {
    VisitAction::Descend
  }
  fn leave_expr(&mut self, node: Node<Expr>) -> Node<Expr> {
    node
  }
  fn enter_pat(&mut self, _node: &Node<Pat>) -> VisitAction {
    VisitAction::Descend
  }
  fn leave_pat(&mut self, node: Node<Pat>) -> Node<Pat> {
    node
  }
}

pub fn rewrite_top_level<R: Rewriter>(node: Node<TopLevel>, r: &mut R) -> Node<TopLevel> {
  let node = match r.enter_top_level(&node) {
    VisitAction::Skip => node,
    VisitAction::Descend => node.map_stx(|stx| TopLevel {
      flags: stx.flags,
      body: rewrite_stmts(stx.body, r),
    }),
  };
  r.leave_top_level(node)
}

fn rewrite_stmts<R: Rewriter>(stmts: Vec<Node<Stmt>>, r: &mut R) -> Vec<Node<Stmt>> {
  stmts.into_iter().map(|s| rewrite_stmt(s, r)).collect()
}

fn rewrite_opt_expr<R: Rewriter>(e: Option<Node<Expr>>, r: &mut R) -> Option<Node<Expr>> {
  e.map(|e| rewrite_expr(e, r))
}

fn rewrite_var_decl<R: Rewriter>(n: Node<VarDecl>, r: &mut R) -> Node<VarDecl> {
  n.map_stx(|stx| VarDecl {
    mode: stx.mode,
    declarators: stx
      .declarators
      .into_iter()
      .map(|d| VarDeclarator {
        pattern: rewrite_pat_decl(d.pattern, r),
        initializer: rewrite_opt_expr(d.initializer, r),
      })
      .collect(),
  })
}

fn rewrite_pat_decl<R: Rewriter>(n: Node<PatDecl>, r: &mut R) -> Node<PatDecl> {
  n.map_stx(|stx| PatDecl {
    pat: rewrite_pat(stx.pat, r),
  })
}

fn rewrite_for_in_of_lhs<R: Rewriter>(lhs: ForInOfLhs, r: &mut R) -> ForInOfLhs {
  match lhs {
    ForInOfLhs::Assign(pat) => ForInOfLhs::Assign(rewrite_pat(pat, r)),
    ForInOfLhs::Decl((mode, decl)) => ForInOfLhs::Decl((mode, rewrite_pat_decl(decl, r))),
  }
}

fn rewrite_func<R: Rewriter>(n: Node<Func>, r: &mut R) -> Node<Func> {
  n.map_stx(|stx| Func {
    kind: stx.kind,
    generator: stx.generator,
    flags: stx.flags,
    parameters: stx
      .parameters
      .into_iter()
      .map(|p| {
        p.map_stx(|p| ParamDecl {
          rest: p.rest,
          pattern: rewrite_pat_decl(p.pattern, r),
          default_value: rewrite_opt_expr(p.default_value, r),
        })
      })
      .collect(),
    body: stx.body.map(|body| match body {
      FuncBody::Block(stmts) => FuncBody::Block(rewrite_stmts(stmts, r)),
      FuncBody::Expression(expr) => FuncBody::Expression(rewrite_expr(expr, r)),
    }),
    skipped: stx.skipped,
  })
}

fn rewrite_prop_key<R: Rewriter>(key: PropKey, r: &mut R) -> PropKey {
  match key {
    PropKey::Direct(k) => PropKey::Direct(k),
    PropKey::Computed(e) => PropKey::Computed(rewrite_expr(e, r)),
  }
}

fn rewrite_obj_lit<R: Rewriter>(n: Node<LitObjExpr>, r: &mut R) -> Node<LitObjExpr> {
  n.map_stx(|stx| LitObjExpr {
    members: stx
      .members
      .into_iter()
      .map(|m| {
        m.map_stx(|m| match m {
          ObjMember::Prop { key, value } => ObjMember::Prop {
            key: rewrite_prop_key(key, r),
            value: rewrite_expr(value, r),
          },
          ObjMember::Shorthand { id } => ObjMember::Shorthand { id },
          ObjMember::Getter { key, func } => ObjMember::Getter {
            key: rewrite_prop_key(key, r),
            func: rewrite_func(func, r),
          },
          ObjMember::Setter { key, func } => ObjMember::Setter {
            key: rewrite_prop_key(key, r),
            func: rewrite_func(func, r),
          },
        })
      })
      .collect(),
  })
}

fn rewrite_call_args<R: Rewriter>(args: Vec<Node<CallArg>>, r: &mut R) -> Vec<Node<CallArg>> {
  args
    .into_iter()
    .map(|a| {
      a.map_stx(|a| CallArg {
        spread: a.spread,
        value: rewrite_expr(a.value, r),
      })
    })
    .collect()
}

fn rewrite_template_parts<R: Rewriter>(
  parts: Vec<LitTemplatePart>,
  r: &mut R,
) -> Vec<LitTemplatePart> {
  parts
    .into_iter()
    .map(|p| match p {
      LitTemplatePart::Substitution(e) => LitTemplatePart::Substitution(rewrite_expr(e, r)),
      LitTemplatePart::String(s) => LitTemplatePart::String(s),
    })
    .collect()
}

pub fn rewrite_stmt<R: Rewriter>(node: Node<Stmt>, r: &mut R) -> Node<Stmt> {
  use super::stmt::*;
  let node = match r.enter_stmt(&node) {
    VisitAction::Skip => node,
    VisitAction::Descend => node.map_stx(|stx| match stx {
      Stmt::Block(n) => Stmt::Block(n.map_stx(|s| BlockStmt {
        body: rewrite_stmts(s.body, r),
      })),
      Stmt::Break(n) => Stmt::Break(n),
      Stmt::Continue(n) => Stmt::Continue(n),
      Stmt::Debugger(n) => Stmt::Debugger(n),
      Stmt::DoWhile(n) => Stmt::DoWhile(n.map_stx(|s| DoWhileStmt {
        condition: rewrite_expr(s.condition, r),
        body: rewrite_stmt(s.body, r),
      })),
      Stmt::Empty(n) => Stmt::Empty(n),
      Stmt::Error(n) => Stmt::Error(n),
      Stmt::Expr(n) => Stmt::Expr(n.map_stx(|s| ExprStmt {
        expr: rewrite_expr(s.expr, r),
      })),
      Stmt::ForIn(n) => Stmt::ForIn(n.map_stx(|s| ForInStmt {
        each: s.each,
        lhs: rewrite_for_in_of_lhs(s.lhs, r),
        rhs: rewrite_expr(s.rhs, r),
        body: s.body.map_stx(|b| ForBody {
          body: rewrite_stmts(b.body, r),
        }),
      })),
      Stmt::ForOf(n) => Stmt::ForOf(n.map_stx(|s| ForOfStmt {
        lhs: rewrite_for_in_of_lhs(s.lhs, r),
        rhs: rewrite_expr(s.rhs, r),
        body: s.body.map_stx(|b| ForBody {
          body: rewrite_stmts(b.body, r),
        }),
      })),
      Stmt::ForTriple(n) => Stmt::ForTriple(n.map_stx(|s| ForTripleStmt {
        init: match s.init {
          ForTripleStmtInit::None => ForTripleStmtInit::None,
          ForTripleStmtInit::Expr(e) => ForTripleStmtInit::Expr(rewrite_expr(e, r)),
          ForTripleStmtInit::Decl(d) => ForTripleStmtInit::Decl(rewrite_var_decl(d, r)),
        },
        cond: rewrite_opt_expr(s.cond, r),
        post: rewrite_opt_expr(s.post, r),
        body: s.body.map_stx(|b| ForBody {
          body: rewrite_stmts(b.body, r),
        }),
      })),
      Stmt::FunctionDecl(n) => Stmt::FunctionDecl(n.map_stx(|s| decl::FuncDecl {
        name: s.name,
        function: rewrite_func(s.function, r),
      })),
      Stmt::If(n) => Stmt::If(n.map_stx(|s| IfStmt {
        test: rewrite_expr(s.test, r),
        consequent: rewrite_stmt(s.consequent, r),
        alternate: s.alternate.map(|a| rewrite_stmt(a, r)),
      })),
      Stmt::ImportName(n) => Stmt::ImportName(n),
      Stmt::Label(n) => Stmt::Label(n.map_stx(|s| LabelStmt {
        name: s.name,
        statement: rewrite_stmt(s.statement, r),
      })),
      Stmt::Return(n) => Stmt::Return(n.map_stx(|s| ReturnStmt {
        value: rewrite_opt_expr(s.value, r),
      })),
      Stmt::Switch(n) => Stmt::Switch(n.map_stx(|s| SwitchStmt {
        test: rewrite_expr(s.test, r),
        branches: s
          .branches
          .into_iter()
          .map(|b| {
            b.map_stx(|b| SwitchBranch {
              case: rewrite_opt_expr(b.case, r),
              body: rewrite_stmts(b.body, r),
            })
          })
          .collect(),
      })),
      Stmt::Throw(n) => Stmt::Throw(n.map_stx(|s| ThrowStmt {
        value: rewrite_expr(s.value, r),
      })),
      Stmt::Try(n) => Stmt::Try(n.map_stx(|s| TryStmt {
        wrapped: s.wrapped.map_stx(|b| BlockStmt {
          body: rewrite_stmts(b.body, r),
        }),
        catches: s
          .catches
          .into_iter()
          .map(|c| {
            c.map_stx(|c| CatchBlock {
              parameter: c.parameter.map(|p| rewrite_pat_decl(p, r)),
              condition: rewrite_opt_expr(c.condition, r),
              body: rewrite_stmts(c.body, r),
            })
          })
          .collect(),
        finally: s.finally.map(|f| {
          f.map_stx(|b| BlockStmt {
            body: rewrite_stmts(b.body, r),
          })
        }),
      })),
      Stmt::VarDecl(n) => Stmt::VarDecl(rewrite_var_decl(n, r)),
      Stmt::While(n) => Stmt::While(n.map_stx(|s| WhileStmt {
        condition: rewrite_expr(s.condition, r),
        body: rewrite_stmt(s.body, r),
      })),
      Stmt::With(n) => Stmt::With(n.map_stx(|s| WithStmt {
        object: rewrite_expr(s.object, r),
        body: rewrite_stmt(s.body, r),
      })),
    }),
  };
  r.leave_stmt(node)
}

pub fn rewrite_expr<R: Rewriter>(node: Node<Expr>, r: &mut R) -> Node<Expr> {
  use super::expr::*;
  let node = match r.enter_expr(&node) {
    VisitAction::Skip => node,
    VisitAction::Descend => node.map_stx(|stx| match stx {
      Expr::ArrowFunc(n) => Expr::ArrowFunc(n.map_stx(|e| ArrowFuncExpr {
        func: rewrite_func(e.func, r),
      })),
      Expr::Bean(n) => Expr::Bean(n.map_stx(|e| BeanExpr {
        name: e.name,
        arguments: rewrite_call_args(e.arguments, r),
        members: rewrite_obj_lit(e.members, r),
      })),
      Expr::Binary(n) => Expr::Binary(n.map_stx(|e| BinaryExpr {
        operator: e.operator,
        left: rewrite_expr(e.left, r),
        right: rewrite_expr(e.right, r),
      })),
      Expr::Call(n) => Expr::Call(n.map_stx(|e| CallExpr {
        callee: rewrite_expr(e.callee, r),
        arguments: rewrite_call_args(e.arguments, r),
      })),
      Expr::ComputedMember(n) => Expr::ComputedMember(n.map_stx(|e| ComputedMemberExpr {
        object: rewrite_expr(e.object, r),
        member: rewrite_expr(e.member, r),
      })),
      Expr::Cond(n) => Expr::Cond(n.map_stx(|e| CondExpr {
        test: rewrite_expr(e.test, r),
        consequent: rewrite_expr(e.consequent, r),
        alternate: rewrite_expr(e.alternate, r),
      })),
      Expr::Func(n) => Expr::Func(n.map_stx(|e| FuncExpr {
        name: e.name,
        func: rewrite_func(e.func, r),
      })),
      Expr::Id(n) => Expr::Id(n),
      Expr::Member(n) => Expr::Member(n.map_stx(|e| MemberExpr {
        left: rewrite_expr(e.left, r),
        right: e.right,
      })),
      Expr::New(n) => Expr::New(n.map_stx(|e| NewExpr {
        callee: rewrite_expr(e.callee, r),
        arguments: rewrite_call_args(e.arguments, r),
      })),
      Expr::NewTarget(n) => Expr::NewTarget(n),
      Expr::Super(n) => Expr::Super(n),
      Expr::TaggedTemplate(n) => Expr::TaggedTemplate(n.map_stx(|e| TaggedTemplateExpr {
        function: rewrite_expr(e.function, r),
        parts: rewrite_template_parts(e.parts, r),
      })),
      Expr::This(n) => Expr::This(n),
      Expr::Unary(n) => Expr::Unary(n.map_stx(|e| UnaryExpr {
        operator: e.operator,
        argument: rewrite_expr(e.argument, r),
      })),
      Expr::UnaryPostfix(n) => Expr::UnaryPostfix(n.map_stx(|e| UnaryPostfixExpr {
        operator: e.operator,
        argument: rewrite_expr(e.argument, r),
      })),
      Expr::LitArr(n) => Expr::LitArr(n.map_stx(|e| lit::LitArrExpr {
        elements: e
          .elements
          .into_iter()
          .map(|el| match el {
            LitArrElem::Single(e) => LitArrElem::Single(rewrite_expr(e, r)),
            LitArrElem::Rest(e) => LitArrElem::Rest(rewrite_expr(e, r)),
            LitArrElem::Empty => LitArrElem::Empty,
          })
          .collect(),
      })),
      Expr::LitBool(n) => Expr::LitBool(n),
      Expr::LitNull(n) => Expr::LitNull(n),
      Expr::LitNum(n) => Expr::LitNum(n),
      Expr::LitObj(n) => Expr::LitObj(rewrite_obj_lit(n, r)),
      Expr::LitRegex(n) => Expr::LitRegex(n),
      Expr::LitStr(n) => Expr::LitStr(n),
      Expr::LitTemplate(n) => Expr::LitTemplate(n.map_stx(|e| lit::LitTemplateExpr {
        parts: rewrite_template_parts(e.parts, r),
      })),
      Expr::ArrPat(n) => pat_to_expr(rewrite_pat(n.into_wrapped(), r)),
      Expr::IdPat(n) => pat_to_expr(rewrite_pat(n.into_wrapped(), r)),
      Expr::ObjPat(n) => pat_to_expr(rewrite_pat(n.into_wrapped(), r)),
    }),
  };
  r.leave_expr(node)
}

// Re-wraps a pattern as the equivalent expression variant.
fn pat_to_expr(pat: Node<Pat>) -> Expr {
  match *pat.stx {
    Pat::Arr(n) => Expr::ArrPat(n),
    Pat::Id(n) => Expr::IdPat(n),
    Pat::Obj(n) => Expr::ObjPat(n),
  }
}

pub fn rewrite_pat<R: Rewriter>(node: Node<Pat>, r: &mut R) -> Node<Pat> {
  use super::expr::pat::*;
  let node = match r.enter_pat(&node) {
    VisitAction::Skip => node,
    VisitAction::Descend => node.map_stx(|stx| match stx {
      Pat::Id(n) => Pat::Id(n),
      Pat::Arr(n) => Pat::Arr(n.map_stx(|p| ArrPat {
        elements: p
          .elements
          .into_iter()
          .map(|el| {
            el.map(|el| ArrPatElem {
              target: rewrite_pat(el.target, r),
              default_value: rewrite_opt_expr(el.default_value, r),
            })
          })
          .collect(),
        rest: p.rest.map(|rest| rewrite_pat(rest, r)),
      })),
      Pat::Obj(n) => Pat::Obj(n.map_stx(|p| ObjPat {
        properties: p
          .properties
          .into_iter()
          .map(|prop| {
            prop.map_stx(|prop| ObjPatProp {
              key: rewrite_prop_key(prop.key, r),
              target: rewrite_pat(prop.target, r),
              shorthand: prop.shorthand,
              default_value: rewrite_opt_expr(prop.default_value, r),
            })
          })
          .collect(),
      })),
    }),
  };
  r.leave_pat(node)
}

macro_rules! binary_operator_methods {
  ($(($method:ident, $operator:ident),)*) => {
    $(
      fn $method(&mut self, node: &Node<BinaryExpr>) {
        self.visit_binary_default(node)
      }
    )*
  };
}

macro_rules! unary_operator_methods {
  ($(($method:ident, $operator:ident),)*) => {
    $(
      fn $method(&mut self, node: &Node<UnaryExpr>) {
        self.visit_unary_default(node)
      }
    )*
  };
}

/// Read-only visitor that dispatches binary/unary nodes by concrete
/// operator, so per-operator logic doesn't need hand-written `if` chains.
/// Unhandled operators fall through to the `*_default` methods, which keeps
/// existing implementations working when operators are added.
pub trait OperatorVisitor {
  fn visit_binary_default(&mut self, _node: &Node<BinaryExpr>) {}
  fn visit_unary_default(&mut self, _node: &Node<UnaryExpr>) {}
  fn visit_unary_postfix(&mut self, _node: &Node<UnaryPostfixExpr>) {}

  binary_operator_methods! {
    (visit_add, Addition),
    (visit_assign, Assignment),
    (visit_assign_add, AssignmentAddition),
    (visit_assign_bit_and, AssignmentBitwiseAnd),
    (visit_assign_shl, AssignmentBitwiseLeftShift),
    (visit_assign_bit_or, AssignmentBitwiseOr),
    (visit_assign_shr, AssignmentBitwiseRightShift),
    (visit_assign_ushr, AssignmentBitwiseUnsignedRightShift),
    (visit_assign_bit_xor, AssignmentBitwiseXor),
    (visit_assign_div, AssignmentDivision),
    (visit_assign_mul, AssignmentMultiplication),
    (visit_assign_rem, AssignmentRemainder),
    (visit_assign_sub, AssignmentSubtraction),
    (visit_bit_and, BitwiseAnd),
    (visit_shl, BitwiseLeftShift),
    (visit_bit_or, BitwiseOr),
    (visit_shr, BitwiseRightShift),
    (visit_ushr, BitwiseUnsignedRightShift),
    (visit_bit_xor, BitwiseXor),
    (visit_comma, Comma),
    (visit_eq, Equality),
    (visit_gt, GreaterThan),
    (visit_ge, GreaterThanOrEqual),
    (visit_in, In),
    (visit_ne, Inequality),
    (visit_instanceof, Instanceof),
    (visit_lt, LessThan),
    (visit_le, LessThanOrEqual),
    (visit_and, LogicalAnd),
    (visit_or, LogicalOr),
    (visit_mul, Multiplication),
    (visit_div, Division),
    (visit_rem, Remainder),
    (visit_strict_eq, StrictEquality),
    (visit_strict_ne, StrictInequality),
    (visit_sub, Subtraction),
  }

  unary_operator_methods! {
    (visit_bit_not, BitwiseNot),
    (visit_delete, Delete),
    (visit_not, LogicalNot),
    (visit_pre_dec, PrefixDecrement),
    (visit_pre_inc, PrefixIncrement),
    (visit_typeof, Typeof),
    (visit_neg, UnaryNegation),
    (visit_pos, UnaryPlus),
    (visit_void, Void),
    (visit_yield, Yield),
    (visit_yield_delegated, YieldDelegated),
  }
}

/// Routes a binary node to the operator-specific method of `v`.
pub fn dispatch_binary<V: OperatorVisitor + ?Sized>(v: &mut V, node: &Node<BinaryExpr>) {
  use OperatorName::*;
  match node.stx.operator {
    Addition => v.visit_add(node),
    Assignment => v.visit_assign(node),
    AssignmentAddition => v.visit_assign_add(node),
    AssignmentBitwiseAnd => v.visit_assign_bit_and(node),
    AssignmentBitwiseLeftShift => v.visit_assign_shl(node),
    AssignmentBitwiseOr => v.visit_assign_bit_or(node),
    AssignmentBitwiseRightShift => v.visit_assign_shr(node),
    AssignmentBitwiseUnsignedRightShift => v.visit_assign_ushr(node),
    AssignmentBitwiseXor => v.visit_assign_bit_xor(node),
    AssignmentDivision => v.visit_assign_div(node),
    AssignmentMultiplication => v.visit_assign_mul(node),
    AssignmentRemainder => v.visit_assign_rem(node),
    AssignmentSubtraction => v.visit_assign_sub(node),
    BitwiseAnd => v.visit_bit_and(node),
    BitwiseLeftShift => v.visit_shl(node),
    BitwiseOr => v.visit_bit_or(node),
    BitwiseRightShift => v.visit_shr(node),
    BitwiseUnsignedRightShift => v.visit_ushr(node),
    BitwiseXor => v.visit_bit_xor(node),
    Comma => v.visit_comma(node),
    Equality => v.visit_eq(node),
    GreaterThan => v.visit_gt(node),
    GreaterThanOrEqual => v.visit_ge(node),
    In => v.visit_in(node),
    Inequality => v.visit_ne(node),
    Instanceof => v.visit_instanceof(node),
    LessThan => v.visit_lt(node),
    LessThanOrEqual => v.visit_le(node),
    LogicalAnd => v.visit_and(node),
    LogicalOr => v.visit_or(node),
    Multiplication => v.visit_mul(node),
    Division => v.visit_div(node),
    Remainder => v.visit_rem(node),
    StrictEquality => v.visit_strict_eq(node),
    StrictInequality => v.visit_strict_ne(node),
    Subtraction => v.visit_sub(node),
    _ => v.visit_binary_default(node),
  }
}

/// Routes a unary node to the operator-specific method of `v`.
pub fn dispatch_unary<V: OperatorVisitor + ?Sized>(v: &mut V, node: &Node<UnaryExpr>) {
  use OperatorName::*;
  match node.stx.operator {
    BitwiseNot => v.visit_bit_not(node),
    Delete => v.visit_delete(node),
    LogicalNot => v.visit_not(node),
    PrefixDecrement => v.visit_pre_dec(node),
    PrefixIncrement => v.visit_pre_inc(node),
    Typeof => v.visit_typeof(node),
    UnaryNegation => v.visit_neg(node),
    UnaryPlus => v.visit_pos(node),
    Void => v.visit_void(node),
    Yield => v.visit_yield(node),
    YieldDelegated => v.visit_yield_delegated(node),
    _ => v.visit_unary_default(node),
  }
}
