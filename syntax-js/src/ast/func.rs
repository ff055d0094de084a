use bitflags::bitflags;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Deserialize;
use serde::Serialize;

use super::expr::Expr;
use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;
use crate::loc::ResumePoint;

/// What kind of function a `Func` is. The kind decides binding semantics:
/// arrows have no `this`/`arguments` of their own, accessors have fixed
/// arity, and `Script` is the implicit function wrapping a whole program.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Drive, DriveMut, Serialize)]
pub enum FuncKind {
  Arrow,
  Getter,
  Normal,
  Script,
  Setter,
}

bitflags! {
  /// Facts discovered about a function while parsing its body. `this`,
  /// `eval`, `arguments` and `new.target` inside an arrow function mark the
  /// nearest enclosing non-arrow function, because arrows resolve all of
  /// them lexically.
  #[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
  pub struct FuncFlags: u16 {
    const USES_THIS = 1 << 0;
    const USES_EVAL = 1 << 1;
    const USES_ARGUMENTS = 1 << 2;
    const USES_NEW_TARGET = 1 << 3;
    const HAS_DIRECT_SUPER_CALL = 1 << 4;
    const STRICT = 1 << 5;
  }
}

// The one function type shared by declarations, expressions, arrows and
// accessors; one type is easier to match on downstream than many.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub kind: FuncKind,
  #[drive(skip)]
  pub generator: bool,
  #[drive(skip)]
  pub flags: FuncFlags,
  pub parameters: Vec<Node<ParamDecl>>,
  // None when the body was skipped during an on-demand reparse; `skipped`
  // then records where the body can be re-lexed from.
  pub body: Option<FuncBody>,
  #[drive(skip)]
  pub skipped: Option<SkippedBody>,
}

// A function body is not a block statement: the scope includes the
// parameters, which matters to downstream scope analysis.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // Arrow function with a concise body.
  Expression(Node<Expr>),
}

/// Where a skipped function body starts (just after `{`) and ends (just
/// before the closing `}`). The end snapshot is taken before the closing
/// brace is consumed so a later re-lex from it sees the same tokens the
/// original parse did.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct SkippedBody {
  pub start: ResumePoint,
  pub end: ResumePoint,
}
