use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::Ident;
use crate::num::JsNumber;
use crate::token::TT;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum LitArrElem {
  Single(Node<Expr>),
  Rest(Node<Expr>),
  // A hole (elision); contributes to length but has no value.
  Empty,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitRegexExpr {
  // Includes delimiter slashes and any flags.
  #[drive(skip)]
  pub value: Ident,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  // The decoded value, after escape processing.
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum LitTemplatePart {
  Substitution(Node<Expr>),
  #[drive(skip)]
  String(String),
}

/// A non-computed property key: the raw name plus the token type it came
/// from, so consumers can distinguish `{ a: 1 }` from `{ "a": 1 }` and
/// `{ 1: x }`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DirectPropKey {
  #[drive(skip)]
  pub name: Ident,
  #[drive(skip)]
  pub tt: TT,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum PropKey {
  Direct(Node<DirectPropKey>),
  Computed(Node<Expr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ObjMember {
  Prop {
    key: PropKey,
    value: Node<Expr>,
  },
  // `{ a }`; equivalent to `{ a: a }` but kept distinct so scope analysis
  // sees the variable usage.
  Shorthand {
    id: Node<IdShorthand>,
  },
  Getter {
    key: PropKey,
    func: Node<Func>,
  },
  Setter {
    key: PropKey,
    func: Node<Func>,
  },
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdShorthand {
  #[drive(skip)]
  pub name: Ident,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}
