use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::func::FuncFlags;
use super::node::Node;
use super::stmt::Stmt;

/// A whole parsed program. Acts as the implicit script-kind function: the
/// special-name flags of top-level code land here.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TopLevel {
  #[drive(skip)]
  pub flags: FuncFlags,
  pub body: Vec<Node<Stmt>>,
}
