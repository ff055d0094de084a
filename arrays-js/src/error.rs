use crate::value::ElementKind;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A strict-mode mutation violation, corresponding to the TypeError the host
/// surfaces. In sloppy mode the same mutations are silent no-ops and this is
/// never produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotWritable {
  pub what: &'static str,
}

impl Display for NotWritable {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "cannot modify {}", self.what)
  }
}

impl Error for NotWritable {}

/// Control-flow signal for speculative typed access: the stored value exists
/// but cannot be represented as the requested narrower type. The caller is
/// expected to de-optimize to a wider access, never to surface this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnwarrantedOptimism {
  pub expected: ElementKind,
}

impl Display for UnwarrantedOptimism {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "value not representable as {:?}", self.expected)
  }
}

impl Error for UnwarrantedOptimism {}

/// Control-flow signal for bulk fast paths the current representation cannot
/// support; the caller falls back to the generic element-by-element path.
/// Never an error the array's own public API surfaces to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedOperation {
  pub op: &'static str,
}

impl Display for UnsupportedOperation {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "representation does not support fast {}", self.op)
  }
}

impl Error for UnsupportedOperation {}
