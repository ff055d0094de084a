use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

/// An element value as seen by the array engine. Hosts map their own value
/// model onto this one at the boundary; anything richer than the primitives
/// here (objects, functions) is stored behind `Ref`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
  Undefined,
  Null,
  Bool(bool),
  Int(i32),
  Num(f64),
  Str(Arc<str>),
  /// An opaque host object handle.
  Ref(u64),
}

impl Value {
  pub fn is_undefined(&self) -> bool {
    matches!(self, Value::Undefined)
  }

  /// The narrowest element kind able to hold this value exactly.
  pub fn element_kind(&self) -> ElementKind {
    match self {
      Value::Int(_) => ElementKind::Int,
      Value::Num(n) => {
        if f64_fits_i32(*n) {
          ElementKind::Int
        } else {
          ElementKind::Double
        }
      }
      // `undefined` is representable in any store via undefined tracking,
      // but as a pushed element it forces the widest kind.
      _ => ElementKind::Object,
    }
  }

  pub fn as_num(&self) -> Option<f64> {
    match self {
      Value::Int(i) => Some(*i as f64),
      Value::Num(n) => Some(*n),
      _ => None,
    }
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Value::Undefined => write!(f, "undefined"),
      Value::Null => write!(f, "null"),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Int(i) => write!(f, "{}", i),
      Value::Num(n) => write!(f, "{}", n),
      Value::Str(s) => write!(f, "{}", s),
      Value::Ref(r) => write!(f, "[object #{}]", r),
    }
  }
}

impl From<i32> for Value {
  fn from(v: i32) -> Self {
    Value::Int(v)
  }
}

impl From<f64> for Value {
  fn from(v: f64) -> Self {
    Value::Num(v)
  }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Value::Str(Arc::from(v))
  }
}

impl From<bool> for Value {
  fn from(v: bool) -> Self {
    Value::Bool(v)
  }
}

/// Whether a double is exactly representable as an i32. Note -0.0 is not:
/// it is a distinct JS value from +0 and requires a double store.
pub fn f64_fits_i32(n: f64) -> bool {
  n == (n as i32) as f64 && !(n == 0.0 && n.is_sign_negative())
}

/// The optimistic element-typing lattice, widening one-directionally:
/// `Int -> Double -> Object`. A store never narrows.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize)]
pub enum ElementKind {
  Int,
  Double,
  Object,
}

impl ElementKind {
  /// The widest kind across a batch of values, computed up front so a bulk
  /// append converts the representation at most once. Any non-integral
  /// numeric widens to Double; any non-numeric widens straight to Object.
  pub fn widest<'a>(values: impl IntoIterator<Item = &'a Value>) -> ElementKind {
    let mut widest = ElementKind::Int;
    for value in values {
      widest = widest.max(value.element_kind());
      if widest == ElementKind::Object {
        break;
      }
    }
    widest
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn element_kind_of_values() {
    assert_eq!(Value::Int(1).element_kind(), ElementKind::Int);
    assert_eq!(Value::Num(2.0).element_kind(), ElementKind::Int);
    assert_eq!(Value::Num(2.5).element_kind(), ElementKind::Double);
    assert_eq!(Value::Num(-0.0).element_kind(), ElementKind::Double);
    assert_eq!(Value::from("x").element_kind(), ElementKind::Object);
    assert_eq!(Value::Null.element_kind(), ElementKind::Object);
    assert_eq!(Value::Undefined.element_kind(), ElementKind::Object);
  }

  #[test]
  fn widest_follows_the_push_rule() {
    let ints = [Value::Int(1), Value::Num(2.0)];
    assert_eq!(ElementKind::widest(&ints), ElementKind::Int);
    let with_double = [Value::Int(1), Value::Num(0.5)];
    assert_eq!(ElementKind::widest(&with_double), ElementKind::Double);
    let with_null = [Value::Int(1), Value::Null];
    assert_eq!(ElementKind::widest(&with_null), ElementKind::Object);
  }

  #[test]
  fn lattice_is_ordered() {
    assert!(ElementKind::Int < ElementKind::Double);
    assert!(ElementKind::Double < ElementKind::Object);
  }
}
