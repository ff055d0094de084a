use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A half-open byte range within the current source file.
///
/// A location is not guaranteed to point at real source text: rewriting
/// passes can create nodes out of thin air, and some locations are only
/// best-effort.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// A serializable point in the token stream from which lexing can restart.
///
/// `line` and `column` are one-based and zero-based respectively, matching
/// what error renderers expect. Only `offset` drives re-seeding; the other
/// two fields exist so a resume point remains meaningful after the token
/// buffer that produced it is gone.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ResumePoint {
  pub offset: usize,
  pub line: u32,
  pub column: u32,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extend_covers_both_ranges() {
    let mut a = Loc(4, 10);
    a.extend(Loc(1, 6));
    assert_eq!(a, Loc(1, 10));
    assert_eq!(Loc(0, 2) + Loc(5, 9), Loc(0, 9));
  }

  #[test]
  fn add_option_ignores_none() {
    assert_eq!(Loc(3, 5).add_option(None), Loc(3, 5));
    assert_eq!(Loc(3, 5).add_option(Some(Loc(7, 9))), Loc(3, 9));
  }
}
