use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Arity {
  Unary,
  Binary,
  Ternary,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  // Not a real operator; only exists to represent the minimum precedence of
  // the alternate branch of a conditional expression.
  ConditionalAlternate,
  Delete,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
  YieldDelegated,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }
}

pub struct Operator {
  pub name: OperatorName,
  pub arity: Arity,
  pub associativity: Associativity,
  pub precedence: u8,
}

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name: OperatorName, arity: Arity, associativity: Associativity, precedence: u8| {
    map.insert(name, Operator { name, arity, associativity, precedence });
  };
  use Arity::*;
  use Associativity::*;
  use OperatorName::*;
  add(Comma,                               Binary,  Left,  1);
  add(Yield,                               Unary,   Right, 2);
  add(YieldDelegated,                      Unary,   Right, 2);
  add(Assignment,                          Binary,  Right, 3);
  add(AssignmentAddition,                  Binary,  Right, 3);
  add(AssignmentBitwiseAnd,                Binary,  Right, 3);
  add(AssignmentBitwiseLeftShift,          Binary,  Right, 3);
  add(AssignmentBitwiseOr,                 Binary,  Right, 3);
  add(AssignmentBitwiseRightShift,         Binary,  Right, 3);
  add(AssignmentBitwiseUnsignedRightShift, Binary,  Right, 3);
  add(AssignmentBitwiseXor,                Binary,  Right, 3);
  add(AssignmentDivision,                  Binary,  Right, 3);
  add(AssignmentMultiplication,            Binary,  Right, 3);
  add(AssignmentRemainder,                 Binary,  Right, 3);
  add(AssignmentSubtraction,               Binary,  Right, 3);
  add(ConditionalAlternate,                Ternary, Right, 3);
  add(Conditional,                         Ternary, Right, 4);
  add(LogicalOr,                           Binary,  Left,  5);
  add(LogicalAnd,                          Binary,  Left,  6);
  add(BitwiseOr,                           Binary,  Left,  7);
  add(BitwiseXor,                          Binary,  Left,  8);
  add(BitwiseAnd,                          Binary,  Left,  9);
  add(Equality,                            Binary,  Left,  10);
  add(Inequality,                          Binary,  Left,  10);
  add(StrictEquality,                      Binary,  Left,  10);
  add(StrictInequality,                    Binary,  Left,  10);
  add(GreaterThan,                         Binary,  Left,  11);
  add(GreaterThanOrEqual,                  Binary,  Left,  11);
  add(In,                                  Binary,  Left,  11);
  add(Instanceof,                          Binary,  Left,  11);
  add(LessThan,                            Binary,  Left,  11);
  add(LessThanOrEqual,                     Binary,  Left,  11);
  add(BitwiseLeftShift,                    Binary,  Left,  12);
  add(BitwiseRightShift,                   Binary,  Left,  12);
  add(BitwiseUnsignedRightShift,           Binary,  Left,  12);
  add(Addition,                            Binary,  Left,  13);
  add(Subtraction,                         Binary,  Left,  13);
  add(Division,                            Binary,  Left,  14);
  add(Multiplication,                      Binary,  Left,  14);
  add(Remainder,                           Binary,  Left,  14);
  add(BitwiseNot,                          Unary,   Right, 15);
  add(Delete,                              Unary,   Right, 15);
  add(LogicalNot,                          Unary,   Right, 15);
  add(PrefixDecrement,                     Unary,   Right, 15);
  add(PrefixIncrement,                     Unary,   Right, 15);
  add(Typeof,                              Unary,   Right, 15);
  add(UnaryNegation,                       Unary,   Right, 15);
  add(UnaryPlus,                           Unary,   Right, 15);
  add(Void,                                Unary,   Right, 15);
  add(PostfixDecrement,                    Unary,   Left,  16);
  add(PostfixIncrement,                    Unary,   Left,  16);
  add(Call,                                Binary,  Left,  18);
  add(ComputedMemberAccess,                Binary,  Left,  18);
  add(MemberAccess,                        Binary,  Left,  18);
  map
});

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn multiplication_binds_tighter_than_addition() {
    assert!(
      OPERATORS[&OperatorName::Multiplication].precedence
        > OPERATORS[&OperatorName::Addition].precedence
    );
  }

  #[test]
  fn assignment_is_right_associative() {
    let op = &OPERATORS[&OperatorName::Assignment];
    assert_eq!(op.associativity, Associativity::Right);
    assert!(op.name.is_assignment());
    assert!(!OperatorName::Equality.is_assignment());
  }
}
