use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::ObjMember;
use crate::ast::expr::lit::PropKey;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::TT;

/// Converts a literal expression subtree into a pattern (assignment target).
/// `{ a: [b] }` could be an object literal or an object pattern; rather than
/// rewinding and reparsing when a pattern was misread as a literal, the
/// already-built literal is transformed.
pub fn lit_to_pat(node: Node<Expr>) -> SyntaxResult<Node<Pat>> {
  let loc = node.loc;
  match *node.stx {
    Expr::LitArr(n) => {
      let LitArrExpr { elements } = *n.stx;
      let mut pat_elements = Vec::<Option<ArrPatElem>>::new();
      let mut rest = None;
      for element in elements {
        if rest.is_some() {
          // Nothing is allowed after the rest element.
          return Err(loc.error(SyntaxErrorType::InvalidAssignmentTarget, None));
        };
        match element {
          LitArrElem::Single(elem) => match *elem.stx {
            Expr::Binary(n) => {
              let BinaryExpr {
                operator,
                left,
                right,
              } = *n.stx;
              if operator != OperatorName::Assignment {
                return Err(loc.error(SyntaxErrorType::InvalidAssignmentTarget, None));
              };
              pat_elements.push(Some(ArrPatElem {
                target: lit_to_pat(left)?,
                default_value: Some(right),
              }));
            }
            stx => pat_elements.push(Some(ArrPatElem {
              target: lit_to_pat(Node::new(elem.loc, stx))?,
              default_value: None,
            })),
          },
          LitArrElem::Rest(expr) => {
            rest = Some(lit_to_pat(expr)?);
          }
          LitArrElem::Empty => pat_elements.push(None),
        };
      }
      Ok(
        Node::new(loc, ArrPat {
          elements: pat_elements,
          rest,
        })
        .into_wrapped(),
      )
    }
    Expr::LitObj(n) => {
      let LitObjExpr { members } = *n.stx;
      let mut properties = Vec::new();
      for member in members {
        let member_loc = member.loc;
        match *member.stx {
          ObjMember::Prop { key, value } => {
            let (target, default_value) = match *value.stx {
              Expr::Binary(n) => {
                let BinaryExpr {
                  operator,
                  left,
                  right,
                } = *n.stx;
                if operator != OperatorName::Assignment {
                  return Err(member_loc.error(SyntaxErrorType::InvalidAssignmentTarget, None));
                };
                (lit_to_pat(left)?, Some(right))
              }
              stx => (lit_to_pat(Node::new(value.loc, stx))?, None),
            };
            properties.push(Node::new(member_loc, ObjPatProp {
              key,
              target,
              shorthand: false,
              default_value,
            }));
          }
          ObjMember::Shorthand { id } => {
            let key = id.derive_stx(|id| crate::ast::expr::lit::DirectPropKey {
              name: id.name.clone(),
              tt: TT::Identifier,
            });
            let target = id
              .derive_stx(|id| IdPat {
                name: id.name.clone(),
              })
              .into_wrapped();
            properties.push(Node::new(member_loc, ObjPatProp {
              key: PropKey::Direct(key),
              target,
              shorthand: true,
              default_value: None,
            }));
          }
          ObjMember::Getter { .. } | ObjMember::Setter { .. } => {
            return Err(member_loc.error(SyntaxErrorType::InvalidAssignmentTarget, None));
          }
        };
      }
      Ok(Node::new(loc, ObjPat { properties }).into_wrapped())
    }
    Expr::Id(n) => Ok(
      Node::new(loc, IdPat {
        name: n.stx.name.clone(),
      })
      .into_wrapped(),
    ),
    // Already a pattern, e.g. `{ a: b = 1 } = x` where `b = 1` was parsed as
    // an assignment whose LHS was converted.
    Expr::IdPat(n) => Ok(n.into_wrapped()),
    Expr::ArrPat(n) => Ok(n.into_wrapped()),
    Expr::ObjPat(n) => Ok(n.into_wrapped()),
    _ => Err(loc.error(SyntaxErrorType::InvalidAssignmentTarget, None)),
  }
}

// Checking whether every object, array, or identifier operand is an
// assignment target up front would be wasteful, so the LHS of an assignment
// is retroactively transformed into a target, raising an error if it isn't
// one. A valid target is a chain of member, computed-member, and call
// operators not ending in a call, or a pattern.
pub fn lhs_expr_to_assign_target(
  lhs: Node<Expr>,
  operator_name: OperatorName,
) -> SyntaxResult<Node<Expr>> {
  match lhs.stx.as_ref() {
    e @ (Expr::LitArr(_) | Expr::LitObj(_) | Expr::Id(_)) => {
      // Destructuring is only valid for plain `=`.
      if operator_name != OperatorName::Assignment && !matches!(e, Expr::Id(_)) {
        return Err(lhs.error(SyntaxErrorType::InvalidAssignmentTarget));
      }
      let loc = lhs.loc;
      let root = lit_to_pat(lhs)?;
      Ok(Node::new(loc, pat_as_expr(root)))
    }
    // As long as the expression ends with a member or computed-member
    // access, it's a valid target, e.g. `(a, b)[1] = x`. This runs after
    // parsing, so `a + b.c = 3` already failed: it parsed as `(a + b.c) = 3`
    // with a BinaryExpr LHS.
    Expr::ComputedMember(_) | Expr::Member(_) => Ok(lhs),
    _ => Err(lhs.error(SyntaxErrorType::InvalidAssignmentTarget)),
  }
}

fn pat_as_expr(pat: Node<Pat>) -> Expr {
  match *pat.stx {
    Pat::Arr(n) => Expr::ArrPat(n),
    Pat::Id(n) => Expr::IdPat(n),
    Pat::Obj(n) => Expr::ObjPat(n),
  }
}
