pub mod expr;
pub mod func;
pub mod node;
pub mod stmt;
pub mod stx;
pub mod visit;

use std::sync::Arc;

/// An interned identifier or property name. All names produced during one
/// parse job are deduplicated through the parser's intern table, so equal
/// names share one allocation.
pub type Ident = Arc<str>;
