//! Polymorphic backing storage for JS array-like values.
//!
//! [`data::ArrayData`] gives dynamically-typed, sparse, deletable,
//! frozen/sealed arrays the performance of primitive arrays by switching its
//! internal representation on demand while preserving the observable
//! semantics: holes vs. stored `undefined` vs. deleted slots, the logical
//! `length` invariants, and the ECMAScript index space up to 2^32 - 2.

pub mod data;
pub mod error;
pub mod index;
pub mod iter;
pub mod typed;
pub mod value;

pub use data::ArrayData;
pub use data::ArrayFlags;
pub use error::NotWritable;
pub use error::UnsupportedOperation;
pub use error::UnwarrantedOptimism;
pub use index::MAX_ARRAY_INDEX;
pub use index::MAX_DENSE_LENGTH;
pub use iter::ElementIter;
pub use iter::IterationOrder;
pub use typed::TypedKind;
pub use value::ElementKind;
pub use value::Value;
