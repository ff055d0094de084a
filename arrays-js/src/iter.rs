//! Driving a callback across array elements in JS iteration order.
//!
//! Present elements are visited in ascending index order (or descending for
//! reverse drivers); holes are skipped. The first error a callback returns
//! aborts the whole iteration and propagates to the caller unchanged.

use crate::data::ArrayData;
use crate::value::Value;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum IterationOrder {
  Ascending,
  Descending,
}

/// Iterator over the present elements of an array. Skips holes; yields
/// stored `undefined` values.
pub struct ElementIter<'a> {
  data: &'a ArrayData,
  // Next candidate index from the front (ascending) ...
  front: u64,
  // ... or from the back (descending); one past the next candidate.
  back: u64,
  order: IterationOrder,
}

impl<'a> ElementIter<'a> {
  pub fn new(data: &'a ArrayData, order: IterationOrder) -> ElementIter<'a> {
    ElementIter {
      data,
      front: 0,
      back: data.length(),
      order,
    }
  }
}

impl<'a> Iterator for ElementIter<'a> {
  type Item = (u32, Value);

  fn next(&mut self) -> Option<Self::Item> {
    match self.order {
      IterationOrder::Ascending => {
        let index = self.data.next_present(self.front)?;
        if index as u64 >= self.back {
          return None;
        }
        self.front = index as u64 + 1;
        Some((index, self.data.get(index)))
      }
      IterationOrder::Descending => {
        if self.back <= self.front {
          return None;
        }
        let index = self.data.prev_present(self.back)?;
        self.back = index as u64;
        Some((index, self.data.get(index)))
      }
    }
  }
}

/// Folds a fallible callback over the present elements. The accumulator
/// threads through; a callback error aborts immediately.
pub fn apply<T, E, F>(
  data: &ArrayData,
  order: IterationOrder,
  init: T,
  mut f: F,
) -> Result<T, E>
where
  F: FnMut(T, u32, &Value) -> Result<T, E>,
{
  let mut acc = init;
  for (index, value) in ElementIter::new(data, order) {
    acc = f(acc, index, &value)?;
  }
  Ok(acc)
}

/// Runs a fallible callback over the present elements for effect.
pub fn for_each<E, F>(data: &ArrayData, order: IterationOrder, mut f: F) -> Result<(), E>
where
  F: FnMut(u32, &Value) -> Result<(), E>,
{
  apply(data, order, (), |(), index, value| f(index, value))
}
