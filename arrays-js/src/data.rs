use crate::error::NotWritable;
use crate::error::UnsupportedOperation;
use crate::error::UnwarrantedOptimism;
use crate::index::align_up;
use crate::index::MAX_ARRAY_INDEX;
use crate::index::MAX_DENSE_LENGTH;
use crate::index::MAX_LENGTH;
use crate::typed::TypedKind;
use crate::typed::TypedStore;
use crate::value::f64_fits_i32;
use crate::value::ElementKind;
use crate::value::Value;
use bitflags::bitflags;
use fixedbitset::FixedBitSet;
use std::collections::BTreeMap;

bitflags! {
  /// Property-state restrictions layered over any store. Composable and
  /// orthogonal to the representation; each mutator consults them before
  /// touching the store. Freezing implies sealing implies non-extensible.
  #[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
  pub struct ArrayFlags: u8 {
    const FROZEN = 1 << 0;
    const SEALED = 1 << 1;
    const NON_EXTENSIBLE = 1 << 2;
    const LENGTH_NOT_WRITABLE = 1 << 3;
  }
}

/// The concrete representation. Transitions are monotonic along the element
/// lattice (`Int -> Double -> Object`) and from dense to sparse; there are
/// no back-edges. `Untouched` defers any allocation until the first write.
#[derive(Clone, Debug)]
enum Store {
  Untouched,
  Int(Vec<i32>),
  Double(Vec<f64>),
  Object(Vec<Value>),
  Sparse(BTreeMap<u32, Value>),
  Typed(TypedStore),
}

/// The backing store of one JS array-like value.
///
/// The logical `length` is tracked separately from any physical capacity and
/// may exceed it (trailing holes). Two bit sets track the per-slot facts the
/// primitive stores can't represent themselves: slots that are logically
/// `undefined` (the store keeps a cheap placeholder), and slots that are
/// deleted (holes, which report `has() == false` without shrinking length).
///
/// Mutation is in place; operations that change representation swap the
/// internal store. Ownership makes the single-referent rule automatic: there
/// is no way to retain the pre-transition representation. The type is not
/// internally synchronized; a host object owning one must establish
/// exclusive access during mutation.
#[derive(Clone, Debug)]
pub struct ArrayData {
  store: Store,
  length: u64,
  undef: Option<FixedBitSet>,
  deleted: Option<FixedBitSet>,
  flags: ArrayFlags,
}

impl ArrayData {
  /// A freshly created array with no writes yet. No backing store is
  /// allocated until the first write; writes at nonzero indices represent
  /// the skipped range as holes rather than allocating it.
  pub fn untouched() -> ArrayData {
    ArrayData {
      store: Store::Untouched,
      length: 0,
      undef: None,
      deleted: None,
      flags: ArrayFlags::empty(),
    }
  }

  /// `new Array(length)`: every slot in `[0, length)` starts as a hole.
  pub fn allocate(length: u32) -> ArrayData {
    if length > MAX_DENSE_LENGTH {
      return ArrayData {
        store: Store::Sparse(BTreeMap::new()),
        length: length as u64,
        undef: None,
        deleted: None,
        flags: ArrayFlags::empty(),
      };
    }
    let mut deleted = None;
    if length > 0 {
      let mut bits = FixedBitSet::with_capacity(length as usize);
      bits.insert_range(..);
      deleted = Some(bits);
    }
    ArrayData {
      store: Store::Int(vec![0; align_up(length) as usize]),
      length: length as u64,
      undef: None,
      deleted,
      flags: ArrayFlags::empty(),
    }
  }

  pub fn from_ints(values: Vec<i32>) -> ArrayData {
    let length = values.len() as u64;
    ArrayData {
      store: Store::Int(values),
      length,
      undef: None,
      deleted: None,
      flags: ArrayFlags::empty(),
    }
  }

  pub fn from_nums(values: Vec<f64>) -> ArrayData {
    let length = values.len() as u64;
    ArrayData {
      store: Store::Double(values),
      length,
      undef: None,
      deleted: None,
      flags: ArrayFlags::empty(),
    }
  }

  pub fn from_values(values: Vec<Value>) -> ArrayData {
    let length = values.len() as u64;
    ArrayData {
      store: Store::Object(values),
      length,
      undef: None,
      deleted: None,
      flags: ArrayFlags::empty(),
    }
  }

  pub fn typed(kind: TypedKind, length: u32) -> ArrayData {
    ArrayData {
      store: Store::Typed(TypedStore::new(kind, length)),
      length: length as u64,
      undef: None,
      deleted: None,
      flags: ArrayFlags::empty(),
    }
  }

  pub fn length(&self) -> u64 {
    self.length
  }

  /// The current position on the widening lattice.
  pub fn element_kind(&self) -> ElementKind {
    match &self.store {
      Store::Untouched | Store::Int(_) => ElementKind::Int,
      Store::Double(_) => ElementKind::Double,
      Store::Object(_) | Store::Sparse(_) => ElementKind::Object,
      Store::Typed(t) => match t.kind() {
        TypedKind::Float32 | TypedKind::Float64 => ElementKind::Double,
        _ => ElementKind::Int,
      },
    }
  }

  pub fn is_sparse(&self) -> bool {
    matches!(self.store, Store::Sparse(_))
  }

  pub fn is_typed(&self) -> bool {
    matches!(self.store, Store::Typed(_))
  }

  pub fn is_frozen(&self) -> bool {
    self.flags.contains(ArrayFlags::FROZEN)
  }

  pub fn is_sealed(&self) -> bool {
    self.flags.intersects(ArrayFlags::FROZEN | ArrayFlags::SEALED)
  }

  pub fn is_extensible(&self) -> bool {
    !self
      .flags
      .intersects(ArrayFlags::FROZEN | ArrayFlags::SEALED | ArrayFlags::NON_EXTENSIBLE)
  }

  /// Freezing forbids all element writes and deletes. Idempotent.
  pub fn freeze(&mut self) {
    self.flags |= ArrayFlags::FROZEN | ArrayFlags::SEALED | ArrayFlags::NON_EXTENSIBLE;
  }

  /// Sealing forbids adding and deleting elements; existing elements stay
  /// writable. Idempotent.
  pub fn seal(&mut self) {
    self.flags |= ArrayFlags::SEALED | ArrayFlags::NON_EXTENSIBLE;
  }

  /// Forbids adding elements beyond the current length. Idempotent.
  pub fn prevent_extensions(&mut self) {
    self.flags |= ArrayFlags::NON_EXTENSIBLE;
  }

  pub fn set_is_length_not_writable(&mut self) {
    self.flags |= ArrayFlags::LENGTH_NOT_WRITABLE;
  }

  // ---- membership and reads ----

  /// Whether the slot holds a value, distinguishing absent/hole (false)
  /// from present-but-undefined (true).
  pub fn has(&self, index: u32) -> bool {
    if index as u64 >= self.length {
      return false;
    }
    if let Some(deleted) = &self.deleted {
      if deleted.contains(index as usize) {
        return false;
      }
    }
    match &self.store {
      Store::Untouched => false,
      Store::Int(v) => (index as usize) < v.len(),
      Store::Double(v) => (index as usize) < v.len(),
      Store::Object(v) => (index as usize) < v.len(),
      Store::Sparse(map) => map.contains_key(&index),
      Store::Typed(t) => t.has(index),
    }
  }

  /// The smallest present index at or above `from`, if any. Lets iteration
  /// skip hole ranges without probing every index of a sparse array.
  pub fn next_present(&self, from: u64) -> Option<u32> {
    if from >= self.length {
      return None;
    }
    match &self.store {
      Store::Sparse(map) => map.range(from as u32..).next().map(|(k, _)| *k),
      _ => {
        let end = match &self.store {
          Store::Typed(_) => self.length,
          _ => (self.dense_physical_len() as u64).min(self.length),
        };
        (from..end).map(|i| i as u32).find(|&i| self.has(i))
      }
    }
  }

  /// The largest present index strictly below `below`, if any.
  pub fn prev_present(&self, below: u64) -> Option<u32> {
    let below = below.min(self.length);
    match &self.store {
      Store::Sparse(map) => {
        if below == 0 {
          return None;
        }
        map.range(..below as u32).next_back().map(|(k, _)| *k)
      }
      _ => {
        let start = match &self.store {
          Store::Typed(_) => below,
          _ => (self.dense_physical_len() as u64).min(below),
        };
        (0..start).rev().map(|i| i as u32).find(|&i| self.has(i))
      }
    }
  }

  /// Reads a slot, mapping holes to `undefined`.
  pub fn get(&self, index: u32) -> Value {
    if !self.has(index) {
      return Value::Undefined;
    }
    if let Some(undef) = &self.undef {
      if undef.contains(index as usize) {
        return Value::Undefined;
      }
    }
    match &self.store {
      Store::Untouched => Value::Undefined,
      Store::Int(v) => Value::Int(v[index as usize]),
      Store::Double(v) => Value::Num(v[index as usize]),
      Store::Object(v) => v[index as usize].clone(),
      Store::Sparse(map) => map.get(&index).cloned().unwrap_or(Value::Undefined),
      Store::Typed(t) => Value::Num(t.get(index)),
    }
  }

  /// Unchecked fast read from an int store. Panics if the representation is
  /// not int or the index is outside the physical store; callers guard with
  /// `has` and `element_kind`, or use the optimistic accessor.
  pub fn get_int(&self, index: u32) -> i32 {
    match &self.store {
      Store::Int(v) => v[index as usize],
      _ => panic!("get_int on non-int representation"),
    }
  }

  /// Unchecked fast read from a numeric store.
  pub fn get_num(&self, index: u32) -> f64 {
    match &self.store {
      Store::Int(v) => v[index as usize] as f64,
      Store::Double(v) => v[index as usize],
      Store::Typed(t) => t.get(index),
      _ => panic!("get_num on non-numeric representation"),
    }
  }

  /// Speculative int read: fails with a typed signal (instead of panicking
  /// or widening) when the slot's value isn't exactly an int, letting the
  /// caller de-optimize.
  pub fn get_int_optimistic(&self, index: u32) -> Result<i32, UnwarrantedOptimism> {
    const FAIL: UnwarrantedOptimism = UnwarrantedOptimism {
      expected: ElementKind::Int,
    };
    match self.get(index) {
      Value::Int(i) => Ok(i),
      Value::Num(n) if f64_fits_i32(n) => Ok(n as i32),
      _ => Err(FAIL),
    }
  }

  /// Speculative double read.
  pub fn get_num_optimistic(&self, index: u32) -> Result<f64, UnwarrantedOptimism> {
    const FAIL: UnwarrantedOptimism = UnwarrantedOptimism {
      expected: ElementKind::Double,
    };
    match self.get(index) {
      Value::Int(i) => Ok(i as f64),
      Value::Num(n) => Ok(n),
      _ => Err(FAIL),
    }
  }

  // ---- representation management ----

  fn dense_physical_len(&self) -> usize {
    match &self.store {
      Store::Int(v) => v.len(),
      Store::Double(v) => v.len(),
      Store::Object(v) => v.len(),
      _ => 0,
    }
  }

  /// Widens the representation to hold `kind`. One-directional: a request
  /// narrower than the current kind is a no-op. Untouched stores materialize
  /// directly at the requested kind.
  pub fn convert(&mut self, kind: ElementKind) {
    if matches!(self.store, Store::Sparse(_) | Store::Typed(_)) {
      return;
    }
    if matches!(self.store, Store::Untouched) {
      self.store = match kind {
        ElementKind::Int => Store::Int(Vec::new()),
        ElementKind::Double => Store::Double(Vec::new()),
        ElementKind::Object => Store::Object(Vec::new()),
      };
      return;
    }
    if kind <= self.element_kind() {
      return;
    }
    let store = std::mem::replace(&mut self.store, Store::Untouched);
    self.store = match (store, kind) {
      (Store::Int(v), ElementKind::Double) => {
        Store::Double(v.into_iter().map(|i| i as f64).collect())
      }
      (Store::Int(v), ElementKind::Object) => {
        Store::Object(v.into_iter().map(Value::Int).collect())
      }
      (Store::Double(v), ElementKind::Object) => {
        Store::Object(v.into_iter().map(Value::Num).collect())
      }
      (store, _) => store,
    };
    if let Store::Object(v) = &mut self.store {
      // An object store holds `undefined` directly; fold the tracking bits
      // into it.
      if let Some(undef) = self.undef.take() {
        for i in undef.ones() {
          if i < v.len() {
            v[i] = Value::Undefined;
          }
        }
      }
    }
  }

  /// Switches a dense store to the sparse (map-backed) representation,
  /// preserving holes and undefined tracking.
  fn to_sparse(&mut self) {
    let store = std::mem::replace(&mut self.store, Store::Untouched);
    let deleted = self.deleted.take();
    let undef = self.undef.take();
    let is_hole = |i: usize| deleted.as_ref().is_some_and(|d| d.contains(i));
    let is_undef = |i: usize| undef.as_ref().is_some_and(|u| u.contains(i));
    let mut map = BTreeMap::new();
    match store {
      Store::Int(v) => {
        for (i, x) in v.into_iter().enumerate() {
          if (i as u64) < self.length && !is_hole(i) {
            let value = if is_undef(i) { Value::Undefined } else { Value::Int(x) };
            map.insert(i as u32, value);
          }
        }
      }
      Store::Double(v) => {
        for (i, x) in v.into_iter().enumerate() {
          if (i as u64) < self.length && !is_hole(i) {
            let value = if is_undef(i) { Value::Undefined } else { Value::Num(x) };
            map.insert(i as u32, value);
          }
        }
      }
      Store::Object(v) => {
        for (i, x) in v.into_iter().enumerate() {
          if (i as u64) < self.length && !is_hole(i) {
            map.insert(i as u32, x);
          }
        }
      }
      Store::Untouched | Store::Sparse(_) | Store::Typed(_) => {}
    }
    self.store = Store::Sparse(map);
  }

  /// Guarantees slot `index` is backed and writable without further
  /// reallocation, switching to the sparse representation past the dense
  /// ceiling. Extends the logical length to cover the slot; any skipped
  /// range becomes holes.
  pub fn ensure(&mut self, index: u32) {
    debug_assert!(index as u64 <= MAX_ARRAY_INDEX);
    if let Store::Typed(_) = self.store {
      return;
    }
    if matches!(self.store, Store::Untouched) {
      self.convert(ElementKind::Int);
    }
    if !self.is_sparse() {
      if index >= MAX_DENSE_LENGTH {
        self.to_sparse();
      } else {
        let needed = align_up(index + 1) as usize;
        let old_phys = self.dense_physical_len();
        if old_phys < needed {
          match &mut self.store {
            Store::Int(v) => v.resize(needed, 0),
            Store::Double(v) => v.resize(needed, 0.0),
            Store::Object(v) => v.resize(needed, Value::Undefined),
            _ => {}
          }
          // Newly backed slots are holes until written; without this, a
          // physical zero would be observable where there was no element.
          self.mark_hole_range(old_phys as u64, needed as u64);
        }
      }
    }
    if index as u64 >= self.length {
      self.mark_hole_range(self.length, index as u64);
      self.length = index as u64 + 1;
    }
  }

  // Marks [from, to) as holes. Sparse holes are implicit (absent keys).
  fn mark_hole_range(&mut self, from: u64, to: u64) {
    if from >= to || self.is_sparse() {
      return;
    }
    let deleted = self.deleted.get_or_insert_with(FixedBitSet::default);
    if deleted.len() < to as usize {
      deleted.grow(to as usize);
    }
    deleted.insert_range(from as usize..to as usize);
  }

  fn clear_hole(&mut self, index: u32) {
    if let Some(deleted) = &mut self.deleted {
      if (index as usize) < deleted.len() {
        deleted.set(index as usize, false);
      }
    }
  }

  fn clear_undef(&mut self, index: u32) {
    if let Some(undef) = &mut self.undef {
      if (index as usize) < undef.len() {
        undef.set(index as usize, false);
      }
    }
  }

  fn mark_undef(&mut self, index: u32) {
    let undef = self.undef.get_or_insert_with(FixedBitSet::default);
    if undef.len() <= index as usize {
      undef.grow(index as usize + 1);
    }
    undef.insert(index as usize);
  }

  // ---- writes ----

  // ES5 [[CanPut]]-style gate. Returns Ok(true) to proceed, Ok(false) for a
  // sloppy-mode silent no-op, Err for the strict-mode TypeError.
  fn write_permitted(&self, index: u32, strict: bool) -> Result<bool, NotWritable> {
    let reject = |what: &'static str| {
      if strict {
        Err(NotWritable { what })
      } else {
        Ok(false)
      }
    };
    if self.flags.contains(ArrayFlags::FROZEN) {
      return reject("element of frozen array");
    }
    let is_new = !self.has(index);
    if is_new && !self.is_extensible() {
      return reject("element of non-extensible array");
    }
    if index as u64 >= self.length && self.flags.contains(ArrayFlags::LENGTH_NOT_WRITABLE) {
      return reject("length of array with non-writable length");
    }
    Ok(true)
  }

  /// Stores a value, widening the representation first if it cannot hold the
  /// value exactly. Storing `undefined` into a primitive store keeps the
  /// physical placeholder and tracks the slot in the undefined bit set.
  pub fn set(&mut self, index: u32, value: Value, strict: bool) -> Result<(), NotWritable> {
    debug_assert!(index as u64 <= MAX_ARRAY_INDEX);
    if !self.write_permitted(index, strict)? {
      return Ok(());
    }
    if let Store::Typed(_) = self.store {
      let n = value.as_num().unwrap_or(f64::NAN);
      if let Store::Typed(t) = &mut self.store {
        t.set(index, n);
      }
      return Ok(());
    }
    self.ensure(index);
    match &value {
      Value::Undefined if !matches!(self.store, Store::Object(_) | Store::Sparse(_)) => {
        // Leave the physical placeholder; the bit set reports undefined.
        self.mark_undef(index);
        self.clear_hole(index);
        return Ok(());
      }
      _ => {}
    }
    self.convert(value.element_kind().max(self.element_kind()));
    match &mut self.store {
      Store::Int(v) => {
        let int = match value {
          Value::Int(i) => i,
          Value::Num(n) => n as i32,
          _ => unreachable!("conversion preceded write"),
        };
        v[index as usize] = int;
      }
      Store::Double(v) => {
        let num = match value {
          Value::Int(i) => i as f64,
          Value::Num(n) => n,
          _ => unreachable!("conversion preceded write"),
        };
        v[index as usize] = num;
      }
      Store::Object(v) => v[index as usize] = value,
      Store::Sparse(map) => {
        map.insert(index, value);
      }
      Store::Untouched | Store::Typed(_) => unreachable!("materialized above"),
    }
    self.clear_hole(index);
    self.clear_undef(index);
    Ok(())
  }

  pub fn set_int(&mut self, index: u32, value: i32, strict: bool) -> Result<(), NotWritable> {
    self.set(index, Value::Int(value), strict)
  }

  pub fn set_num(&mut self, index: u32, value: f64, strict: bool) -> Result<(), NotWritable> {
    self.set(index, Value::Num(value), strict)
  }

  // ---- length ----

  /// Sets the logical length. Shrinking drops now-out-of-range elements:
  /// dense stores physically truncate, sparse stores drop entries at or
  /// beyond the new length.
  pub fn set_length(&mut self, new_length: u64, strict: bool) -> Result<(), NotWritable> {
    debug_assert!(new_length <= MAX_LENGTH);
    if self
      .flags
      .intersects(ArrayFlags::FROZEN | ArrayFlags::LENGTH_NOT_WRITABLE)
    {
      return if strict {
        Err(NotWritable {
          what: "length of array with non-writable length",
        })
      } else {
        Ok(())
      };
    }
    if new_length < self.length {
      // Physical storage within the retained chunk keeps its bytes; the
      // dropped slots are re-marked as holes so a later length extension
      // does not resurrect them.
      let backed = (self.dense_physical_len() as u64).min(self.length);
      self.shrink(new_length);
      self.mark_hole_range(new_length, backed);
    }
    self.length = new_length;
    Ok(())
  }

  // Releases storage beyond the new length.
  fn shrink(&mut self, new_length: u64) {
    match &mut self.store {
      Store::Int(v) => v.truncate(align_up(new_length as u32) as usize),
      Store::Double(v) => v.truncate(align_up(new_length as u32) as usize),
      Store::Object(v) => v.truncate(align_up(new_length as u32) as usize),
      Store::Sparse(map) => {
        if new_length <= MAX_ARRAY_INDEX {
          map.split_off(&(new_length as u32));
        }
      }
      Store::Untouched | Store::Typed(_) => {}
    }
  }

  // ---- deletion ----

  /// Marks a slot as a hole (distinct from storing undefined): afterwards
  /// `has` reports false, while the length is unchanged. Returns whether the
  /// deletion was permitted.
  pub fn delete(&mut self, index: u32) -> bool {
    if self.flags.intersects(ArrayFlags::FROZEN | ArrayFlags::SEALED) {
      return false;
    }
    if index as u64 >= self.length {
      return true;
    }
    match &mut self.store {
      Store::Sparse(map) => {
        map.remove(&index);
      }
      Store::Typed(_) => return false,
      _ => {
        // Beyond the physical store the slot is already an implicit hole.
        if (index as usize) < self.dense_physical_len() {
          self.mark_hole_range(index as u64, index as u64 + 1);
          self.clear_undef(index);
        }
      }
    }
    true
  }

  /// Deletes every slot in `[from, to)`.
  pub fn delete_range(&mut self, from: u32, to: u32) -> bool {
    if self.flags.intersects(ArrayFlags::FROZEN | ArrayFlags::SEALED) {
      return false;
    }
    match &mut self.store {
      Store::Sparse(map) => {
        let keys: Vec<u32> = map.range(from..to).map(|(k, _)| *k).collect();
        for k in keys {
          map.remove(&k);
        }
      }
      Store::Typed(_) => return false,
      _ => {
        let to = (to as u64)
          .min(self.length)
          .min(self.dense_physical_len() as u64);
        self.mark_hole_range(from as u64, to);
        if let Some(undef) = &mut self.undef {
          for i in from as usize..(to as usize).min(undef.len()) {
            undef.set(i, false);
          }
        }
      }
    }
    true
  }

  // ---- bulk operations ----

  /// Appends values at the end. The widest element kind across the batch is
  /// computed first so the representation converts at most once instead of
  /// churning per element. Returns the new length.
  pub fn push(&mut self, values: &[Value], strict: bool) -> Result<u64, NotWritable> {
    if !values.is_empty() {
      self.convert(ElementKind::widest(values).max(self.element_kind()));
    }
    for value in values {
      let at = self.length;
      if at > MAX_ARRAY_INDEX {
        break;
      }
      self.set(at as u32, value.clone(), strict)?;
    }
    Ok(self.length)
  }

  /// Removes and returns the last element; holes pop as `undefined`.
  pub fn pop(&mut self, strict: bool) -> Result<Value, NotWritable> {
    if self.length == 0 {
      return Ok(Value::Undefined);
    }
    if self.flags.intersects(
      ArrayFlags::FROZEN | ArrayFlags::SEALED | ArrayFlags::LENGTH_NOT_WRITABLE,
    ) {
      return if strict {
        Err(NotWritable {
          what: "element of non-configurable array",
        })
      } else {
        Ok(Value::Undefined)
      };
    }
    let last = (self.length - 1) as u32;
    let value = self.get(last);
    self.delete(last);
    self.length -= 1;
    self.shrink(self.length);
    Ok(value)
  }

  /// Removes the first `by` elements, sliding the rest left.
  pub fn shift_left(&mut self, by: u32) {
    let by = (by as u64).min(self.length) as u32;
    if by == 0 || self.is_typed() {
      return;
    }
    match &mut self.store {
      Store::Int(v) => {
        v.drain(..(by as usize).min(v.len()));
      }
      Store::Double(v) => {
        v.drain(..(by as usize).min(v.len()));
      }
      Store::Object(v) => {
        v.drain(..(by as usize).min(v.len()));
      }
      Store::Sparse(map) => {
        let shifted: BTreeMap<u32, Value> = map
          .iter()
          .filter(|(k, _)| **k >= by)
          .map(|(k, v)| (k - by, v.clone()))
          .collect();
        *map = shifted;
      }
      Store::Untouched | Store::Typed(_) => {}
    }
    shift_bits_left(&mut self.undef, by as usize);
    shift_bits_left(&mut self.deleted, by as usize);
    self.length -= by as u64;
  }

  /// Opens `by` hole slots at the front, sliding existing elements right.
  /// The caller is expected to fill the new slots.
  pub fn shift_right(&mut self, by: u32) {
    if by == 0 || self.is_typed() {
      return;
    }
    let new_length = (self.length + by as u64).min(MAX_LENGTH);
    match &mut self.store {
      Store::Int(v) => {
        v.splice(..0, std::iter::repeat(0).take(by as usize));
      }
      Store::Double(v) => {
        v.splice(..0, std::iter::repeat(0.0).take(by as usize));
      }
      Store::Object(v) => {
        v.splice(..0, std::iter::repeat(Value::Undefined).take(by as usize));
      }
      Store::Sparse(map) => {
        let shifted: BTreeMap<u32, Value> = map
          .iter()
          .filter(|(k, _)| **k as u64 + (by as u64) <= MAX_ARRAY_INDEX)
          .map(|(k, v)| (k + by, v.clone()))
          .collect();
        *map = shifted;
        self.length = new_length;
        return;
      }
      Store::Untouched | Store::Typed(_) => {
        self.length = new_length;
        return;
      }
    };
    shift_bits_right(&mut self.undef, by as usize);
    shift_bits_right(&mut self.deleted, by as usize);
    self.length = new_length;
    // The new front slots are holes until written.
    self.mark_hole_range(0, by as u64);
  }

  /// Copies `[from, to)` into a new array, preserving holes and undefined
  /// slots.
  pub fn slice(&self, from: u32, to: u32) -> ArrayData {
    let to = ((to as u64).min(self.length)) as u32;
    let mut out = ArrayData::untouched();
    if from >= to {
      return out;
    }
    if let Store::Sparse(map) = &self.store {
      for (k, v) in map.range(from..to) {
        out.ensure(k - from);
        out.set(k - from, v.clone(), false).unwrap();
      }
      if out.length < (to - from) as u64 {
        out.set_length((to - from) as u64, false).unwrap();
      }
      return out;
    }
    // Slots beyond the physical store are holes; only the backed region
    // needs element-by-element copying.
    let backed = ((self.dense_physical_len() as u64).min(to as u64) as u32).max(from);
    for index in from..backed {
      let at = index - from;
      if self.has(index) {
        out.set(at, self.get(index), false).unwrap();
      } else {
        out.ensure(at);
        out.delete(at);
      }
    }
    // A trailing hole still contributes to the slice's length.
    if out.length < (to - from) as u64 {
      out.set_length((to - from) as u64, false).unwrap();
    }
    out
  }

  // Bits at or beyond the logical length are bookkeeping for the aligned
  // physical tail and don't make the array filtered.
  fn tracked_bits_in_range(bits: &Option<FixedBitSet>, upto: usize) -> usize {
    bits
      .as_ref()
      .map_or(0, |b| b.count_ones(..upto.min(b.len())))
  }

  fn plain_dense(&self) -> bool {
    matches!(self.store, Store::Int(_) | Store::Double(_) | Store::Object(_))
      && self.flags.is_empty()
      && Self::tracked_bits_in_range(&self.undef, self.length as usize) == 0
      && Self::tracked_bits_in_range(&self.deleted, self.length as usize) == 0
      && self.length as usize <= self.dense_physical_len()
  }

  /// In-place splice for the packed, unfiltered fast path. Representations
  /// that can't support it (sparse, typed, any filter state) signal
  /// `UnsupportedOperation`; the caller retries via the generic
  /// element-by-element path.
  pub fn fast_splice(
    &mut self,
    start: u32,
    delete_count: u32,
    add: &[Value],
  ) -> Result<(), UnsupportedOperation> {
    const FAIL: UnsupportedOperation = UnsupportedOperation { op: "splice" };
    if !self.plain_dense() || start as u64 > self.length {
      return Err(FAIL);
    }
    let start = start as usize;
    let end = (start + delete_count as usize).min(self.length as usize);
    if !add.is_empty() {
      self.convert(ElementKind::widest(add).max(self.element_kind()));
    }
    match &mut self.store {
      Store::Int(v) => {
        let add: Vec<i32> = add
          .iter()
          .map(|x| match x {
            Value::Int(i) => *i,
            Value::Num(n) => *n as i32,
            _ => unreachable!("conversion preceded write"),
          })
          .collect();
        v.splice(start..end, add);
      }
      Store::Double(v) => {
        let add: Vec<f64> = add
          .iter()
          .map(|x| x.as_num().unwrap_or(f64::NAN))
          .collect();
        v.splice(start..end, add);
      }
      Store::Object(v) => {
        v.splice(start..end, add.iter().cloned());
      }
      _ => return Err(FAIL),
    }
    // The fast path requires no live tracking bits, so the sets carry only
    // aligned-tail bookkeeping; positions shifted by the splice would turn
    // that into phantom holes.
    self.deleted = None;
    self.undef = None;
    self.length = self.length - (end - start) as u64 + add.len() as u64;
    Ok(())
  }

  /// Concatenation fast path over two packed, unfiltered arrays.
  pub fn fast_concat(&self, other: &ArrayData) -> Result<ArrayData, UnsupportedOperation> {
    const FAIL: UnsupportedOperation = UnsupportedOperation { op: "concat" };
    if !self.plain_dense() || !other.plain_dense() {
      return Err(FAIL);
    }
    let mut out = self.clone();
    out.shrink(out.length);
    out.convert(other.element_kind().max(out.element_kind()));
    let other_len = other.length as u32;
    for i in 0..other_len {
      let at = out.length as u32;
      out
        .set(at, other.get(i), false)
        .map_err(|_| FAIL)?;
    }
    Ok(out)
  }
}

fn shift_bits_left(bits: &mut Option<FixedBitSet>, by: usize) {
  if let Some(old) = bits.take() {
    let mut shifted = FixedBitSet::with_capacity(old.len().saturating_sub(by));
    for i in old.ones() {
      if i >= by {
        shifted.insert(i - by);
      }
    }
    if shifted.count_ones(..) > 0 {
      *bits = Some(shifted);
    }
  }
}

fn shift_bits_right(bits: &mut Option<FixedBitSet>, by: usize) {
  if let Some(old) = bits.take() {
    let mut shifted = FixedBitSet::with_capacity(old.len() + by);
    for i in old.ones() {
      shifted.insert(i + by);
    }
    *bits = Some(shifted);
  }
}
