use arrays_js::ArrayData;
use arrays_js::Value;

#[test]
fn hole_vs_undefined_vs_deleted() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3]);

  // Stored undefined: present, reads as undefined, physical store keeps a
  // cheap placeholder.
  a.set(0, Value::Undefined, false).unwrap();
  assert!(a.has(0));
  assert_eq!(a.get(0), Value::Undefined);
  assert_eq!(a.element_kind(), arrays_js::ElementKind::Int);

  // Deleted: absent, but the length is untouched.
  assert!(a.delete(1));
  assert!(!a.has(1));
  assert_eq!(a.get(1), Value::Undefined);
  assert_eq!(a.length(), 3);

  // Overwriting an undefined slot clears the tracking.
  a.set_int(0, 9, false).unwrap();
  assert_eq!(a.get(0), Value::Int(9));

  // Writing into a deleted slot revives it.
  a.set_int(1, 8, false).unwrap();
  assert!(a.has(1));
}

#[test]
fn pop_at_a_deleted_boundary_returns_undefined() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3]);
  a.delete(2);
  assert!(!a.has(2));
  let popped = a.pop(false).unwrap();
  assert_eq!(popped, Value::Undefined);
  assert_eq!(a.length(), 2);
  assert_eq!(a.pop(false).unwrap(), Value::Int(2));
}

#[test]
fn delete_range_clears_a_window() {
  let mut a = ArrayData::from_ints(vec![0, 1, 2, 3, 4, 5]);
  assert!(a.delete_range(1, 4));
  assert!(a.has(0));
  assert!(!a.has(1));
  assert!(!a.has(2));
  assert!(!a.has(3));
  assert!(a.has(4));
  assert_eq!(a.length(), 6);
}

#[test]
fn frozen_rejects_all_mutation() {
  let mut a = ArrayData::from_ints(vec![1, 2]);
  a.freeze();
  assert!(a.is_frozen());
  assert!(a.is_sealed());
  assert!(!a.is_extensible());

  // Sloppy mode: silent no-op.
  a.set_int(0, 9, false).unwrap();
  assert_eq!(a.get(0), Value::Int(1));

  // Strict mode: TypeError-class failure.
  assert!(a.set_int(0, 9, true).is_err());
  assert!(!a.delete(0));
  assert!(a.has(0));

  // Length is pinned too.
  a.set_length(0, false).unwrap();
  assert_eq!(a.length(), 2);
}

#[test]
fn freeze_is_idempotent() {
  let mut a = ArrayData::from_ints(vec![1]);
  a.freeze();
  let before = a.clone();
  a.freeze();
  // Same permitted mutations either way.
  assert_eq!(a.is_frozen(), before.is_frozen());
  assert!(a.set_int(0, 2, true).is_err());
  a.set_int(0, 2, false).unwrap();
  assert_eq!(a.get(0), Value::Int(1));
}

#[test]
fn sealed_allows_writes_but_not_structure_changes() {
  let mut a = ArrayData::from_ints(vec![1, 2]);
  a.seal();
  assert!(a.is_sealed());
  assert!(!a.is_frozen());

  // Existing elements stay writable.
  a.set_int(0, 9, false).unwrap();
  assert_eq!(a.get(0), Value::Int(9));

  // Adding and deleting are rejected.
  a.set_int(5, 1, false).unwrap();
  assert!(!a.has(5));
  assert!(a.set_int(5, 1, true).is_err());
  assert!(!a.delete(1));
  assert!(a.has(1));
}

#[test]
fn non_extensible_blocks_new_elements_only() {
  let mut a = ArrayData::from_ints(vec![1, 2]);
  a.prevent_extensions();
  assert!(!a.is_extensible());
  assert!(!a.is_sealed());

  a.set_int(0, 9, false).unwrap();
  assert_eq!(a.get(0), Value::Int(9));
  a.set_int(9, 1, false).unwrap();
  assert!(!a.has(9));

  // Deleting existing elements is still allowed.
  assert!(a.delete(1));
  assert!(!a.has(1));
}

#[test]
fn non_writable_length_pins_growth() {
  let mut a = ArrayData::from_ints(vec![1, 2]);
  a.set_is_length_not_writable();
  a.set_length(10, false).unwrap();
  assert_eq!(a.length(), 2);
  assert!(a.set_length(10, true).is_err());

  // Writes within the current length still work.
  a.set_int(1, 5, false).unwrap();
  assert_eq!(a.get(1), Value::Int(5));
  // Writes that would extend the length do not.
  a.set_int(5, 1, false).unwrap();
  assert_eq!(a.length(), 2);
  assert!(!a.has(5));
}

#[test]
fn undefined_tracking_survives_widening() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3]);
  a.set(1, Value::Undefined, false).unwrap();
  // Widening to object folds the tracked slot into a stored undefined.
  a.set(2, Value::from("s"), false).unwrap();
  assert!(a.has(1));
  assert_eq!(a.get(1), Value::Undefined);
  assert_eq!(a.get(0), Value::Int(1));
}

#[test]
fn undefined_tracking_survives_sparse_transition() {
  let mut a = ArrayData::from_ints(vec![1, 2]);
  a.set(0, Value::Undefined, false).unwrap();
  a.delete(1);
  a.ensure(2_000_000);
  assert!(a.is_sparse());
  assert!(a.has(0));
  assert_eq!(a.get(0), Value::Undefined);
  assert!(!a.has(1));
}
