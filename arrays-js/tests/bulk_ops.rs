use arrays_js::ArrayData;
use arrays_js::TypedKind;
use arrays_js::Value;

#[test]
fn shift_left_slides_elements_down() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3, 4]);
  a.shift_left(2);
  assert_eq!(a.length(), 2);
  assert_eq!(a.get(0), Value::Int(3));
  assert_eq!(a.get(1), Value::Int(4));
}

#[test]
fn shift_left_moves_holes_with_the_elements() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3, 4]);
  a.delete(2);
  a.shift_left(1);
  assert_eq!(a.get(0), Value::Int(2));
  assert!(!a.has(1));
  assert_eq!(a.get(2), Value::Int(4));
}

#[test]
fn shift_right_opens_holes_at_the_front() {
  let mut a = ArrayData::from_ints(vec![1, 2]);
  a.shift_right(2);
  assert_eq!(a.length(), 4);
  assert!(!a.has(0));
  assert!(!a.has(1));
  assert_eq!(a.get(2), Value::Int(1));
  assert_eq!(a.get(3), Value::Int(2));
  // The caller fills the new slots afterwards.
  a.set_int(0, 9, false).unwrap();
  assert!(a.has(0));
}

#[test]
fn slice_preserves_holes_and_values() {
  let mut a = ArrayData::from_ints(vec![0, 1, 2, 3, 4]);
  a.delete(2);
  let s = a.slice(1, 4);
  assert_eq!(s.length(), 3);
  assert_eq!(s.get(0), Value::Int(1));
  assert!(!s.has(1));
  assert_eq!(s.get(2), Value::Int(3));
}

#[test]
fn slice_of_sparse_region() {
  let mut a = ArrayData::untouched();
  a.set_int(3_000_000, 7, false).unwrap();
  a.set_int(3_000_002, 8, false).unwrap();
  let s = a.slice(3_000_000, 3_000_003);
  assert_eq!(s.length(), 3);
  assert_eq!(s.get(0), Value::Int(7));
  assert!(!s.has(1));
  assert_eq!(s.get(2), Value::Int(8));
}

#[test]
fn fast_splice_on_packed_stores() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3, 4, 5]);
  a.fast_splice(1, 2, &[Value::Int(9)]).unwrap();
  assert_eq!(a.length(), 4);
  assert_eq!(a.get(0), Value::Int(1));
  assert_eq!(a.get(1), Value::Int(9));
  assert_eq!(a.get(2), Value::Int(4));
}

#[test]
fn fast_splice_widens_for_added_values() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3]);
  a.fast_splice(1, 1, &[Value::Num(0.5)]).unwrap();
  assert_eq!(a.element_kind(), arrays_js::ElementKind::Double);
  assert_eq!(a.get(1), Value::Num(0.5));
}

#[test]
fn fast_splice_signals_unsupported_for_filtered_arrays() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3]);
  a.delete(1);
  assert!(a.fast_splice(0, 1, &[]).is_err());

  let mut b = ArrayData::from_ints(vec![1, 2, 3]);
  b.freeze();
  assert!(b.fast_splice(0, 1, &[]).is_err());

  let mut c = ArrayData::untouched();
  c.ensure(2_000_000);
  assert!(c.is_sparse());
  assert!(c.fast_splice(0, 1, &[]).is_err());
}

#[test]
fn fast_concat_on_packed_stores() {
  let a = ArrayData::from_ints(vec![1, 2]);
  let b = ArrayData::from_nums(vec![0.5]);
  let c = a.fast_concat(&b).unwrap();
  assert_eq!(c.length(), 3);
  assert_eq!(c.element_kind(), arrays_js::ElementKind::Double);
  assert_eq!(c.get(0), Value::Int(1).as_num().map(Value::Num).unwrap());
  assert_eq!(c.get(2), Value::Num(0.5));
}

#[test]
fn fast_concat_signals_unsupported_for_holes() {
  let mut a = ArrayData::from_ints(vec![1, 2]);
  a.delete(0);
  let b = ArrayData::from_ints(vec![3]);
  assert!(a.fast_concat(&b).is_err());
}

#[test]
fn typed_stores_reject_structure_changes() {
  let mut t = ArrayData::typed(TypedKind::Int32, 4);
  assert_eq!(t.length(), 4);
  t.set_num(0, 42.0, false).unwrap();
  assert_eq!(t.get(0), Value::Num(42.0));

  // Elements exist for the whole fixed range; deletes are refused.
  assert!(t.has(3));
  assert!(!t.delete(0));
  assert!(t.has(0));
  assert!(t.fast_splice(0, 1, &[]).is_err());

  // Out-of-range writes are ignored.
  t.set_num(10, 1.0, false).unwrap();
  assert_eq!(t.length(), 4);
}

#[test]
fn pop_then_push_round_trip() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3]);
  assert_eq!(a.pop(false).unwrap(), Value::Int(3));
  assert_eq!(a.length(), 2);
  a.push(&[Value::Int(9)], false).unwrap();
  assert_eq!(a.length(), 3);
  assert_eq!(a.get(2), Value::Int(9));
}
