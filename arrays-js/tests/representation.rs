use arrays_js::ArrayData;
use arrays_js::ElementKind;
use arrays_js::Value;
use arrays_js::MAX_DENSE_LENGTH;

#[test]
fn widening_is_monotonic() {
  let mut a = ArrayData::allocate(0);
  assert_eq!(a.element_kind(), ElementKind::Int);

  a.set_num(0, 3.5, false).unwrap();
  assert_eq!(a.element_kind(), ElementKind::Double);
  assert_eq!(a.get(0), Value::Num(3.5));

  a.set(1, Value::from("x"), false).unwrap();
  assert_eq!(a.element_kind(), ElementKind::Object);
  assert_eq!(a.get(0), Value::Num(3.5));
  assert_eq!(a.get(1), Value::from("x"));

  // Narrow values never downgrade the representation.
  a.set_int(2, 7, false).unwrap();
  assert_eq!(a.element_kind(), ElementKind::Object);
  a.set_num(0, 1.0, false).unwrap();
  assert_eq!(a.element_kind(), ElementKind::Object);
}

#[test]
fn integral_doubles_stay_int() {
  let mut a = ArrayData::allocate(0);
  a.set_num(0, 4.0, false).unwrap();
  assert_eq!(a.element_kind(), ElementKind::Int);
  assert_eq!(a.get(0), Value::Int(4));
  // -0.0 is not representable as an int.
  a.set_num(1, -0.0, false).unwrap();
  assert_eq!(a.element_kind(), ElementKind::Double);
}

#[test]
fn untouched_defers_allocation() {
  let mut a = ArrayData::untouched();
  assert_eq!(a.length(), 0);
  assert!(!a.has(0));

  // The first write materializes a real store; the skipped range becomes
  // holes, not allocated slots.
  a.set_int(10, 1, false).unwrap();
  assert_eq!(a.length(), 11);
  assert!(a.has(10));
  for i in 0..10 {
    assert!(!a.has(i), "index {} should be a hole", i);
    assert_eq!(a.get(i), Value::Undefined);
  }
}

#[test]
fn ensure_past_dense_ceiling_goes_sparse() {
  let mut a = ArrayData::allocate(0);
  assert!(!a.is_sparse());
  a.ensure(MAX_DENSE_LENGTH);
  assert!(a.is_sparse());
  assert_eq!(a.length(), MAX_DENSE_LENGTH as u64 + 1);
}

#[test]
fn sparse_round_trips_values() {
  let mut a = ArrayData::allocate(0);
  a.set_int(0, 1, false).unwrap();
  a.set_int(1, 2, false).unwrap();
  a.ensure(10_000_000);
  a.set_int(10_000_000, 3, false).unwrap();
  assert!(a.is_sparse());
  assert_eq!(a.get(0), Value::Int(1));
  assert_eq!(a.get(1), Value::Int(2));
  assert_eq!(a.get(10_000_000), Value::Int(3));
  assert!(!a.has(500_000));
  assert_eq!(a.length(), 10_000_001);
}

#[test]
fn allocate_length_starts_as_holes() {
  let a = ArrayData::allocate(5);
  assert_eq!(a.length(), 5);
  for i in 0..5 {
    assert!(!a.has(i));
  }
}

#[test]
fn length_shrink_drops_elements_permanently() {
  let mut a = ArrayData::from_ints(vec![1, 2, 3, 4, 5]);
  a.set_length(2, false).unwrap();
  assert_eq!(a.length(), 2);
  a.set_length(5, false).unwrap();
  // Re-extending must not resurrect the dropped elements.
  assert!(!a.has(3));
  assert_eq!(a.get(3), Value::Undefined);
  assert_eq!(a.get(1), Value::Int(2));
}

#[test]
fn length_can_exceed_physical_capacity() {
  let mut a = ArrayData::from_ints(vec![1]);
  a.set_length(1_000, false).unwrap();
  assert_eq!(a.length(), 1_000);
  assert!(a.has(0));
  assert!(!a.has(999));
}

#[test]
fn optimistic_reads_signal_on_wider_values() {
  let mut a = ArrayData::allocate(0);
  a.set_int(0, 5, false).unwrap();
  assert_eq!(a.get_int_optimistic(0), Ok(5));
  assert_eq!(a.get_num_optimistic(0), Ok(5.0));

  a.set_num(1, 2.5, false).unwrap();
  let err = a.get_int_optimistic(1).unwrap_err();
  assert_eq!(err.expected, ElementKind::Int);
  assert_eq!(a.get_num_optimistic(1), Ok(2.5));

  a.set(2, Value::from("s"), false).unwrap();
  assert!(a.get_int_optimistic(2).is_err());
  assert!(a.get_num_optimistic(2).is_err());

  // An integral double still reads optimistically as an int.
  a.set_num(3, 8.0, false).unwrap();
  assert_eq!(a.get_int_optimistic(3), Ok(8));
}

#[test]
fn push_widens_once_for_the_whole_batch() {
  let mut a = ArrayData::allocate(0);
  let new_len = a
    .push(
      &[Value::Int(1), Value::Num(2.5), Value::Null],
      false,
    )
    .unwrap();
  assert_eq!(new_len, 3);
  // Null forces the object representation for the whole batch.
  assert_eq!(a.element_kind(), ElementKind::Object);
  assert_eq!(a.get(0), Value::Int(1));
  assert_eq!(a.get(2), Value::Null);
}

#[test]
fn index_boundary_matches_ecmascript() {
  use arrays_js::index::array_index;
  assert!(array_index(0xFFFF_FFFE).is_some());
  assert!(array_index(0xFFFF_FFFF).is_none());
}
