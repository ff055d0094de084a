//! ECMAScript array-index validation.
//!
//! An array index is an integer in `[0, 2^32 - 2]`; anything beyond is an
//! ordinary named property, not an element, and is rejected here so callers
//! route it to their property map instead.

/// The largest valid array index, 2^32 - 2. (2^32 - 1 is reserved for the
/// maximum length value.)
pub const MAX_ARRAY_INDEX: u64 = u32::MAX as u64 - 1;

/// The largest logical length, 2^32 - 1.
pub const MAX_LENGTH: u64 = u32::MAX as u64;

/// Dense stores never grow past this many slots; `ensure` switches to the
/// sparse representation instead.
pub const MAX_DENSE_LENGTH: u32 = 1 << 20;

/// Physical capacity of dense stores is aligned up to this many slots, so
/// repeated appends reallocate geometrically less often than once per write.
pub const CHUNK_SIZE: u32 = 32;

/// Validates an integral candidate index.
pub fn array_index(n: u64) -> Option<u32> {
  (n <= MAX_ARRAY_INDEX).then_some(n as u32)
}

/// Validates a numeric candidate index: must be integral, non-negative, and
/// within the index space. `-0`, fractions, NaN and infinities are not
/// indices.
pub fn array_index_from_f64(n: f64) -> Option<u32> {
  if n.fract() != 0.0 || n < 0.0 || n.is_sign_negative() && n == 0.0 {
    return None;
  }
  if n > MAX_ARRAY_INDEX as f64 {
    return None;
  }
  Some(n as u32)
}

/// Validates a string candidate index. Only the canonical decimal form
/// counts: `"007"` and `"1.0"` are property names, not indices.
pub fn array_index_from_str(s: &str) -> Option<u32> {
  if s.is_empty() || s.len() > 10 {
    return None;
  }
  if s.len() > 1 && s.starts_with('0') {
    return None;
  }
  if !s.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let n: u64 = s.parse().ok()?;
  array_index(n)
}

/// Rounds a requested capacity up to a chunk boundary, saturating at the
/// dense ceiling.
pub fn align_up(capacity: u32) -> u32 {
  capacity
    .checked_add(CHUNK_SIZE - 1)
    .map(|c| c & !(CHUNK_SIZE - 1))
    .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn index_space_boundary() {
    // 2^32 - 2 is the last valid index; 2^32 - 1 is not an index.
    assert_eq!(array_index(0xFFFF_FFFE), Some(0xFFFF_FFFE));
    assert_eq!(array_index(0xFFFF_FFFF), None);
    assert_eq!(array_index(0), Some(0));
  }

  #[test]
  fn numeric_indices() {
    assert_eq!(array_index_from_f64(3.0), Some(3));
    assert_eq!(array_index_from_f64(3.5), None);
    assert_eq!(array_index_from_f64(-1.0), None);
    assert_eq!(array_index_from_f64(-0.0), None);
    assert_eq!(array_index_from_f64(f64::NAN), None);
    assert_eq!(array_index_from_f64(4294967294.0), Some(0xFFFF_FFFE));
    assert_eq!(array_index_from_f64(4294967295.0), None);
  }

  #[test]
  fn string_indices_are_canonical_only() {
    assert_eq!(array_index_from_str("0"), Some(0));
    assert_eq!(array_index_from_str("42"), Some(42));
    assert_eq!(array_index_from_str("007"), None);
    assert_eq!(array_index_from_str("1.0"), None);
    assert_eq!(array_index_from_str(""), None);
    assert_eq!(array_index_from_str("4294967294"), Some(0xFFFF_FFFE));
    assert_eq!(array_index_from_str("4294967295"), None);
  }

  #[test]
  fn chunk_alignment() {
    assert_eq!(align_up(0), 0);
    assert_eq!(align_up(1), CHUNK_SIZE);
    assert_eq!(align_up(CHUNK_SIZE), CHUNK_SIZE);
    assert_eq!(align_up(CHUNK_SIZE + 1), CHUNK_SIZE * 2);
  }
}
