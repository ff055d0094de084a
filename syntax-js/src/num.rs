use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

/// Whether the raw token text is a legacy octal literal (`0644`). These are
/// valid in sloppy mode and an early error in strict mode.
pub fn is_legacy_octal(raw: &str) -> bool {
  raw.len() > 1
    && raw.starts_with('0')
    && raw.bytes().all(|b| b.is_ascii_digit())
    && raw.bytes().all(|b| matches!(b, b'0'..=b'7'))
}

/// Computes the numeric value of a number literal's raw source text.
/// Returns None for text the lexer should not have produced.
pub fn parse_numeric_literal(raw: &str) -> Option<f64> {
  if let Some(rest) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
    return u64::from_str_radix(rest, 16).ok().map(|v| v as f64);
  }
  if let Some(rest) = raw.strip_prefix("0o").or_else(|| raw.strip_prefix("0O")) {
    return u64::from_str_radix(rest, 8).ok().map(|v| v as f64);
  }
  if let Some(rest) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
    return u64::from_str_radix(rest, 2).ok().map(|v| v as f64);
  }
  if is_legacy_octal(raw) {
    return u64::from_str_radix(&raw[1..], 8).ok().map(|v| v as f64);
  }
  raw.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_radix_prefixes() {
    assert_eq!(parse_numeric_literal("0xff"), Some(255.0));
    assert_eq!(parse_numeric_literal("0o17"), Some(15.0));
    assert_eq!(parse_numeric_literal("0b101"), Some(5.0));
  }

  #[test]
  fn parses_decimal_forms() {
    assert_eq!(parse_numeric_literal("1.5e2"), Some(150.0));
    assert_eq!(parse_numeric_literal(".25"), Some(0.25));
    assert_eq!(parse_numeric_literal("10"), Some(10.0));
  }

  #[test]
  fn legacy_octal() {
    assert!(is_legacy_octal("0644"));
    assert!(!is_legacy_octal("0"));
    assert!(!is_legacy_octal("0.5"));
    assert!(!is_legacy_octal("0899"));
    assert_eq!(parse_numeric_literal("0644"), Some(420.0));
  }
}
