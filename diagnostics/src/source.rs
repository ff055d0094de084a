use memchr::memchr_iter;
use std::sync::Arc;
use std::sync::OnceLock;

/// One source file: a name, its text, and an optional explicit URL set by a
/// `sourceURL` directive. Offset-to-line/column lookup is backed by a line
/// table built on first use.
#[derive(Debug)]
pub struct SourceFile {
  name: String,
  text: Arc<str>,
  url: OnceLock<String>,
  line_starts: OnceLock<Vec<usize>>,
}

impl SourceFile {
  pub fn new(name: impl Into<String>, text: impl Into<Arc<str>>) -> SourceFile {
    SourceFile {
      name: name.into(),
      text: text.into(),
      url: OnceLock::new(),
      line_starts: OnceLock::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  /// Sets the explicit URL. The first call wins; later calls are ignored,
  /// matching the first-directive-wins contract of `//# sourceURL=`.
  /// Returns whether this call took effect.
  pub fn set_url(&self, url: impl Into<String>) -> bool {
    self.url.set(url.into()).is_ok()
  }

  pub fn url(&self) -> Option<&str> {
    self.url.get().map(String::as_str)
  }

  /// The name diagnostics should display: the explicit URL if one was set,
  /// the file name otherwise.
  pub fn display_name(&self) -> &str {
    self.url().unwrap_or(&self.name)
  }

  fn line_starts(&self) -> &[usize] {
    self.line_starts.get_or_init(|| {
      let mut starts = vec![0];
      starts.extend(memchr_iter(b'\n', self.text.as_bytes()).map(|i| i + 1));
      starts
    })
  }

  pub fn line_count(&self) -> usize {
    self.line_starts().len()
  }

  /// Zero-based line index containing a byte offset.
  pub fn line_index(&self, offset: usize) -> usize {
    let offset = offset.min(self.text.len());
    match self.line_starts().binary_search(&offset) {
      Ok(i) => i,
      Err(i) => i - 1,
    }
  }

  /// The byte bounds of a zero-based line, excluding its terminator.
  pub fn line_bounds(&self, line_index: usize) -> (usize, usize) {
    let starts = self.line_starts();
    let start = *starts.get(line_index).unwrap_or(&self.text.len());
    let end = match starts.get(line_index + 1) {
      Some(next) => next.saturating_sub(1),
      None => self.text.len(),
    };
    (start, end.max(start))
  }

  /// One-based (line, column) of a byte offset.
  pub fn line_col(&self, offset: usize) -> (u32, u32) {
    let line = self.line_index(offset);
    let (start, _) = self.line_bounds(line);
    let offset = offset.min(self.text.len());
    ((line + 1) as u32, (offset - start + 1) as u32)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_and_column_lookup() {
    let src = SourceFile::new("a.js", "ab\ncd\n\nef");
    assert_eq!(src.line_col(0), (1, 1));
    assert_eq!(src.line_col(1), (1, 2));
    assert_eq!(src.line_col(3), (2, 1));
    assert_eq!(src.line_col(6), (3, 1));
    assert_eq!(src.line_col(7), (4, 1));
    assert_eq!(src.line_count(), 4);
  }

  #[test]
  fn line_bounds_exclude_terminators() {
    let src = SourceFile::new("a.js", "ab\ncd");
    assert_eq!(src.line_bounds(0), (0, 2));
    assert_eq!(src.line_bounds(1), (3, 5));
  }

  #[test]
  fn explicit_url_is_set_once() {
    let src = SourceFile::new("a.js", "x");
    assert_eq!(src.display_name(), "a.js");
    assert!(src.set_url("first.js"));
    assert!(!src.set_url("second.js"));
    assert_eq!(src.url(), Some("first.js"));
    assert_eq!(src.display_name(), "first.js");
  }

  #[test]
  fn offsets_past_the_end_clamp() {
    let src = SourceFile::new("a.js", "ab");
    assert_eq!(src.line_col(99), (1, 3));
  }
}
