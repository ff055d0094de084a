//! The source and error-manager collaborators of the front-end.
//!
//! [`source::SourceFile`] holds one script's text, its explicit URL (set
//! once by a `sourceURL` directive), and line/column lookup.
//! [`ErrorManager`] collects errors and warnings during a compile attempt
//! and renders each as a `name:line:col` header plus a caret-marked source
//! snippet, so one attempt reports every discoverable error.

pub mod render;
pub mod source;

use source::SourceFile;
use std::fmt::Display;
use std::fmt::Formatter;
use syntax_js::error::ErrorKind;
use syntax_js::error::SyntaxError;
use syntax_js::loc::Loc;

/// Diagnostic severity. Warnings never fail a compile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
  Error,
  Warning,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A render-ready diagnostic with a stable code and byte range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub start: usize,
  pub end: usize,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn error(code: &'static str, message: impl Into<String>, loc: Loc) -> Diagnostic {
    Diagnostic {
      code,
      severity: Severity::Error,
      message: message.into(),
      start: loc.0,
      end: loc.1,
      notes: Vec::new(),
    }
  }

  pub fn warning(code: &'static str, message: impl Into<String>, loc: Loc) -> Diagnostic {
    Diagnostic {
      severity: Severity::Warning,
      ..Diagnostic::error(code, message, loc)
    }
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Diagnostic {
    self.notes.push(note.into());
    self
  }
}

/// Convert a parse error into a diagnostic, preserving its stable code and
/// noting the ECMAScript error class when it isn't a plain SyntaxError.
pub fn diagnostic_from_syntax_error(err: &SyntaxError) -> Diagnostic {
  let mut diagnostic = Diagnostic::error(
    err.typ.code(),
    err.typ.message(err.actual_token),
    err.loc,
  );
  if err.typ.kind() == ErrorKind::Reference {
    diagnostic = diagnostic.with_note("early ReferenceError");
  }
  if let Some(actual) = err.actual_token {
    diagnostic = diagnostic.with_note(format!("found token: {:?}", actual));
  }
  diagnostic
}

/// Collects diagnostics during one compile attempt. Errors beyond the limit
/// are counted but not stored; warnings go through a separate non-fatal
/// channel and are never limited.
pub struct ErrorManager {
  limit: usize,
  errors: Vec<Diagnostic>,
  warnings: Vec<Diagnostic>,
  dropped: usize,
}

pub const DEFAULT_ERROR_LIMIT: usize = 100;

impl ErrorManager {
  pub fn new() -> ErrorManager {
    ErrorManager::with_limit(DEFAULT_ERROR_LIMIT)
  }

  pub fn with_limit(limit: usize) -> ErrorManager {
    ErrorManager {
      limit,
      errors: Vec::new(),
      warnings: Vec::new(),
      dropped: 0,
    }
  }

  pub fn error(&mut self, diagnostic: Diagnostic) {
    if self.errors.len() >= self.limit {
      self.dropped += 1;
      return;
    }
    self.errors.push(diagnostic);
  }

  pub fn warning(&mut self, diagnostic: Diagnostic) {
    self.warnings.push(diagnostic);
  }

  /// Records every error of a tolerant parse.
  pub fn syntax_errors<'e>(&mut self, errors: impl IntoIterator<Item = &'e SyntaxError>) {
    for err in errors {
      self.error(diagnostic_from_syntax_error(err));
    }
  }

  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty() || self.dropped > 0
  }

  pub fn error_count(&self) -> usize {
    self.errors.len() + self.dropped
  }

  pub fn errors(&self) -> &[Diagnostic] {
    &self.errors
  }

  pub fn warnings(&self) -> &[Diagnostic] {
    &self.warnings
  }

  /// Renders every collected diagnostic against the source, errors first.
  pub fn render(&self, source: &SourceFile) -> String {
    let mut out = String::new();
    for d in self.errors.iter().chain(self.warnings.iter()) {
      out.push_str(&render::render_diagnostic(source, d));
    }
    if self.dropped > 0 {
      out.push_str(&format!("... and {} more errors\n", self.dropped));
    }
    out
  }
}

impl Default for ErrorManager {
  fn default() -> Self {
    ErrorManager::new()
  }
}
