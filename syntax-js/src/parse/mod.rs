use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;

use crate::ast::func::FuncFlags;
use crate::ast::func::FuncKind;
use crate::ast::Ident;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::loc::ResumePoint;
use crate::token::Token;
use crate::token::TT;
use expr::pat::ParsePatternRules;

pub mod drive;
pub mod expr;
pub mod func;
pub mod operator;
pub mod reparse;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

/// Per-parse configuration. Owned by one `Parser`; two concurrent parses
/// never share state through it.
#[derive(Clone, Copy, Default)]
pub struct ParseOptions {
  /// Enables the non-standard grammar: `import a.b.C;`, bean construction
  /// literals, `for each (x in y)`, and conditional multi-catch clauses.
  pub extensions: bool,
  /// Skip the bodies of nested functions, recording resume points instead
  /// of statements. Used when reparsing an already-seen source range on
  /// demand; the caller re-parses individual bodies later.
  pub skip_function_bodies: bool,
}

// Almost every parse_* function takes these values as parameters. Instead of
// enumerating them on every function, we pass this struct around by value;
// the with_* methods create an altered copy for callees, which is how nested
// contexts (e.g. generator bodies) change the rules without unwinding.
#[derive(Clone, Copy)]
pub struct ParseCtx {
  pub rules: ParsePatternRules,
}

impl ParseCtx {
  pub fn with_rules(&self, rules: ParsePatternRules) -> ParseCtx {
    ParseCtx { rules }
  }
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }

  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    Ok(if self.matched { Some(f()?) } else { None })
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
}

struct BufferedToken {
  token: Token,
  lex_mode: LexMode,
}

/// One frame per function currently being parsed. Special-name usages mark
/// frames on this stack; the frame's flags are moved onto the `Func` node
/// when the function finishes.
pub struct FnFrame {
  pub kind: FuncKind,
  pub flags: FuncFlags,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<BufferedToken>,
  next_tok_i: usize,
  options: ParseOptions,
  // Identifier intern table, scoped to this parse job.
  interned: HashSet<Ident>,
  // Function-context stack; the bottom frame is the script itself.
  fn_stack: Vec<FnFrame>,
  // Active label names, innermost last. Reset across function boundaries.
  labels: Vec<Ident>,
  in_function: u32,
  in_iteration: u32,
  in_switch: u32,
  // Nesting count of strict code. Non-zero means current code is strict.
  strict_mode: u32,
  // Short name -> dotted path, populated by `import` extension statements.
  imports: HashMap<Ident, Vec<Ident>>,
  // Errors recovered from (top-level only) and non-fatal warnings.
  recovered_errors: Vec<SyntaxError>,
  warnings: Vec<SyntaxError>,
}

// Methods are spread across the submodules; each extends this one type so
// productions can call each other without imports or free-function plumbing.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser::with_options(lexer, ParseOptions::default())
  }

  pub fn with_options(lexer: Lexer<'a>, options: ParseOptions) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
      options,
      interned: HashSet::new(),
      fn_stack: Vec::new(),
      labels: Vec::new(),
      in_function: 0,
      in_iteration: 0,
      in_switch: 0,
      strict_mode: 0,
      imports: HashMap::new(),
      recovered_errors: Vec::new(),
      warnings: Vec::new(),
    }
  }

  pub fn options(&self) -> ParseOptions {
    self.options
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  /// The explicit URL from the first sourceURL directive comment, if one was
  /// lexed.
  pub fn source_url(&self) -> Option<&'a str> {
    self.lexer.source_url()
  }

  /// Errors that were recovered from during a tolerant top-level parse.
  pub fn take_recovered_errors(&mut self) -> Vec<SyntaxError> {
    std::mem::take(&mut self.recovered_errors)
  }

  /// Non-fatal diagnostics.
  pub fn take_warnings(&mut self) -> Vec<SyntaxError> {
    std::mem::take(&mut self.warnings)
  }

  pub fn warn(&mut self, err: SyntaxError) {
    // Speculative productions (for-header probing, arrow backtracking) can
    // re-parse the same tokens; don't report the same warning twice.
    if self
      .warnings
      .iter()
      .any(|w| w.loc == err.loc && w.typ == err.typ)
    {
      return;
    }
    self.warnings.push(err);
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    self.lexer.text(loc)
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  /// Returns the canonical instance of the given name within this parse
  /// job. Repeated identifiers share one allocation, which also makes any
  /// downstream pointer-equality fast paths effective.
  pub fn intern(&mut self, name: &str) -> Ident {
    match self.interned.get(name) {
      Some(canonical) => canonical.clone(),
      None => {
        let canonical: Ident = Ident::from(name);
        self.interned.insert(canonical.clone());
        canonical
      }
    }
  }

  pub fn intern_loc(&mut self, loc: Loc) -> Ident {
    let raw = self.lexer.text(loc);
    self.intern(raw)
  }

  pub fn is_strict_mode(&self) -> bool {
    self.strict_mode > 0
  }

  pub fn enter_strict(&mut self) {
    self.strict_mode += 1;
  }

  pub fn exit_strict(&mut self) {
    self.strict_mode -= 1;
  }

  /// Captures a serializable resume point for a byte offset.
  pub fn resume_point(&self, offset: usize) -> ResumePoint {
    self.lexer.resume_point_at(offset)
  }

  pub fn register_import(&mut self, path: Vec<Ident>) {
    if let Some(last) = path.last() {
      self.imports.insert(last.clone(), path.clone());
    }
  }

  pub fn is_imported_name(&self, name: &str) -> bool {
    self.imports.contains_key(name)
  }

  // Special-name bookkeeping. `this`, `eval`, `arguments` and `new.target`
  // resolve lexically through arrow functions, so every arrow frame from the
  // innermost outwards is marked, up to and including the nearest non-arrow
  // frame.
  pub fn mark_fn_flag(&mut self, flag: FuncFlags) {
    for frame in self.fn_stack.iter_mut().rev() {
      frame.flags |= flag;
      if frame.kind != FuncKind::Arrow {
        break;
      }
    }
  }

  pub fn push_fn_frame(&mut self, kind: FuncKind) {
    self.fn_stack.push(FnFrame {
      kind,
      flags: FuncFlags::empty(),
    });
  }

  pub fn pop_fn_frame(&mut self) -> FuncFlags {
    // Pushes and pops are strictly paired by the function productions, so a
    // missing frame here is a parser bug, not a user error.
    let frame = self.fn_stack.pop().expect("function frame");
    let mut flags = frame.flags;
    if self.is_strict_mode() {
      flags |= FuncFlags::STRICT;
    }
    flags
  }

  pub fn in_function(&self) -> bool {
    self.in_function > 0
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let start = match self.buf.get(checkpoint.next_tok_i) {
      Some(t) => t.token.loc.0,
      None => self.lexer.next(),
    };
    let end = if self.next_tok_i > checkpoint.next_tok_i {
      self.buf[self.next_tok_i - 1].token.loc.1
    } else {
      start
    };
    Loc(start, end)
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  fn reset_to(&mut self, n: usize) {
    self.next_tok_i = n;
    self.buf.truncate(n);
    match self.buf.last() {
      Some(t) => self.lexer.set_next(t.token.loc.1),
      None => self.lexer.set_next(0),
    };
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, mode: LexMode, keep: K) -> (bool, Token) {
    if self
      .buf
      .get(self.next_tok_i)
      .is_some_and(|t| t.lex_mode != mode)
    {
      // A token at this position was lexed in a different mode; it (and
      // everything after) must be re-lexed.
      self.reset_to(self.next_tok_i);
    }
    debug_assert!(self.buf.len() >= self.next_tok_i);
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer, mode);
      self.buf.push(BufferedToken {
        token,
        lex_mode: mode,
      });
    }
    let t = self.buf[self.next_tok_i].token.clone();
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| true).1
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  /// Consumes the next token regardless of type and returns its raw source
  /// text, interned.
  pub fn consume_as_ident(&mut self) -> Ident {
    let loc = self.consume().loc;
    self.intern_loc(loc)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| false).1
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_n<const N: usize>(&mut self) -> [Token; N] {
    self.peek_n_with_mode([LexMode::Standard; N])
  }

  pub fn peek_n_with_mode<const N: usize>(&mut self, modes: [LexMode; N]) -> [Token; N] {
    let cp = self.checkpoint();
    let tokens = modes.map(|mode| self.forward(mode, |_| true).1);
    self.restore_checkpoint(cp);
    tokens
  }

  pub fn maybe_consume_with_mode(&mut self, typ: TT, mode: LexMode) -> MaybeToken {
    let (matched, t) = self.forward(mode, |t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    self.maybe_consume_with_mode(typ, LexMode::Standard)
  }

  pub fn consume_if_pred<F: FnOnce(&Token) -> bool>(&mut self, pred: F) -> MaybeToken {
    let (matched, t) = self.forward(LexMode::Standard, pred);
    MaybeToken {
      typ: t.typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(mode);
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  /// Advances past the remainder of a malformed statement: to just after the
  /// next `;`, or to just before the next `}`, line break, or EOF. Always
  /// makes progress when the stream isn't already at a hard boundary, so the
  /// top-level recovery loop can't spin.
  pub fn skip_to_statement_boundary(&mut self) {
    let mut consumed = 0usize;
    loop {
      let t = self.peek();
      match t.typ {
        TT::EOF | TT::BraceClose => break,
        TT::Semicolon => {
          self.consume();
          break;
        }
        _ if consumed > 0 && t.preceded_by_line_terminator => break,
        _ => {
          self.consume();
          consumed += 1;
        }
      }
    }
  }
}
