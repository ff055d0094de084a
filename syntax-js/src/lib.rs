use ast::func::SkippedBody;
use ast::node::Node;
use ast::stmt::decl::ParamDecl;
use ast::stmt::Stmt;
use ast::stx::TopLevel;
use error::SyntaxError;
use error::SyntaxResult;
use lex::Lexer;
use parse::ParseOptions;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod token;

/// Parses a whole program, aborting on the first syntax error.
pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  parser.parse_top_level()
}

/// The result of a tolerant whole-program parse: a best-effort AST plus
/// every diagnostic discovered along the way.
pub struct ParsedProgram {
  pub top_level: Node<TopLevel>,
  pub errors: Vec<SyntaxError>,
  pub warnings: Vec<SyntaxError>,
  /// Explicit URL from a `//# sourceURL=` directive, if present.
  pub source_url: Option<String>,
}

/// Parses a whole program with statement-level error recovery, collecting
/// every discoverable error instead of aborting at the first.
pub fn parse_program(source: &str, options: ParseOptions) -> ParsedProgram {
  let lexer = Lexer::new(source);
  let mut parser = Parser::with_options(lexer, options);
  let top_level = parser.parse_top_level_with_recovery();
  ParsedProgram {
    top_level,
    errors: parser.take_recovered_errors(),
    warnings: parser.take_warnings(),
    source_url: parser.source_url().map(str::to_string),
  }
}

/// Re-parses one function body previously skipped by a parse with
/// [`ParseOptions::skip_function_bodies`] set. `source` must be the same
/// text the skip points were captured from.
pub fn parse_function_body(
  source: &str,
  skipped: SkippedBody,
  generator: bool,
  options: ParseOptions,
) -> SyntaxResult<Vec<Node<Stmt>>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::with_options(lexer, options);
  parser.reparse_function_body(skipped, generator)
}

/// Parses source consisting of exactly one parenthesised formal parameter
/// list, e.g. `(a, [b, c], d = 1)`.
pub fn parse_formal_params(
  source: &str,
  options: ParseOptions,
) -> SyntaxResult<Vec<Node<ParamDecl>>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::with_options(lexer, options);
  parser.parse_formal_parameters()
}
