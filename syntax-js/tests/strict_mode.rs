use syntax_js::error::SyntaxErrorType;
use syntax_js::parse;

#[test]
fn legacy_octal_literals() {
  assert!(parse("var a = 0644;").is_ok());
  let err = parse("'use strict';\nvar a = 0644;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LegacyOctalInStrictMode);
}

#[test]
fn with_statement() {
  assert!(parse("with (o) { a; }").is_ok());
  let err = parse("'use strict';\nwith (o) { a; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::WithInStrictMode);
}

#[test]
fn eval_and_arguments_as_binding_names() {
  assert!(parse("var eval = 1;").is_ok());
  let err = parse("'use strict';\nvar eval = 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictModeBindingName);
  let err = parse("'use strict';\nfunction f(arguments) {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictModeBindingName);
}

#[test]
fn duplicate_parameter_names() {
  assert!(parse("function f(a, a) {}").is_ok());
  let err = parse("'use strict';\nfunction f(a, a) {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::DuplicateParameterName);
}

#[test]
fn function_level_directive() {
  // The directive inside the function strictens only that function.
  let err = parse("function f(a, a) { 'use strict'; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::DuplicateParameterName);
  assert!(parse("function f(a, a) {} function g(b) { 'use strict'; }").is_ok());
}

#[test]
fn future_reserved_words() {
  assert!(parse("var interface = 1;").is_ok());
  let err = parse("'use strict';\nvar interface = 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ReservedWordAsIdentifier);
}

#[test]
fn directive_must_be_a_whole_statement() {
  // A string expression with a continuation is not a directive.
  assert!(parse("'use strict' + x;\nvar a = 0644;").is_ok());
}

#[test]
fn strictness_nests_into_functions() {
  let err = parse("'use strict';\nfunction f() { var eval = 1; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictModeBindingName);
}
