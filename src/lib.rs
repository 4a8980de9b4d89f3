//! Core library for the cflat tree-walking interpreter.
//!
//! This library provides the components of the cflat language pipeline:
//! lexical analysis, parsing, lexical-scope resolution, and tree-walking
//! evaluation.
//!
//! # Modules
//!
//! - [`token`] - Token types and source location tracking
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`parser`] - Recursive descent parser
//! - [`resolver`] - Lexical scope-depth resolution pass
//! - [`value`] - The runtime value domain and coercions
//! - [`evaluator`] - Tree-walking evaluation
//! - [`driver`] - Pipeline orchestration and import splicing
//! - [`diagnostics`] - Stderr diagnostic formatting
//!
//! # Example
//!
//! ```ignore
//! use cflat::lexer::Lexer;
//! use cflat::parser::Parser;
//! use cflat::resolver::Resolver;
//! use cflat::evaluator::Evaluator;
//! use std::rc::Rc;
//!
//! let source = r#"void main() { print("Hello, World!"); } main();"#;
//! let file: Rc<str> = Rc::from("main.cflat");
//!
//! let (tokens, lex_errors) = Lexer::new(source, Rc::clone(&file)).tokenize();
//! assert!(lex_errors.is_empty());
//!
//! let (program, parse_errors, _) = Parser::new(tokens).parse();
//! assert!(parse_errors.is_empty());
//!
//! let (locals, resolver_errors) = Resolver::new().resolve(&program);
//! assert!(resolver_errors.is_empty());
//!
//! let mut evaluator = Evaluator::new(locals);
//! evaluator.run(&program).expect("runtime error");
//! ```

pub mod ast;
pub mod diagnostics;
pub mod driver;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod token;
pub mod value;
