//! Go syntax for generate-builder-opts
//!
//! This crate holds the syntax tree the generator works on, a
//! declaration-level parser that builds it from Go source, and a printer
//! that turns generated declarations back into Go source text. It performs
//! no file I/O.

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use ast::*;
pub use errors::{ParseError, Pos, RenderError};
pub use parser::parse;
pub use printer::{render, render_decls};
