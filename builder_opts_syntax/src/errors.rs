use std::fmt;
use thiserror::Error;

/// 1-based line and column of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The source text is not a syntactically valid Go file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{pos}: {message}")]
pub struct ParseError {
    pub pos: Pos,
    pub message: String,
}

impl ParseError {
    pub fn new(pos: Pos, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

/// Errors produced while printing a syntax tree back to Go source.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The file has no package clause to print.
    #[error("missing package name")]
    MissingPackage,

    /// An identifier in the tree is empty.
    #[error("empty identifier in {context}")]
    EmptyIdent { context: &'static str },

    /// A function body or initialiser was skipped by the parser, so there is nothing to print.
    #[error("declaration of '{name}' contains code that was not parsed")]
    Unparsed { name: String },

    #[error("formatting failed: {0}")]
    Fmt(#[from] fmt::Error),
}

pub type ParseResult<T> = Result<T, ParseError>;
