use builder_opts_syntax::{ParseError, RenderError};
use thiserror::Error;

/// Result alias used across the generator.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that end a generation run. None of them are recoverable: each is a
/// pure function of the input text and the run configuration.
#[derive(Debug, Error)]
pub enum GenError {
    /// The definition file is not valid Go.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No struct-shaped type declaration has the requested name.
    #[error("could not find struct type '{struct_name}' in definition file")]
    TypeNotFound { struct_name: String },

    /// An embedded or imported-type field was found while unsupported fields are fatal.
    #[error(transparent)]
    UnsupportedField(#[from] UnsupportedField),

    /// Every field was filtered out, leaving nothing to generate.
    #[error("no fields in struct (aside from ignored errors)")]
    EmptyResult,

    /// The generated declarations could not be printed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Which rule rejected a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedField {
    #[error("embedded fields disallowed (found embedded '{type_name}')")]
    Embedded { type_name: String },

    #[error("cannot generate for fields whose type is imported (field '{field}' has type '{type_name}')")]
    Imported { field: String, type_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("struct type name must not be empty")]
    EmptyStructTypeName,
}
