//! Functional-option setter generation for Go struct types.
//!
//! Given a Go file and a struct name, [`run`] produces a file declaring a
//! `<Struct>FieldSetter` function type and one `Set<Field>` constructor per
//! eligible field.

pub mod classify;
pub mod config;
pub mod errors;
pub mod locate;
pub mod manifest;
pub mod pipeline;
pub mod synth;

pub use classify::{Classification, EligibleField, FieldVerdict, SkipReason, Verdict};
pub use config::RunConfig;
pub use errors::{ConfigError, GenError, GenResult, UnsupportedField};
pub use manifest::{Job, Manifest, ManifestError};
pub use pipeline::{field_report, generate, run};
pub use synth::SynthesizedOutput;
