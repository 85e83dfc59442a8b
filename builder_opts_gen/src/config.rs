/* Run configuration - the frozen set of decisions for one generation run */

use crate::errors::ConfigError;
use serde_derive::Deserialize;
use std::collections::BTreeSet;

fn default_true() -> bool {
  true
}

/// Options for generating setters for one struct type.
///
/// Defaults match the command line: the function type is exported, unexported
/// fields are left alone and unsupported fields are skipped.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RunConfig {
  pub struct_type_name: String,
  #[serde(default = "default_true")]
  pub export_fn_type: bool,
  #[serde(default)]
  pub generate_for_unexported_fields: bool,
  #[serde(default = "default_true")]
  pub ignore_unsupported: bool,
  #[serde(default)]
  pub skip_struct_fields: BTreeSet<String>,
}

impl RunConfig {
  pub fn new(struct_type_name: impl Into<String>) -> Self {
    Self {
      struct_type_name: struct_type_name.into(),
      export_fn_type: true,
      generate_for_unexported_fields: false,
      ignore_unsupported: true,
      skip_struct_fields: BTreeSet::new(),
    }
  }

  pub fn with_export_fn_type(mut self, export: bool) -> Self {
    self.export_fn_type = export;
    self
  }

  pub fn with_unexported_fields(mut self, generate: bool) -> Self {
    self.generate_for_unexported_fields = generate;
    self
  }

  pub fn with_ignore_unsupported(mut self, ignore: bool) -> Self {
    self.ignore_unsupported = ignore;
    self
  }

  pub fn with_skipped_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.skip_struct_fields.extend(fields.into_iter().map(Into::into));
    self
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.struct_type_name.trim().is_empty() {
      return Err(ConfigError::EmptyStructTypeName);
    }
    Ok(())
  }
}

/* Split a comma-separated field list, e.g. "A,B, C", dropping empty entries */
pub fn parse_field_list(list: &str) -> Vec<String> {
  list
    .split(',')
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(str::to_string)
    .collect()
}
