/* Field classifier - decide per struct field whether a setter is generated
 *
 * Rules per field group, in order:
 *   1. embedded groups are skipped, or rejected if unsupported fields are fatal
 *   2. groups whose type mentions a qualified name are skipped or rejected the same way
 * then per name in the group:
 *   3. names in the skip set are skipped
 *   4. the blank identifier is skipped
 *   5. names starting with a lower-case letter are skipped unless configured otherwise
 *   6. everything else gets a setter
 */

use crate::config::RunConfig;
use crate::errors::{GenError, GenResult, UnsupportedField};
use builder_opts_syntax::{is_exported, FieldGroup, TypeExpr};
use serde_derive::Serialize;
use tracing::debug;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
  Embedded,
  Imported,
  Listed,
  Blank,
  Unexported,
}

impl SkipReason {
  pub fn describe(self) -> &'static str {
    match self {
      SkipReason::Embedded => "embedded field",
      SkipReason::Imported => "type is imported",
      SkipReason::Listed => "listed in skip set",
      SkipReason::Blank => "blank identifier",
      SkipReason::Unexported => "unexported field",
    }
  }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", tag = "verdict", content = "reason")]
pub enum Verdict {
  Generate,
  Skip(SkipReason),
}

/// Outcome for one field; embedded groups are reported under their type.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FieldVerdict {
  pub field: String,
  pub field_type: String,
  #[serde(flatten)]
  pub verdict: Verdict,
}

/// A field that gets a setter, borrowed from the parsed struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibleField<'a> {
  pub name: &'a str,
  pub ty: &'a TypeExpr,
}

#[derive(Debug, Clone, Default)]
pub struct Classification<'a> {
  /* In declaration order, then name order within a group */
  pub eligible: Vec<EligibleField<'a>>,
  pub verdicts: Vec<FieldVerdict>,
}

impl<'a> Classification<'a> {
  fn record(&mut self, field: &str, ty: &TypeExpr, verdict: Verdict) {
    debug!(field, ?verdict, "classified field");
    self.verdicts.push(FieldVerdict {
      field: field.to_string(),
      field_type: ty.to_string(),
      verdict,
    });
  }

  fn skip_group(&mut self, group: &FieldGroup, reason: SkipReason) {
    if group.is_embedded() {
      self.record(&group.ty.to_string(), &group.ty, Verdict::Skip(reason));
    }
    for name in &group.names {
      self.record(name, &group.ty, Verdict::Skip(reason));
    }
  }
}

/// Classify every field without applying the "nothing to generate" check.
/// Rejections still abort.
pub fn classify_fields<'a>(fields: &'a [FieldGroup], config: &RunConfig) -> GenResult<Classification<'a>> {
  let mut classification = Classification::default();

  for group in fields {
    if group.is_embedded() {
      if !config.ignore_unsupported {
        return Err(
          UnsupportedField::Embedded {
            type_name: group.ty.to_string(),
          }
          .into(),
        );
      }
      classification.skip_group(group, SkipReason::Embedded);
      continue;
    }

    if group.ty.references_imported_package() {
      if !config.ignore_unsupported {
        return Err(
          UnsupportedField::Imported {
            field: group.names.join(", "),
            type_name: group.ty.to_string(),
          }
          .into(),
        );
      }
      classification.skip_group(group, SkipReason::Imported);
      continue;
    }

    for name in &group.names {
      let verdict = if config.skip_struct_fields.contains(name) {
        Verdict::Skip(SkipReason::Listed)
      } else if name == "_" {
        Verdict::Skip(SkipReason::Blank)
      } else if !is_exported(name) && !config.generate_for_unexported_fields {
        Verdict::Skip(SkipReason::Unexported)
      } else {
        Verdict::Generate
      };

      if verdict == Verdict::Generate {
        classification.eligible.push(EligibleField { name, ty: &group.ty });
      }
      classification.record(name, &group.ty, verdict);
    }
  }

  Ok(classification)
}

/// Classify the fields of a struct, failing if none of them gets a setter.
pub fn classify<'a>(fields: &'a [FieldGroup], config: &RunConfig) -> GenResult<Classification<'a>> {
  let classification = classify_fields(fields, config)?;
  if classification.eligible.is_empty() {
    return Err(GenError::EmptyResult);
  }
  Ok(classification)
}
