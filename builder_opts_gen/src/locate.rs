/* Type locator - find the requested struct type in a parsed file */

use crate::errors::{GenError, GenResult};
use builder_opts_syntax::{FieldGroup, SourceFile, TypeSpec};
use tracing::debug;

/// A located struct declaration and its field list.
#[derive(Debug, Clone, Copy)]
pub struct LocatedStruct<'a> {
  pub spec: &'a TypeSpec,
  pub fields: &'a [FieldGroup],
}

/* First type spec in file order whose name matches and whose shape is a
 * struct. A same-named non-struct type does not match. */
pub fn locate_struct<'a>(file: &'a SourceFile, struct_name: &str) -> GenResult<LocatedStruct<'a>> {
  let located = file.type_specs().find_map(|spec| {
    if spec.name != struct_name {
      return None;
    }
    spec.struct_fields().map(|fields| LocatedStruct { spec, fields })
  });

  match located {
    Some(located) => {
      debug!(
        struct_name,
        field_groups = located.fields.len(),
        "located struct type"
      );
      Ok(located)
    }
    None => Err(GenError::TypeNotFound {
      struct_name: struct_name.to_string(),
    }),
  }
}
