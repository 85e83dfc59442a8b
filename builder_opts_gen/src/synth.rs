/* Declaration synthesizer - builds the setter function type and one setter per
 * eligible field as syntax tree nodes
 *
 * For a struct `A` with fields `B string` and `C int` the output is:
 *
 *   type AFieldSetter func(*A)
 *
 *   func SetB(bGen string) AFieldSetter {
 *     return func(aGen *A) {
 *       aGen.B = bGen
 *     }
 *   }
 *
 *   func SetC(cGen int) AFieldSetter { ... }
 */

use crate::classify::EligibleField;
use crate::config::RunConfig;
use crate::errors::{GenError, GenResult};
use crate::locate::LocatedStruct;
use builder_opts_syntax::{
  render_decls, Decl, Expr, FieldGroup, FuncBody, FuncDecl, Signature, Stmt, TypeExpr, TypeSpec,
};
use tracing::info;

/// Declarations generated for one struct, ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedOutput {
  pub package: String,
  /* Function type first, then setters in field order */
  pub decls: Vec<Decl>,
}

impl SynthesizedOutput {
  pub fn render(&self) -> GenResult<String> {
    Ok(render_decls(&self.package, &self.decls)?)
  }

  pub fn setter_count(&self) -> usize {
    self
      .decls
      .iter()
      .filter(|decl| matches!(decl, Decl::Func(_)))
      .count()
  }
}

/* Change the first char only when its case mapping is a single char; `ß`
 * upper-cases to `SS` and is kept as is */
fn map_first<I>(name: &str, map: impl FnOnce(char) -> I) -> String
where
  I: Iterator<Item = char>,
{
  let mut chars = name.chars();
  let Some(first) = chars.next() else {
    return String::new();
  };
  let mut mapped = map(first);
  let first = match (mapped.next(), mapped.next()) {
    (Some(single), None) => single,
    _ => first,
  };
  std::iter::once(first).chain(chars).collect()
}

pub fn upper_first(name: &str) -> String {
  map_first(name, char::to_uppercase)
}

pub fn lower_first(name: &str) -> String {
  map_first(name, char::to_lowercase)
}

/// `AFieldSetter` or `aFieldSetter`, depending on `export`.
pub fn fn_type_name(struct_name: &str, export: bool) -> String {
  let cased = if export {
    upper_first(struct_name)
  } else {
    lower_first(struct_name)
  };
  format!("{}FieldSetter", cased)
}

fn setter_name(field: &str) -> String {
  format!("Set{}", upper_first(field))
}

fn param_name(name: &str) -> String {
  format!("{}Gen", lower_first(name))
}

/* The struct's type parameter names as type arguments, e.g. `[K, V]` */
fn type_args(spec: &TypeSpec) -> Vec<TypeExpr> {
  spec
    .type_params
    .iter()
    .flat_map(|group| group.names.iter())
    .map(|name| TypeExpr::named(name))
    .collect()
}

struct Synthesizer<'a> {
  spec: &'a TypeSpec,
  fn_type: String,
  /* `*A` or `*A[T]` */
  struct_ptr: TypeExpr,
  struct_param: String,
}

impl<'a> Synthesizer<'a> {
  fn new(spec: &'a TypeSpec, config: &RunConfig) -> Self {
    Self {
      spec,
      fn_type: fn_type_name(&spec.name, config.export_fn_type),
      struct_ptr: TypeExpr::pointer(spec.instantiated()),
      struct_param: param_name(&spec.name),
    }
  }

  fn fn_type_ref(&self) -> TypeExpr {
    TypeExpr::Named {
      name: self.fn_type.clone(),
      args: type_args(self.spec),
    }
  }

  fn struct_params(&self) -> Vec<FieldGroup> {
    vec![FieldGroup::new(vec![self.struct_param.clone()], self.struct_ptr.clone())]
  }

  /* type AFieldSetter func(*A) */
  fn fn_type_decl(&self) -> Decl {
    Decl::Type(vec![TypeSpec {
      name: self.fn_type.clone(),
      type_params: self.spec.type_params.clone(),
      alias: false,
      ty: TypeExpr::Func(Signature {
        params: vec![FieldGroup::unnamed(self.struct_ptr.clone())],
        results: Vec::new(),
      }),
    }])
  }

  fn setter_decl(&self, field: &EligibleField<'_>) -> Decl {
    let field_param = param_name(field.name);

    let assign = Stmt::Assign {
      lhs: vec![Expr::Selector {
        base: Box::new(Expr::ident(&self.struct_param)),
        field: field.name.to_string(),
      }],
      rhs: vec![Expr::ident(&field_param)],
    };
    let closure = Expr::FuncLit {
      signature: Signature {
        params: self.struct_params(),
        results: Vec::new(),
      },
      body: vec![assign],
    };

    Decl::Func(FuncDecl {
      recv: None,
      name: setter_name(field.name),
      type_params: self.spec.type_params.clone(),
      signature: Signature {
        params: vec![FieldGroup::new(vec![field_param], field.ty.clone())],
        results: vec![FieldGroup::unnamed(self.fn_type_ref())],
      },
      body: Some(FuncBody::Block(vec![Stmt::Return(vec![closure])])),
    })
  }
}

/// Build the function type and setters for the eligible fields of `located`.
///
/// An empty field list is an error: the function type is never emitted alone.
pub fn synthesize(
  located: &LocatedStruct<'_>,
  eligible: &[EligibleField<'_>],
  config: &RunConfig,
  package: &str,
) -> GenResult<SynthesizedOutput> {
  if eligible.is_empty() {
    return Err(GenError::EmptyResult);
  }

  let synthesizer = Synthesizer::new(located.spec, config);
  let mut decls = Vec::with_capacity(eligible.len() + 1);
  decls.push(synthesizer.fn_type_decl());
  decls.extend(eligible.iter().map(|field| synthesizer.setter_decl(field)));

  info!(
    struct_name = %located.spec.name,
    fn_type = %synthesizer.fn_type,
    setters = eligible.len(),
    "synthesized setters"
  );

  Ok(SynthesizedOutput {
    package: package.to_string(),
    decls,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classify::classify;
  use crate::locate::locate_struct;
  use assert_matches::assert_matches;
  use builder_opts_syntax::parse;

  fn generate(source: &str, config: &RunConfig) -> GenResult<String> {
    let file = parse(source)?;
    let located = locate_struct(&file, &config.struct_type_name)?;
    let classification = classify(located.fields, config)?;
    synthesize(&located, &classification.eligible, config, &file.package)?.render()
  }

  #[test]
  fn casing_helpers_change_only_the_first_char() {
    assert_eq!(upper_first("fooBar"), "FooBar");
    assert_eq!(lower_first("FooBar"), "fooBar");
    assert_eq!(upper_first("élan"), "Élan");
    assert_eq!(upper_first(""), "");
    assert_eq!(lower_first("ID"), "iD");
  }

  #[test]
  fn multi_char_case_mappings_keep_the_first_char() {
    assert_eq!(upper_first("ßeta"), "ßeta");
    assert_eq!(lower_first("İd"), "İd");
    assert_eq!(upper_first("_x"), "_x");
  }

  #[test]
  fn setter_names_only_change_the_first_char() {
    let output = generate(
      "package a\ntype A struct {\n\tßeta int\n\t_x int\n}\n",
      &RunConfig::new("A").with_unexported_fields(true),
    )
    .expect("generate");
    assert!(output.contains("func Setßeta(ßetaGen int) AFieldSetter {\n"));
    assert!(output.contains("func Set_x(_xGen int) AFieldSetter {\n"));
  }

  #[test]
  fn underscore_prefixed_fields_get_setters_by_default() {
    let output = generate("package a\ntype A struct {\n\tB int\n\t_x int\n}\n", &RunConfig::new("A"))
      .expect("generate");
    assert!(output.contains("func SetB(bGen int) AFieldSetter {\n"));
    assert!(output.contains("\t\taGen._x = _xGen\n"));
  }

  #[test]
  fn fn_type_name_follows_export_flag() {
    assert_eq!(fn_type_name("options", true), "OptionsFieldSetter");
    assert_eq!(fn_type_name("Options", false), "optionsFieldSetter");
  }

  #[test]
  fn renders_function_type_and_setters() {
    let output = generate(
      "package a\n\ntype A struct {\n\tB string\n\tc *int\n}\n",
      &RunConfig::new("A").with_unexported_fields(true),
    )
    .expect("generate");
    assert_eq!(
      output,
      "package a\n\
       \n\
       type AFieldSetter func(*A)\n\
       \n\
       func SetB(bGen string) AFieldSetter {\n\
       \treturn func(aGen *A) {\n\
       \t\taGen.B = bGen\n\
       \t}\n\
       }\n\
       \n\
       func SetC(cGen *int) AFieldSetter {\n\
       \treturn func(aGen *A) {\n\
       \t\taGen.c = cGen\n\
       \t}\n\
       }\n"
    );
  }

  #[test]
  fn unexported_function_type_keeps_exported_setters() {
    let output = generate(
      "package a\ntype Opts struct{ Name string }\n",
      &RunConfig::new("Opts").with_export_fn_type(false),
    )
    .expect("generate");
    assert!(output.contains("type optsFieldSetter func(*Opts)\n"));
    assert!(output.contains("func SetName(nameGen string) optsFieldSetter {\n"));
    assert!(output.contains("return func(optsGen *Opts) {\n"));
  }

  #[test]
  fn generic_structs_get_generic_setters() {
    let output = generate(
      "package a\ntype Pair[K comparable, V any] struct {\n\tKey K\n\tValue []V\n}\n",
      &RunConfig::new("Pair"),
    )
    .expect("generate");
    assert!(output.contains("type PairFieldSetter[K comparable, V any] func(*Pair[K, V])\n"));
    assert!(output.contains(
      "func SetValue[K comparable, V any](valueGen []V) PairFieldSetter[K, V] {\n\treturn func(pairGen *Pair[K, V]) {\n"
    ));
  }

  #[test]
  fn setters_keep_exact_field_types() {
    let output = generate(
      "package a\ntype A struct {\n\tF func(int) (string, error)\n\tM map[string][]chan<- int\n}\n",
      &RunConfig::new("A"),
    )
    .expect("generate");
    assert!(output.contains("func SetF(fGen func(int) (string, error)) AFieldSetter {"));
    assert!(output.contains("func SetM(mGen map[string][]chan<- int) AFieldSetter {"));
  }

  #[test]
  fn counts_setters() {
    let file = parse("package a\ntype A struct{ B, C int }\n").expect("parse");
    let config = RunConfig::new("A");
    let located = locate_struct(&file, "A").expect("located");
    let classification = classify(located.fields, &config).expect("classify");
    let output = synthesize(&located, &classification.eligible, &config, "a").expect("synthesize");
    assert_eq!(output.decls.len(), 3);
    assert_eq!(output.setter_count(), 2);
  }

  #[test]
  fn empty_field_list_produces_nothing() {
    let file = parse("package a\ntype A struct{ b int }\n").expect("parse");
    let config = RunConfig::new("A");
    let located = locate_struct(&file, "A").expect("located");
    assert_matches!(synthesize(&located, &[], &config, "a"), Err(GenError::EmptyResult));
  }
}
