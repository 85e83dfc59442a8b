/* Generation pipeline: locate -> classify -> synthesize -> render
 *
 * Every stage is a pure function of the parsed file and the run config. File
 * reading and writing belong to the callers. */

use crate::classify::{classify, classify_fields, FieldVerdict};
use crate::config::RunConfig;
use crate::errors::GenResult;
use crate::locate::locate_struct;
use crate::synth::{synthesize, SynthesizedOutput};
use builder_opts_syntax::{parse, SourceFile};
use tracing::debug;

/// Build the setter declarations for `config.struct_type_name` in `file`.
pub fn generate(file: &SourceFile, config: &RunConfig) -> GenResult<SynthesizedOutput> {
  let located = locate_struct(file, &config.struct_type_name)?;
  let classification = classify(located.fields, config)?;
  debug!(
    eligible = classification.eligible.len(),
    fields = classification.verdicts.len(),
    "classified struct fields"
  );
  synthesize(&located, &classification.eligible, config, &file.package)
}

/// Parse `source` and return the generated file text.
pub fn run(source: &str, config: &RunConfig) -> GenResult<String> {
  let file = parse(source)?;
  debug!(package = %file.package, decls = file.decls.len(), "parsed definition file");
  generate(&file, config)?.render()
}

/// Per-field verdicts for the configured struct. Unsupported fields still
/// abort when they are fatal, but an empty result is reported rather than
/// treated as an error.
pub fn field_report(file: &SourceFile, config: &RunConfig) -> GenResult<Vec<FieldVerdict>> {
  let located = locate_struct(file, &config.struct_type_name)?;
  Ok(classify_fields(located.fields, config)?.verdicts)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classify::{SkipReason, Verdict};
  use crate::errors::GenError;
  use assert_matches::assert_matches;

  const SCENARIO: &str = "package a\n\ntype A struct {\n\tB string\n\tC int\n\tD bool\n\te float32\n\tF interface{}\n}\n";

  #[test]
  fn run_is_deterministic() {
    let config = RunConfig::new("A");
    let first = run(SCENARIO, &config).expect("run");
    let second = run(SCENARIO, &config).expect("run");
    assert_eq!(first, second);
  }

  #[test]
  fn parse_errors_pass_through() {
    assert_matches!(run("package a\ntype A struct {", &RunConfig::new("A")), Err(GenError::Parse(_)));
  }

  #[test]
  fn array_declarations_do_not_break_parsing() {
    let sources = [
      "package a\n\nconst K = 4\n\ntype Buf [K + 1]byte\n\ntype A struct {\n\tB int\n}\n",
      "package a\n\nimport \"crypto/sha256\"\n\ntype Sum [sha256.Size]byte\n\ntype A struct {\n\tB int\n}\n",
      "package a\n\ntype Box[T any] struct{ v T }\n\ntype A struct {\n\tB int\n}\n",
    ];
    for source in sources {
      let output = run(source, &RunConfig::new("A")).expect("run");
      assert!(output.contains("func SetB(bGen int) AFieldSetter {\n"), "source {:?}", source);
    }
  }

  #[test]
  fn report_lists_every_field() {
    let file = parse(SCENARIO).expect("parse");
    let report = field_report(&file, &RunConfig::new("A")).expect("report");
    assert_eq!(report.len(), 5);
    assert_eq!(report[3].field, "e");
    assert_eq!(report[3].verdict, Verdict::Skip(SkipReason::Unexported));
  }

  #[test]
  fn report_does_not_fail_on_empty_result() {
    let file = parse(SCENARIO).expect("parse");
    let config = RunConfig::new("A").with_skipped_fields(["B", "C", "D", "F"]);
    let report = field_report(&file, &config).expect("report");
    assert!(report.iter().all(|field| field.verdict != Verdict::Generate));
    assert_matches!(generate(&file, &config), Err(GenError::EmptyResult));
  }
}
