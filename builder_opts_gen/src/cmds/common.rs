/* Common utilities shared between single runs and manifest jobs */

use anyhow::Context;
use builder_opts_gen::{field_report, generate, FieldVerdict, RunConfig, Verdict};
use builder_opts_syntax::parse;
use std::io::Write;
use std::path::Path;

/* How to print the per-field report, if at all */
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FieldReport {
  Off,
  Text,
  Json,
}

/* Read a definition file, generate the setters and write them out */
pub fn generate_file(
  definition_file: &Path,
  out_file: Option<&Path>,
  config: &RunConfig,
  report: FieldReport,
  verbose: bool,
) -> anyhow::Result<()> {
  if verbose {
    eprintln!("[~] Reading {}", definition_file.display());
  }
  let source = std::fs::read_to_string(definition_file)
    .with_context(|| format!("failed to read definition file '{}'", definition_file.display()))?;

  let file = parse(&source)
    .with_context(|| format!("failed to parse definition file '{}'", definition_file.display()))?;
  if report != FieldReport::Off {
    print_field_report(&config.struct_type_name, &field_report(&file, config)?, report)?;
  }

  let setters = generate(&file, config)?;
  let output = setters.render()?;

  match out_file {
    Some(path) => {
      /* Truncates any previous contents */
      std::fs::write(path, &output)
        .with_context(|| format!("failed to write output file '{}'", path.display()))?;
      if verbose {
        eprintln!(
          "[✓] Wrote {} setter(s) for '{}' to {}",
          setters.setter_count(),
          config.struct_type_name,
          path.display()
        );
      }
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout
        .write_all(output.as_bytes())
        .context("failed to write generated code to stdout")?;
      stdout.flush()?;
    }
  }

  Ok(())
}

fn print_field_report(struct_name: &str, verdicts: &[FieldVerdict], report: FieldReport) -> anyhow::Result<()> {
  if report == FieldReport::Json {
    eprintln!("{}", serde_json::to_string_pretty(verdicts)?);
    return Ok(());
  }

  eprintln!("[~] Fields of struct '{}':", struct_name);
  for verdict in verdicts {
    match verdict.verdict {
      Verdict::Generate => eprintln!("  [✓] {} {}", verdict.field, verdict.field_type),
      Verdict::Skip(reason) => eprintln!(
        "  [-] {} {} (skipped: {})",
        verdict.field,
        verdict.field_type,
        reason.describe()
      ),
    }
  }
  Ok(())
}
