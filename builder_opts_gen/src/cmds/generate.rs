/* Generate command - single runs from flags, or every job of a manifest */

use super::common::{generate_file, FieldReport};
use anyhow::Context;
use builder_opts_gen::{Manifest, RunConfig};
use std::path::PathBuf;

/* Execute one run configured from the command line */
pub fn run(
  definition_file: PathBuf,
  out_file: Option<PathBuf>,
  config: RunConfig,
  report: FieldReport,
  verbose: bool,
) -> anyhow::Result<()> {
  config.validate()?;

  if verbose {
    eprintln!("[~] Configuration:");
    eprintln!("  Struct type: {}", config.struct_type_name);
    eprintln!("  Export function type: {}", config.export_fn_type);
    eprintln!("  Unexported fields: {}", config.generate_for_unexported_fields);
    eprintln!("  Ignore unsupported: {}", config.ignore_unsupported);
    if !config.skip_struct_fields.is_empty() {
      eprintln!("  Skipped fields:");
      for field in &config.skip_struct_fields {
        eprintln!("    - {}", field);
      }
    }
    eprintln!();
  }

  generate_file(&definition_file, out_file.as_deref(), &config, report, verbose)
}

/* Execute every job of a manifest in order, stopping at the first failure */
pub fn run_manifest(manifest_path: PathBuf, report: FieldReport, verbose: bool) -> anyhow::Result<()> {
  let manifest = Manifest::load(&manifest_path)?;

  if verbose {
    eprintln!("[~] Loaded {} job(s) from {}", manifest.jobs.len(), manifest_path.display());
  }

  for (index, job) in manifest.jobs.iter().enumerate() {
    generate_file(
      &job.definition_file,
      job.out_file.as_deref(),
      &job.config,
      report,
      verbose,
    )
    .with_context(|| format!("job {} (struct '{}') failed", index, job.config.struct_type_name))?;
  }

  if verbose {
    eprintln!("[✓] Completed {} job(s)", manifest.jobs.len());
  }
  Ok(())
}
