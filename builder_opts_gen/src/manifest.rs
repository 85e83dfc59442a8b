/* Job manifest - several generation runs described in one YAML file
 *
 *   jobs:
 *     - definition-file: options.go
 *       out-file: options_setters.go
 *       struct-type-name: Options
 *       skip-struct-fields: [logger]
 *
 * Relative paths are resolved against the manifest's own directory. */

use crate::config::RunConfig;
use crate::errors::ConfigError;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest '{}'", path.display())]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("invalid manifest: {0}")]
  Yaml(#[from] serde_yml::Error),

  #[error("job {index}: {source}")]
  InvalidJob { index: usize, source: ConfigError },

  #[error("manifest contains no jobs")]
  NoJobs,
}

/// One generation run: where to read, where to write and what to generate.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
  pub definition_file: PathBuf,
  /* stdout when absent */
  #[serde(default)]
  pub out_file: Option<PathBuf>,
  #[serde(flatten)]
  pub config: RunConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
  pub jobs: Vec<Job>,
}

impl Manifest {
  /// Parse a manifest and check each job's configuration. Paths are left as
  /// written.
  pub fn from_yaml(content: &str) -> Result<Self, ManifestError> {
    let manifest: Manifest = serde_yml::from_str(content)?;
    if manifest.jobs.is_empty() {
      return Err(ManifestError::NoJobs);
    }
    for (index, job) in manifest.jobs.iter().enumerate() {
      job
        .config
        .validate()
        .map_err(|source| ManifestError::InvalidJob { index, source })?;
    }
    Ok(manifest)
  }

  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let mut manifest = Self::from_yaml(&content)?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for job in &mut manifest.jobs {
      job.definition_file = base.join(&job.definition_file);
      if let Some(out_file) = &job.out_file {
        job.out_file = Some(base.join(out_file));
      }
    }

    debug!(path = %path.display(), jobs = manifest.jobs.len(), "loaded manifest");
    Ok(manifest)
  }
}
