//! Loads and validates the project configuration file.

use std::path::Path;
use std::path::PathBuf;

use cartpack_core::types::ProjectConfig;
use cartpack_filesystem::FileSystemRef;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "cartpack.config.json5";

#[derive(Debug, Error)]
pub enum ProjectConfigError {
  #[error("Unable to locate {CONFIG_FILE_NAME} from {}", .0.display())]
  NotFound(PathBuf),

  #[error("Failed to read {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse {}: {message}", .path.display())]
  Parse { path: PathBuf, message: String },

  #[error("Missing values for the following settings: {0:?}")]
  Validation(Vec<String>),
}

/// Loads and validates `cartpack.config.json5`.
pub struct ProjectConfigLoader {
  fs: FileSystemRef,
}

impl ProjectConfigLoader {
  pub fn new(fs: FileSystemRef) -> Self {
    ProjectConfigLoader { fs }
  }

  /// Loads the config from `project_root` and resolves path templates
  /// against it.
  pub fn load(&self, project_root: &Path) -> Result<ProjectConfig, ProjectConfigError> {
    let path = project_root.join(CONFIG_FILE_NAME);

    let raw = self.fs.read_to_string(&path).map_err(|source| {
      if source.kind() == std::io::ErrorKind::NotFound {
        ProjectConfigError::NotFound(project_root.to_path_buf())
      } else {
        ProjectConfigError::Read {
          path: path.clone(),
          source,
        }
      }
    })?;

    let mut config: ProjectConfig =
      serde_json5::from_str(&raw).map_err(|error| ProjectConfigError::Parse {
        path: path.clone(),
        message: error.to_string(),
      })?;

    config.project_root = project_root.to_path_buf();

    validate(&config)?;

    Ok(config)
  }

  /// Finds the nearest ancestor directory of the current working directory
  /// containing a config file, then loads it.
  pub fn load_from_cwd(&self) -> Result<ProjectConfig, ProjectConfigError> {
    let cwd = self.fs.cwd().map_err(|source| ProjectConfigError::Read {
      path: PathBuf::from("."),
      source,
    })?;

    let mut dir = cwd.clone();
    loop {
      if self.fs.is_file(&dir.join(CONFIG_FILE_NAME)) {
        return self.load(&dir);
      }

      if !dir.pop() {
        return Err(ProjectConfigError::NotFound(cwd));
      }
    }
  }
}

fn validate(config: &ProjectConfig) -> Result<(), ProjectConfigError> {
  let mut missing = Vec::new();

  if config.cartridges.is_empty() {
    missing.push(String::from("cartridges"));
  }

  let scope_config = config.scope_config();

  if scope_config.input_path.is_empty() {
    missing.push(String::from("inputPath"));
  }

  if scope_config.output_path.is_empty() {
    missing.push(String::from("outputPath"));
  }

  if scope_config.main_files.is_empty() && scope_config.root_files.is_empty() {
    missing.push(String::from("mainFiles"));
  }

  if !missing.is_empty() {
    return Err(ProjectConfigError::Validation(missing));
  }

  Ok(())
}
