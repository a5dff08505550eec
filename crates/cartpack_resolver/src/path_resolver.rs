use std::path::Path;
use std::path::PathBuf;

use cartpack_core::types::ProjectConfig;
use cartpack_filesystem::FileSystem;
use itertools::Itertools;

use crate::template;
use crate::DEFAULT_LOCALE;

/// The override search layout for one generation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartridgePathData {
  /// Candidate directories in cartridge-list order (ascending priority).
  /// Consumers must apply a consistent match rule; the alternate resolution
  /// plugin prefers the last match.
  pub search_paths: Vec<PathBuf>,

  /// Locale identifiers discovered under the scope's locale roots, in
  /// first-seen order. Empty when the scope is not locale-structured.
  pub locale_dirs: Vec<String>,
}

/// Computes the ordered override search paths and locale directories for
/// the active scope.
///
/// A cartridge that has no source directory for the scope is skipped
/// without error; a missing locale root contributes no locales.
pub fn resolve_cartridge_paths(config: &ProjectConfig, fs: &dyn FileSystem) -> CartridgePathData {
  let scope_config = config.scope_config();

  let mut search_paths = Vec::new();
  for cartridge in &config.cartridges {
    let dir = config.project_root.join(template::expand(
      &scope_config.input_path,
      cartridge,
      DEFAULT_LOCALE,
    ));

    if fs.is_dir(&dir) {
      search_paths.push(dir);
    } else {
      tracing::debug!(cartridge = %cartridge, "no {} sources, skipping search path", config.scope);
    }
  }

  let locale_dirs = if scope_config.use_locales {
    config
      .cartridges
      .iter()
      .filter_map(|cartridge| template::locale_root(&scope_config.input_path, cartridge))
      .flat_map(|root| discover_locales(&config.project_root.join(root), fs))
      .unique()
      .collect()
  } else {
    Vec::new()
  };

  CartridgePathData {
    search_paths,
    locale_dirs,
  }
}

/// Lists the immediate subdirectories of a locale root.
///
/// A missing or unreadable root yields an empty list; a directory scan for
/// an optional locale root is never an error.
pub fn discover_locales(locale_root: &Path, fs: &dyn FileSystem) -> Vec<String> {
  let Ok(entries) = fs.read_dir(locale_root) else {
    return Vec::new();
  };

  entries
    .into_iter()
    .filter(|entry| fs.is_dir(entry))
    .filter_map(|entry| {
      entry
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
    })
    .collect()
}
