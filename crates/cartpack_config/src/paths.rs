//! Entry-point discovery.
//!
//! Walks a cartridge's client source tree through the [`FileSystem`] trait
//! and produces the entry map and output path for one cartridge under the
//! active scope. An empty entry map is the expected result for cartridges
//! without buildable assets and suppresses configuration generation.

use std::path::Path;
use std::path::PathBuf;

use cartpack_core::types::Cartridge;
use cartpack_core::types::EntryMap;
use cartpack_core::types::ProjectConfig;
use cartpack_filesystem::FileSystem;
use cartpack_resolver::discover_locales;
use cartpack_resolver::template;
use cartpack_resolver::DEFAULT_LOCALE;
use glob_match::glob_match;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
  pub entry_map: EntryMap,
  pub output_path: PathBuf,
}

/// Discovers the entry points of one cartridge for the active scope.
///
/// Main files produce the scope's main entry chunk; root-file glob matches
/// each produce a chunk keyed by their relative path without extension.
/// Chunks from non-default locales are prefixed with the locale name so
/// their output lands in a locale subdirectory.
pub fn scope_paths(cartridge: &Cartridge, config: &ProjectConfig, fs: &dyn FileSystem) -> PathData {
  let scope_config = config.scope_config();

  // A locale-structured scope whose root is missing contributes no
  // locales, and therefore no entries; that is the silent-empty case.
  let locales = match template::locale_root(&scope_config.input_path, cartridge) {
    Some(root) if scope_config.use_locales => {
      discover_locales(&config.project_root.join(root), fs)
    }
    _ => vec![String::from(DEFAULT_LOCALE)],
  };

  let mut entry_map = EntryMap::new();

  for locale in &locales {
    let input_dir = config
      .project_root
      .join(template::expand(&scope_config.input_path, cartridge, locale));

    for main_file in &scope_config.main_files {
      let candidate = input_dir.join(main_file);
      if fs.is_file(&candidate) {
        entry_map
          .entry(chunk_name(&scope_config.main_entry, locale))
          .or_default()
          .push(candidate);
      }
    }

    if scope_config.root_files.is_empty() {
      continue;
    }

    for file in walk_files(&input_dir, fs) {
      let Ok(relative) = file.strip_prefix(&input_dir) else {
        continue;
      };
      let relative = relative.to_string_lossy().replace('\\', "/");

      if scope_config
        .root_files
        .iter()
        .any(|pattern| glob_match(pattern, &relative))
      {
        let stem = relative
          .rsplit_once('.')
          .map(|(stem, _)| stem)
          .unwrap_or(&relative);

        entry_map
          .entry(chunk_name(stem, locale))
          .or_default()
          .push(file);
      }
    }
  }

  let output_path = config.project_root.join(template::expand(
    &scope_config.output_path,
    cartridge,
    DEFAULT_LOCALE,
  ));

  PathData {
    entry_map,
    output_path,
  }
}

fn chunk_name(stem: &str, locale: &str) -> String {
  if locale == DEFAULT_LOCALE {
    stem.to_string()
  } else {
    format!("{}/{}", locale, stem)
  }
}

/// Recursively lists files under `dir`. A missing directory yields nothing.
fn walk_files(dir: &Path, fs: &dyn FileSystem) -> Vec<PathBuf> {
  let Ok(entries) = fs.read_dir(dir) else {
    return Vec::new();
  };

  let mut files = Vec::new();
  for entry in entries {
    if fs.is_dir(&entry) {
      files.extend(walk_files(&entry, fs));
    } else if fs.is_file(&entry) {
      files.push(entry);
    }
  }

  files
}
