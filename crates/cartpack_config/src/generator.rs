//! The generation pipeline entry point.

use std::path::PathBuf;

use cartpack_core::types::ConfigRecord;
use cartpack_core::types::MatchPolicy;
use cartpack_core::types::MergeStrategy;
use cartpack_core::types::ProjectConfig;
use cartpack_filesystem::FileSystem;
use thiserror::Error;

use crate::factory::build_config;
use crate::merge::merge_configs;
use crate::merge::PartialConfigRecord;

/// Generates the configuration list for one build run.
///
/// Cartridges are visited in list order; pairs without entry points
/// contribute nothing. When overrides are supplied they are merged in
/// afterwards under the given strategy and match policy. The returned list
/// is the caller's to hand to the bundler; nothing on disk has been touched
/// yet.
pub fn generate_configs(
  config: &ProjectConfig,
  overrides: &[PartialConfigRecord],
  strategy: &MergeStrategy,
  policy: MatchPolicy,
  fs: &dyn FileSystem,
) -> anyhow::Result<Vec<ConfigRecord>> {
  let config_list: Vec<ConfigRecord> = config
    .cartridges
    .iter()
    .filter_map(|cartridge| build_config(cartridge, config, fs))
    .collect();

  if config_list.is_empty() {
    // A cartridge list with only the base layer often has nothing
    // buildable for the active scope; warn instead of quietly building
    // nothing.
    tracing::warn!(
      scope = %config.scope,
      "no {} entry points found in any cartridge",
      config.scope
    );
  }

  if overrides.is_empty() {
    return Ok(config_list);
  }

  merge_configs(config_list, overrides, strategy, policy)
}

#[derive(Debug, Error)]
pub enum PrepareError {
  #[error("Failed to clear output directory {}", .path.display())]
  Clear {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to create output directory {}", .path.display())]
  Create {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Clears and recreates each configuration's output directory.
///
/// Destructive and non-transactional: prior build artifacts do not survive,
/// and a failure partway through leaves earlier directories already cleared
/// with no rollback.
pub fn prepare_output_dirs(
  configs: &[ConfigRecord],
  fs: &dyn FileSystem,
) -> Result<(), PrepareError> {
  for record in configs {
    let path = &record.output.path;

    if fs.is_dir(path) {
      tracing::debug!(path = %path.display(), "clearing output directory");
      fs.remove_dir_all(path).map_err(|source| PrepareError::Clear {
        path: path.clone(),
        source,
      })?;
    }

    fs.create_dir_all(path).map_err(|source| PrepareError::Create {
      path: path.clone(),
      source,
    })?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use cartpack_core::types::BuildMode;
  use cartpack_core::types::Cartridge;
  use cartpack_core::types::CartridgePart;
  use cartpack_core::types::Scope;
  use cartpack_core::types::ScopeConfig;
  use cartpack_filesystem::InMemoryFileSystem;
  use serde_json::json;

  use super::*;

  fn project_config(cartridges: &[&str]) -> ProjectConfig {
    ProjectConfig {
      scope: Scope::Js,
      mode: BuildMode::Development,
      project_root: PathBuf::from("/project"),
      cartridges: cartridges.iter().map(|name| Cartridge::from(*name)).collect(),
      aliases: cartridges
        .iter()
        .map(|name| CartridgePart {
          cartridge: Cartridge::from(*name),
          alias: String::from(*name),
        })
        .collect(),
      use_fallback_resolver: false,
      js: ScopeConfig {
        main_files: vec![String::from("main.js")],
        root_files: Vec::new(),
        main_entry: String::from("main"),
        input_path: String::from("cartridges/{cartridge}/cartridge/client/{locale}/js"),
        output_path: String::from("cartridges/{cartridge}/cartridge/static/{locale}/js"),
        use_locales: false,
        alias_dir: String::from("js"),
      },
      scss: ScopeConfig::default(),
    }
  }

  fn write_main(fs: &InMemoryFileSystem, cartridge: &str) {
    fs.write_file(
      &PathBuf::from("/project/cartridges")
        .join(cartridge)
        .join("cartridge/client/default/js/main.js"),
      "",
    );
  }

  mod generate_configs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn emits_one_record_per_cartridge_with_entries() {
      let fs = InMemoryFileSystem::default();
      write_main(&fs, "app_base");
      write_main(&fs, "app_custom");

      let config = project_config(&["app_base", "app_custom", "plugin_bare"]);

      let configs = generate_configs(
        &config,
        &[],
        &MergeStrategy::default(),
        MatchPolicy::default(),
        &fs,
      )
      .unwrap();

      let names: Vec<&str> = configs.iter().map(|record| record.name.as_str()).collect();
      assert_eq!(names, vec!["js-app_base", "js-app_custom"]);
    }

    #[test]
    fn returns_empty_list_when_nothing_is_buildable() {
      let fs = InMemoryFileSystem::default();
      let config = project_config(&["app_base"]);

      let configs = generate_configs(
        &config,
        &[],
        &MergeStrategy::default(),
        MatchPolicy::default(),
        &fs,
      )
      .unwrap();

      assert!(configs.is_empty());
    }

    #[test]
    fn applies_overrides_after_generation() {
      let fs = InMemoryFileSystem::default();
      write_main(&fs, "app_base");

      let config = project_config(&["app_base"]);
      let overrides = vec![PartialConfigRecord {
        name: String::from("js"),
        fields: match json!({ "devtool": "eval" }) {
          serde_json::Value::Object(fields) => fields,
          _ => unreachable!(),
        },
      }];

      let configs = generate_configs(
        &config,
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::default(),
        &fs,
      )
      .unwrap();

      assert_eq!(configs[0].devtool, Some(String::from("eval")));
    }
  }

  mod prepare_output_dirs {
    use super::*;

    #[test]
    fn clears_prior_build_artifacts() {
      let fs = InMemoryFileSystem::default();
      write_main(&fs, "app_base");
      fs.write_file(
        Path::new("/project/cartridges/app_base/cartridge/static/default/js/stale.js"),
        "stale",
      );

      let config = project_config(&["app_base"]);
      let configs = generate_configs(
        &config,
        &[],
        &MergeStrategy::default(),
        MatchPolicy::default(),
        &fs,
      )
      .unwrap();

      prepare_output_dirs(&configs, &fs).unwrap();

      assert!(!fs.is_file(Path::new(
        "/project/cartridges/app_base/cartridge/static/default/js/stale.js"
      )));
      assert!(fs.is_dir(Path::new(
        "/project/cartridges/app_base/cartridge/static/default/js"
      )));
    }

    #[test]
    fn creates_missing_output_directories() {
      let fs = InMemoryFileSystem::default();
      write_main(&fs, "app_base");

      let config = project_config(&["app_base"]);
      let configs = generate_configs(
        &config,
        &[],
        &MergeStrategy::default(),
        MatchPolicy::default(),
        &fs,
      )
      .unwrap();

      prepare_output_dirs(&configs, &fs).unwrap();

      assert!(fs.is_dir(Path::new(
        "/project/cartridges/app_base/cartridge/static/default/js"
      )));
    }
  }
}
