//! Configuration assembly for a single cartridge.

use cartpack_core::types::Cartridge;
use cartpack_core::types::ConfigRecord;
use cartpack_core::types::LoaderNode;
use cartpack_core::types::ModuleOptions;
use cartpack_core::types::ModuleRule;
use cartpack_core::types::OptimizationOptions;
use cartpack_core::types::OutputOptions;
use cartpack_core::types::PluginNode;
use cartpack_core::types::ProjectConfig;
use cartpack_core::types::ResolveOptions;
use cartpack_core::types::Scope;
use cartpack_core::types::SplitChunksOptions;
use cartpack_filesystem::FileSystem;
use cartpack_resolver::build_aliases;
use cartpack_resolver::resolve_cartridge_paths;
use serde_json::json;

use crate::paths::scope_paths;
use crate::paths::PathData;

const CHEAP_SOURCE_MAP: &str = "cheap-module-source-map";

/// Assembles the configuration record for one cartridge under the active
/// scope.
///
/// Returns `None` when entry discovery finds nothing for the pair; that is
/// the expected case for cartridges without buildable assets of the scope's
/// type, not an error. Generation has no file-system side effects; see
/// [`crate::generator::prepare_output_dirs`] for output clearing.
pub fn build_config(
  cartridge: &Cartridge,
  config: &ProjectConfig,
  fs: &dyn FileSystem,
) -> Option<ConfigRecord> {
  let path_data = scope_paths(cartridge, config, fs);

  if path_data.entry_map.is_empty() {
    tracing::debug!(
      cartridge = %cartridge,
      scope = %config.scope,
      "no entry points, skipping configuration"
    );
    return None;
  }

  let record = match config.scope {
    Scope::Js => script_config(cartridge, config, path_data, fs),
    Scope::Scss => stylesheet_config(cartridge, config, path_data, fs),
  };

  tracing::debug!(name = %record.name, "generated configuration");

  Some(record)
}

fn script_config(
  cartridge: &Cartridge,
  config: &ProjectConfig,
  path_data: PathData,
  fs: &dyn FileSystem,
) -> ConfigRecord {
  let fallback_dirs = if config.use_fallback_resolver {
    resolve_cartridge_paths(config, fs).search_paths
  } else {
    Vec::new()
  };

  ConfigRecord {
    name: format!("{}-{}", config.scope.tag(), cartridge),
    mode: config.mode,
    entry: path_data.entry_map,
    output: OutputOptions {
      path: path_data.output_path,
      filename: String::from("[name].js"),
      chunk_filename: Some(String::from("[name].js")),
    },
    devtool: devtool(config),
    module: ModuleOptions {
      rules: vec![ModuleRule {
        test: String::from("\\.js$"),
        exclude: vec![String::from("node_modules")],
        use_: vec![LoaderNode::new("babel-loader")],
      }],
    },
    resolve: ResolveOptions {
      alias: build_aliases(&config.aliases, config.scope_config(), &config.project_root, fs),
      fallback_dirs,
    },
    plugins: vec![PluginNode::new("eslint-webpack-plugin")],
    optimization: Some(OptimizationOptions {
      split_chunks: SplitChunksOptions { min_chunks: 2 },
    }),
    stats: None,
  }
}

fn stylesheet_config(
  cartridge: &Cartridge,
  config: &ProjectConfig,
  path_data: PathData,
  fs: &dyn FileSystem,
) -> ConfigRecord {
  // Stylesheet imports may reach across cartridges, so every cartridge's
  // style root participates in the include path list.
  let include_paths = resolve_cartridge_paths(config, fs).search_paths;

  ConfigRecord {
    name: format!("{}-{}", config.scope.tag(), cartridge),
    mode: config.mode,
    entry: path_data.entry_map,
    output: OutputOptions {
      path: path_data.output_path,
      filename: String::from("[name].js"),
      chunk_filename: None,
    },
    devtool: devtool(config),
    module: ModuleOptions {
      rules: vec![ModuleRule {
        test: String::from("\\.scss$"),
        exclude: Vec::new(),
        use_: vec![
          LoaderNode::new("mini-css-extract-plugin/loader"),
          LoaderNode::with_options(
            "css-loader",
            json!({ "url": false, "sourceMap": true }),
          ),
          LoaderNode::with_options("postcss-loader", json!({ "sourceMap": true })),
          LoaderNode::with_options(
            "sass-loader",
            json!({
              "sourceMap": true,
              "sassOptions": { "includePaths": include_paths },
            }),
          ),
        ],
      }],
    },
    resolve: ResolveOptions {
      alias: build_aliases(&config.aliases, config.scope_config(), &config.project_root, fs),
      fallback_dirs: Vec::new(),
    },
    plugins: vec![
      PluginNode::with_options("webpack-fix-style-only-entries", json!({ "silent": true })),
      PluginNode::with_options("mini-css-extract-plugin", json!({ "filename": "[name].css" })),
      PluginNode::new("stylelint-webpack-plugin"),
    ],
    optimization: None,
    stats: Some(json!({
      "chunksSort": "name",
      "modules": false,
      "children": false,
      "entrypoints": false,
      "chunkOrigins": false,
    })),
  }
}

fn devtool(config: &ProjectConfig) -> Option<String> {
  if config.mode.is_production() {
    None
  } else {
    Some(String::from(CHEAP_SOURCE_MAP))
  }
}
