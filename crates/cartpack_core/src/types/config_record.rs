use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::AliasMap;
use super::BuildMode;
use super::EntryMap;

/// One generated bundler configuration, shaped to satisfy the external
/// bundler's configuration schema.
///
/// Created by the config factory, optionally patched by the merger, then
/// handed off to the bundler as-is. `name` doubles as the merge key and is
/// unique per (asset-type, cartridge) pair within a generation pass.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
  pub name: String,
  pub mode: BuildMode,
  pub entry: EntryMap,
  pub output: OutputOptions,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub devtool: Option<String>,
  pub module: ModuleOptions,
  pub resolve: ResolveOptions,
  pub plugins: Vec<PluginNode>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub optimization: Option<OptimizationOptions>,
  /// Opaque output-verbosity tuning, passed through to the bundler.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stats: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
  pub path: PathBuf,
  pub filename: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub chunk_filename: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOptions {
  pub rules: Vec<ModuleRule>,
}

/// A processing-chain declaration for files matching `test`.
///
/// Loader options are opaque third-party configuration and carried as raw
/// JSON values.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
  pub test: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclude: Vec<String>,
  #[serde(rename = "use")]
  pub use_: Vec<LoaderNode>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderNode {
  pub loader: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options: Option<serde_json::Value>,
}

impl LoaderNode {
  pub fn new(loader: impl Into<String>) -> Self {
    LoaderNode {
      loader: loader.into(),
      options: None,
    }
  }

  pub fn with_options(loader: impl Into<String>, options: serde_json::Value) -> Self {
    LoaderNode {
      loader: loader.into(),
      options: Some(options),
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginNode {
  pub package_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options: Option<serde_json::Value>,
}

impl PluginNode {
  pub fn new(package_name: impl Into<String>) -> Self {
    PluginNode {
      package_name: package_name.into(),
      options: None,
    }
  }

  pub fn with_options(package_name: impl Into<String>, options: serde_json::Value) -> Self {
    PluginNode {
      package_name: package_name.into(),
      options: Some(options),
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
  pub alias: AliasMap,
  /// Ordered cartridge directories consulted by the alternate resolution
  /// plugin when a specifier misses the alias map. Empty when that plugin
  /// is disabled.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub fallback_dirs: Vec<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOptions {
  pub split_chunks: SplitChunksOptions,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksOptions {
  pub min_chunks: u32,
}
