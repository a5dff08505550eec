use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::Cartridge;

/// The active asset-type mode for a build run, selected once per invocation.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
  #[default]
  Js,
  Scss,
}

impl Scope {
  /// Tag used as the leading segment of generated configuration names.
  pub fn tag(&self) -> &'static str {
    match self {
      Scope::Js => "js",
      Scope::Scss => "scss",
    }
  }
}

impl Display for Scope {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.tag())
  }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  #[default]
  Development,
  Production,
}

impl BuildMode {
  pub fn is_production(&self) -> bool {
    matches!(self, BuildMode::Production)
  }
}

impl Display for BuildMode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      BuildMode::Development => write!(f, "development"),
      BuildMode::Production => write!(f, "production"),
    }
  }
}

/// A cartridge paired with the logical alias name it is imported under.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartridgePart {
  pub cartridge: Cartridge,
  pub alias: String,
}

/// Per-scope discovery and layout conventions.
///
/// Path templates may contain `{cartridge}` and `{locale}` tokens which are
/// substituted during entry discovery and alias building.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScopeConfig {
  /// File names treated as main entry points inside a locale directory.
  pub main_files: Vec<String>,

  /// Glob patterns, relative to the input path, adding one entry per match.
  pub root_files: Vec<String>,

  /// Chunk name assigned to main-file entries.
  pub main_entry: String,

  /// Template for a cartridge's source directory.
  pub input_path: String,

  /// Template for a cartridge's build output directory.
  pub output_path: String,

  /// Whether the input path is structured per locale.
  pub use_locales: bool,

  /// Subdirectory appended to locale directories when building aliases.
  pub alias_dir: String,
}

/// Everything a generation pass needs, passed explicitly by reference into
/// each component. There is no module-level configuration lookup.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
  pub scope: Scope,

  #[serde(default)]
  pub mode: BuildMode,

  /// Absolute directory all relative path templates resolve against.
  /// Filled in by the loader, not read from the config file.
  #[serde(default)]
  pub project_root: PathBuf,

  /// Ordered override layers, ascending priority (last wins).
  pub cartridges: Vec<Cartridge>,

  /// Cartridge-to-alias-name pairs, in the same ascending-priority order.
  #[serde(default)]
  pub aliases: Vec<CartridgePart>,

  /// Enables the alternate resolution plugin and its search directory list.
  #[serde(default)]
  pub use_fallback_resolver: bool,

  #[serde(default)]
  pub js: ScopeConfig,

  #[serde(default)]
  pub scss: ScopeConfig,
}

impl ProjectConfig {
  /// The scope configuration for the active asset-type scope.
  pub fn scope_config(&self) -> &ScopeConfig {
    match self.scope {
      Scope::Js => &self.js,
      Scope::Scss => &self.scss,
    }
  }
}
