use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

/// An override layer of the storefront codebase.
///
/// Cartridges are carried in an ordered list where the array index is the
/// priority: a cartridge appearing later can supply files that take
/// precedence over earlier ones at the same logical path.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cartridge(String);

impl Cartridge {
  pub fn new(name: impl Into<String>) -> Self {
    Cartridge(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

impl From<&str> for Cartridge {
  fn from(name: &str) -> Self {
    Cartridge(name.to_string())
  }
}

impl Display for Cartridge {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}
