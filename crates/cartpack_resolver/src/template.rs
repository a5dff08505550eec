//! Path-template expansion.
//!
//! Scope configuration carries directory conventions as templates with
//! `{cartridge}` and `{locale}` tokens, e.g.
//! `cartridges/{cartridge}/cartridge/client/{locale}/js`.

use std::path::PathBuf;

use cartpack_core::types::Cartridge;

const CARTRIDGE_TOKEN: &str = "{cartridge}";
const LOCALE_TOKEN: &str = "{locale}";

/// Expands a path template for a cartridge and locale.
pub fn expand(template: &str, cartridge: &Cartridge, locale: &str) -> PathBuf {
  PathBuf::from(
    template
      .replace(CARTRIDGE_TOKEN, cartridge.name())
      .replace(LOCALE_TOKEN, locale),
  )
}

/// The directory holding a cartridge's locale subdirectories: the template
/// portion before the `{locale}` token. `None` when the template is not
/// locale-structured.
pub fn locale_root(template: &str, cartridge: &Cartridge) -> Option<PathBuf> {
  let prefix = template.split(LOCALE_TOKEN).next()?;
  if prefix == template {
    return None;
  }

  Some(PathBuf::from(
    prefix
      .replace(CARTRIDGE_TOKEN, cartridge.name())
      .trim_end_matches('/'),
  ))
}
