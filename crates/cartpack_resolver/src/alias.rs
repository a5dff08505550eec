use std::path::Path;

use cartpack_core::types::AliasMap;
use cartpack_core::types::CartridgePart;
use cartpack_core::types::ScopeConfig;
use cartpack_filesystem::FileSystem;

use crate::path_resolver::discover_locales;
use crate::template;
use crate::DEFAULT_LOCALE;

/// Builds the flat alias map for one generation pass.
///
/// `cartridge_parts` must be supplied in ascending priority order: each
/// part's aliases are merged over the accumulated map, so the last cartridge
/// wins on key collision. Nothing is ever removed, only overwritten.
///
/// Per part, when the scope is locale-structured, one alias is registered
/// per discovered locale (`<alias>/<locale>` pointing at
/// `<locale root>/<locale>/<alias dir>`), followed by the base alias
/// (`<alias>` pointing at the part's expanded input path). All values are
/// absolute, resolved against `project_root`.
pub fn build_aliases(
  cartridge_parts: &[CartridgePart],
  scope_config: &ScopeConfig,
  project_root: &Path,
  fs: &dyn FileSystem,
) -> AliasMap {
  let mut alias_map = AliasMap::new();

  for part in cartridge_parts {
    if scope_config.use_locales {
      if let Some(locale_root) = template::locale_root(&scope_config.input_path, &part.cartridge) {
        let locale_root = project_root.join(locale_root);

        for locale in discover_locales(&locale_root, fs) {
          alias_map.insert(
            format!("{}/{}", part.alias, locale),
            locale_root.join(&locale).join(&scope_config.alias_dir),
          );
        }
      }
    }

    alias_map.insert(
      part.alias.clone(),
      project_root.join(template::expand(
        &scope_config.input_path,
        &part.cartridge,
        DEFAULT_LOCALE,
      )),
    );
  }

  alias_map
}
