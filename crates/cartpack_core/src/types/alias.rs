use std::path::PathBuf;

use indexmap::IndexMap;

/// Mapping from logical import specifier to absolute file-system path.
///
/// Insertion-ordered so that generated configurations are deterministic.
/// Later writes for the same key overwrite earlier ones, which is how
/// higher-priority cartridges win alias collisions.
pub type AliasMap = IndexMap<String, PathBuf>;
