use std::path::PathBuf;

use indexmap::IndexMap;

/// Mapping from output-chunk name to the source files that produce it.
///
/// An empty map means the cartridge has no buildable assets for the active
/// scope and no configuration record is generated for it.
pub type EntryMap = IndexMap<String, Vec<PathBuf>>;
