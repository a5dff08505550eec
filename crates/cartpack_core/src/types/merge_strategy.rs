use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Per-field merge behavior for the config merger.
///
/// Keys are field paths as they appear on the wire, e.g. `"module.rules"`
/// or `"resolve.alias"`. Fields without an entry fall back to the smart
/// merge: objects merge key-by-key recursively, arrays append, plugin lists
/// de-duplicate by package name after appending.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergeStrategy {
  inner: IndexMap<String, MergeBehavior>,
}

impl MergeStrategy {
  pub fn new(inner: IndexMap<String, MergeBehavior>) -> Self {
    MergeStrategy { inner }
  }

  pub fn behavior(&self, field_path: &str) -> MergeBehavior {
    self
      .inner
      .get(field_path)
      .copied()
      .unwrap_or(MergeBehavior::Smart)
  }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeBehavior {
  /// Recursive object merge, array append with plugin de-duplication.
  #[default]
  Smart,
  /// The override value wins wholesale.
  Replace,
  /// Override array elements go after the generated ones.
  Append,
  /// Override array elements go before the generated ones.
  Prepend,
}

/// How override records are matched against generated records by name.
///
/// Substring containment is the default so that a short family name like
/// `"scss"` patches every stylesheet record; the stricter prefix form is
/// opt-in.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
  /// Override name must appear anywhere in the generated record's name.
  #[default]
  Substring,
  /// Override name must be a prefix of the generated record's name.
  Prefix,
}

impl MatchPolicy {
  pub fn matches(&self, generated_name: &str, override_name: &str) -> bool {
    match self {
      MatchPolicy::Substring => generated_name.contains(override_name),
      MatchPolicy::Prefix => generated_name.starts_with(override_name),
    }
  }
}
