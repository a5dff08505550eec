//! Deep-merging of caller overrides into generated configurations.
//!
//! Overrides are partial records: a `name` used for matching plus any
//! subset of the configuration fields. Matching is governed by an explicit
//! [`MatchPolicy`]; merging walks the configuration as JSON so that opaque
//! loader and plugin options merge the same way as the typed fields.

use anyhow::Context;
use cartpack_core::types::ConfigRecord;
use cartpack_core::types::MatchPolicy;
use cartpack_core::types::MergeBehavior;
use cartpack_core::types::MergeStrategy;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A caller-supplied patch for generated configuration records.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PartialConfigRecord {
  /// Matched against generated record names under the active policy.
  pub name: String,

  /// The patched fields, in the record's wire shape.
  #[serde(flatten)]
  pub fields: Map<String, Value>,
}

/// Merges overrides into the generated records, returning a new list.
///
/// For each generated record every matching override applies, in the order
/// supplied, each merge building on the previous result. Overrides matching
/// nothing are silently dropped; callers may ship overrides for asset types
/// not active in the current scope. The input list order is preserved, and
/// a record's `name` is never changed by a merge.
pub fn merge_configs(
  generated: Vec<ConfigRecord>,
  overrides: &[PartialConfigRecord],
  strategy: &MergeStrategy,
  policy: MatchPolicy,
) -> anyhow::Result<Vec<ConfigRecord>> {
  let mut merged = Vec::with_capacity(generated.len());

  for record in generated {
    let name = record.name.clone();
    let mut value = serde_json::to_value(&record)
      .with_context(|| format!("Failed to serialize configuration {name}"))?;

    for partial in overrides {
      if !policy.matches(&name, &partial.name) {
        continue;
      }

      tracing::debug!(record = %name, patch = %partial.name, "applying override");

      value = merge_value(
        value,
        Value::Object(partial.fields.clone()),
        strategy,
        "",
      );
    }

    let mut record: ConfigRecord = serde_json::from_value(value)
      .with_context(|| format!("Override produced an invalid configuration for {name}"))?;
    record.name = name;

    merged.push(record);
  }

  Ok(merged)
}

fn merge_value(base: Value, patch: Value, strategy: &MergeStrategy, path: &str) -> Value {
  match strategy.behavior(path) {
    MergeBehavior::Replace => patch,
    MergeBehavior::Append => match (base, patch) {
      (Value::Array(mut base), Value::Array(patch)) => {
        base.extend(patch);
        Value::Array(base)
      }
      (_, patch) => patch,
    },
    MergeBehavior::Prepend => match (base, patch) {
      (Value::Array(base), Value::Array(mut patch)) => {
        patch.extend(base);
        Value::Array(patch)
      }
      (_, patch) => patch,
    },
    MergeBehavior::Smart => smart_merge(base, patch, strategy, path),
  }
}

fn smart_merge(base: Value, patch: Value, strategy: &MergeStrategy, path: &str) -> Value {
  match (base, patch) {
    (Value::Object(mut base), Value::Object(patch)) => {
      for (key, patch_value) in patch {
        let child_path = if path.is_empty() {
          key.clone()
        } else {
          format!("{path}.{key}")
        };

        let merged = match base.shift_remove(&key) {
          Some(base_value) => merge_value(base_value, patch_value, strategy, &child_path),
          None => patch_value,
        };

        base.insert(key, merged);
      }

      Value::Object(base)
    }
    (Value::Array(mut base), Value::Array(patch)) => {
      base.extend(patch);
      dedupe_plugins(base)
    }
    (_, patch) => patch,
  }
}

/// Concatenated plugin lists keep the first node for each package name.
/// Arrays of anything else are left as-is.
fn dedupe_plugins(items: Vec<Value>) -> Value {
  let mut seen = Vec::new();
  let mut result = Vec::with_capacity(items.len());

  for item in items {
    let package_name = item
      .as_object()
      .and_then(|object| object.get("packageName"))
      .and_then(|name| name.as_str())
      .map(String::from);

    match package_name {
      Some(name) if seen.contains(&name) => continue,
      Some(name) => seen.push(name),
      None => {}
    }

    result.push(item);
  }

  Value::Array(result)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use cartpack_core::types::BuildMode;
  use cartpack_core::types::EntryMap;
  use cartpack_core::types::ModuleOptions;
  use cartpack_core::types::OutputOptions;
  use cartpack_core::types::PluginNode;
  use cartpack_core::types::ResolveOptions;
  use indexmap::indexmap;
  use serde_json::json;

  use super::*;

  fn record(name: &str) -> ConfigRecord {
    ConfigRecord {
      name: String::from(name),
      mode: BuildMode::Development,
      entry: EntryMap::from_iter([(
        String::from("main"),
        vec![PathBuf::from("/project/js/main.js")],
      )]),
      output: OutputOptions {
        path: PathBuf::from("/project/static/js"),
        filename: String::from("[name].js"),
        chunk_filename: None,
      },
      devtool: None,
      module: ModuleOptions::default(),
      resolve: ResolveOptions::default(),
      plugins: vec![PluginNode::new("eslint-webpack-plugin")],
      optimization: None,
      stats: None,
    }
  }

  fn partial(name: &str, fields: Value) -> PartialConfigRecord {
    let Value::Object(fields) = fields else {
      panic!("fixture fields must be an object");
    };

    PartialConfigRecord {
      name: String::from(name),
      fields,
    }
  }

  mod merge_configs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaves_records_untouched_without_overrides() {
      let generated = vec![record("js-app_base")];

      let merged = merge_configs(
        generated.clone(),
        &[],
        &MergeStrategy::default(),
        MatchPolicy::default(),
      )
      .unwrap();

      assert_eq!(merged, generated);
    }

    #[test]
    fn applies_override_only_to_matching_records() {
      let generated = vec![record("scss-app_base"), record("js-app_base")];
      let overrides = vec![partial("scss", json!({ "devtool": "source-map" }))];

      let merged = merge_configs(
        generated,
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::default(),
      )
      .unwrap();

      assert_eq!(merged[0].devtool, Some(String::from("source-map")));
      assert_eq!(merged[1].devtool, None);
    }

    #[test]
    fn merges_opaque_object_fields_recursively() {
      let mut base = record("scss-app_base");
      base.stats = Some(json!({ "chunksSort": "name", "modules": false }));

      let overrides = vec![partial(
        "scss",
        json!({ "stats": { "modules": true, "children": false } }),
      )];

      let merged = merge_configs(
        vec![base],
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::default(),
      )
      .unwrap();

      assert_eq!(
        merged[0].stats,
        Some(json!({ "chunksSort": "name", "modules": true, "children": false }))
      );
    }

    #[test]
    fn replace_strategy_swaps_a_field_wholesale() {
      let mut base = record("scss-app_base");
      base.module.rules = vec![cartpack_core::types::ModuleRule {
        test: String::from("\\.scss$"),
        exclude: Vec::new(),
        use_: vec![cartpack_core::types::LoaderNode::with_options(
          "sass-loader",
          json!({ "sourceMap": true }),
        )],
      }];

      let overrides = vec![partial(
        "scss",
        json!({
          "module": {
            "rules": [{
              "test": "\\.scss$",
              "use": [{
                "loader": "sass-loader",
                "options": { "sassOptions": { "quietDeps": true } },
              }],
            }],
          },
        }),
      )];

      let strategy = MergeStrategy::new(indexmap! {
        String::from("module.rules") => MergeBehavior::Replace,
      });

      let merged = merge_configs(vec![base], &overrides, &strategy, MatchPolicy::default()).unwrap();

      assert_eq!(merged[0].module.rules.len(), 1);
      let options = merged[0].module.rules[0].use_[0].options.as_ref().unwrap();
      assert_eq!(options["sassOptions"]["quietDeps"], json!(true));
    }

    #[test]
    fn multiple_matches_apply_in_supplied_order() {
      let generated = vec![record("js-app_base")];
      let overrides = vec![
        partial("js", json!({ "devtool": "eval" })),
        partial("app_base", json!({ "devtool": "source-map" })),
      ];

      let merged = merge_configs(
        generated,
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::default(),
      )
      .unwrap();

      assert_eq!(merged[0].devtool, Some(String::from("source-map")));
    }

    #[test]
    fn unmatched_overrides_are_silently_dropped() {
      let generated = vec![record("js-app_base")];
      let overrides = vec![partial("scss", json!({ "devtool": "source-map" }))];

      let merged = merge_configs(
        generated.clone(),
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::default(),
      )
      .unwrap();

      assert_eq!(merged, generated);
    }

    #[test]
    fn prefix_policy_rejects_mid_name_matches() {
      let generated = vec![record("js-app_base")];
      let overrides = vec![partial("app_base", json!({ "devtool": "eval" }))];

      let merged = merge_configs(
        generated.clone(),
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::Prefix,
      )
      .unwrap();

      assert_eq!(merged, generated);
    }

    #[test]
    fn merge_is_idempotent_under_replace_strategy() {
      let generated = vec![record("js-app_base")];
      let overrides = vec![partial(
        "js",
        json!({ "plugins": [{ "packageName": "terser-webpack-plugin" }] }),
      )];
      let strategy = MergeStrategy::new(indexmap! {
        String::from("plugins") => MergeBehavior::Replace,
      });

      let once = merge_configs(generated, &overrides, &strategy, MatchPolicy::default()).unwrap();
      let twice = merge_configs(once.clone(), &overrides, &strategy, MatchPolicy::default()).unwrap();

      assert_eq!(once, twice);
    }

    #[test]
    fn plugin_lists_concatenate_and_dedupe_by_package_name() {
      let generated = vec![record("js-app_base")];
      let overrides = vec![partial(
        "js",
        json!({
          "plugins": [
            { "packageName": "eslint-webpack-plugin", "options": { "fix": true } },
            { "packageName": "terser-webpack-plugin" },
          ],
        }),
      )];

      let merged = merge_configs(
        generated,
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::default(),
      )
      .unwrap();

      assert_eq!(
        merged[0].plugins,
        vec![
          PluginNode::new("eslint-webpack-plugin"),
          PluginNode::new("terser-webpack-plugin"),
        ]
      );
    }

    #[test]
    fn override_cannot_rename_a_record() {
      let generated = vec![record("js-app_base")];
      let overrides = vec![partial("js", json!({ "devtool": "eval" }))];

      let merged = merge_configs(
        generated,
        &overrides,
        &MergeStrategy::default(),
        MatchPolicy::default(),
      )
      .unwrap();

      assert_eq!(merged[0].name, "js-app_base");
    }
  }
}
