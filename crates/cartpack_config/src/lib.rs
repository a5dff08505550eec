//! Bundler-configuration generation for layered storefront cartridges.
//!
//! [`generate_configs`] drives the full pipeline: entry discovery per
//! cartridge, configuration assembly for the active asset-type scope, and
//! merging of caller-supplied overrides. Output-directory preparation is a
//! separate, explicitly destructive phase ([`prepare_output_dirs`]) so that
//! generation itself stays pure.

pub mod factory;
pub mod generator;
pub mod merge;
pub mod paths;
pub mod project_config_loader;

pub use factory::build_config;
pub use generator::generate_configs;
pub use generator::prepare_output_dirs;
pub use merge::merge_configs;
pub use merge::PartialConfigRecord;
pub use project_config_loader::ProjectConfigLoader;
