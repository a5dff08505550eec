//! Cartridge override path resolution.
//!
//! Computes the ordered directory list used to resolve logical module paths
//! across cartridges, discovers locale directories, and builds the flat
//! alias map consumed by generated bundler configurations.

pub use alias::*;
pub use path_resolver::*;

mod alias;
mod path_resolver;
pub mod template;

/// Locale directory used when a path template is expanded outside of a
/// specific locale, matching the storefront convention of keeping
/// non-localized sources under `default`.
pub const DEFAULT_LOCALE: &str = "default";
