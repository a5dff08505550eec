//! Abstraction of the file system.
//!
//! Cartridge discovery, locale scanning and output preparation all go
//! through the [`FileSystem`] trait so that configuration generation can be
//! exercised against an in-memory file system in tests.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// In-memory file-system for testing
pub mod in_memory_file_system;

/// File-system implementation using std::fs
pub mod os_file_system;

pub use in_memory_file_system::InMemoryFileSystem;
pub use os_file_system::OsFileSystem;

/// FileSystem abstraction instance
///
/// This should be `OsFileSystem` for non-testing environments and
/// `InMemoryFileSystem` for testing.
pub type FileSystemRef = Arc<dyn FileSystem + Send + Sync>;

/// Trait abstracting the file-system operations cartpack performs
#[mockall::automock]
pub trait FileSystem: std::fmt::Debug {
  fn cwd(&self) -> std::io::Result<PathBuf>;

  fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

  /// Lists the immediate children of a directory as absolute paths,
  /// sorted by file name so directory-driven discovery is deterministic.
  fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>>;

  fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

  fn remove_dir_all(&self, path: &Path) -> std::io::Result<()>;

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;
}
