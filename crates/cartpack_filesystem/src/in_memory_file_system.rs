use std::collections::HashMap;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::FileSystem;

#[cfg(not(target_os = "windows"))]
fn root_dir() -> PathBuf {
  PathBuf::from("/")
}

#[cfg(target_os = "windows")]
fn root_dir() -> PathBuf {
  PathBuf::from("C:/")
}

/// In memory implementation of a file-system entry
#[derive(Debug)]
enum InMemoryFileSystemEntry {
  File { contents: String },
  Directory,
}

/// In memory implementation of the `FileSystem` trait, for testing purposes.
#[derive(Debug)]
pub struct InMemoryFileSystem {
  files: RwLock<HashMap<PathBuf, InMemoryFileSystemEntry>>,
  current_working_directory: RwLock<PathBuf>,
}

impl Default for InMemoryFileSystem {
  fn default() -> Self {
    Self {
      files: Default::default(),
      current_working_directory: RwLock::new(root_dir()),
    }
  }
}

impl InMemoryFileSystem {
  /// Change the current working directory. Used for resolving relative paths.
  pub fn set_current_working_directory(&self, cwd: &Path) {
    let cwd = self.normalize(cwd);
    let mut state = self.current_working_directory.write();
    *state = cwd;
  }

  /// Write a file, creating every parent directory along the way.
  pub fn write_file(&self, path: &Path, contents: impl Into<String>) {
    let path = self.normalize(path);
    let mut files = self.files.write();

    files.insert(
      path.clone(),
      InMemoryFileSystemEntry::File {
        contents: contents.into(),
      },
    );

    let mut dir = path.parent();
    while let Some(path) = dir {
      files.insert(path.to_path_buf(), InMemoryFileSystemEntry::Directory);
      dir = path.parent();
    }
  }

  /// Resolves `.` and `..` segments and makes the path absolute against the
  /// stored working directory. Does not touch the file map.
  fn normalize(&self, path: &Path) -> PathBuf {
    let path = if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.current_working_directory.read().join(path)
    };

    let mut result = PathBuf::new();
    for component in path.components() {
      match component {
        Component::CurDir => {}
        Component::ParentDir => {
          result.pop();
        }
        other => result.push(other),
      }
    }

    result
  }
}

impl FileSystem for InMemoryFileSystem {
  fn cwd(&self) -> io::Result<PathBuf> {
    Ok(self.current_working_directory.read().clone())
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let path = self.normalize(path);
    let files = self.files.read();
    match files.get(&path) {
      None => Err(io::Error::new(io::ErrorKind::NotFound, "File not found")),
      Some(InMemoryFileSystemEntry::File { contents }) => Ok(contents.clone()),
      Some(InMemoryFileSystemEntry::Directory) => Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "Path is a directory",
      )),
    }
  }

  fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
    let path = self.normalize(path);
    let files = self.files.read();

    if !matches!(files.get(&path), Some(InMemoryFileSystemEntry::Directory)) {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        "Directory not found",
      ));
    }

    let mut entries: Vec<PathBuf> = files
      .keys()
      .filter(|candidate| candidate.parent() == Some(&path))
      .cloned()
      .collect();

    entries.sort();

    Ok(entries)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    let path = self.normalize(path);
    let mut files = self.files.write();

    let mut dir = Some(path.as_path());
    while let Some(path) = dir {
      files.insert(path.to_path_buf(), InMemoryFileSystemEntry::Directory);
      dir = path.parent();
    }

    Ok(())
  }

  fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
    let path = self.normalize(path);
    let mut files = self.files.write();

    if !matches!(files.get(&path), Some(InMemoryFileSystemEntry::Directory)) {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        "Directory not found",
      ));
    }

    files.retain(|candidate, _| !candidate.starts_with(&path));

    Ok(())
  }

  fn is_file(&self, path: &Path) -> bool {
    let path = self.normalize(path);
    let files = self.files.read();
    matches!(files.get(&path), Some(InMemoryFileSystemEntry::File { .. }))
  }

  fn is_dir(&self, path: &Path) -> bool {
    let path = self.normalize(path);
    let files = self.files.read();
    matches!(files.get(&path), Some(InMemoryFileSystemEntry::Directory))
  }
}
