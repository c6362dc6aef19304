/// File system seam used to load shader source text
///
/// Shader source lives at `<prefix>/<name>.vs` and `<prefix>/<name>.fs`.
/// Implementations only need to return whole-file contents.

use std::path::PathBuf;
use rustc_hash::FxHashMap;

/// Source of shader files
pub trait FileSystem {
    /// Read a whole file, or `None` if it does not exist
    fn read_file(&self, path: &str) -> Option<Vec<u8>>;

    /// Release a buffer obtained from [`read_file`](Self::read_file)
    fn free_file(&self, buffer: Vec<u8>) {
        drop(buffer);
    }
}

/// Reads files relative to a root directory on disk
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    root: PathBuf,
}

impl DiskFileSystem {
    /// Create a file system rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl FileSystem for DiskFileSystem {
    fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        std::fs::read(self.root.join(path)).ok()
    }
}

/// In-memory file table, for embedded shaders and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemoryFileSystem {
    /// Create an empty file table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.get(path).cloned()
    }
}

#[cfg(test)]
#[path = "file_system_tests.rs"]
mod tests;
