//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use strata_core::application::ApplicationError;
use strata_core::application::ports::Filesystem;
use strata_core::error::StrataResult;

/// In-memory filesystem for testing.
///
/// Cloning shares the underlying state, so a test can hand one clone to the
/// pipeline and keep another to assert on what was written. The
/// [`MemoryProjectTool`](crate::project_tool::MemoryProjectTool) mirrors its
/// created directories into a shared instance of this type so existence
/// checks behave like they do on disk.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted for stable assertions.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<PathBuf> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Pre-seed a directory, e.g. to simulate a previous partial run.
    pub fn seed_dir(&self, path: &Path) {
        let mut inner = self.inner.write().unwrap();
        insert_with_parents(&mut inner.directories, path);
    }

    /// Pre-seed a file with content.
    pub fn seed_file(&self, path: &Path, content: &str) {
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            insert_with_parents(&mut inner.directories, parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_with_parents(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::AdapterLockError)?;
        insert_with_parents(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::AdapterLockError)?;
        if let Some(parent) = path.parent() {
            insert_with_parents(&mut inner.directories, parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}
