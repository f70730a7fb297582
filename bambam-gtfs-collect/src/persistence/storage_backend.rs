use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::PersistenceError;
use crate::util::fs::create_dirs;

/// where saved GTFS files end up.
pub trait StorageBackend {
    fn exists(&self, path: &Path) -> bool;

    /// write `content` under `path`, creating the parent directories if necessary.
    /// writing the same content to the same path twice leaves the same file.
    fn write(&self, path: &Path, content: &[u8]) -> Result<(), PersistenceError>;
}

/// local disk storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystemStorage;

impl StorageBackend for FileSystemStorage {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            create_dirs(parent)?;
        }
        std::fs::write(path, content).map_err(|e| PersistenceError::WriteFailure {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    write_count: usize,
}

/// storage keeping files in a map, for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    state: Mutex<InMemoryState>,
}

impl InMemoryStorage {
    /// a storage where `paths` already exist as files.
    pub fn with_files<I: IntoIterator<Item = PathBuf>>(paths: I) -> Self {
        let storage = Self::default();
        {
            let mut state = storage.lock();
            for path in paths {
                state.files.insert(path, vec![]);
            }
        }
        storage
    }

    pub fn files(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.lock().files.clone()
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    /// number of `write` calls, including overwrites.
    pub fn write_count(&self) -> usize {
        self.lock().write_count
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for InMemoryStorage {
    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.dirs.extend(parent.ancestors().map(Path::to_path_buf));
        }
        state.files.insert(path.to_path_buf(), content.to_vec());
        state.write_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{FileSystemStorage, InMemoryStorage, StorageBackend};
    use std::path::Path;

    #[test]
    fn test_write_creates_parents_and_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = dir.path().join("static").join("2022").join("19").join("abc");
        let storage = FileSystemStorage;

        assert!(!storage.exists(&target));
        storage.write(&target, b"bundle").unwrap();
        storage.write(&target, b"bundle").unwrap();

        assert!(storage.exists(&target));
        assert_eq!(std::fs::read(&target).unwrap(), b"bundle");
    }

    #[test]
    fn test_in_memory_write_registers_parents() {
        let storage = InMemoryStorage::default();
        let target = Path::new("/data/alert/2022/19/1652638589");
        storage.write(target, b"feed").unwrap();

        assert!(storage.exists(target));
        assert!(storage.has_dir(Path::new("/data/alert/2022/19")));
        assert!(storage.has_dir(Path::new("/data")));
        assert_eq!(storage.write_count(), 1);
    }
}
