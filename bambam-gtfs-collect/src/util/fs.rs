use std::path::Path;

use crate::persistence::PersistenceError;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), PersistenceError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        std::fs::create_dir_all(dirspath).map_err(|e| PersistenceError::CreateDirFailure {
            path: dirspath.to_path_buf(),
            message: e.to_string(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::create_dirs;
    use crate::persistence::PersistenceError;

    #[test]
    fn test_create_dirs_on_existing_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        create_dirs(dir.path()).unwrap();
        create_dirs(dir.path().join("a/b")).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_create_dirs_below_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("feed.pb");
        std::fs::write(&file, b"feed").unwrap();
        let result = create_dirs(file.join("2022"));
        assert!(matches!(result, Err(PersistenceError::CreateDirFailure { .. })));
    }
}
