use std::path::PathBuf;

use crate::collection::ResourceCategory;

use super::PersistenceError;

/// what happened to a batch of files handed to [`super::PersistenceRouter::save_all`].
#[derive(Debug, Default)]
pub struct SaveReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<(ResourceCategory, PersistenceError)>,
    /// previous-week path of a static bundle that was found to exist already
    pub static_duplicate: Option<PathBuf>,
    /// files left unprocessed because saving stopped at a static duplicate
    pub unprocessed: usize,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
