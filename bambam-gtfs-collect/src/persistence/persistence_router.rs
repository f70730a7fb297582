use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{realtime_target, static_targets, DuplicateStaticPolicy, SaveReport, StorageBackend};
use crate::collection::{FetchedResource, ResourceCategory};
use crate::util::time_source::SystemTimeSource;

/// assigns every fetched GTFS file a path below `data_root` and writes it to storage.
pub struct PersistenceRouter<S> {
    data_root: PathBuf,
    storage: S,
    time_source: Arc<dyn SystemTimeSource>,
    duplicate_static_policy: DuplicateStaticPolicy,
}

impl<S: StorageBackend> PersistenceRouter<S> {
    pub fn new(
        data_root: &Path,
        storage: S,
        time_source: Arc<dyn SystemTimeSource>,
        duplicate_static_policy: DuplicateStaticPolicy,
    ) -> Self {
        Self {
            data_root: data_root.to_path_buf(),
            storage,
            time_source,
            duplicate_static_policy,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// save `files` in a subdirectory of the data root.
    ///
    /// real-time files are always written. a static bundle is only written when the
    /// same content was not already saved during the previous ISO week. with
    /// [`DuplicateStaticPolicy::AbortBatch`] such a duplicate also ends the whole call,
    /// so files after it in `files` are not saved.
    ///
    /// # Result
    /// a report of written paths and per-file failures. a failing file does not
    /// prevent the files after it from being saved.
    pub fn save_all(&self, files: &[FetchedResource]) -> SaveReport {
        let mut report = SaveReport::default();
        for (idx, file) in files.iter().enumerate() {
            let target = match file.category {
                ResourceCategory::Static => {
                    let targets = static_targets(file, &self.data_root, self.time_source.now());
                    if self.storage.exists(&targets.previous) {
                        log::warn!(
                            "static bundle unchanged since last week, found at {:?}",
                            targets.previous
                        );
                        report.static_duplicate = Some(targets.previous);
                        match self.duplicate_static_policy {
                            DuplicateStaticPolicy::AbortBatch => {
                                report.unprocessed = files.len() - idx - 1;
                                return report;
                            }
                            DuplicateStaticPolicy::SkipStatic => continue,
                        }
                    }
                    Ok(targets.current)
                }
                ResourceCategory::VehiclePosition
                | ResourceCategory::TripUpdate
                | ResourceCategory::Alert => realtime_target(file, &self.data_root),
            };

            let result = target.and_then(|path| {
                self.storage.write(&path, &file.content)?;
                Ok(path)
            });
            match result {
                Ok(path) => {
                    log::info!("saved {} file to {path:?}", file.category);
                    report.written.push(path);
                }
                Err(e) => {
                    log::error!("failed saving {} file: {e}", file.category);
                    report.failures.push((file.category, e));
                }
            }
        }
        report
    }
}
