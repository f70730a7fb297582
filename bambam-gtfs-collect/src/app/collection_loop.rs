use std::sync::Arc;

use chrono::TimeDelta;

use crate::collection::{ConditionalTransport, TransitSource};
use crate::persistence::{PersistenceRouter, SaveReport, StorageBackend};
use crate::util::time_source::SystemTimeSource;

/// downloads files from a source and saves them, repeatedly.
pub struct CollectionLoop<T, S> {
    source: TransitSource<T>,
    router: PersistenceRouter<S>,
    time_source: Arc<dyn SystemTimeSource>,
    polling_interval: TimeDelta,
}

impl<T: ConditionalTransport, S: StorageBackend> CollectionLoop<T, S> {
    pub fn new(
        source: TransitSource<T>,
        router: PersistenceRouter<S>,
        time_source: Arc<dyn SystemTimeSource>,
        polling_interval: TimeDelta,
    ) -> Self {
        Self {
            source,
            router,
            time_source,
            polling_interval,
        }
    }

    pub fn router(&self) -> &PersistenceRouter<S> {
        &self.router
    }

    /// one download-and-save iteration.
    pub fn run_cycle(&mut self) -> SaveReport {
        let files = self.source.collect_cycle();
        let report = self.router.save_all(&files);
        if let Some(previous) = &report.static_duplicate {
            log::info!(
                "static bundle already stored at {previous:?}, {} file(s) left unsaved",
                report.unprocessed
            );
        }
        for (category, error) in report.failures.iter() {
            log::error!("{category} file was not saved: {error}");
        }
        report
    }

    /// runs cycles until `max_cycles` have completed, or forever when `None`.
    /// consecutive cycles start at least `polling_interval` apart.
    ///
    /// # Result
    /// the number of completed cycles
    pub fn run(&mut self, max_cycles: Option<u64>) -> u64 {
        let mut cycles: u64 = 0;
        let mut previous_time = self.time_source.now();
        loop {
            let report = self.run_cycle();
            cycles += 1;
            log::debug!(
                "cycle {cycles}: {} written, {} failed",
                report.written.len(),
                report.failures.len()
            );
            if max_cycles.is_some_and(|max| cycles >= max) {
                return cycles;
            }
            let delta_time = self.time_source.now() - previous_time;
            let wait = (self.polling_interval - delta_time).max(TimeDelta::zero());
            self.time_source.sleep(wait);
            previous_time = self.time_source.now();
        }
    }
}
