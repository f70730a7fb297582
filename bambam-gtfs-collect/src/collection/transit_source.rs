use std::sync::Arc;

use chrono::{DateTime, Utc};
use itertools::Itertools;

use super::{ConditionalDownloader, ConditionalTransport, FetchedResource, ResourceCategory};
use crate::gate::{CallGate, GateOutcome};
use crate::util::time_source::SystemTimeSource;

/// wrapper of the downloader and the call gate of one GTFS source.
pub struct TransitSource<T> {
    downloader: ConditionalDownloader<T>,
    gate: CallGate,
    time_source: Arc<dyn SystemTimeSource>,
    max_attempts: Option<u32>,
}

impl<T: ConditionalTransport> TransitSource<T> {
    pub fn new(
        downloader: ConditionalDownloader<T>,
        gate: CallGate,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        Self {
            downloader,
            gate,
            time_source,
            max_attempts: None,
        }
    }

    /// limit gate invocations per category per cycle. `None` retries until resolved.
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn downloader(&self) -> &ConditionalDownloader<T> {
        &self.downloader
    }

    pub fn gate(&self) -> &CallGate {
        &self.gate
    }

    /// download all new GTFS files, one category after the other.
    ///
    /// new files are those whose entity tag changed since the last download. failed
    /// downloads are retried once the gate allows it, so this call only returns when
    /// every category either changed, reported no change, or ran out of attempts.
    pub fn collect_cycle(&mut self) -> Vec<FetchedResource> {
        let files = ResourceCategory::ALL
            .into_iter()
            .filter_map(|category| self.collect_category(category))
            .collect_vec();
        log::info!(
            "collection cycle finished with {} new file(s): [{}]",
            files.len(),
            files.iter().map(|f| f.category).join(", ")
        );
        files
    }

    fn collect_category(&mut self, category: ResourceCategory) -> Option<FetchedResource> {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            let downloader = &mut self.downloader;
            let retry_at = match self.gate.invoke(|| downloader.fetch(category)) {
                GateOutcome::Succeeded(file) => return file,
                GateOutcome::Failed { error, retry_at } => {
                    log::warn!("attempt {attempts} for {category} failed: {error}");
                    retry_at
                }
                GateOutcome::Rejected { retry_at } => {
                    log::debug!("gate open, {category} rejected until {}", retry_at.to_rfc3339());
                    retry_at
                }
            };
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                log::warn!("giving up on {category} for this cycle after {attempts} attempt(s)");
                return None;
            }
            self.wait_until(retry_at);
        }
    }

    fn wait_until(&self, retry_at: DateTime<Utc>) {
        let delay = retry_at - self.time_source.now();
        self.time_source.sleep(delay.max(chrono::TimeDelta::zero()));
    }
}

#[cfg(test)]
mod test {
    use super::TransitSource;
    use crate::collection::downloader::test::{modified, test_endpoints, ScriptedTransport};
    use crate::collection::{ConditionalDownloader, ResourceCategory, TransportResponse};
    use crate::gate::{CallGate, GateConfig};
    use crate::util::time_source::{FakeSystemTimeSource, SystemTimeSource};
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 12, 21, 25).unwrap()
    }

    fn source(
        transport: ScriptedTransport,
        gate_config: GateConfig,
    ) -> (TransitSource<ScriptedTransport>, Arc<FakeSystemTimeSource>) {
        let clock = Arc::new(FakeSystemTimeSource::new_set(t0()));
        let gate = CallGate::new(&gate_config, clock.clone()).unwrap();
        let downloader = ConditionalDownloader::new(test_endpoints(), transport);
        let source = TransitSource::new(downloader, gate, clock.clone())
            .with_max_attempts(gate_config.max_attempts);
        (source, clock)
    }

    fn all_changed() -> ScriptedTransport {
        ResourceCategory::ALL
            .iter()
            .fold(ScriptedTransport::default(), |t, c| {
                let url = test_endpoints().get(c).to_string();
                t.with(&url, modified(c.as_str(), "\"1\""))
                    .with(&url, Ok(TransportResponse::NotModified))
            })
    }

    #[test]
    fn test_source_request_files() {
        let (mut source, clock) = source(all_changed(), GateConfig::default());
        let files = source.collect_cycle();
        assert_eq!(files.len(), 4);
        let categories: HashSet<ResourceCategory> = files.iter().map(|f| f.category).collect();
        assert_eq!(categories, HashSet::from(ResourceCategory::ALL));
        for file in files {
            assert_eq!(file.content, file.category.as_str().as_bytes());
        }
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn test_source_no_files() {
        let (mut source, _) = source(ScriptedTransport::default(), GateConfig::default());
        assert!(source.collect_cycle().is_empty());
    }

    #[test]
    fn test_second_cycle_sees_no_changes() {
        let (mut source, _) = source(all_changed(), GateConfig::default());
        assert_eq!(source.collect_cycle().len(), 4);
        assert!(source.collect_cycle().is_empty());
    }

    #[test]
    fn test_source_waits_for_cooldown() {
        let transport = ScriptedTransport::default()
            .with("static.zip", Ok(TransportResponse::Unexpected { status: 500 }))
            .with("static.zip", modified("static", "\"s\""));
        let (mut source, clock) = source(transport, GateConfig::new(1, 4.0099));

        let files = source.collect_cycle();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].category, ResourceCategory::Static);
        assert_eq!(clock.sleeps(), vec![TimeDelta::microseconds(4_009_900)]);
        assert_eq!(source.downloader().validators().get(&ResourceCategory::Static), "\"s\"");
    }

    #[test]
    fn test_source_wait_in_past_sleeps_zero() {
        // failures below the threshold report the current time as the retry time
        let transport = ScriptedTransport::default()
            .with("updates.pb", Err(String::from("timeout")))
            .with("updates.pb", modified("trip_update", "\"t\""));
        let (mut source, clock) = source(transport, GateConfig::new(5, 120.0));

        let files = source.collect_cycle();
        assert_eq!(files.len(), 1);
        assert_eq!(clock.sleeps(), vec![TimeDelta::zero()]);
        assert_eq!(source.gate().state().consecutive_failures, 0);
    }

    #[test]
    fn test_open_gate_is_not_retried_before_cooldown() {
        let transport = ScriptedTransport::default()
            .with("alerts.pb", Ok(TransportResponse::Unexpected { status: 502 }))
            .with("alerts.pb", Ok(TransportResponse::Unexpected { status: 502 }))
            .with("alerts.pb", modified("alert", "\"a\""));
        let (mut source, clock) = source(transport, GateConfig::new(2, 30.0));

        let files = source.collect_cycle();
        assert_eq!(files.len(), 1);
        assert_eq!(
            clock.sleeps(),
            vec![TimeDelta::zero(), TimeDelta::seconds(30)]
        );
        assert_eq!(transport_requests(source.downloader(), "alerts.pb"), 3);
    }

    #[test]
    fn test_max_attempts_gives_up_on_category() {
        let transport = ScriptedTransport::default()
            .with("positions.pb", Ok(TransportResponse::Unexpected { status: 404 }))
            .with("static.zip", modified("static", "\"s\""));
        let (mut source, clock) =
            source(transport, GateConfig::new(1, 10.0).with_max_attempts(3));

        let files = source.collect_cycle();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].category, ResourceCategory::Static);
        // three attempts with two waits in between, then the trip update waits out
        // the cooldown left behind by the last vehicle position failure
        assert_eq!(clock.sleeps(), vec![TimeDelta::seconds(10); 3]);
        assert_eq!(clock.now(), t0() + TimeDelta::seconds(30));
        assert_eq!(transport_requests(source.downloader(), "positions.pb"), 3);
    }

    fn transport_requests(
        downloader: &ConditionalDownloader<ScriptedTransport>,
        url: &str,
    ) -> usize {
        downloader.transport().requests_for(url)
    }
}
