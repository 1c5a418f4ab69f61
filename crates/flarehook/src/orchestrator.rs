//! Batch lifecycle of challenge records.
//!
//! Creation is strictly ordered: every record is created, then the settle
//! pause runs, then each record is polled in input order until it resolves.
//! The first error aborts the batch; records created before it are left in
//! place for `clean_challenge` to remove.

use crate::config::PollConfig;
use async_trait::async_trait;
use flarehook_client::CloudflareClient;
use flarehook_core::{ChallengeArgRecord, HookError, Result};
use flarehook_propagation::PropagationChecker;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Creates and deletes challenge TXT records
#[async_trait]
pub trait RecordManager: Send + Sync {
    /// Publish the token for `domain` (idempotent)
    async fn create_txt_record(&self, domain: &str, token: &str) -> Result<()>;

    /// Remove the token for `domain`, if present
    async fn delete_txt_record(&self, domain: &str, token: &str) -> Result<()>;
}

/// Answers whether a record is visible in DNS yet
#[async_trait]
pub trait PropagationProbe: Send + Sync {
    /// One check, no retries; failures mean "not yet"
    async fn has_propagated(&self, record_name: &str, token: &str) -> bool;
}

#[async_trait]
impl RecordManager for CloudflareClient {
    async fn create_txt_record(&self, domain: &str, token: &str) -> Result<()> {
        Self::create_txt_record(self, domain, token).await
    }

    async fn delete_txt_record(&self, domain: &str, token: &str) -> Result<()> {
        Self::delete_txt_record(self, domain, token).await
    }
}

#[async_trait]
impl PropagationProbe for PropagationChecker {
    async fn has_propagated(&self, record_name: &str, token: &str) -> bool {
        Self::has_propagated(self, record_name, token).await
    }
}

/// Drives `deploy_challenge` and `clean_challenge` over a batch of records
pub struct ChallengeOrchestrator<R, P> {
    records: R,
    probe: P,
    poll: PollConfig,
}

impl<R, P> ChallengeOrchestrator<R, P>
where
    R: RecordManager,
    P: PropagationProbe,
{
    /// Create an orchestrator
    pub const fn new(records: R, probe: P, poll: PollConfig) -> Self {
        Self {
            records,
            probe,
            poll,
        }
    }

    /// Timing in use
    pub const fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    /// Create every record, settle, then block until each one has propagated
    pub async fn create_all(&self, batch: &[ChallengeArgRecord]) -> Result<()> {
        for record in batch {
            debug!(domain = %record.domain, payload = %record.validation_payload, "Challenge");
            self.records
                .create_txt_record(&record.domain, &record.token)
                .await?;
        }

        info!("Settling down for {}s...", self.poll.settle_time.as_secs());
        sleep(self.poll.settle_time).await;

        for record in batch {
            self.wait_for_propagation(record).await?;
        }

        Ok(())
    }

    /// Delete every record in input order
    pub async fn delete_all(&self, batch: &[ChallengeArgRecord]) -> Result<()> {
        delete_all(&self.records, batch).await
    }

    async fn wait_for_propagation(&self, record: &ChallengeArgRecord) -> Result<()> {
        let name = record.record_name();
        let started = Instant::now();

        loop {
            if self.probe.has_propagated(&name, &record.token).await {
                info!(record = %name, waited_secs = started.elapsed().as_secs(), "DNS propagated");
                return Ok(());
            }

            let waited = started.elapsed();
            if self.poll.deadline_passed(waited) {
                return Err(HookError::PropagationTimeout {
                    record: name,
                    waited_secs: waited.as_secs(),
                });
            }

            info!(record = %name, "DNS not propagated, waiting {}s...", self.poll.backoff.as_secs());
            sleep(self.poll.backoff).await;
        }
    }
}

/// Delete every record in input order, stopping at the first error
pub async fn delete_all<R>(records: &R, batch: &[ChallengeArgRecord]) -> Result<()>
where
    R: RecordManager + ?Sized,
{
    for record in batch {
        records
            .delete_txt_record(&record.domain, &record.token)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Create(String),
        Delete(String),
        Probe(String, u64),
    }

    #[derive(Clone, Default)]
    struct Log(Arc<Mutex<Vec<Event>>>);

    impl Log {
        fn push(&self, event: Event) {
            self.0.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<Event> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeRecords {
        log: Log,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl RecordManager for FakeRecords {
        async fn create_txt_record(&self, domain: &str, _token: &str) -> Result<()> {
            if self.fail_on == Some(domain) {
                return Err(HookError::Api {
                    code: 500,
                    message: "boom".into(),
                });
            }
            self.log.push(Event::Create(domain.to_string()));
            Ok(())
        }

        async fn delete_txt_record(&self, domain: &str, _token: &str) -> Result<()> {
            if self.fail_on == Some(domain) {
                return Err(HookError::Http("connection reset".into()));
            }
            self.log.push(Event::Delete(domain.to_string()));
            Ok(())
        }
    }

    /// Answers false a configured number of times per record, then true
    struct FakeProbe {
        log: Log,
        start: Instant,
        misses: Mutex<HashMap<String, usize>>,
    }

    impl FakeProbe {
        fn new(log: Log, misses: &[(&str, usize)]) -> Self {
            Self {
                log,
                start: Instant::now(),
                misses: Mutex::new(
                    misses
                        .iter()
                        .map(|(name, n)| ((*name).to_string(), *n))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl PropagationProbe for FakeProbe {
        async fn has_propagated(&self, record_name: &str, _token: &str) -> bool {
            self.log.push(Event::Probe(
                record_name.to_string(),
                self.start.elapsed().as_secs(),
            ));
            let mut misses = self.misses.lock().unwrap();
            match misses.get_mut(record_name) {
                Some(0) | None => true,
                Some(left) => {
                    *left -= 1;
                    false
                }
            }
        }
    }

    fn batch() -> Vec<ChallengeArgRecord> {
        ChallengeArgRecord::parse_batch(&[
            "example.com",
            "ignored-payload",
            "tok123",
            "example.org",
            "ignored-payload",
            "tok456",
        ])
        .unwrap()
    }

    fn orchestrator(
        log: &Log,
        fail_on: Option<&'static str>,
        misses: &[(&str, usize)],
        poll: PollConfig,
    ) -> ChallengeOrchestrator<FakeRecords, FakeProbe> {
        ChallengeOrchestrator::new(
            FakeRecords {
                log: log.clone(),
                fail_on,
            },
            FakeProbe::new(log.clone(), misses),
            poll,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn creates_all_before_polling_in_input_order() {
        let log = Log::default();
        let poll = PollConfig::new().settle_time(Duration::ZERO);

        orchestrator(&log, None, &[], poll)
            .create_all(&batch())
            .await
            .unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Create("example.com".into()),
                Event::Create("example.org".into()),
                Event::Probe("_acme-challenge.example.com".into(), 0),
                Event::Probe("_acme-challenge.example.org".into(), 0),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn settle_time_precedes_first_poll() {
        let log = Log::default();

        orchestrator(&log, None, &[], PollConfig::default())
            .create_all(&batch())
            .await
            .unwrap();

        let first_probe = log
            .events()
            .into_iter()
            .find_map(|event| match event {
                Event::Probe(_, at) => Some(at),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_probe, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_with_fixed_backoff_until_propagated() {
        let log = Log::default();
        let poll = PollConfig::new().settle_time(Duration::ZERO);

        orchestrator(&log, None, &[("_acme-challenge.example.com", 2)], poll)
            .create_all(&batch())
            .await
            .unwrap();

        let probes: Vec<Event> = log
            .events()
            .into_iter()
            .filter(|event| matches!(event, Event::Probe(..)))
            .collect();
        assert_eq!(
            probes,
            vec![
                Event::Probe("_acme-challenge.example.com".into(), 0),
                Event::Probe("_acme-challenge.example.com".into(), 30),
                Event::Probe("_acme-challenge.example.com".into(), 60),
                Event::Probe("_acme-challenge.example.org".into(), 60),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn create_failure_aborts_before_polling() {
        let log = Log::default();
        let poll = PollConfig::new().settle_time(Duration::ZERO);

        let err = orchestrator(&log, Some("example.org"), &[], poll)
            .create_all(&batch())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(log.events(), vec![Event::Create("example.com".into())]);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_wait_times_out() {
        let log = Log::default();
        let poll = PollConfig::new()
            .settle_time(Duration::ZERO)
            .max_wait(Some(Duration::from_secs(60)));

        let err = orchestrator(&log, None, &[("_acme-challenge.example.com", usize::MAX)], poll)
            .create_all(&batch())
            .await
            .unwrap_err();

        match err {
            HookError::PropagationTimeout {
                record,
                waited_secs,
            } => {
                assert_eq!(record, "_acme-challenge.example.com");
                assert_eq!(waited_secs, 60);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!log
            .events()
            .contains(&Event::Probe("_acme-challenge.example.org".into(), 60)));
    }

    #[tokio::test(start_paused = true)]
    async fn delete_all_in_order() {
        let log = Log::default();

        orchestrator(&log, None, &[], PollConfig::default())
            .delete_all(&batch())
            .await
            .unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Delete("example.com".into()),
                Event::Delete("example.org".into()),
            ]
        );
    }

    #[tokio::test]
    async fn delete_all_stops_at_first_error() {
        let log = Log::default();
        let records = FakeRecords {
            log: log.clone(),
            fail_on: Some("example.com"),
        };

        let err = delete_all(&records, &batch()).await.unwrap_err();
        assert!(matches!(err, HookError::Http(_)));
        assert!(log.events().is_empty());
    }
}
