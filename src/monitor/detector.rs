use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use super::dedup::filter_unseen;
use super::processor::{normalize_pairs, NormalizedPair};
use super::storage::JsonLog;
use crate::api::{PairSource, RawPair};
use crate::core::config::MonitorConfig;

/// Tagged outcome of one poll cycle, so a wrapping supervisor can add
/// backoff or alerting without touching the stage contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub unseen: usize,
    pub emitted: usize,
    pub store_failed: bool,
}

impl CycleReport {
    pub fn empty() -> Self {
        Self {
            fetched: 0,
            unseen: 0,
            emitted: 0,
            store_failed: false,
        }
    }
}

/// Owns the whole fetch → dedup → normalize → append pipeline and the
/// process-lifetime state behind it: the seen-set and the on-disk log.
pub struct PairMonitor {
    source: Arc<dyn PairSource>,
    log: JsonLog,
    seen: HashSet<String>,
    poll_interval: Duration,
    started_at: DateTime<Utc>,
}

impl PairMonitor {
    pub fn new(source: Arc<dyn PairSource>, config: &MonitorConfig) -> Self {
        Self {
            source,
            log: JsonLog::new(&config.output_file),
            seen: HashSet::new(),
            poll_interval: Duration::from_secs(config.fetch_interval_secs),
            started_at: Utc::now(),
        }
    }

    pub fn seen(&self) -> &HashSet<String> {
        &self.seen
    }

    pub fn log(&self) -> &JsonLog {
        &self.log
    }

    /// Runs the polling loop forever. Nothing in here terminates the
    /// process; every stage failure is logged and the next tick retries.
    pub async fn run(&mut self) {
        tracing::info!(
            "🚀 DexScanner bot started (interval: {}s, log: {})",
            self.poll_interval.as_secs(),
            self.log.path().display()
        );

        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            interval.tick().await;

            let report = self.run_once().await;
            tracing::debug!(
                "Cycle done: {}/{} new pairs emitted, {} tracked, up {}s",
                report.emitted,
                report.fetched,
                self.seen.len(),
                (Utc::now() - self.started_at).num_seconds()
            );
        }
    }

    /// One full cycle including the fetch. An empty or failed fetch
    /// short-circuits: dedup, processor, and storage are not touched.
    pub async fn run_once(&mut self) -> CycleReport {
        let raw = match self.source.latest_pairs().await {
            Ok(pairs) => pairs,
            Err(e) => {
                tracing::error!("[Fetcher] Error: {:#}", e);
                Vec::new()
            }
        };

        if raw.is_empty() {
            return CycleReport::empty();
        }

        self.run_cycle(raw)
    }

    /// Dedup → normalize → emit → append for an already-fetched batch.
    pub fn run_cycle(&mut self, raw: Vec<RawPair>) -> CycleReport {
        let fetched = raw.len();
        let unseen = filter_unseen(raw, &self.seen);
        let unseen_count = unseen.len();
        let processed = normalize_pairs(&unseen);

        for pair in &processed {
            self.seen.insert(pair.pair_address.clone());
            emit_pair(pair);
        }

        let store_failed = match self.log.append(&processed) {
            Ok(()) => false,
            Err(e) => {
                // The batch is already seen and printed; only this cycle's
                // persistence is lost and the next cycle retries the file.
                tracing::error!("[Storage] Error: {}", e);
                true
            }
        };

        CycleReport {
            fetched,
            unseen: unseen_count,
            emitted: processed.len(),
            store_failed,
        }
    }
}

fn emit_pair(pair: &NormalizedPair) {
    tracing::info!(
        "🪙 {} | Price: {} | Liq: {} | TXNs/5m: {}",
        pair.symbol.as_deref().unwrap_or("?"),
        pair.price_usd.as_deref().unwrap_or("?"),
        pair.liquidity_usd
            .map(|usd| usd.to_string())
            .unwrap_or_else(|| "?".to_string()),
        pair.txns_5m
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BaseToken, TxnCounts, TxnWindows};
    use tempfile::TempDir;

    fn monitor(dir: &TempDir) -> PairMonitor {
        let config = MonitorConfig {
            fetch_interval_secs: 15,
            output_file: dir
                .path()
                .join("dex_log.json")
                .to_string_lossy()
                .into_owned(),
        };
        PairMonitor::new(Arc::new(NoPairs), &config)
    }

    struct NoPairs;

    #[async_trait::async_trait]
    impl PairSource for NoPairs {
        async fn latest_pairs(&self) -> anyhow::Result<Vec<RawPair>> {
            Ok(Vec::new())
        }
    }

    fn raw(address: &str) -> RawPair {
        RawPair {
            pair_address: Some(address.to_string()),
            base_token: Some(BaseToken {
                name: Some("Foo".to_string()),
                symbol: Some("FOO".to_string()),
            }),
            txns: Some(TxnWindows {
                m5: Some(TxnCounts {
                    buys: Some(2),
                    sells: Some(1),
                }),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_second_cycle_with_same_batch_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut monitor = monitor(&dir);

        let first = monitor.run_cycle(vec![raw("A1")]);
        assert_eq!(first.emitted, 1);
        assert!(monitor.seen().contains("A1"));

        let second = monitor.run_cycle(vec![raw("A1")]);
        assert_eq!(second.fetched, 1);
        assert_eq!(second.unseen, 0);
        assert_eq!(second.emitted, 0);
        assert_eq!(monitor.seen().len(), 1);
    }

    #[test]
    fn test_storage_failure_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let mut monitor = monitor(&dir);
        std::fs::write(monitor.log.path(), "{not json").unwrap();

        let report = monitor.run_cycle(vec![raw("A1")]);
        assert!(report.store_failed);
        // Seen-set is updated even though the write was lost.
        assert!(monitor.seen().contains("A1"));
    }

    #[tokio::test]
    async fn test_empty_fetch_short_circuits() {
        let dir = TempDir::new().unwrap();
        let mut monitor = monitor(&dir);

        let report = monitor.run_once().await;
        assert_eq!(report, CycleReport::empty());
        assert!(monitor.seen().is_empty());
        assert!(!monitor.log().path().exists());
    }
}
