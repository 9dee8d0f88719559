//! Concurrent source fan-out
//!
//! All sources for one request run in parallel; a slow or hung provider
//! costs at most the per-source timeout and is settled as `Failed`.
//! Before the merge, results are sorted by static source priority (id as
//! tie-break), so merge precedence never depends on completion order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use dialscope_core::{
    CanonicalNumber, MergedIntelligence, SignalResult, DEFAULT_SOURCE_TIMEOUT_SECS,
};
use dialscope_sources::SignalSource;

pub struct Orchestrator {
    sources: Vec<Arc<dyn SignalSource>>,
    source_timeout: Duration,
}

impl Orchestrator {
    pub fn new(sources: Vec<Arc<dyn SignalSource>>) -> Self {
        Self {
            sources,
            source_timeout: Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    pub fn sources(&self) -> &[Arc<dyn SignalSource>] {
        &self.sources
    }

    /// Fan out to every source, settle each result, and merge.
    pub async fn enrich(&self, number: &CanonicalNumber, raw_input: &str) -> MergedIntelligence {
        let tasks = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            let timeout = self.source_timeout;
            async move {
                let settled = match tokio::time::timeout(
                    timeout,
                    source.fetch(number, raw_input),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("source {} timed out after {:?}", source.id(), timeout);
                        SignalResult::failed(source.id(), source.category())
                    }
                };
                (source.priority(), settled)
            }
        });

        let mut settled: Vec<(u8, SignalResult)> = join_all(tasks).await;
        settled.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.1.source_id.cmp(&b.1.source_id))
        });
        let results: Vec<SignalResult> = settled.into_iter().map(|(_, r)| r).collect();

        debug!(
            "settled {} sources ({} ok)",
            results.len(),
            results.iter().filter(|r| r.is_ok()).count()
        );

        MergedIntelligence::merge(number.line_type(), &results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dialscope_core::{
        normalize, CarrierObservation, SignalPayload, SignalStatus, SourceCategory,
    };

    /// Test double that returns a fixed carrier name after a delay.
    struct StaticSource {
        id: &'static str,
        priority: u8,
        carrier: &'static str,
        delay: Duration,
    }

    #[async_trait]
    impl SignalSource for StaticSource {
        fn id(&self) -> &str {
            self.id
        }

        fn category(&self) -> SourceCategory {
            SourceCategory::Carrier
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        async fn fetch(&self, _number: &CanonicalNumber, _raw_input: &str) -> SignalResult {
            tokio::time::sleep(self.delay).await;
            SignalResult::ok(
                self.id,
                SourceCategory::Carrier,
                SignalPayload::Carrier(CarrierObservation {
                    name: Some(self.carrier.to_string()),
                    ..Default::default()
                }),
            )
        }
    }

    #[tokio::test]
    async fn test_priority_decides_merge_not_completion_order() {
        // The high-priority source finishes last; its value must still win.
        let orchestrator = Orchestrator::new(vec![
            Arc::new(StaticSource {
                id: "slow-primary",
                priority: 10,
                carrier: "Vodafone",
                delay: Duration::from_millis(50),
            }),
            Arc::new(StaticSource {
                id: "fast-secondary",
                priority: 20,
                carrier: "O2",
                delay: Duration::from_millis(0),
            }),
        ]);
        let number = normalize("+447911123456").unwrap();
        let intel = orchestrator.enrich(&number, "+447911123456").await;
        assert_eq!(intel.carrier.name.as_deref(), Some("Vodafone"));
    }

    #[tokio::test]
    async fn test_timeout_settles_as_failed_without_blocking_others() {
        let orchestrator = Orchestrator::new(vec![
            Arc::new(StaticSource {
                id: "hung-source",
                priority: 10,
                carrier: "never",
                delay: Duration::from_secs(60),
            }),
            Arc::new(StaticSource {
                id: "live-source",
                priority: 20,
                carrier: "O2",
                delay: Duration::from_millis(0),
            }),
        ])
        .with_timeout(Duration::from_millis(50));

        let number = normalize("+447911123456").unwrap();
        let intel = orchestrator.enrich(&number, "+447911123456").await;

        assert_eq!(intel.carrier.name.as_deref(), Some("O2"));
        let hung = intel
            .outcomes
            .iter()
            .find(|o| o.source_id == "hung-source")
            .unwrap();
        assert_eq!(hung.status, SignalStatus::Failed);
    }

    #[tokio::test]
    async fn test_no_sources_yields_empty_intelligence() {
        let orchestrator = Orchestrator::new(Vec::new());
        let number = normalize("+16502530000").unwrap();
        let intel = orchestrator.enrich(&number, "+16502530000").await;
        assert!(intel.outcomes.is_empty());
        assert_eq!(intel.carrier, CarrierObservation::default());
    }
}
