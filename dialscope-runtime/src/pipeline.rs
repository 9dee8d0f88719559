//! The analysis pipeline - raw input to finished report

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use dialscope_core::{
    classify, normalize, risk, IntelligenceReport, NormalizeError,
};
use dialscope_sources::{build_sources, ProviderConfig, SignalSource};

use crate::Orchestrator;

/// Failure modes of one analysis request. A parse failure short-circuits
/// before any source is invoked.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] NormalizeError),

    #[error("Analysis failed: {0}")]
    Pipeline(String),
}

pub struct Pipeline {
    orchestrator: Orchestrator,
}

impl Pipeline {
    /// Build the pipeline with the standard provider registry.
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(build_sources(config)),
        }
    }

    /// Build the pipeline over an explicit source set.
    pub fn with_sources(sources: Vec<Arc<dyn SignalSource>>) -> Self {
        Self {
            orchestrator: Orchestrator::new(sources),
        }
    }

    pub fn sources(&self) -> &[Arc<dyn SignalSource>] {
        self.orchestrator.sources()
    }

    /// Analyze one number: normalize, enrich, score, classify, assemble.
    pub async fn analyze(&self, raw_input: &str) -> Result<IntelligenceReport, AnalysisError> {
        info!("analyzing number {}...", redact(raw_input));

        let number = normalize(raw_input)?;
        let intel = self.orchestrator.enrich(&number, raw_input).await;
        let assessment = risk::score(&intel);
        let presence = classify(&intel);

        let report = IntelligenceReport::assemble(raw_input, &number, &intel, &assessment, &presence);
        info!(
            "analysis complete: risk {} presence {}",
            report.risk_score, report.network_intelligence.network_status
        );
        Ok(report)
    }
}

// Numbers are personal data; logs carry only a short prefix.
fn redact(raw: &str) -> String {
    raw.chars().take(4).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use dialscope_core::{
        CanonicalNumber, PresenceState, SignalResult, SourceCategory,
    };

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SignalSource for CountingSource {
        fn id(&self) -> &str {
            "counting"
        }

        fn category(&self) -> SourceCategory {
            SourceCategory::Carrier
        }

        fn priority(&self) -> u8 {
            10
        }

        async fn fetch(&self, _number: &CanonicalNumber, _raw_input: &str) -> SignalResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SignalResult::empty("counting", SourceCategory::Carrier)
        }
    }

    #[tokio::test]
    async fn test_invalid_input_short_circuits_before_sources() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::with_sources(vec![Arc::new(CountingSource {
            calls: Arc::clone(&calls),
        })]);

        let err = pipeline.analyze("not a number").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid phone number format");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_sources_still_yields_full_report() {
        let pipeline = Pipeline::with_sources(Vec::new());
        let report = pipeline.analyze("+16502530000").await.unwrap();

        assert_eq!(report.risk_score, 20);
        assert_eq!(
            report.network_intelligence.network_status,
            PresenceState::Unknown
        );
        assert_eq!(report.carrier, "Unknown");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["riskScore"], 20);
        assert_eq!(value["networkIntelligence"]["networkStatus"], "Unknown");
    }

    #[tokio::test]
    async fn test_national_input_resolves_via_region_hints() {
        let pipeline = Pipeline::with_sources(Vec::new());
        let report = pipeline.analyze("07911 123456").await.unwrap();
        assert_eq!(report.e164_format, "+447911123456");
        assert_eq!(report.country, "United Kingdom");
    }

    #[test]
    fn test_redaction_keeps_prefix_only() {
        assert_eq!(redact("+16502530000"), "+165");
        assert_eq!(redact("+1"), "+1");
    }
}
