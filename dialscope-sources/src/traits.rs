//! Common interface for all signal sources

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use dialscope_core::{CanonicalNumber, SignalPayload, SignalResult, SourceCategory};

/// Internal provider errors. These never cross the orchestrator boundary:
/// [`settle`] converts them into `Failed` results.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

/// A pluggable provider of one category of external lookup data.
///
/// Implementations are read-only with respect to the number and shared
/// configuration, and idempotent: repeated calls with the same
/// `CanonicalNumber` produce equivalent results.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Stable identifier, also used for deterministic merge tie-breaks
    fn id(&self) -> &str;

    fn category(&self) -> SourceCategory;

    /// Static merge precedence within a category; lower wins
    fn priority(&self) -> u8;

    /// Whether the provider has what it needs (credentials etc.) to return
    /// anything other than `Empty`
    fn configured(&self) -> bool {
        true
    }

    /// Look the number up. Must not panic or error out of the call: any
    /// internal failure is reported as a `Failed` result.
    async fn fetch(&self, number: &CanonicalNumber, raw_input: &str) -> SignalResult;
}

/// Convert a provider's internal outcome into the uniform result variants:
/// data -> `Ok`, no data -> `Empty`, error -> `Failed` (logged).
pub fn settle(
    source_id: &str,
    category: SourceCategory,
    outcome: Result<Option<SignalPayload>, SourceError>,
) -> SignalResult {
    match outcome {
        Ok(Some(payload)) => SignalResult::ok(source_id, category, payload),
        Ok(None) => SignalResult::empty(source_id, category),
        Err(err) => {
            warn!("source {} failed: {}", source_id, err);
            SignalResult::failed(source_id, category)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialscope_core::{CarrierObservation, SignalStatus};

    #[test]
    fn test_settle_maps_outcomes_to_statuses() {
        let ok = settle(
            "numverify",
            SourceCategory::Carrier,
            Ok(Some(SignalPayload::Carrier(CarrierObservation::default()))),
        );
        assert_eq!(ok.status, SignalStatus::Ok);

        let empty = settle("numverify", SourceCategory::Carrier, Ok(None));
        assert_eq!(empty.status, SignalStatus::Empty);

        let failed = settle(
            "numverify",
            SourceCategory::Carrier,
            Err(SourceError::Provider("status 500".to_string())),
        );
        assert_eq!(failed.status, SignalStatus::Failed);
        assert!(failed.payload.is_none());
    }
}
