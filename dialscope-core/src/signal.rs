//! Signal results - what lookup providers hand back to the orchestrator
//!
//! Every provider invocation produces exactly one [`SignalResult`]:
//! `Ok` with a payload, `Empty` (no data, including missing credentials),
//! or `Failed` (provider error or timeout). Results are consumed once by
//! the merge step and never persisted beyond the request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::LineType;

/// Category of external lookup a source belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Carrier,
    Security,
    Osint,
    Presence,
}

impl SourceCategory {
    pub const ALL: [SourceCategory; 4] = [
        SourceCategory::Carrier,
        SourceCategory::Security,
        SourceCategory::Osint,
        SourceCategory::Presence,
    ];
}

impl std::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceCategory::Carrier => "carrier",
            SourceCategory::Security => "security",
            SourceCategory::Osint => "osint",
            SourceCategory::Presence => "presence",
        };
        f.write_str(name)
    }
}

/// Outcome of one source invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    Ok,
    Empty,
    Failed,
}

/// Carrier metadata from a validity/lookup provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierObservation {
    pub name: Option<String>,
    pub line_type: Option<LineType>,
    pub location: Option<String>,
    pub mcc: Option<String>,
    pub mnc: Option<String>,
}

/// Spam/reputation data from a security provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationObservation {
    pub spam_risk: Option<bool>,
    /// Explicit reputation sub-score in [0, 100], higher is better
    pub score: Option<i64>,
    pub indicators: Vec<String>,
}

/// One breach a number (or its associated identity) appeared in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreachRecord {
    pub name: String,
    pub domain: Option<String>,
    pub breach_date: Option<String>,
    pub data_classes: Vec<String>,
}

/// A social account discovered during footprint enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub platform: String,
    pub handle: Option<String>,
    pub url: Option<String>,
}

/// Digital-footprint data from osint providers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintObservation {
    pub emails: Vec<String>,
    pub websites: Vec<String>,
    pub social_accounts: Vec<SocialAccount>,
}

/// Per-app messaging presence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagingAppStatus {
    pub app: String,
    pub registered: bool,
    pub online: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Per-service VoIP activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoipServiceStatus {
    pub service: String,
    pub active: bool,
}

/// Public social-media activity snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialActivityObservation {
    pub recent_activity: bool,
    pub platforms_active: Vec<String>,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Business-listing activity snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessObservation {
    pub listed: bool,
    pub listings: Vec<String>,
    pub recent_reviews: bool,
}

/// Carrier-reported network status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierStatusObservation {
    pub status: Option<String>,
    pub network_available: Option<bool>,
    pub roaming: Option<String>,
}

/// Result of a consented network probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeObservation {
    pub responded: bool,
    pub latency_ms: Option<u64>,
}

/// The data a source produced, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum SignalPayload {
    Carrier(CarrierObservation),
    Reputation(ReputationObservation),
    Breaches(Vec<BreachRecord>),
    Footprint(FootprintObservation),
    Messaging(Vec<MessagingAppStatus>),
    Voip(Vec<VoipServiceStatus>),
    SocialActivity(SocialActivityObservation),
    Business(BusinessObservation),
    CarrierStatus(CarrierStatusObservation),
    Probe(ProbeObservation),
}

/// One provider invocation's outcome, consumed once by the merge step
#[derive(Debug, Clone, PartialEq)]
pub struct SignalResult {
    pub source_id: String,
    pub category: SourceCategory,
    pub status: SignalStatus,
    pub payload: Option<SignalPayload>,
    pub timestamp: DateTime<Utc>,
}

impl SignalResult {
    pub fn ok(source_id: &str, category: SourceCategory, payload: SignalPayload) -> Self {
        Self {
            source_id: source_id.to_string(),
            category,
            status: SignalStatus::Ok,
            payload: Some(payload),
            timestamp: Utc::now(),
        }
    }

    /// The source ran but had nothing to report (including: no credentials)
    pub fn empty(source_id: &str, category: SourceCategory) -> Self {
        Self {
            source_id: source_id.to_string(),
            category,
            status: SignalStatus::Empty,
            payload: None,
            timestamp: Utc::now(),
        }
    }

    /// The source errored or timed out; carries no partial data
    pub fn failed(source_id: &str, category: SourceCategory) -> Self {
        Self {
            source_id: source_id.to_string(),
            category,
            status: SignalStatus::Failed,
            payload: None,
            timestamp: Utc::now(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == SignalStatus::Ok
    }
}
