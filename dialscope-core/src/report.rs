//! The intelligence report - the pipeline's only output on success
//!
//! The shape is stable: every field is always present, with `"Unknown"` or
//! an empty collection standing in for data whose source returned
//! `Empty`/`Failed`. Downstream consumers rely on that; nothing is ever
//! silently omitted. On failure the whole report is replaced by
//! [`ErrorReport`], never a partial one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    assess_network_security, carrier_ip_ranges, network_technology, region_display_name,
    region_timezone, BreachRecord, CanonicalNumber, ContributingFactor, LineType,
    MergedIntelligence, MessagingAppStatus, NetworkSecurityAssessment, PresenceAssessment,
    PresenceState, RiskAssessment, SocialAccount, VoipServiceStatus, NEUTRAL_REPUTATION, UNKNOWN,
};

/// Security-analysis section of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysis {
    pub is_spam_risk: bool,
    pub is_voip: bool,
    pub reputation_score: i64,
    pub risk_indicators: Vec<String>,
    pub network_security: NetworkSecurityAssessment,
}

/// Osint section of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OsintData {
    pub breach_data: Vec<BreachRecord>,
    pub associated_emails: Vec<String>,
    pub websites: Vec<String>,
    pub social_accounts: Vec<SocialAccount>,
}

/// Network-intelligence section of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkIntelligence {
    pub network_status: PresenceState,
    pub connection_status: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub online_indicators: Vec<String>,
    pub network_technology: String,
    pub potential_ip_ranges: Vec<String>,
    pub messaging_apps: Vec<MessagingAppStatus>,
    pub voip_services: Vec<VoipServiceStatus>,
}

/// The full per-request report consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceReport {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input_number: String,
    pub risk_score: u8,
    pub contributing_factors: Vec<ContributingFactor>,
    pub country: String,
    pub region: String,
    pub carrier: String,
    pub line_type: LineType,
    pub timezone: String,
    pub country_code: u16,
    pub e164_format: String,
    pub national_format: String,
    pub international_format: String,
    pub national_number: u64,
    pub security_analysis: SecurityAnalysis,
    pub osint_data: OsintData,
    pub network_intelligence: NetworkIntelligence,
}

impl IntelligenceReport {
    /// Assemble the report from the request-scoped entities. Field order
    /// and presence never depend on which sources returned data.
    pub fn assemble(
        raw_input: &str,
        number: &CanonicalNumber,
        intel: &MergedIntelligence,
        risk: &RiskAssessment,
        presence: &PresenceAssessment,
    ) -> Self {
        let country = number
            .region()
            .and_then(region_display_name)
            .unwrap_or(UNKNOWN)
            .to_string();
        let region = intel
            .carrier
            .location
            .clone()
            .unwrap_or_else(|| country.clone());
        let carrier = intel
            .carrier
            .name
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string());
        let timezone = number
            .region()
            .and_then(region_timezone)
            .unwrap_or(UNKNOWN)
            .to_string();

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input_number: raw_input.to_string(),
            risk_score: risk.score,
            contributing_factors: risk.contributing_factors.clone(),
            country,
            region,
            carrier: carrier.clone(),
            line_type: number.line_type(),
            timezone,
            country_code: number.country_code(),
            e164_format: number.e164().to_string(),
            national_format: number.national().to_string(),
            international_format: number.international().to_string(),
            national_number: number.national_number(),
            security_analysis: SecurityAnalysis {
                is_spam_risk: intel.security.spam_risk.unwrap_or(false),
                is_voip: intel.line_type == LineType::VoIP,
                reputation_score: intel
                    .security
                    .reputation_score
                    .unwrap_or(NEUTRAL_REPUTATION),
                risk_indicators: intel.security.risk_indicators.clone(),
                network_security: assess_network_security(intel.line_type),
            },
            osint_data: OsintData {
                breach_data: intel.osint.breaches.clone(),
                associated_emails: intel.osint.emails.clone(),
                websites: intel.osint.websites.clone(),
                social_accounts: intel.osint.social_accounts.clone(),
            },
            network_intelligence: NetworkIntelligence {
                network_status: presence.state,
                connection_status: presence.connection_status.clone(),
                last_seen: presence.last_seen,
                online_indicators: presence.online_indicators.clone(),
                network_technology: network_technology(intel.line_type).to_string(),
                potential_ip_ranges: carrier_ip_ranges(&carrier),
                messaging_apps: intel.presence.messaging_apps.clone(),
                voip_services: intel.presence.voip_services.clone(),
            },
        }
    }
}

/// Top-level error surface: replaces the report wholesale on failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
